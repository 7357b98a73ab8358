//! Boundary errors for model ingestion

use thiserror::Error;

use crate::model::EntityId;

/// Errors raised while turning caller input into a [`crate::Model`]
///
/// Dangling references are not errors; detectors skip them.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Malformed model: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: EntityId },
}
