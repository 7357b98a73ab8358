//! Error types for the detection engine boundary

use shared_types::ModelError;
use thiserror::Error;

/// Failures while reading a model-checker instance export
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("No <instance> element found in export")]
    NoInstance,

    #[error("Unrecognized atom '{atom}' in relation '{field}'")]
    InvalidAtom { field: String, atom: String },

    #[error("Connection '{connection}' has no '{field}' relation")]
    MissingRelation {
        connection: String,
        field: &'static str,
    },
}

/// Any failure that stops an evaluation before a detector runs
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Adapter(#[from] AdapterError),
}
