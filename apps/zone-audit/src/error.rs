//! Error types for the zone-audit front end

use std::path::PathBuf;

use detection_engine::AdapterError;
use shared_types::ModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid model: {0}")]
    Model(#[from] ModelError),

    #[error("Invalid Alloy instance: {0}")]
    Alloy(#[from] AdapterError),

    #[error("Cannot serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}
