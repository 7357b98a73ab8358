//! Input loading for the supported document formats

use std::io::Read;
use std::path::Path;

use clap::ValueEnum;
use detection_engine::legacy;
use shared_types::Model;
use tracing::debug;

use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Canonical JSON model
    Canonical,
    /// Alloy analyzer XML instance export
    AlloyXml,
}

/// Read the whole input document; `-` reads stdin
pub fn read_source(path: &Path) -> Result<String, CliError> {
    let read_err = |source| CliError::Read {
        path: path.to_path_buf(),
        source,
    };

    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(read_err)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).map_err(read_err)
    }
}

pub fn parse_model(source: &str, format: InputFormat) -> Result<Model, CliError> {
    debug!(?format, bytes = source.len(), "parsing input");
    let model = match format {
        InputFormat::Canonical => Model::from_json(source)?,
        InputFormat::AlloyXml => legacy::parse_instance(source)?,
    };
    Ok(model)
}
