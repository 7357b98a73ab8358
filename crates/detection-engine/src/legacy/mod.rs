//! Legacy ingestion paths
//!
//! Older deployments fed detector input through a model checker and read its
//! relational instance export back. These adapters only rebuild the
//! canonical [`shared_types::Model`]; evaluation always goes through
//! [`crate::DetectionEngine`].

pub mod alloy;

pub use alloy::{clean_label, parse_instance};
