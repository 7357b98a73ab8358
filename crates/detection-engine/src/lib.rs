//! Violation detection over a zoned network security model
//!
//! The engine indexes a [`Model`] once, runs every detector in the fixed
//! rule table against it and collects the findings per rule. Evaluation is
//! pure: no I/O, no state kept between calls.

pub mod error;
pub mod index;
pub mod legacy;
pub mod rules;

#[cfg(test)]
mod testing;

use std::collections::BTreeMap;

use shared_types::{Model, ThreatReport};
use tracing::debug;

pub use error::{AdapterError, EngineError};
pub use index::ModelIndex;

/// DetectionEngine entry point
pub struct DetectionEngine;

impl DetectionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Run all nine detectors once over the model
    ///
    /// Every rule gets an entry in the report, empty when clean.
    pub fn evaluate(&self, model: &Model) -> ThreatReport {
        let index = ModelIndex::new(model);
        let mut threats = BTreeMap::new();

        for (rule, detector) in rules::DETECTORS {
            let violations = detector(&index);
            debug!(rule = %rule, count = violations.len(), "detector finished");
            threats.insert(rule, violations);
        }

        ThreatReport::from_rules(threats)
    }

    /// Parse a canonical JSON model and evaluate it
    ///
    /// A malformed document fails as a whole before any detector runs.
    pub fn evaluate_json(&self, json: &str) -> Result<ThreatReport, EngineError> {
        let model = Model::from_json(json)?;
        Ok(self.evaluate(&model))
    }

    /// Rebuild the model from an Alloy instance export and evaluate it
    pub fn evaluate_alloy_xml(&self, xml: &str) -> Result<ThreatReport, EngineError> {
        let model = legacy::parse_instance(xml)?;
        Ok(self.evaluate(&model))
    }
}

impl Default for DetectionEngine {
    fn default() -> Self {
        Self::new()
    }
}
