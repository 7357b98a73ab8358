use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::EntityId;

/// Names of the nine detector rules, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleKey {
    StorageViolations,
    FlowViolations,
    LocationViolations,
    BypassViolations,
    UnencryptedChannels,
    AuthIntegrityGaps,
    ContentControlFailures,
    UnencryptedStorage,
    AdminAccessViolation,
}

impl RuleKey {
    pub const ALL: [RuleKey; 9] = [
        RuleKey::StorageViolations,
        RuleKey::FlowViolations,
        RuleKey::LocationViolations,
        RuleKey::BypassViolations,
        RuleKey::UnencryptedChannels,
        RuleKey::AuthIntegrityGaps,
        RuleKey::ContentControlFailures,
        RuleKey::UnencryptedStorage,
        RuleKey::AdminAccessViolation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKey::StorageViolations => "StorageViolations",
            RuleKey::FlowViolations => "FlowViolations",
            RuleKey::LocationViolations => "LocationViolations",
            RuleKey::BypassViolations => "BypassViolations",
            RuleKey::UnencryptedChannels => "UnencryptedChannels",
            RuleKey::AuthIntegrityGaps => "AuthIntegrityGaps",
            RuleKey::ContentControlFailures => "ContentControlFailures",
            RuleKey::UnencryptedStorage => "UnencryptedStorage",
            RuleKey::AdminAccessViolation => "AdminAccessViolation",
        }
    }

    /// Human-readable title ("StorageViolations" -> "Storage Violations")
    pub fn title(&self) -> String {
        let mut out = String::new();
        for (i, ch) in self.as_str().chars().enumerate() {
            if i > 0 && ch.is_ascii_uppercase() {
                out.push(' ');
            }
            out.push(ch);
        }
        out
    }

    /// Fixed remediation guidance attached to every violation of this rule
    pub fn remediation(&self) -> &'static str {
        match self {
            RuleKey::StorageViolations => {
                "Move the data to a system cleared for its grade, or raise the system's grade \
                 and apply the matching controls."
            }
            RuleKey::FlowViolations => {
                "Stop sending this data to a lower-graded system, or route the flow through a \
                 certified cross-domain solution (CDS)."
            }
            RuleKey::LocationViolations => {
                "Relocate the system to a zone whose grade is at least the system's grade, or \
                 lower the system's grade."
            }
            RuleKey::BypassViolations => {
                "Internet traffic must not reach the intranet directly. Terminate the \
                 connection on a certified cross-domain solution (CDS) at the boundary."
            }
            RuleKey::UnencryptedChannels => {
                "Channels crossing Internet or wireless zones must be encrypted. Switch to \
                 HTTPS, SSH or a VPN tunnel and enable encryption."
            }
            RuleKey::AuthIntegrityGaps => {
                "Sensitive and classified systems require multi-factor authentication and \
                 registration in the asset inventory."
            }
            RuleKey::ContentControlFailures => {
                "Documents crossing zone boundaries must pass content disarm and \
                 reconstruction (CDR). Enable CDR on this connection."
            }
            RuleKey::UnencryptedStorage => {
                "Sensitive and classified data must be stored encrypted. Enable storage \
                 encryption on the system."
            }
            RuleKey::AdminAccessViolation => {
                "Management systems may only be reached from the management network. Restrict \
                 this connection to management hosts."
            }
        }
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rule finding
///
/// Only the entity fields the rule implicates are populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: RuleKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<EntityId>,
    pub remediation: String,
}

impl Violation {
    fn bare(kind: RuleKey) -> Self {
        Self {
            kind,
            system: None,
            connection: None,
            data: None,
            remediation: kind.remediation().to_string(),
        }
    }

    pub fn for_system(kind: RuleKey, system: &EntityId) -> Self {
        Self {
            system: Some(system.clone()),
            ..Self::bare(kind)
        }
    }

    pub fn for_connection(kind: RuleKey, connection: &EntityId) -> Self {
        Self {
            connection: Some(connection.clone()),
            ..Self::bare(kind)
        }
    }

    pub fn for_stored_data(kind: RuleKey, system: &EntityId, data: &EntityId) -> Self {
        Self {
            system: Some(system.clone()),
            data: Some(data.clone()),
            ..Self::bare(kind)
        }
    }

    pub fn for_carried_data(kind: RuleKey, connection: &EntityId, data: &EntityId) -> Self {
        Self {
            connection: Some(connection.clone()),
            data: Some(data.clone()),
            ..Self::bare(kind)
        }
    }
}

/// Result of one evaluation: every rule's findings plus the total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatReport {
    pub threats: BTreeMap<RuleKey, Vec<Violation>>,
    pub total_count: usize,
}

impl ThreatReport {
    /// Build a report from per-rule findings, computing the total
    pub fn from_rules(threats: BTreeMap<RuleKey, Vec<Violation>>) -> Self {
        let total_count = threats.values().map(Vec::len).sum();
        Self {
            threats,
            total_count,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.total_count == 0
    }

    /// Findings for one rule; empty if the rule found nothing
    pub fn violations(&self, rule: RuleKey) -> &[Violation] {
        self.threats.get(&rule).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Dashboard score: 100 with no findings, decaying as `100 / (1 + n/10)`
    pub fn security_score(&self) -> u32 {
        (100.0 / (1.0 + self.total_count as f64 * 0.1)).round() as u32
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
