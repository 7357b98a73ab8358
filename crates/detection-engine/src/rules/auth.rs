// Authentication integrity for protected systems
use crate::index::ModelIndex;
use shared_types::{AuthType, RuleKey, Violation};

/// Sensitive and classified systems need MFA and asset registration
pub fn check_auth_integrity_gaps(index: &ModelIndex<'_>) -> Vec<Violation> {
    index
        .systems()
        .filter(|system| {
            system.grade.is_protected()
                && (system.auth_type == AuthType::Single || !system.is_registered)
        })
        .map(|system| Violation::for_system(RuleKey::AuthIntegrityGaps, &system.id))
        .collect()
}
