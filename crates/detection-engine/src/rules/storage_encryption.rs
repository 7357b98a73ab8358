// Encryption at rest for protected data
use crate::index::ModelIndex;
use shared_types::{RuleKey, Violation};

pub fn check_unencrypted_storage(index: &ModelIndex<'_>) -> Vec<Violation> {
    let mut violations = Vec::new();

    for system in index.systems().filter(|s| !s.is_storage_encrypted) {
        for data in index.stored_data(system) {
            if data.grade.is_protected() {
                violations.push(Violation::for_stored_data(
                    RuleKey::UnencryptedStorage,
                    &system.id,
                    &data.id,
                ));
            }
        }
    }

    violations
}
