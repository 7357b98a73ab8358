// Management plane isolation
use crate::index::ModelIndex;
use shared_types::{RuleKey, Violation};

/// Flags connections reaching a management system from a non-management one
pub fn check_admin_access(index: &ModelIndex<'_>) -> Vec<Violation> {
    index
        .connections()
        .filter(|conn| {
            index
                .endpoints(conn)
                .is_some_and(|(from, to)| to.is_management && !from.is_management)
        })
        .map(|conn| Violation::for_connection(RuleKey::AdminAccessViolation, &conn.id))
        .collect()
}
