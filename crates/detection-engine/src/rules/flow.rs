// Flow clearance: data may only travel to systems cleared for it, unless the
// receiving system is a cross-domain solution
use crate::index::ModelIndex;
use shared_types::{RuleKey, Violation};

/// Flags every (connection, data) pair delivering data above the destination grade
pub fn check_flow_violations(index: &ModelIndex<'_>) -> Vec<Violation> {
    let mut violations = Vec::new();

    for conn in index.connections() {
        let Some(dest) = index.system(&conn.to) else {
            continue;
        };
        if dest.is_cds {
            continue;
        }

        for data in index.carried_data(conn) {
            if dest.grade.less_than(data.grade) {
                violations.push(Violation::for_carried_data(
                    RuleKey::FlowViolations,
                    &conn.id,
                    &data.id,
                ));
            }
        }
    }

    violations
}
