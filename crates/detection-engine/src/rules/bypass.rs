// Boundary bypass: Internet-originated traffic must not land directly in the
// intranet without passing a cross-domain solution
use crate::index::ModelIndex;
use shared_types::{RuleKey, Violation, ZoneType};

pub fn check_bypass_violations(index: &ModelIndex<'_>) -> Vec<Violation> {
    let mut violations = Vec::new();

    for conn in index.connections() {
        let Some((from, to)) = index.endpoints(conn) else {
            continue;
        };
        let (Some(from_zone), Some(to_zone)) = (index.zone_of(from), index.zone_of(to)) else {
            continue;
        };

        if from_zone.kind == ZoneType::Internet && to_zone.kind == ZoneType::Intranet && !to.is_cds
        {
            violations.push(Violation::for_connection(
                RuleKey::BypassViolations,
                &conn.id,
            ));
        }
    }

    violations
}
