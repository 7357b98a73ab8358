// Placement: a system may not sit in a zone graded below the system itself
use crate::index::ModelIndex;
use shared_types::{RuleKey, Violation};

pub fn check_location_violations(index: &ModelIndex<'_>) -> Vec<Violation> {
    index
        .systems()
        .filter(|system| {
            index
                .zone_of(system)
                .is_some_and(|zone| zone.grade.less_than(system.grade))
        })
        .map(|system| Violation::for_system(RuleKey::LocationViolations, &system.id))
        .collect()
}
