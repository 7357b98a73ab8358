// Storage clearance: a system may only hold data at or below its own grade
use crate::index::ModelIndex;
use shared_types::{RuleKey, Violation};

/// Flags every (system, data) pair where the stored data outranks the system
pub fn check_storage_violations(index: &ModelIndex<'_>) -> Vec<Violation> {
    let mut violations = Vec::new();

    for system in index.systems() {
        for data in index.stored_data(system) {
            if system.grade.less_than(data.grade) {
                violations.push(Violation::for_stored_data(
                    RuleKey::StorageViolations,
                    &system.id,
                    &data.id,
                ));
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use shared_types::{Grade, Model};

    fn model_with(system_grade: Grade, data_grade: Grade) -> Model {
        let mut sys = system("100", system_grade, "1");
        sys.stores = vec!["10".into()];
        Model {
            data: vec![data("10", data_grade)],
            systems: vec![sys],
            ..Model::default()
        }
    }

    #[test]
    fn test_open_system_storing_classified_data() {
        let model = model_with(Grade::Open, Grade::Classified);
        let violations = check_storage_violations(&ModelIndex::new(&model));

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].system.as_ref().unwrap().as_str(), "100");
        assert_eq!(violations[0].data.as_ref().unwrap().as_str(), "10");
        assert!(violations[0].connection.is_none());
    }

    #[test]
    fn test_equal_grade_is_allowed() {
        let model = model_with(Grade::Sensitive, Grade::Sensitive);
        assert!(check_storage_violations(&ModelIndex::new(&model)).is_empty());
    }

    #[test]
    fn test_higher_system_grade_is_allowed() {
        let model = model_with(Grade::Classified, Grade::Open);
        assert!(check_storage_violations(&ModelIndex::new(&model)).is_empty());
    }

    #[test]
    fn test_one_violation_per_stored_asset() {
        let mut sys = system("s", Grade::Open, "z");
        sys.stores = vec!["a".into(), "b".into(), "c".into()];
        let model = Model {
            data: vec![
                data("a", Grade::Sensitive),
                data("b", Grade::Open),
                data("c", Grade::Classified),
            ],
            systems: vec![sys],
            ..Model::default()
        };

        let found: Vec<_> = check_storage_violations(&ModelIndex::new(&model))
            .into_iter()
            .filter_map(|v| v.data)
            .map(|d| d.to_string())
            .collect();
        assert_eq!(found, vec!["a", "c"]);
    }

    #[test]
    fn test_dangling_data_reference_is_skipped() {
        let mut sys = system("s", Grade::Open, "z");
        sys.stores = vec!["ghost".into()];
        let model = Model {
            systems: vec![sys],
            ..Model::default()
        };
        assert!(check_storage_violations(&ModelIndex::new(&model)).is_empty());
    }
}
