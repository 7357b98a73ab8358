// Content disarm and reconstruction for documents crossing zones
use crate::index::ModelIndex;
use shared_types::{FileType, RuleKey, Violation};

/// Flags documents carried between different zones over a connection without CDR
pub fn check_content_control_failures(index: &ModelIndex<'_>) -> Vec<Violation> {
    let mut violations = Vec::new();

    for conn in index.connections() {
        if conn.has_cdr {
            continue;
        }
        let Some((from, to)) = index.endpoints(conn) else {
            continue;
        };
        // Zone ids are compared as declared; they need not resolve
        if from.loc == to.loc {
            continue;
        }

        for data in index.carried_data(conn) {
            if data.file_type == FileType::Document {
                violations.push(Violation::for_carried_data(
                    RuleKey::ContentControlFailures,
                    &conn.id,
                    &data.id,
                ));
            }
        }
    }

    violations
}
