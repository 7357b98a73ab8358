// Channel encryption on exposed segments (Internet, wireless)
use crate::index::ModelIndex;
use shared_types::{Protocol, RuleKey, Violation};

/// Flags connections touching an exposed zone that are cleartext or unencrypted
pub fn check_unencrypted_channels(index: &ModelIndex<'_>) -> Vec<Violation> {
    let mut violations = Vec::new();

    for conn in index.connections() {
        let Some((from_zone, to_zone)) = index.endpoint_zones(conn) else {
            continue;
        };

        let exposed = from_zone.kind.is_exposed() || to_zone.kind.is_exposed();
        let weak = conn.protocol == Protocol::ClearText || !conn.is_encrypted;

        if exposed && weak {
            violations.push(Violation::for_connection(
                RuleKey::UnencryptedChannels,
                &conn.id,
            ));
        }
    }

    violations
}
