//! Detector rules
//!
//! Each rule is a pure scan of the indexed model returning its findings in
//! input order. Rules never observe each other's output, so the engine may
//! run them in any order.

pub mod admin_access;
pub mod auth;
pub mod bypass;
pub mod channels;
pub mod content;
pub mod flow;
pub mod location;
pub mod storage;
pub mod storage_encryption;

use crate::index::ModelIndex;
use shared_types::{RuleKey, Violation};

pub use admin_access::check_admin_access;
pub use auth::check_auth_integrity_gaps;
pub use bypass::check_bypass_violations;
pub use channels::check_unencrypted_channels;
pub use content::check_content_control_failures;
pub use flow::check_flow_violations;
pub use location::check_location_violations;
pub use storage::check_storage_violations;
pub use storage_encryption::check_unencrypted_storage;

/// Signature shared by every detector
pub type Detector = fn(&ModelIndex<'_>) -> Vec<Violation>;

/// The fixed rule table, one entry per [`RuleKey`]
pub const DETECTORS: [(RuleKey, Detector); 9] = [
    (RuleKey::StorageViolations, check_storage_violations),
    (RuleKey::FlowViolations, check_flow_violations),
    (RuleKey::LocationViolations, check_location_violations),
    (RuleKey::BypassViolations, check_bypass_violations),
    (RuleKey::UnencryptedChannels, check_unencrypted_channels),
    (RuleKey::AuthIntegrityGaps, check_auth_integrity_gaps),
    (RuleKey::ContentControlFailures, check_content_control_failures),
    (RuleKey::UnencryptedStorage, check_unencrypted_storage),
    (RuleKey::AdminAccessViolation, check_admin_access),
];
