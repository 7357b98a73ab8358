pub mod error;
pub mod grade;
pub mod model;
pub mod types;

pub use error::ModelError;
pub use grade::Grade;
pub use model::{
    AuthType, Connection, Data, EntityId, FileType, Isolation, Location, Model, Protocol, System,
    SystemType, ZoneType,
};
pub use types::{RuleKey, ThreatReport, Violation};
