//! Canonical network security model
//!
//! The JSON shape matches what the diagram converter produces: camelCase
//! attribute names, acronym flags spelled `isCDS`/`hasCDR`/`hasDLP`/`hasMDM`,
//! and integer or string ids. Every flag defaults to `false` and every enum
//! has a default, so a producer may omit any attribute.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ModelError;
use crate::grade::Grade;

/// Opaque caller-assigned identifier
///
/// Accepts either a JSON string or a JSON integer; both normalize to text so
/// `7` and `"7"` name the same entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Integer(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => EntityId(text),
            RawId::Integer(n) => EntityId(n.to_string()),
        })
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

/// Topological type of a network zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ZoneType {
    #[default]
    Internet,
    Intranet,
    #[serde(rename = "DMZ")]
    Dmz,
    Wireless,
    #[serde(rename = "PPP")]
    Ppp,
    Cloud,
}

impl ZoneType {
    /// Zones where traffic is exposed to untrusted parties
    pub fn is_exposed(&self) -> bool {
        matches!(self, ZoneType::Internet | ZoneType::Wireless)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FileType {
    #[default]
    Document,
    Executable,
    Media,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SystemType {
    #[default]
    Server,
    Terminal,
    SecurityDevice,
    NetworkDevice,
    Mobile,
    #[serde(rename = "WirelessAP")]
    WirelessAp,
    #[serde(rename = "SaaS")]
    Saas,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AuthType {
    #[default]
    Single,
    #[serde(rename = "MFA")]
    Mfa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Isolation {
    #[default]
    None,
    #[serde(rename = "VDI")]
    Vdi,
    #[serde(rename = "RBI")]
    Rbi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Protocol {
    #[default]
    #[serde(rename = "HTTPS")]
    Https,
    #[serde(rename = "SSH")]
    Ssh,
    #[serde(rename = "VPN_Tunnel")]
    VpnTunnel,
    // Diagram users type plain "HTTP"
    #[serde(alias = "HTTP")]
    ClearText,
    #[serde(rename = "SQL")]
    Sql,
}

/// A network zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: EntityId,
    #[serde(default)]
    pub grade: Grade,
    #[serde(rename = "type", default)]
    pub kind: ZoneType,
}

/// A data asset that can be stored or transmitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Data {
    pub id: EntityId,
    #[serde(default)]
    pub grade: Grade,
    #[serde(default)]
    pub file_type: FileType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct System {
    pub id: EntityId,
    #[serde(default)]
    pub grade: Grade,
    #[serde(alias = "location", default)]
    pub loc: EntityId,
    #[serde(rename = "type", default)]
    pub kind: SystemType,
    #[serde(default)]
    pub auth_type: AuthType,
    /// Certified cross-domain solution, allowed to bridge grade boundaries
    #[serde(rename = "isCDS", default)]
    pub is_cds: bool,
    #[serde(default)]
    pub is_registered: bool,
    #[serde(default)]
    pub is_storage_encrypted: bool,
    #[serde(default)]
    pub is_management: bool,
    #[serde(default)]
    pub isolation: Isolation,
    #[serde(rename = "hasMDM", default)]
    pub has_mdm: bool,
    #[serde(default)]
    pub stores: Vec<EntityId>,
}

impl System {
    /// A system with every attribute at its default
    pub fn new(id: impl Into<EntityId>, loc: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            grade: Grade::default(),
            loc: loc.into(),
            kind: SystemType::default(),
            auth_type: AuthType::default(),
            is_cds: false,
            is_registered: false,
            is_storage_encrypted: false,
            is_management: false,
            isolation: Isolation::default(),
            has_mdm: false,
            stores: Vec::new(),
        }
    }
}

/// A directed channel between two systems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Empty when the producer omitted it; see [`Model::normalize`]
    #[serde(default)]
    pub id: EntityId,
    pub from: EntityId,
    pub to: EntityId,
    #[serde(default)]
    pub carries: Vec<EntityId>,
    #[serde(default)]
    pub protocol: Protocol,
    #[serde(default)]
    pub is_encrypted: bool,
    #[serde(rename = "hasCDR", default)]
    pub has_cdr: bool,
    #[serde(rename = "hasDLP", default)]
    pub has_dlp: bool,
    #[serde(default)]
    pub has_anti_virus: bool,
}

impl Connection {
    /// An HTTPS connection with every control flag off
    pub fn new(
        id: impl Into<EntityId>,
        from: impl Into<EntityId>,
        to: impl Into<EntityId>,
    ) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            carries: Vec::new(),
            protocol: Protocol::default(),
            is_encrypted: false,
            has_cdr: false,
            has_dlp: false,
            has_anti_virus: false,
        }
    }
}

/// The aggregate evaluated by the detection engine
///
/// All four arrays are required in JSON; an empty model is four empty arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub locations: Vec<Location>,
    pub data: Vec<Data>,
    pub systems: Vec<System>,
    pub connections: Vec<Connection>,
}

impl Model {
    /// Parse and normalize a canonical JSON model
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let model: Model = serde_json::from_str(json)?;
        model.normalize()
    }

    /// Same as [`Model::from_json`] for an already-parsed JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self, ModelError> {
        let model: Model = serde_json::from_value(value)?;
        model.normalize()
    }

    /// Fill omitted connection ids with the connection's array position,
    /// collapse repeated `stores`/`carries` entries and reject duplicate ids
    /// within any entity kind.
    pub fn normalize(mut self) -> Result<Self, ModelError> {
        for (index, conn) in self.connections.iter_mut().enumerate() {
            if conn.id.is_empty() {
                conn.id = EntityId(index.to_string());
            }
            dedup_ids(&mut conn.carries);
        }
        for system in &mut self.systems {
            dedup_ids(&mut system.stores);
        }

        ensure_unique("location", self.locations.iter().map(|l| &l.id))?;
        ensure_unique("data", self.data.iter().map(|d| &d.id))?;
        ensure_unique("system", self.systems.iter().map(|s| &s.id))?;
        ensure_unique("connection", self.connections.iter().map(|c| &c.id))?;

        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
            && self.data.is_empty()
            && self.systems.is_empty()
            && self.connections.is_empty()
    }

    /// Total number of entities across all four kinds
    pub fn entity_count(&self) -> usize {
        self.locations.len() + self.data.len() + self.systems.len() + self.connections.len()
    }
}

/// Keep the first occurrence of each id, in order
fn dedup_ids(ids: &mut Vec<EntityId>) {
    let mut seen = HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));
}

fn ensure_unique<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a EntityId>,
) -> Result<(), ModelError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ModelError::DuplicateId {
                kind,
                id: id.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let json = r#"{
            "locations": [{"id": 1}],
            "data": [{"id": 10}],
            "systems": [{"id": 100, "loc": 1}],
            "connections": [{"id": 5, "from": 100, "to": 100}]
        }"#;
        let model = Model::from_json(json).unwrap();

        assert_eq!(model.locations[0].grade, Grade::Open);
        assert_eq!(model.locations[0].kind, ZoneType::Internet);
        assert_eq!(model.data[0].file_type, FileType::Document);

        let sys = &model.systems[0];
        assert_eq!(sys.auth_type, AuthType::Single);
        assert_eq!(sys.isolation, Isolation::None);
        assert_eq!(sys.kind, SystemType::Server);
        assert!(!sys.is_cds && !sys.is_registered && !sys.is_storage_encrypted);
        assert!(sys.stores.is_empty());

        let conn = &model.connections[0];
        assert_eq!(conn.protocol, Protocol::Https);
        assert!(!conn.is_encrypted && !conn.has_cdr && !conn.has_dlp && !conn.has_anti_virus);
    }

    #[test]
    fn test_integer_and_string_ids_are_equivalent() {
        let json = r#"{
            "locations": [{"id": "1"}],
            "data": [],
            "systems": [{"id": 100, "loc": 1}],
            "connections": []
        }"#;
        let model = Model::from_json(json).unwrap();
        assert_eq!(model.systems[0].loc, model.locations[0].id);
        assert_eq!(model.systems[0].id.as_str(), "100");
    }

    #[test]
    fn test_acronym_flags_keep_upper_case_spelling() {
        let json = r#"{
            "locations": [],
            "data": [],
            "systems": [{"id": "s", "loc": "z", "isCDS": true, "hasMDM": true, "authType": "MFA", "type": "WirelessAP", "isolation": "VDI"}],
            "connections": [{"id": "c", "from": "s", "to": "s", "hasCDR": true, "hasDLP": true, "protocol": "VPN_Tunnel"}]
        }"#;
        let model = Model::from_json(json).unwrap();
        let sys = &model.systems[0];
        assert!(sys.is_cds && sys.has_mdm);
        assert_eq!(sys.auth_type, AuthType::Mfa);
        assert_eq!(sys.kind, SystemType::WirelessAp);
        assert_eq!(sys.isolation, Isolation::Vdi);
        let conn = &model.connections[0];
        assert!(conn.has_cdr && conn.has_dlp);
        assert_eq!(conn.protocol, Protocol::VpnTunnel);
    }

    #[test]
    fn test_http_alias_reads_as_cleartext() {
        let json = r#"{"locations": [], "data": [], "systems": [],
            "connections": [{"id": 1, "from": 1, "to": 2, "protocol": "HTTP"}]}"#;
        let model = Model::from_json(json).unwrap();
        assert_eq!(model.connections[0].protocol, Protocol::ClearText);
    }

    #[test]
    fn test_location_alias_for_loc() {
        let json = r#"{"locations": [], "data": [], "connections": [],
            "systems": [{"id": 1, "location": 3}]}"#;
        let model = Model::from_json(json).unwrap();
        assert_eq!(model.systems[0].loc.as_str(), "3");
    }

    #[test]
    fn test_missing_connection_id_uses_position() {
        let json = r#"{"locations": [], "data": [], "systems": [],
            "connections": [{"id": "a", "from": 1, "to": 2}, {"from": 2, "to": 1}]}"#;
        let model = Model::from_json(json).unwrap();
        assert_eq!(model.connections[1].id.as_str(), "1");
    }

    #[test]
    fn test_missing_array_is_malformed() {
        let json = r#"{"locations": [], "data": [], "systems": []}"#;
        let err = Model::from_json(json).unwrap_err();
        assert!(matches!(err, ModelError::Malformed(_)));
    }

    #[test]
    fn test_wrong_type_is_malformed() {
        let json = r#"{"locations": [], "data": [], "connections": [],
            "systems": [{"id": 1, "isCDS": "yes"}]}"#;
        assert!(matches!(
            Model::from_json(json),
            Err(ModelError::Malformed(_))
        ));
    }

    #[test]
    fn test_unknown_enum_value_is_malformed() {
        let json = r#"{"locations": [{"id": 1, "grade": "TopSecret"}],
            "data": [], "systems": [], "connections": []}"#;
        assert!(Model::from_json(json).is_err());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let json = r#"{"locations": [], "connections": [], "systems": [],
            "data": [{"id": 1}, {"id": "1"}]}"#;
        match Model::from_json(json) {
            Err(ModelError::DuplicateId { kind, id }) => {
                assert_eq!(kind, "data");
                assert_eq!(id.as_str(), "1");
            }
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }

    #[test]
    fn test_repeated_stores_and_carries_collapse() {
        let json = r#"{"locations": [], "data": [{"id": 10}, {"id": 11}],
            "systems": [{"id": 1, "loc": 1, "stores": [11, 10, 11, "10"]}],
            "connections": [{"id": 5, "from": 1, "to": 1, "carries": [10, "10", 10]}]}"#;
        let model = Model::from_json(json).unwrap();

        let stores: Vec<_> = model.systems[0].stores.iter().map(EntityId::as_str).collect();
        assert_eq!(stores, vec!["11", "10"]);
        let carries: Vec<_> = model.connections[0].carries.iter().map(EntityId::as_str).collect();
        assert_eq!(carries, vec!["10"]);
    }

    #[test]
    fn test_same_id_across_kinds_allowed() {
        let json = r#"{"locations": [{"id": 1}], "data": [{"id": 1}],
            "systems": [{"id": 1, "loc": 1}], "connections": [{"id": 1, "from": 1, "to": 1}]}"#;
        let model = Model::from_json(json).unwrap();
        assert_eq!(model.entity_count(), 4);
    }

    #[test]
    fn test_empty_model() {
        let model =
            Model::from_json(r#"{"locations":[],"data":[],"systems":[],"connections":[]}"#)
                .unwrap();
        assert!(model.is_empty());
    }
}
