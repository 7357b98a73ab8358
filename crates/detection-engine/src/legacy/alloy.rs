//! Alloy instance export adapter
//!
//! Reads the XML instance written by the Alloy analyzer for a generated
//! model and reconstructs the canonical model from its attribute relations.
//! Relations of the form `<field label="grade">` hold `<tuple>`s of atoms
//! such as `n2sf_base/System100$0`; atom labels are normalized with
//! [`clean_label`] and entity atoms are recognized by their kind prefix.
//!
//! Result relations (`Find*`, headed by the `AnalysisResult` atom) are
//! ignored. The checker's own verdicts are never trusted here.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use shared_types::{Connection, Data, EntityId, Location, Model, System};
use tracing::debug;

use crate::error::AdapterError;

lazy_static! {
    static ref INSTANCE_PATTERN: Regex = Regex::new(r"<instance\b").unwrap();

    /// A relation block and its body
    static ref FIELD_PATTERN: Regex =
        Regex::new(r#"(?s)<field\b[^>]*?\blabel="([^"]+)"[^>]*>(.*?)</field>"#).unwrap();

    static ref TUPLE_PATTERN: Regex = Regex::new(r"(?s)<tuple\b[^>]*>(.*?)</tuple>").unwrap();

    static ref ATOM_PATTERN: Regex = Regex::new(r#"<atom\b[^>]*?\blabel="([^"]+)""#).unwrap();
}

const RESULT_ATOM: &str = "AnalysisResult";

/// Strip the module path prefix and the `$n` atom suffix
///
/// `n2sf_rules/n2sf_base/System99$0` becomes `System99`.
pub fn clean_label(label: &str) -> &str {
    let name = label.rsplit('/').next().unwrap_or(label);
    name.split('$').next().unwrap_or(name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Atom<'a> {
    Location(&'a str),
    Data(&'a str),
    System(&'a str),
    Connection(&'a str),
    Value(&'a str),
}

impl<'a> Atom<'a> {
    fn classify(label: &'a str) -> Self {
        let entity = |prefix: &str| label.strip_prefix(prefix).filter(|id| !id.is_empty());

        if let Some(id) = entity("Connection") {
            Atom::Connection(id)
        } else if let Some(id) = entity("Location") {
            Atom::Location(id)
        } else if let Some(id) = entity("System") {
            Atom::System(id)
        } else if let Some(id) = entity("Data") {
            Atom::Data(id)
        } else {
            Atom::Value(label)
        }
    }
}

/// Rebuild a canonical model from an Alloy XML instance
///
/// Entities keep the order in which they first appear in the export.
pub fn parse_instance(xml: &str) -> Result<Model, AdapterError> {
    if !INSTANCE_PATTERN.is_match(xml) {
        return Err(AdapterError::NoInstance);
    }

    let mut builder = InstanceBuilder::default();

    for field in FIELD_PATTERN.captures_iter(xml) {
        let relation = &field[1];
        if relation.starts_with("Find") {
            continue;
        }

        for tuple in TUPLE_PATTERN.captures_iter(&field[2]) {
            let atoms: Vec<&str> = ATOM_PATTERN
                .captures_iter(&tuple[1])
                .filter_map(|c| c.get(1))
                .map(|m| clean_label(m.as_str()))
                .collect();

            match atoms.as_slice() {
                [RESULT_ATOM, ..] => continue,
                [subject, value] => builder.apply(relation, subject, value)?,
                _ => debug!(relation, arity = atoms.len(), "non-binary tuple ignored"),
            }
        }
    }

    builder.finish()
}

#[derive(Default)]
struct InstanceBuilder {
    locations: Vec<Location>,
    data: Vec<Data>,
    systems: Vec<System>,
    connections: Vec<Connection>,
    positions: HashMap<(char, String), usize>,
}

impl InstanceBuilder {
    fn slot(&mut self, kind: char, id: &str) -> (usize, bool) {
        let next = match kind {
            'L' => self.locations.len(),
            'D' => self.data.len(),
            'S' => self.systems.len(),
            _ => self.connections.len(),
        };
        let key = (kind, id.to_string());
        match self.positions.get(&key) {
            Some(&pos) => (pos, false),
            None => {
                self.positions.insert(key, next);
                (next, true)
            }
        }
    }

    fn location(&mut self, id: &str) -> &mut Location {
        let (pos, fresh) = self.slot('L', id);
        if fresh {
            self.locations.push(Location {
                id: id.into(),
                grade: Default::default(),
                kind: Default::default(),
            });
        }
        &mut self.locations[pos]
    }

    fn data(&mut self, id: &str) -> &mut Data {
        let (pos, fresh) = self.slot('D', id);
        if fresh {
            self.data.push(Data {
                id: id.into(),
                grade: Default::default(),
                file_type: Default::default(),
            });
        }
        &mut self.data[pos]
    }

    fn system(&mut self, id: &str) -> &mut System {
        let (pos, fresh) = self.slot('S', id);
        if fresh {
            self.systems.push(System::new(id, EntityId::default()));
        }
        &mut self.systems[pos]
    }

    fn connection(&mut self, id: &str) -> &mut Connection {
        let (pos, fresh) = self.slot('C', id);
        if fresh {
            self.connections
                .push(Connection::new(id, EntityId::default(), EntityId::default()));
        }
        &mut self.connections[pos]
    }

    fn apply(&mut self, relation: &str, subject: &str, value: &str) -> Result<(), AdapterError> {
        let value_atom = Atom::classify(value);

        match Atom::classify(subject) {
            Atom::Location(id) => {
                let location = self.location(id);
                match relation {
                    "grade" => location.grade = enum_atom(relation, value)?,
                    "type" => location.kind = enum_atom(relation, value)?,
                    _ => ignored(relation),
                }
            }
            Atom::Data(id) => {
                let data = self.data(id);
                match relation {
                    "grade" => data.grade = enum_atom(relation, value)?,
                    "fileType" => data.file_type = enum_atom(relation, value)?,
                    _ => ignored(relation),
                }
            }
            Atom::System(id) => {
                let system = self.system(id);
                match relation {
                    "grade" => system.grade = enum_atom(relation, value)?,
                    "type" => system.kind = enum_atom(relation, value)?,
                    "authType" => system.auth_type = enum_atom(relation, value)?,
                    "isolation" => system.isolation = enum_atom(relation, value)?,
                    "isCDS" => system.is_cds = bool_atom(relation, value)?,
                    "isRegistered" => system.is_registered = bool_atom(relation, value)?,
                    "isStorageEncrypted" => {
                        system.is_storage_encrypted = bool_atom(relation, value)?
                    }
                    "isManagement" => system.is_management = bool_atom(relation, value)?,
                    "hasMDM" => system.has_mdm = bool_atom(relation, value)?,
                    "loc" => match value_atom {
                        Atom::Location(loc) => system.loc = loc.into(),
                        _ => return Err(invalid(relation, value)),
                    },
                    "stores" => match value_atom {
                        Atom::Data(data) => system.stores.push(data.into()),
                        _ => return Err(invalid(relation, value)),
                    },
                    _ => ignored(relation),
                }
            }
            Atom::Connection(id) => {
                let conn = self.connection(id);
                match relation {
                    "protocol" => conn.protocol = enum_atom(relation, value)?,
                    "isEncrypted" => conn.is_encrypted = bool_atom(relation, value)?,
                    "hasCDR" => conn.has_cdr = bool_atom(relation, value)?,
                    "hasDLP" => conn.has_dlp = bool_atom(relation, value)?,
                    "hasAntiVirus" => conn.has_anti_virus = bool_atom(relation, value)?,
                    "from" | "to" => {
                        let Atom::System(target) = value_atom else {
                            return Err(invalid(relation, value));
                        };
                        if relation == "from" {
                            conn.from = target.into();
                        } else {
                            conn.to = target.into();
                        }
                    }
                    "carries" => match value_atom {
                        Atom::Data(data) => conn.carries.push(data.into()),
                        _ => return Err(invalid(relation, value)),
                    },
                    _ => ignored(relation),
                }
            }
            Atom::Value(_) => ignored(relation),
        }

        Ok(())
    }

    fn finish(self) -> Result<Model, AdapterError> {
        for conn in &self.connections {
            for (field, endpoint) in [("from", &conn.from), ("to", &conn.to)] {
                if endpoint.is_empty() {
                    return Err(AdapterError::MissingRelation {
                        connection: conn.id.to_string(),
                        field,
                    });
                }
            }
        }

        Ok(Model {
            locations: self.locations,
            data: self.data,
            systems: self.systems,
            connections: self.connections,
        })
    }
}

fn ignored(relation: &str) {
    debug!(relation, "relation not part of the canonical model");
}

fn invalid(relation: &str, atom: &str) -> AdapterError {
    AdapterError::InvalidAtom {
        field: relation.to_string(),
        atom: atom.to_string(),
    }
}

/// Enum atoms share their names with the JSON model
fn enum_atom<T: DeserializeOwned>(relation: &str, atom: &str) -> Result<T, AdapterError> {
    serde_json::from_value(serde_json::Value::String(atom.to_string()))
        .map_err(|_| invalid(relation, atom))
}

fn bool_atom(relation: &str, atom: &str) -> Result<bool, AdapterError> {
    match atom {
        "True" => Ok(true),
        "False" => Ok(false),
        _ => Err(invalid(relation, atom)),
    }
}
