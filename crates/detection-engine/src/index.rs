//! Read-only id lookup over a [`Model`]
//!
//! Built once per evaluation and shared by every detector. A lookup that
//! misses is a dangling reference: it returns `None`, is logged at debug
//! level, and the caller skips that one relationship.

use std::collections::{HashMap, HashSet};

use shared_types::{Connection, Data, EntityId, Location, Model, System};
use tracing::debug;

pub struct ModelIndex<'a> {
    model: &'a Model,
    locations: HashMap<&'a EntityId, &'a Location>,
    data: HashMap<&'a EntityId, &'a Data>,
    systems: HashMap<&'a EntityId, &'a System>,
}

impl<'a> ModelIndex<'a> {
    pub fn new(model: &'a Model) -> Self {
        Self {
            model,
            locations: model.locations.iter().map(|l| (&l.id, l)).collect(),
            data: model.data.iter().map(|d| (&d.id, d)).collect(),
            systems: model.systems.iter().map(|s| (&s.id, s)).collect(),
        }
    }

    pub fn model(&self) -> &'a Model {
        self.model
    }

    pub fn systems(&self) -> impl Iterator<Item = &'a System> {
        self.model.systems.iter()
    }

    pub fn connections(&self) -> impl Iterator<Item = &'a Connection> {
        self.model.connections.iter()
    }

    pub fn location(&self, id: &EntityId) -> Option<&'a Location> {
        let found = self.locations.get(id).copied();
        if found.is_none() {
            debug!(location = %id, "dangling location reference skipped");
        }
        found
    }

    pub fn data(&self, id: &EntityId) -> Option<&'a Data> {
        let found = self.data.get(id).copied();
        if found.is_none() {
            debug!(data = %id, "dangling data reference skipped");
        }
        found
    }

    pub fn system(&self, id: &EntityId) -> Option<&'a System> {
        let found = self.systems.get(id).copied();
        if found.is_none() {
            debug!(system = %id, "dangling system reference skipped");
        }
        found
    }

    /// Zone enclosing a system
    pub fn zone_of(&self, system: &System) -> Option<&'a Location> {
        self.location(&system.loc)
    }

    /// Source and destination systems of a connection
    pub fn endpoints(&self, conn: &Connection) -> Option<(&'a System, &'a System)> {
        Some((self.system(&conn.from)?, self.system(&conn.to)?))
    }

    /// Zones of both endpoints of a connection
    pub fn endpoint_zones(&self, conn: &Connection) -> Option<(&'a Location, &'a Location)> {
        let (from, to) = self.endpoints(conn)?;
        Some((self.zone_of(from)?, self.zone_of(to)?))
    }

    /// Resolved data assets stored on a system, in `stores` order
    ///
    /// `stores` is a set; a repeated id is yielded once.
    pub fn stored_data<'s>(&'s self, system: &'a System) -> impl Iterator<Item = &'a Data> + 's {
        self.resolve_set(&system.stores)
    }

    /// Resolved data assets carried by a connection, in `carries` order
    pub fn carried_data<'s>(&'s self, conn: &'a Connection) -> impl Iterator<Item = &'a Data> + 's {
        self.resolve_set(&conn.carries)
    }

    fn resolve_set<'s>(&'s self, ids: &'a [EntityId]) -> impl Iterator<Item = &'a Data> + 's {
        let mut seen = HashSet::new();
        ids.iter()
            .filter(move |id| seen.insert(*id))
            .filter_map(move |id| self.data(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use shared_types::{Grade, ZoneType};

    #[test]
    fn test_resolves_known_ids() {
        let mut model = Model::default();
        model.locations.push(zone("z1", Grade::Open, ZoneType::Intranet));
        model.systems.push(system("s1", Grade::Open, "z1"));
        model.systems.push(system("s2", Grade::Open, "z1"));
        model.connections.push(connection("c1", "s1", "s2"));

        let index = ModelIndex::new(&model);
        let conn = &model.connections[0];
        let (from, to) = index.endpoints(conn).unwrap();
        assert_eq!(from.id.as_str(), "s1");
        assert_eq!(to.id.as_str(), "s2");
        let (zf, zt) = index.endpoint_zones(conn).unwrap();
        assert_eq!(zf.id, zt.id);
    }

    #[test]
    fn test_dangling_references_resolve_to_none() {
        let mut model = Model::default();
        model.systems.push(system("s1", Grade::Open, "missing-zone"));
        model.connections.push(connection("c1", "s1", "ghost"));

        let index = ModelIndex::new(&model);
        assert!(index.zone_of(&model.systems[0]).is_none());
        assert!(index.endpoints(&model.connections[0]).is_none());
    }

    #[test]
    fn test_stored_data_skips_unknown_ids() {
        let mut model = Model::default();
        model.data.push(data("d1", Grade::Sensitive));
        let mut sys = system("s1", Grade::Open, "z");
        sys.stores = vec!["ghost".into(), "d1".into()];
        model.systems.push(sys);

        let index = ModelIndex::new(&model);
        let ids: Vec<_> = index
            .stored_data(&model.systems[0])
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, vec!["d1"]);
    }

    #[test]
    fn test_repeated_ids_resolve_once() {
        let mut model = Model::default();
        model.data.push(data("d1", Grade::Sensitive));
        model.data.push(data("d2", Grade::Open));
        let mut conn = connection("c1", "s1", "s2");
        conn.carries = vec!["d2".into(), "d1".into(), "d2".into(), "d1".into()];
        model.connections.push(conn);

        let index = ModelIndex::new(&model);
        let ids: Vec<_> = index
            .carried_data(&model.connections[0])
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, vec!["d2", "d1"]);
    }
}
