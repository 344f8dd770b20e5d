//! Waypoint record and identifier.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

use crate::core::EnuVector;

/// Opaque unique waypoint identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaypointId(Uuid);

impl WaypointId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for WaypointId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for WaypointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Uppercase hyphenated, same as the exported records
        write!(f, "{}", self.0.hyphenated().to_string().to_uppercase())
    }
}

/// A recorded location in the building.
///
/// `neighbors` maps a neighbor id to the planar offset that takes you from
/// this waypoint to that neighbor. Entries keep insertion order, which is
/// also the expansion order of path search.
///
/// Equality and hashing use `id` only.
#[derive(Clone, Debug)]
pub struct Waypoint {
    id: WaypointId,
    name: String,
    texts: BTreeSet<String>,
    neighbors: Vec<(WaypointId, EnuVector)>,
}

impl Waypoint {
    /// Create a waypoint with a fresh id and no neighbors
    pub(crate) fn new(name: impl Into<String>, texts: impl IntoIterator<Item = String>) -> Self {
        Self {
            id: WaypointId::generate(),
            name: name.into(),
            texts: texts.into_iter().collect(),
            neighbors: Vec::new(),
        }
    }

    /// Unique id
    pub fn id(&self) -> WaypointId {
        self.id
    }

    /// Human-readable label (not unique)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Texts recognized near this waypoint (sorted, deduplicated)
    pub fn texts(&self) -> &BTreeSet<String> {
        &self.texts
    }

    /// Neighbors in insertion order
    pub fn neighbors(&self) -> impl Iterator<Item = (WaypointId, EnuVector)> + '_ {
        self.neighbors.iter().copied()
    }

    /// Number of neighbors
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    /// Offset to a neighbor, if adjacent
    pub fn neighbor_offset(&self, neighbor: WaypointId) -> Option<EnuVector> {
        self.neighbors
            .iter()
            .find(|(id, _)| *id == neighbor)
            .map(|(_, offset)| *offset)
    }

    /// Insert or overwrite one direction of an edge.
    ///
    /// Only the graph calls this, always together with the reverse direction.
    pub(crate) fn set_neighbor(&mut self, neighbor: WaypointId, offset: EnuVector) {
        match self.neighbors.iter_mut().find(|(id, _)| *id == neighbor) {
            Some(entry) => entry.1 = offset,
            None => self.neighbors.push((neighbor, offset)),
        }
    }
}

impl PartialEq for Waypoint {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Waypoint {}

impl Hash for Waypoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = Waypoint::new("Lobby", Vec::new());
        let b = Waypoint::new("Lobby", Vec::new());
        assert_ne!(a, b);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_texts_are_deduplicated() {
        let wp = Waypoint::new(
            "BA2250",
            vec!["BA2250".to_string(), "Exit".to_string(), "BA2250".to_string()],
        );
        assert_eq!(wp.texts().len(), 2);
    }

    #[test]
    fn test_set_neighbor_overwrites() {
        let mut wp = Waypoint::new("A", Vec::new());
        let other = WaypointId::generate();
        wp.set_neighbor(other, EnuVector::planar(1.0, 0.0));
        wp.set_neighbor(other, EnuVector::planar(2.0, 0.0));
        assert_eq!(wp.degree(), 1);
        assert_eq!(wp.neighbor_offset(other), Some(EnuVector::planar(2.0, 0.0)));
    }

    #[test]
    fn test_display_is_uppercase() {
        let id = WaypointId::generate();
        let shown = id.to_string();
        assert_eq!(shown, shown.to_uppercase());
        assert_eq!(shown.len(), 36);
    }
}
