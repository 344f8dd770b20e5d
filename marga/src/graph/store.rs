//! Waypoint graph storage.
//!
//! Waypoints live in a single arena (`Vec<Waypoint>`) indexed by id. Edges are
//! stored on both endpoints as id → offset entries, never as references, so
//! the graph is the only owner of waypoint records.

use log::{debug, info};
use std::collections::{HashMap, HashSet, VecDeque};

use super::waypoint::{Waypoint, WaypointId};
use crate::core::EnuVector;
use crate::error::{Error, Result};

/// Edge back to an existing waypoint, supplied when recording a new one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackEdge {
    /// Existing waypoint (usually the previously recorded one)
    pub neighbor: WaypointId,
    /// Offset from `neighbor` to the new waypoint
    pub offset: EnuVector,
}

impl BackEdge {
    /// Create a back edge
    pub fn new(neighbor: WaypointId, offset: EnuVector) -> Self {
        Self { neighbor, offset }
    }
}

/// One unique text hit from [`WaypointGraph::search_texts`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextMatch {
    /// Matched text
    pub text: String,
    /// First waypoint (in insertion order) carrying the text
    pub waypoint: WaypointId,
}

/// Graph of recorded waypoints.
///
/// Invariant: for every edge `A → B` with offset `v` there is an edge
/// `B → A` with offset `-v`. Every mutating method writes both directions
/// before returning.
#[derive(Clone, Debug, Default)]
pub struct WaypointGraph {
    waypoints: Vec<Waypoint>,
    index: HashMap<WaypointId, usize>,
}

impl WaypointGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of waypoints
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// True if the graph has no waypoints
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.waypoints.iter().map(Waypoint::degree).sum::<usize>() / 2
    }

    /// Is this id in the graph?
    pub fn contains(&self, id: WaypointId) -> bool {
        self.index.contains_key(&id)
    }

    /// Look up a waypoint
    pub fn get(&self, id: WaypointId) -> Option<&Waypoint> {
        self.index.get(&id).map(|&i| &self.waypoints[i])
    }

    /// Waypoints in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Waypoint> {
        self.waypoints.iter()
    }

    /// First recorded waypoint
    pub fn first_id(&self) -> Option<WaypointId> {
        self.waypoints.first().map(Waypoint::id)
    }

    /// First waypoint (insertion order) whose name matches exactly
    pub fn find_by_name(&self, name: &str) -> Option<WaypointId> {
        self.waypoints
            .iter()
            .find(|wp| wp.name() == name)
            .map(Waypoint::id)
    }

    /// Record a new waypoint.
    ///
    /// With a back edge, the previous waypoint gets `+offset` toward the new
    /// one and the new one gets `-offset` back. Only the planar part of the
    /// offset is stored.
    ///
    /// # Errors
    /// [`Error::UnknownNeighbor`] if the back edge references a missing id.
    /// The graph is left unchanged.
    pub fn add_waypoint(
        &mut self,
        name: impl Into<String>,
        texts: impl IntoIterator<Item = String>,
        back_edge: Option<BackEdge>,
    ) -> Result<WaypointId> {
        if let Some(edge) = back_edge
            && !self.contains(edge.neighbor)
        {
            return Err(Error::UnknownNeighbor(edge.neighbor));
        }

        let waypoint = Waypoint::new(name, texts);
        let id = waypoint.id();
        info!(
            "Recorded waypoint '{}' ({} texts) as {}",
            waypoint.name(),
            waypoint.texts().len(),
            id
        );
        self.index.insert(id, self.waypoints.len());
        self.waypoints.push(waypoint);

        if let Some(edge) = back_edge {
            self.write_edge(edge.neighbor, id, edge.offset);
        }

        Ok(id)
    }

    /// Add or overwrite the edge pair between two existing waypoints.
    ///
    /// `offset` goes from `from` to `to`.
    pub fn connect(&mut self, from: WaypointId, to: WaypointId, offset: EnuVector) -> Result<()> {
        if from == to {
            return Err(Error::SelfEdge(from));
        }
        for id in [from, to] {
            if !self.contains(id) {
                return Err(Error::UnknownNeighbor(id));
            }
        }
        self.write_edge(from, to, offset);
        Ok(())
    }

    /// Planar offset to move from `from` to `to`.
    ///
    /// # Errors
    /// [`Error::NotAdjacent`] if there is no direct edge (or either id is
    /// missing).
    pub fn neighbor_offset(&self, from: WaypointId, to: WaypointId) -> Result<EnuVector> {
        self.get(from)
            .and_then(|wp| wp.neighbor_offset(to))
            .ok_or(Error::NotAdjacent { from, to })
    }

    /// Remove every waypoint and edge
    pub fn reset(&mut self) {
        info!("Clearing waypoint graph ({} waypoints)", self.len());
        self.waypoints.clear();
        self.index.clear();
    }

    /// Case-insensitive substring search over waypoint texts.
    ///
    /// Each distinct text appears once, attributed to the first waypoint that
    /// carries it. An empty query lists every text.
    pub fn search_texts(&self, query: &str) -> Vec<TextMatch> {
        let needle = query.trim().to_lowercase();
        let mut seen = HashSet::new();
        let mut results = Vec::new();

        for wp in &self.waypoints {
            for text in wp.texts() {
                if !needle.is_empty() && !text.to_lowercase().contains(&needle) {
                    continue;
                }
                if seen.insert(text.as_str()) {
                    results.push(TextMatch {
                        text: text.clone(),
                        waypoint: wp.id(),
                    });
                }
            }
        }
        results
    }

    /// Absolute planar positions for every waypoint.
    ///
    /// The graph only stores relative offsets, so positions are accumulated
    /// breadth-first from the first waypoint of each connected component,
    /// which sits at the origin. Loops that do not close exactly keep the
    /// position from the first visit.
    pub fn layout_positions(&self) -> HashMap<WaypointId, EnuVector> {
        let mut positions = HashMap::with_capacity(self.len());
        let mut queue = VecDeque::new();

        for root in &self.waypoints {
            if positions.contains_key(&root.id()) {
                continue;
            }
            positions.insert(root.id(), EnuVector::ZERO);
            queue.push_back(root.id());

            while let Some(current) = queue.pop_front() {
                let base = positions[&current];
                let Some(wp) = self.get(current) else {
                    continue;
                };
                for (neighbor, offset) in wp.neighbors() {
                    if !positions.contains_key(&neighbor) {
                        positions.insert(neighbor, base + offset);
                        queue.push_back(neighbor);
                    }
                }
            }
        }
        positions
    }

    /// Write both directions of an edge. Both ids must exist.
    fn write_edge(&mut self, from: WaypointId, to: WaypointId, offset: EnuVector) {
        let planar = offset.drop_elevation();
        let (Some(&i), Some(&j)) = (self.index.get(&from), self.index.get(&to)) else {
            return;
        };
        self.waypoints[i].set_neighbor(to, planar);
        self.waypoints[j].set_neighbor(from, -planar);
        debug!(
            "Edge {} -> {}: ({:.2}, {:.2})",
            from, to, planar.east, planar.north
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_back_edge_is_antisymmetric() {
        let mut graph = WaypointGraph::new();
        let a = graph.add_waypoint("A", Vec::new(), None).unwrap();
        let b = graph
            .add_waypoint(
                "B",
                Vec::new(),
                Some(BackEdge::new(a, EnuVector::planar(3.0, 4.0))),
            )
            .unwrap();

        assert_eq!(graph.neighbor_offset(a, b).unwrap(), EnuVector::planar(3.0, 4.0));
        assert_eq!(graph.neighbor_offset(b, a).unwrap(), EnuVector::planar(-3.0, -4.0));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_back_edge_drops_elevation() {
        let mut graph = WaypointGraph::new();
        let a = graph.add_waypoint("A", Vec::new(), None).unwrap();
        let b = graph
            .add_waypoint(
                "B",
                Vec::new(),
                Some(BackEdge::new(a, EnuVector::new(1.0, 2.0, 0.7))),
            )
            .unwrap();
        assert_eq!(graph.neighbor_offset(a, b).unwrap().up, 0.0);
        assert_eq!(graph.neighbor_offset(b, a).unwrap().up, 0.0);
    }

    #[test]
    fn test_unknown_neighbor_leaves_graph_unchanged() {
        let mut graph = WaypointGraph::new();
        graph.add_waypoint("A", Vec::new(), None).unwrap();

        let missing = WaypointId::generate();
        let result = graph.add_waypoint(
            "B",
            Vec::new(),
            Some(BackEdge::new(missing, EnuVector::planar(1.0, 0.0))),
        );

        assert!(matches!(result, Err(Error::UnknownNeighbor(id)) if id == missing));
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_not_adjacent() {
        let mut graph = WaypointGraph::new();
        let a = graph.add_waypoint("A", Vec::new(), None).unwrap();
        let b = graph.add_waypoint("B", Vec::new(), None).unwrap();
        assert!(matches!(
            graph.neighbor_offset(a, b),
            Err(Error::NotAdjacent { .. })
        ));
    }

    #[test]
    fn test_connect_overwrites_both_directions() {
        let mut graph = WaypointGraph::new();
        let a = graph.add_waypoint("A", Vec::new(), None).unwrap();
        let b = graph
            .add_waypoint(
                "B",
                Vec::new(),
                Some(BackEdge::new(a, EnuVector::planar(1.0, 1.0))),
            )
            .unwrap();

        graph.connect(b, a, EnuVector::planar(-2.0, 0.5)).unwrap();

        assert_eq!(graph.neighbor_offset(b, a).unwrap(), EnuVector::planar(-2.0, 0.5));
        assert_eq!(graph.neighbor_offset(a, b).unwrap(), EnuVector::planar(2.0, -0.5));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_connect_rejects_self_edge() {
        let mut graph = WaypointGraph::new();
        let a = graph.add_waypoint("A", Vec::new(), None).unwrap();
        assert!(matches!(
            graph.connect(a, a, EnuVector::ZERO),
            Err(Error::SelfEdge(_))
        ));
    }

    #[test]
    fn test_reset() {
        let mut graph = WaypointGraph::new();
        let a = graph.add_waypoint("A", Vec::new(), None).unwrap();
        graph.reset();
        assert!(graph.is_empty());
        assert!(!graph.contains(a));
        assert!(graph.first_id().is_none());
    }

    #[test]
    fn test_search_texts() {
        let mut graph = WaypointGraph::new();
        let a = graph
            .add_waypoint("A", texts(&["BA2250", "Washroom"]), None)
            .unwrap();
        let b = graph
            .add_waypoint("B", texts(&["BA2270", "washroom", "BA2250"]), None)
            .unwrap();

        let hits = graph.search_texts("ba22");
        let found: Vec<(&str, WaypointId)> =
            hits.iter().map(|m| (m.text.as_str(), m.waypoint)).collect();
        assert_eq!(found, vec![("BA2250", a), ("BA2270", b)]);

        // Case-distinct texts are distinct entries
        assert_eq!(graph.search_texts("WASHROOM").len(), 2);
        assert_eq!(graph.search_texts("").len(), 4);
        assert!(graph.search_texts("cafeteria").is_empty());
    }

    #[test]
    fn test_find_by_name() {
        let mut graph = WaypointGraph::new();
        let a = graph.add_waypoint("Lobby", Vec::new(), None).unwrap();
        graph.add_waypoint("Lobby", Vec::new(), None).unwrap();
        assert_eq!(graph.find_by_name("Lobby"), Some(a));
        assert_eq!(graph.find_by_name("Roof"), None);
    }

    #[test]
    fn test_layout_positions() {
        let mut graph = WaypointGraph::new();
        let a = graph.add_waypoint("A", Vec::new(), None).unwrap();
        let b = graph
            .add_waypoint(
                "B",
                Vec::new(),
                Some(BackEdge::new(a, EnuVector::planar(2.0, 0.0))),
            )
            .unwrap();
        let c = graph
            .add_waypoint(
                "C",
                Vec::new(),
                Some(BackEdge::new(b, EnuVector::planar(0.0, 3.0))),
            )
            .unwrap();
        let d = graph.add_waypoint("D", Vec::new(), None).unwrap();

        let positions = graph.layout_positions();
        assert_eq!(positions.len(), 4);
        assert_eq!(positions[&a], EnuVector::ZERO);
        assert_relative_eq!(positions[&c].east, 2.0);
        assert_relative_eq!(positions[&c].north, 3.0);
        assert_eq!(positions[&d], EnuVector::ZERO);
    }
}
