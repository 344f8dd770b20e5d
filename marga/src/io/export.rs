//! JSON export of the waypoint graph.
//!
//! Output is pretty-printed with every object's keys in lexicographic order,
//! so two exports of the same graph are byte-identical.
//!
//! ```json
//! [
//!   {
//!     "id": "6F1C...",
//!     "name": "Lobby",
//!     "neighbors": {
//!       "A03B...": { "east": 3.0, "north": 4.0, "up": 0.0 }
//!     },
//!     "texts": ["EXIT"]
//!   }
//! ]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;

use crate::core::EnuVector;
use crate::error::Result;
use crate::graph::{Waypoint, WaypointGraph};

/// Neighbor offset as exported. `up` is always 0.
///
/// Fields are declared in key order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportVector {
    pub east: f32,
    pub north: f32,
    pub up: f32,
}

impl From<EnuVector> for ExportVector {
    fn from(v: EnuVector) -> Self {
        Self {
            east: v.east,
            north: v.north,
            up: 0.0,
        }
    }
}

/// One exported waypoint. Fields are declared in key order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaypointRecord {
    pub id: String,
    pub name: String,
    pub neighbors: BTreeMap<String, ExportVector>,
    pub texts: Vec<String>,
}

impl From<&Waypoint> for WaypointRecord {
    fn from(wp: &Waypoint) -> Self {
        Self {
            id: wp.id().to_string(),
            name: wp.name().to_string(),
            neighbors: wp
                .neighbors()
                .map(|(id, offset)| (id.to_string(), offset.into()))
                .collect(),
            texts: wp.texts().iter().cloned().collect(),
        }
    }
}

/// Export records in graph insertion order
pub fn export_records(graph: &WaypointGraph) -> Vec<WaypointRecord> {
    graph.iter().map(WaypointRecord::from).collect()
}

/// Pretty JSON string of the graph
pub fn to_json_string(graph: &WaypointGraph) -> Result<String> {
    Ok(serde_json::to_string_pretty(&export_records(graph))?)
}

/// Write pretty JSON to any writer
pub fn write_json<W: Write>(graph: &WaypointGraph, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, &export_records(graph))?;
    Ok(())
}

/// Save the graph as pretty JSON at `path`
pub fn save_json(graph: &WaypointGraph, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_json(graph, &mut writer)?;
    writer.flush()?;
    info!("Exported {} waypoints to {}", graph.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::BackEdge;

    fn sample_graph() -> WaypointGraph {
        let mut graph = WaypointGraph::new();
        let a = graph
            .add_waypoint("Lobby", vec!["EXIT".to_string(), "B".to_string()], None)
            .unwrap();
        graph
            .add_waypoint(
                "Stairs",
                Vec::new(),
                Some(BackEdge::new(a, EnuVector::new(3.0, 4.0, 1.0))),
            )
            .unwrap();
        graph
    }

    #[test]
    fn test_records_follow_graph() {
        let graph = sample_graph();
        let records = export_records(&graph);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Lobby");
        assert_eq!(records[0].texts, vec!["B", "EXIT"]);

        let stairs_id = records[1].id.clone();
        let offset = records[0].neighbors[&stairs_id];
        assert_eq!(offset, ExportVector { east: 3.0, north: 4.0, up: 0.0 });
        assert_eq!(records[1].neighbors[&records[0].id].east, -3.0);
    }

    #[test]
    fn test_keys_sorted() {
        let json = to_json_string(&sample_graph()).unwrap();
        let id = json.find("\"id\"").unwrap();
        let name = json.find("\"name\"").unwrap();
        let neighbors = json.find("\"neighbors\"").unwrap();
        let texts = json.find("\"texts\"").unwrap();
        assert!(id < name && name < neighbors && neighbors < texts);
        assert!(json.find("\"east\"").unwrap() < json.find("\"north\"").unwrap());
    }

    #[test]
    fn test_export_is_reproducible() {
        let graph = sample_graph();
        assert_eq!(to_json_string(&graph).unwrap(), to_json_string(&graph).unwrap());
    }

    #[test]
    fn test_save_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("waypoints.json");
        save_json(&sample_graph(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let records: Vec<WaypointRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_empty_graph_exports_empty_list() {
        assert_eq!(to_json_string(&WaypointGraph::new()).unwrap(), "[]");
    }
}
