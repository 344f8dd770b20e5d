//! Graph export.
//!
//! - **JSON**: list of waypoint records with sorted keys, for sharing a
//!   recorded building
//! - **SVG**: picture of the graph with an optional route and trajectory
//!
//! ```rust,no_run
//! use marga::graph::WaypointGraph;
//! use marga::io::{SvgConfig, SvgVisualizer, save_json};
//! use std::path::Path;
//!
//! let graph = WaypointGraph::new();
//! save_json(&graph, Path::new("waypoints.json"))?;
//! SvgVisualizer::new(&graph, SvgConfig::default())
//!     .with_title("Floor 1")
//!     .save(Path::new("waypoints.svg"))?;
//! # Ok::<(), marga::Error>(())
//! ```

mod export;
mod svg;

pub use export::{ExportVector, WaypointRecord, export_records, save_json, to_json_string, write_json};
pub use svg::{SvgColorScheme, SvgConfig, SvgVisualizer};
