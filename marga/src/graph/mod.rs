//! Waypoint graph.
//!
//! Nodes are recorded locations; edges carry the planar ENU offset needed to
//! walk from one waypoint to the other. Edges are always stored in both
//! directions with opposite signs.
//!
//! ```rust
//! use marga::core::EnuVector;
//! use marga::graph::{BackEdge, WaypointGraph};
//!
//! let mut graph = WaypointGraph::new();
//! let lobby = graph.add_waypoint("Lobby", Vec::new(), None)?;
//! let stairs = graph.add_waypoint(
//!     "Stairs",
//!     vec!["EXIT".to_string()],
//!     Some(BackEdge::new(lobby, EnuVector::planar(3.0, 4.0))),
//! )?;
//!
//! assert_eq!(graph.neighbor_offset(stairs, lobby)?, EnuVector::planar(-3.0, -4.0));
//! # Ok::<(), marga::Error>(())
//! ```

mod store;
mod waypoint;

pub use store::{BackEdge, TextMatch, WaypointGraph};
pub use waypoint::{Waypoint, WaypointId};
