//! # Marga
//!
//! Indoor waypoint graph and turn-by-turn navigation.
//!
//! ## Overview
//!
//! A building is described by a graph of recorded waypoints. Each edge holds
//! the planar East-North offset walked between two waypoints. Navigation
//! plans a route with breadth-first search and then tracks progress one edge
//! at a time from relative motion only:
//!
//! - **Recording**: walk the building, record waypoints and nearby text
//! - **Planning**: fewest-hop route between two waypoints
//! - **Guidance**: per-edge progress with a drift-resistant virtual position
//! - **Export**: sorted-key JSON and SVG pictures of the graph
//!
//! ## Quick Start
//!
//! ```rust
//! use marga::{BackEdge, EnuVector, NavigationSession, NavigationState, WaypointGraph, find_path};
//!
//! let mut graph = WaypointGraph::new();
//! let lobby = graph.add_waypoint("Lobby", Vec::new(), None)?;
//! let stairs = graph.add_waypoint(
//!     "Stairs",
//!     Vec::new(),
//!     Some(BackEdge::new(lobby, EnuVector::planar(3.0, 4.0))),
//! )?;
//!
//! let path = find_path(&graph, lobby, stairs)?;
//! let mut session = NavigationSession::default();
//! session.start(path, &graph)?;
//!
//! let update = session.report_position(EnuVector::planar(2.9, 3.95), &graph);
//! assert_eq!(update.snapshot.state, NavigationState::Arrived);
//! # Ok::<(), marga::Error>(())
//! ```
//!
//! ## Coordinate System
//!
//! - Local tracker frame: X right, Y up, forward is -Z
//! - ENU: East, North, Up; only East/North are used for navigation
//! - Bearings: degrees clockwise from north

// Vectors, frame transforms and the heading lock
pub mod core;

pub mod error;

// Waypoints and the graph store
pub mod graph;

// Route search
pub mod pathfinding;

// Session state machine, pose pipeline, shared handles
pub mod navigation;

// Data collection
pub mod recording;

// JSON and SVG export
pub mod io;

pub use core::{EnuVector, HeadingLock, LocalPoint};
pub use error::{Error, Result};
pub use graph::{BackEdge, TextMatch, Waypoint, WaypointGraph, WaypointId};
pub use navigation::{
    GuidanceSnapshot, GuidanceUpdate, NavigationConfig, NavigationSession, NavigationState,
    PosePipeline, PoseSample, SharedGraph, SharedSession, share_graph,
};
pub use pathfinding::{find_path, route_length};
pub use recording::{TextBuffer, WaypointRecorder};
