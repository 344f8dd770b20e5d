//! Thread-safe handles for the graph and the navigation session.
//!
//! The sampling side writes positions while the presentation side reads
//! guidance. Both go through [`SharedSession`], which always takes the graph
//! lock before the session lock.

use std::sync::Arc;

use parking_lot::RwLock;

use super::session::{GuidanceSnapshot, GuidanceUpdate, NavigationSession, NavigationState};
use crate::core::EnuVector;
use crate::error::Result;
use crate::graph::{WaypointGraph, WaypointId};

/// Graph shared between recording and navigation
pub type SharedGraph = Arc<RwLock<WaypointGraph>>;

/// Wrap a graph for sharing
pub fn share_graph(graph: WaypointGraph) -> SharedGraph {
    Arc::new(RwLock::new(graph))
}

/// Cloneable handle to one navigation session over a shared graph.
#[derive(Clone, Debug)]
pub struct SharedSession {
    graph: SharedGraph,
    session: Arc<RwLock<NavigationSession>>,
}

impl SharedSession {
    /// Share `session` over `graph`
    pub fn new(graph: SharedGraph, session: NavigationSession) -> Self {
        Self {
            graph,
            session: Arc::new(RwLock::new(session)),
        }
    }

    /// Graph handle
    pub fn graph(&self) -> &SharedGraph {
        &self.graph
    }

    /// See [`NavigationSession::start`]
    pub fn start(&self, path: Vec<WaypointId>) -> Result<NavigationState> {
        let graph = self.graph.read();
        self.session.write().start(path, &graph)
    }

    /// See [`NavigationSession::report_position`]
    pub fn report_position(&self, position: EnuVector) -> GuidanceUpdate {
        let graph = self.graph.read();
        self.session.write().report_position(position, &graph)
    }

    /// Current published state
    pub fn snapshot(&self) -> GuidanceSnapshot {
        self.session.read().snapshot()
    }

    /// Bearing of the remaining offset, if any
    pub fn bearing_degrees(&self) -> Option<f32> {
        self.session.read().bearing_degrees()
    }

    /// Current route
    pub fn path(&self) -> Vec<WaypointId> {
        self.session.read().path().to_vec()
    }

    /// See [`NavigationSession::reset`]
    pub fn reset(&self) {
        self.session.write().reset();
    }
}
