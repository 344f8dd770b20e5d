//! Shared state for the multi-threaded daemon.
//!
//! Provides thread-safe state between:
//! - Sampler thread (trace replay)
//! - Guidance thread (pose pipeline, recording, navigation)
//! - Main thread (status reporting, export)

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use marga::{
    EnuVector, GuidanceSnapshot, NavigationConfig, NavigationSession, SharedGraph, SharedSession,
    WaypointGraph, WaypointId, share_graph,
};
use parking_lot::RwLock;

/// Shared state between all threads.
#[derive(Debug)]
pub struct SharedState {
    /// Waypoint graph and navigation session
    session: SharedSession,

    /// Sensed planar positions while a route is active
    trajectory: RwLock<Vec<EnuVector>>,

    /// Most recently started route
    last_route: RwLock<Vec<WaypointId>>,

    /// Shutdown signal for graceful termination
    shutdown: AtomicBool,

    /// Set by the guidance thread once the sampler channel is drained
    replay_complete: AtomicBool,

    /// Number of samples processed (for status reporting)
    pub sample_count: AtomicU32,

    /// Number of waypoints reached along routes
    pub arrivals: AtomicU32,
}

impl SharedState {
    pub fn new(config: NavigationConfig) -> Self {
        let graph = share_graph(WaypointGraph::new());
        Self {
            session: SharedSession::new(graph, NavigationSession::new(config)),
            trajectory: RwLock::new(Vec::new()),
            last_route: RwLock::new(Vec::new()),
            shutdown: AtomicBool::new(false),
            replay_complete: AtomicBool::new(false),
            sample_count: AtomicU32::new(0),
            arrivals: AtomicU32::new(0),
        }
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    pub fn graph(&self) -> &SharedGraph {
        self.session.graph()
    }

    /// Published guidance
    pub fn snapshot(&self) -> GuidanceSnapshot {
        self.session.snapshot()
    }

    /// Append a sensed position to the trajectory
    pub fn push_trajectory(&self, position: EnuVector) {
        self.trajectory.write().push(position);
    }

    pub fn trajectory(&self) -> Vec<EnuVector> {
        self.trajectory.read().clone()
    }

    /// Remember a route and start a fresh trajectory for it
    pub fn set_route(&self, route: Vec<WaypointId>) {
        *self.last_route.write() = route;
        self.trajectory.write().clear();
    }

    pub fn last_route(&self) -> Vec<WaypointId> {
        self.last_route.read().clone()
    }

    pub fn clear_route(&self) {
        self.last_route.write().clear();
        self.trajectory.write().clear();
    }

    pub fn signal_shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
    }

    pub fn should_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    pub fn mark_replay_complete(&self) {
        self.replay_complete.store(true, Ordering::Release);
    }

    pub fn is_replay_complete(&self) -> bool {
        self.replay_complete.load(Ordering::Acquire)
    }

    pub fn increment_sample_count(&self) {
        self.sample_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn samples_processed(&self) -> u32 {
        self.sample_count.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let state = SharedState::new(NavigationConfig::default());
        assert!(!state.should_shutdown());
        state.signal_shutdown();
        assert!(state.should_shutdown());

        assert!(!state.is_replay_complete());
        state.mark_replay_complete();
        assert!(state.is_replay_complete());
    }

    #[test]
    fn test_route_resets_trajectory() {
        let state = SharedState::new(NavigationConfig::default());
        state.push_trajectory(EnuVector::planar(1.0, 2.0));
        state.set_route(vec![WaypointId::generate()]);
        assert!(state.trajectory().is_empty());
        assert_eq!(state.last_route().len(), 1);
    }
}
