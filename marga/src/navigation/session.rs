//! Turn-by-turn navigation state machine.
//!
//! The session walks a route one edge at a time. It never tries to recover an
//! absolute position: progress is tracked as a *virtual position* that only
//! moves by the stored edge vector when the user is judged to have completed
//! that edge. Sensor drift is therefore absorbed per edge instead of
//! accumulating along the route.
//!
//! ```text
//!   Idle ──start──▶ Active ──last edge done──▶ Arrived
//!    ▲                │                           │
//!    └──────reset─────┴───────────reset───────────┘
//! ```

use log::{debug, info, warn};

use super::config::NavigationConfig;
use crate::core::{EnuVector, LocalPoint, enu_to_local};
use crate::error::{Error, Result};
use crate::graph::{WaypointGraph, WaypointId};

/// Session state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NavigationState {
    /// No route
    #[default]
    Idle,
    /// Walking toward `path[current_index + 1]`
    Active,
    /// Standing on the last waypoint of the route
    Arrived,
}

/// Read-only view of the session for presentation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GuidanceSnapshot {
    /// Session state
    pub state: NavigationState,
    /// Index of the waypoint the user occupies
    pub current_index: usize,
    /// Number of waypoints on the route
    pub path_len: usize,
    /// Waypoint the user occupies
    pub current_waypoint: Option<WaypointId>,
    /// Waypoint being walked toward
    pub next_waypoint: Option<WaypointId>,
    /// Snapped position of the current waypoint
    pub virtual_position: EnuVector,
    /// Last position reported by the pose pipeline
    pub last_sensed_position: EnuVector,
    /// Vector still to walk to reach the next waypoint
    pub remaining_offset: Option<EnuVector>,
    /// Planar vector of the active edge
    pub direction: Option<EnuVector>,
}

/// Result of one [`NavigationSession::report_position`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GuidanceUpdate {
    /// True if this update completed an edge
    pub advanced: bool,
    /// State after the update
    pub snapshot: GuidanceSnapshot,
}

/// Tracks progress along a route and publishes guidance.
#[derive(Clone, Debug)]
pub struct NavigationSession {
    config: NavigationConfig,
    path: Vec<WaypointId>,
    current_index: usize,
    virtual_position: EnuVector,
    last_sensed_position: EnuVector,
    remaining_offset: Option<EnuVector>,
    current_direction: Option<EnuVector>,
    state: NavigationState,
    /// Set once a missing edge has been reported for the current leg
    edge_missing: bool,
}

impl Default for NavigationSession {
    fn default() -> Self {
        Self::new(NavigationConfig::default())
    }
}

impl NavigationSession {
    /// Create an idle session
    pub fn new(config: NavigationConfig) -> Self {
        Self {
            config,
            path: Vec::new(),
            current_index: 0,
            virtual_position: EnuVector::ZERO,
            last_sensed_position: EnuVector::ZERO,
            remaining_offset: None,
            current_direction: None,
            state: NavigationState::Idle,
            edge_missing: false,
        }
    }

    /// Start following a route.
    ///
    /// The user is assumed to stand on `path[0]` at the origin of the ENU
    /// frame.
    ///
    /// # Errors
    /// [`Error::InvalidPathStart`] for an empty path; the session is left as
    /// it was.
    pub fn start(&mut self, path: Vec<WaypointId>, graph: &WaypointGraph) -> Result<NavigationState> {
        if path.is_empty() {
            warn!("Refusing to start navigation on an empty path");
            return Err(Error::InvalidPathStart);
        }

        info!("Starting navigation along {} waypoints", path.len());
        self.path = path;
        self.current_index = 0;
        self.virtual_position = EnuVector::ZERO;
        self.last_sensed_position = EnuVector::ZERO;
        self.remaining_offset = None;
        self.edge_missing = false;
        self.refresh_state();
        self.current_direction = self.expected_edge(graph).and_then(|e| self.direction_of(e));

        Ok(self.state)
    }

    /// Feed one planar position from the pose pipeline.
    ///
    /// At most one edge is completed per call. If the graph no longer has an
    /// edge between the current and next waypoint, guidance is cleared but
    /// the session stays active.
    pub fn report_position(&mut self, position: EnuVector, graph: &WaypointGraph) -> GuidanceUpdate {
        self.last_sensed_position = position;
        let mut advanced = false;

        if self.state == NavigationState::Active {
            match self.expected_edge(graph) {
                Some(expected) => {
                    self.edge_missing = false;
                    let observed = (position - self.virtual_position).drop_elevation();
                    let distance = observed.planar_distance(&expected);
                    debug!(
                        "Leg {}/{}: observed ({:.2}, {:.2}) expected ({:.2}, {:.2}) off by {:.2}m",
                        self.current_index + 1,
                        self.path.len() - 1,
                        observed.east,
                        observed.north,
                        expected.east,
                        expected.north,
                        distance
                    );

                    if distance < self.config.reach_threshold {
                        self.current_index += 1;
                        self.virtual_position += expected;
                        self.refresh_state();
                        advanced = true;
                        info!(
                            "Reached waypoint {} of {}",
                            self.current_index + 1,
                            self.path.len()
                        );
                        if self.state == NavigationState::Arrived {
                            info!("Arrived at destination");
                        }
                    }
                }
                None => {
                    if !self.edge_missing {
                        warn!(
                            "No edge between route waypoints {} and {}, guidance unavailable",
                            self.current_index,
                            self.current_index + 1
                        );
                        self.edge_missing = true;
                    }
                }
            }
        }

        self.publish(position, graph);

        GuidanceUpdate {
            advanced,
            snapshot: self.snapshot(),
        }
    }

    /// Return to idle and clear all progress
    pub fn reset(&mut self) {
        if self.state != NavigationState::Idle {
            info!("Navigation reset");
        }
        self.path.clear();
        self.current_index = 0;
        self.virtual_position = EnuVector::ZERO;
        self.last_sensed_position = EnuVector::ZERO;
        self.remaining_offset = None;
        self.current_direction = None;
        self.state = NavigationState::Idle;
        self.edge_missing = false;
    }

    /// Session state
    pub fn state(&self) -> NavigationState {
        self.state
    }

    /// Configuration
    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Current route
    pub fn path(&self) -> &[WaypointId] {
        &self.path
    }

    /// Index of the occupied waypoint
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Occupied waypoint
    pub fn current_waypoint(&self) -> Option<WaypointId> {
        self.path.get(self.current_index).copied()
    }

    /// Waypoint being walked toward
    pub fn next_waypoint(&self) -> Option<WaypointId> {
        self.path.get(self.current_index + 1).copied()
    }

    /// Snapped position of the occupied waypoint
    pub fn virtual_position(&self) -> EnuVector {
        self.virtual_position
    }

    /// Last reported position
    pub fn last_sensed_position(&self) -> EnuVector {
        self.last_sensed_position
    }

    /// Vector still to walk to the next waypoint
    pub fn remaining_offset(&self) -> Option<EnuVector> {
        self.remaining_offset
    }

    /// Planar vector of the active edge
    pub fn current_direction(&self) -> Option<EnuVector> {
        self.current_direction
    }

    /// Compass bearing (degrees clockwise from north) of the remaining offset
    pub fn bearing_degrees(&self) -> Option<f32> {
        self.remaining_offset
            .and_then(|r| r.bearing_degrees(self.config.min_direction_length))
    }

    /// ENU position of the next waypoint in the session's snapped frame
    pub fn target_position(&self) -> Option<EnuVector> {
        self.current_direction.map(|d| self.virtual_position + d)
    }

    /// Next waypoint in local tracker axes, placed at floor height
    pub fn target_local(&self) -> Option<LocalPoint> {
        self.target_position().map(|target| {
            let mut local = enu_to_local(target);
            local.y = self.config.arrow_floor_height;
            local
        })
    }

    /// Copy of the published state
    pub fn snapshot(&self) -> GuidanceSnapshot {
        GuidanceSnapshot {
            state: self.state,
            current_index: self.current_index,
            path_len: self.path.len(),
            current_waypoint: self.current_waypoint(),
            next_waypoint: self.next_waypoint(),
            virtual_position: self.virtual_position,
            last_sensed_position: self.last_sensed_position,
            remaining_offset: self.remaining_offset,
            direction: self.current_direction,
        }
    }

    /// Stored planar edge for the active leg
    fn expected_edge(&self, graph: &WaypointGraph) -> Option<EnuVector> {
        if self.state != NavigationState::Active {
            return None;
        }
        let from = self.current_waypoint()?;
        let to = self.next_waypoint()?;
        graph
            .neighbor_offset(from, to)
            .ok()
            .map(|offset| offset.drop_elevation())
    }

    /// Recompute remaining offset and direction for the active leg
    fn publish(&mut self, position: EnuVector, graph: &WaypointGraph) {
        match self.expected_edge(graph) {
            Some(expected) => {
                let walked = (position - self.virtual_position).drop_elevation();
                self.remaining_offset = Some(expected - walked);
                self.current_direction = self.direction_of(expected);
            }
            None => {
                self.remaining_offset = None;
                self.current_direction = None;
            }
        }
    }

    fn direction_of(&self, edge: EnuVector) -> Option<EnuVector> {
        (edge.planar_length() >= self.config.min_direction_length).then_some(edge)
    }

    fn refresh_state(&mut self) {
        self.state = if self.path.is_empty() {
            NavigationState::Idle
        } else if self.current_index + 1 >= self.path.len() {
            NavigationState::Arrived
        } else {
            NavigationState::Active
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::BackEdge;
    use approx::assert_abs_diff_eq;

    fn two_waypoints() -> (WaypointGraph, WaypointId, WaypointId) {
        let mut graph = WaypointGraph::new();
        let a = graph.add_waypoint("A", Vec::new(), None).unwrap();
        let b = graph
            .add_waypoint("B", Vec::new(), Some(BackEdge::new(a, EnuVector::planar(3.0, 4.0))))
            .unwrap();
        (graph, a, b)
    }

    fn three_waypoints() -> (WaypointGraph, Vec<WaypointId>) {
        let (mut graph, a, b) = two_waypoints();
        let c = graph
            .add_waypoint("C", Vec::new(), Some(BackEdge::new(b, EnuVector::planar(-2.0, 0.0))))
            .unwrap();
        (graph, vec![a, b, c])
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = NavigationSession::default();
        assert_eq!(session.state(), NavigationState::Idle);
        assert!(session.remaining_offset().is_none());
        assert!(session.current_waypoint().is_none());
    }

    #[test]
    fn test_start_rejects_empty_path() {
        let (graph, a, b) = two_waypoints();
        let mut session = NavigationSession::default();
        session.start(vec![a, b], &graph).unwrap();

        assert!(matches!(
            session.start(Vec::new(), &graph),
            Err(Error::InvalidPathStart)
        ));
        // Unchanged
        assert_eq!(session.state(), NavigationState::Active);
        assert_eq!(session.path(), &[a, b]);
    }

    #[test]
    fn test_single_waypoint_path_is_arrived() {
        let (graph, a, _) = two_waypoints();
        let mut session = NavigationSession::default();
        assert_eq!(session.start(vec![a], &graph).unwrap(), NavigationState::Arrived);
        assert!(session.current_direction().is_none());
    }

    #[test]
    fn test_start_publishes_direction() {
        let (graph, a, b) = two_waypoints();
        let mut session = NavigationSession::default();
        session.start(vec![a, b], &graph).unwrap();
        assert_eq!(session.current_direction(), Some(EnuVector::planar(3.0, 4.0)));
        assert_eq!(session.target_position(), Some(EnuVector::planar(3.0, 4.0)));
    }

    #[test]
    fn test_arrival_within_threshold() {
        let (graph, a, b) = two_waypoints();
        let mut session = NavigationSession::default();
        session.start(vec![a, b], &graph).unwrap();

        let update = session.report_position(EnuVector::planar(2.9, 3.95), &graph);

        assert!(update.advanced);
        assert_eq!(session.state(), NavigationState::Arrived);
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.virtual_position(), EnuVector::planar(3.0, 4.0));
        assert!(session.remaining_offset().is_none());
        assert!(session.current_direction().is_none());
    }

    #[test]
    fn test_no_arrival_outside_threshold() {
        let (graph, a, b) = two_waypoints();
        let mut session = NavigationSession::default();
        session.start(vec![a, b], &graph).unwrap();

        let update = session.report_position(EnuVector::planar(1.0, 1.0), &graph);

        assert!(!update.advanced);
        assert_eq!(session.state(), NavigationState::Active);
        let remaining = session.remaining_offset().unwrap();
        assert_abs_diff_eq!(remaining.east, 2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(remaining.north, 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_virtual_position_snaps_to_stored_edge() {
        let (graph, path) = three_waypoints();
        let mut session = NavigationSession::default();
        session.start(path, &graph).unwrap();

        // Slightly off the first edge, still within threshold
        session.report_position(EnuVector::planar(3.3, 3.8), &graph);
        assert_eq!(session.virtual_position(), EnuVector::planar(3.0, 4.0));

        // Remaining for the second leg is measured from the snapped position
        let remaining = session.remaining_offset().unwrap();
        assert_abs_diff_eq!(remaining.east, -2.3, epsilon = 1e-5);
        assert_abs_diff_eq!(remaining.north, 0.2, epsilon = 1e-5);

        session.report_position(EnuVector::planar(1.1, 4.1), &graph);
        assert_eq!(session.state(), NavigationState::Arrived);
        assert_eq!(session.virtual_position(), EnuVector::planar(1.0, 4.0));
    }

    #[test]
    fn test_at_most_one_advance_per_update() {
        let mut graph = WaypointGraph::new();
        let a = graph.add_waypoint("A", Vec::new(), None).unwrap();
        // Zero-length edges: every update is "within threshold"
        let b = graph
            .add_waypoint("B", Vec::new(), Some(BackEdge::new(a, EnuVector::ZERO)))
            .unwrap();
        let c = graph
            .add_waypoint("C", Vec::new(), Some(BackEdge::new(b, EnuVector::ZERO)))
            .unwrap();

        let mut session = NavigationSession::default();
        session.start(vec![a, b, c], &graph).unwrap();
        // Zero-length edge suppresses direction
        assert!(session.current_direction().is_none());

        session.report_position(EnuVector::ZERO, &graph);
        assert_eq!(session.current_index(), 1);
        session.report_position(EnuVector::ZERO, &graph);
        assert_eq!(session.current_index(), 2);
        assert_eq!(session.state(), NavigationState::Arrived);
    }

    #[test]
    fn test_missing_edge_degrades_gracefully() {
        let mut graph = WaypointGraph::new();
        let a = graph.add_waypoint("A", Vec::new(), None).unwrap();
        let b = graph.add_waypoint("B", Vec::new(), None).unwrap();

        let mut session = NavigationSession::default();
        session.start(vec![a, b], &graph).unwrap();

        let update = session.report_position(EnuVector::ZERO, &graph);
        assert!(!update.advanced);
        assert_eq!(update.snapshot.state, NavigationState::Active);
        assert!(update.snapshot.remaining_offset.is_none());
        assert!(update.snapshot.direction.is_none());

        // Edge appears later: guidance resumes
        graph.connect(a, b, EnuVector::planar(0.0, 5.0)).unwrap();
        session.report_position(EnuVector::planar(0.0, 1.0), &graph);
        assert_eq!(session.remaining_offset(), Some(EnuVector::planar(0.0, 4.0)));
    }

    #[test]
    fn test_elevation_is_ignored() {
        let (graph, a, b) = two_waypoints();
        let mut session = NavigationSession::default();
        session.start(vec![a, b], &graph).unwrap();

        // Walked up a ramp: large Up component, correct planar displacement
        session.report_position(EnuVector::new(3.0, 4.0, 2.5), &graph);
        assert_eq!(session.state(), NavigationState::Arrived);
    }

    #[test]
    fn test_bearing_and_target_local() {
        let (graph, a, b) = two_waypoints();
        let mut session = NavigationSession::default();
        session.start(vec![a, b], &graph).unwrap();
        session.report_position(EnuVector::planar(3.0, 0.0), &graph);

        // Remaining is due north
        assert_abs_diff_eq!(session.bearing_degrees().unwrap(), 0.0, epsilon = 1e-4);

        let local = session.target_local().unwrap();
        assert_abs_diff_eq!(local.x, 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(local.y, -0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(local.z, -4.0, epsilon = 1e-6);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let (graph, path) = three_waypoints();
        let mut session = NavigationSession::default();
        let baseline = session.snapshot();

        session.start(path, &graph).unwrap();
        session.report_position(EnuVector::planar(3.0, 4.0), &graph);
        session.reset();
        assert_eq!(session.snapshot(), baseline);

        session.reset();
        assert_eq!(session.snapshot(), baseline);
    }
}
