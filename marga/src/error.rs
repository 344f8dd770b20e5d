//! Error types for Marga

use crate::graph::WaypointId;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Marga error types.
///
/// None of these are fatal. The graph and navigation conditions are normal
/// negative outcomes that leave all state untouched; the worst a caller has to
/// do is show "no guidance available".
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Edge insertion referenced a waypoint that is not in the graph
    #[error("Unknown neighbor waypoint: {0}")]
    UnknownNeighbor(WaypointId),

    /// Offset lookup between waypoints without a direct edge
    #[error("Waypoints {from} and {to} are not adjacent")]
    NotAdjacent {
        /// Source waypoint
        from: WaypointId,
        /// Target waypoint
        to: WaypointId,
    },

    /// Search found no connecting route
    #[error("No path from {start} to {destination}")]
    NoPath {
        /// Start waypoint
        start: WaypointId,
        /// Destination waypoint
        destination: WaypointId,
    },

    /// Navigation started with an empty path
    #[error("Cannot start navigation on an empty path")]
    InvalidPathStart,

    /// Edge from a waypoint to itself
    #[error("Waypoint {0} cannot be its own neighbor")]
    SelfEdge(WaypointId),

    /// I/O error while exporting
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error while exporting
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
