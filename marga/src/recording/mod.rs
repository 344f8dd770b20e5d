//! Waypoint recording.
//!
//! While walking a building, the operator records a waypoint at each
//! location of interest. Every new waypoint is linked to the previous one by
//! the planar displacement walked since it was recorded, which builds the
//! graph as a chain that later recordings can branch from.

mod text;

pub use text::TextBuffer;

use log::{debug, info};

use crate::core::EnuVector;
use crate::error::Result;
use crate::graph::{BackEdge, WaypointGraph, WaypointId};

/// Builds the graph from a stream of positions.
#[derive(Clone, Debug, Default)]
pub struct WaypointRecorder {
    position: EnuVector,
    anchor: EnuVector,
    last_recorded: Option<WaypointId>,
    texts: TextBuffer,
}

impl WaypointRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the live position (planar ENU)
    pub fn update_position(&mut self, position: EnuVector) {
        self.position = position.drop_elevation();
    }

    pub fn position(&self) -> EnuVector {
        self.position
    }

    /// Position at the last recorded waypoint
    pub fn anchor(&self) -> EnuVector {
        self.anchor
    }

    pub fn last_recorded(&self) -> Option<WaypointId> {
        self.last_recorded
    }

    /// Displacement walked since the last recorded waypoint
    pub fn relative_offset(&self) -> EnuVector {
        (self.position - self.anchor).drop_elevation()
    }

    pub fn texts(&self) -> &TextBuffer {
        &self.texts
    }

    pub fn texts_mut(&mut self) -> &mut TextBuffer {
        &mut self.texts
    }

    /// Record a waypoint at the current position.
    ///
    /// Pending texts are attached and the anchor moves to the current
    /// position.
    pub fn record(&mut self, graph: &mut WaypointGraph, name: impl Into<String>) -> Result<WaypointId> {
        let name = name.into();
        let offset = self.relative_offset();
        let back_edge = self.last_recorded.map(|prev| BackEdge::new(prev, offset));

        // Texts stay pending if the insert fails
        let texts: Vec<String> = self.texts.pending().map(str::to_string).collect();
        let id = graph.add_waypoint(name.clone(), texts, back_edge)?;
        let attached = self.texts.flush().len();
        self.texts.stop_scanning();

        debug!(
            "\"{}\" linked with offset ({:.2}, {:.2}), {} texts attached",
            name, offset.east, offset.north, attached
        );

        self.last_recorded = Some(id);
        self.anchor = self.position;
        Ok(id)
    }

    /// Re-anchor at the current position without recording
    pub fn reset_anchor(&mut self) {
        self.anchor = self.position;
    }

    /// Continue recording from an existing waypoint at the current position
    pub fn resume_from(&mut self, id: WaypointId) {
        self.last_recorded = Some(id);
        self.anchor = self.position;
    }

    /// Clear the graph and all recording state
    pub fn reset(&mut self, graph: &mut WaypointGraph) {
        graph.reset();
        self.texts.clear();
        self.last_recorded = None;
        self.anchor = EnuVector::ZERO;
        self.position = EnuVector::ZERO;
        info!("Recording reset");
    }
}
