//! Trace YAML parsing.
//!
//! A trace is a recorded walk: a list of pose samples as the tracking source
//! produced them, each optionally carrying operator events that happened at
//! that instant (recording a waypoint, scanning text, picking a destination).
//!
//! ```yaml
//! name: corridor
//! samples:
//!   - position: [0.0, 0.0, 0.0]
//!     heading: 12.5
//!     events:
//!       - type: record_waypoint
//!         name: Entrance
//!   - position: [0.0, 0.0, -3.0]
//! ```

use marga::{LocalPoint, PoseSample};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{DishaError, Result};

/// A recorded walk loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Trace {
    /// Human-readable trace name
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: String,

    /// Pose samples in replay order
    pub samples: Vec<TraceSample>,
}

/// One pose sample with the events that fire with it
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TraceSample {
    /// Local tracker position [x, y, z] in meters
    pub position: [f32; 3],

    /// Compass heading in degrees, absent while uncalibrated
    #[serde(default)]
    pub heading: Option<f64>,

    /// Events applied before this sample's position is processed
    #[serde(default)]
    pub events: Vec<TraceEvent>,
}

impl TraceSample {
    pub fn pose(&self) -> PoseSample {
        PoseSample::new(LocalPoint::from(self.position), self.heading)
    }
}

/// An operator action
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceEvent {
    /// Clear pending texts and start collecting
    StartTextScan,
    /// Stop collecting texts
    StopTextScan,
    /// Text recognized near the current position
    ObserveText { text: String },
    /// Record a waypoint at the current position
    RecordWaypoint { name: String },
    /// Re-anchor the recorder without recording
    ResetAnchor,
    /// Continue recording from an existing waypoint
    ResumeFrom { name: String },
    /// Plan a route and start guidance.
    ///
    /// `to` and `from` are waypoint names or text search terms; `from`
    /// defaults to the first recorded waypoint.
    Navigate {
        to: String,
        #[serde(default)]
        from: Option<String>,
    },
    /// Stop guidance
    ResetNavigation,
    /// New tracking session: the heading lock is released
    RestartTracking,
    /// Clear graph, recorder and guidance
    ResetAll,
}

impl Trace {
    /// Load a trace from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DishaError::Trace(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }

    /// Parse a trace from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let trace: Trace = serde_yaml::from_str(content)?;
        if trace.samples.is_empty() {
            return Err(DishaError::Trace(format!("Trace '{}' has no samples", trace.name)));
        }
        Ok(trace)
    }

    /// Number of events across all samples
    pub fn event_count(&self) -> usize {
        self.samples.iter().map(|s| s.events.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACE: &str = r#"
name: corridor
description: two waypoints and a return trip
samples:
  - position: [0.0, 0.0, 0.0]
    events:
      - type: start_text_scan
      - type: observe_text
        text: EXIT
      - type: record_waypoint
        name: Entrance
  - position: [0.0, 0.0, -3.0]
    heading: 90
    events:
      - type: record_waypoint
        name: End
      - type: navigate
        to: exit
  - position: [0.0, 0.0, -1.5]
"#;

    #[test]
    fn test_parse_trace() {
        let trace = Trace::from_yaml(TRACE).unwrap();
        assert_eq!(trace.name, "corridor");
        assert_eq!(trace.samples.len(), 3);
        assert_eq!(trace.event_count(), 5);

        assert_eq!(
            trace.samples[0].events[1],
            TraceEvent::ObserveText {
                text: "EXIT".to_string()
            }
        );
        assert_eq!(
            trace.samples[1].events[1],
            TraceEvent::Navigate {
                to: "exit".to_string(),
                from: None
            }
        );
        assert!(trace.samples[2].events.is_empty());
    }

    #[test]
    fn test_sample_pose() {
        let trace = Trace::from_yaml(TRACE).unwrap();
        let pose = trace.samples[1].pose();
        assert_eq!(pose.position, LocalPoint::new(0.0, 0.0, -3.0));
        assert_eq!(pose.heading_degrees, Some(90.0));
        assert_eq!(trace.samples[0].pose().heading_degrees, None);
    }

    #[test]
    fn test_empty_trace_rejected() {
        assert!(Trace::from_yaml("name: empty\nsamples: []\n").is_err());
    }

    #[test]
    fn test_unknown_event_rejected() {
        let yaml = "name: bad\nsamples:\n  - position: [0, 0, 0]\n    events:\n      - type: teleport\n";
        assert!(matches!(Trace::from_yaml(yaml), Err(DishaError::Trace(_))));
    }
}
