//! Pose pipeline: raw tracker samples to planar ENU positions.

use serde::{Deserialize, Serialize};

use crate::core::{EnuVector, HeadingLock, LocalPoint, pose_to_enu};

/// One raw sample from the tracking source.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoseSample {
    /// Device translation in local tracker axes (meters)
    pub position: LocalPoint,
    /// Compass heading in degrees, absent while the compass is warming up
    #[serde(default)]
    pub heading_degrees: Option<f64>,
}

impl PoseSample {
    /// Sample with a heading
    pub fn new(position: LocalPoint, heading_degrees: Option<f64>) -> Self {
        Self {
            position,
            heading_degrees,
        }
    }
}

/// Applies the heading lock and frame conversion to each sample.
#[derive(Clone, Debug, Default)]
pub struct PosePipeline {
    heading: HeadingLock,
}

impl PosePipeline {
    /// Create a pipeline with no locked heading
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert one sample to a planar ENU position
    pub fn project(&mut self, sample: &PoseSample) -> EnuVector {
        let heading = self.heading.observe(sample.heading_degrees);
        pose_to_enu(sample.position, heading).drop_elevation()
    }

    /// Heading currently used for alignment
    pub fn locked_heading(&self) -> Option<f64> {
        self.heading.locked()
    }

    /// Start a new tracking session; the next valid heading is locked again
    pub fn restart(&mut self) {
        self.heading.reset();
    }
}
