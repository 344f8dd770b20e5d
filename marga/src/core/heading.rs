//! Heading lock.
//!
//! Compass readings jitter by several degrees at short time scales. Aligning
//! every sample with the live heading makes the whole ENU frame wobble, so the
//! first valid reading after tracking starts is locked and reused until the
//! lock is reset.

use log::{debug, info};

/// Retains the first valid heading of a tracking session.
#[derive(Clone, Debug, Default)]
pub struct HeadingLock {
    locked: Option<f64>,
}

impl HeadingLock {
    /// Create an unlocked heading lock
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one heading sample and return the heading to use for alignment.
    ///
    /// The first finite sample is locked. Absent samples before that resolve
    /// to 0 degrees; every sample after that resolves to the locked value.
    pub fn observe(&mut self, sample: Option<f64>) -> f64 {
        match (self.locked, sample) {
            (Some(locked), _) => locked,
            (None, Some(deg)) if deg.is_finite() => {
                let deg = deg.rem_euclid(360.0);
                info!("Heading locked at {:.1}°", deg);
                self.locked = Some(deg);
                deg
            }
            (None, Some(deg)) => {
                debug!("Ignoring non-finite heading sample {}", deg);
                0.0
            }
            (None, None) => 0.0,
        }
    }

    /// Locked heading, if any
    pub fn locked(&self) -> Option<f64> {
        self.locked
    }

    /// Release the lock (new tracking session)
    pub fn reset(&mut self) {
        self.locked = None;
    }
}
