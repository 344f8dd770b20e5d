//! Vector types for the device-local and East-North-Up frames.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Device-local position as reported by the tracking session (meters).
///
/// Axis convention of the tracker:
/// - X: right
/// - Y: up (vertical)
/// - Z: toward the viewer, so "forward" is negative Z
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct LocalPoint {
    /// Right (meters)
    pub x: f32,
    /// Up (meters)
    pub y: f32,
    /// Depth, positive toward the viewer (meters)
    pub z: f32,
}

impl LocalPoint {
    /// Create a new local point
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Origin of the tracking session
    pub const ZERO: LocalPoint = LocalPoint {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
}

impl From<[f32; 3]> for LocalPoint {
    fn from(v: [f32; 3]) -> Self {
        LocalPoint::new(v[0], v[1], v[2])
    }
}

/// Vector in the East-North-Up frame (meters).
///
/// Navigation math only ever looks at the East/North components; `up` is
/// carried along so the frame round-trips but is dropped with
/// [`EnuVector::drop_elevation`] before any comparison.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct EnuVector {
    /// East component
    pub east: f32,
    /// North component
    pub north: f32,
    /// Up component (elevation)
    pub up: f32,
}

impl EnuVector {
    /// Create a new ENU vector
    #[inline]
    pub fn new(east: f32, north: f32, up: f32) -> Self {
        Self { east, north, up }
    }

    /// Create a planar vector (up = 0)
    #[inline]
    pub fn planar(east: f32, north: f32) -> Self {
        Self {
            east,
            north,
            up: 0.0,
        }
    }

    /// Zero vector
    pub const ZERO: EnuVector = EnuVector {
        east: 0.0,
        north: 0.0,
        up: 0.0,
    };

    /// Same vector with the Up component zeroed
    #[inline]
    pub fn drop_elevation(&self) -> EnuVector {
        EnuVector::planar(self.east, self.north)
    }

    /// Euclidean distance using only East/North components
    #[inline]
    pub fn planar_distance(&self, other: &EnuVector) -> f32 {
        let de = self.east - other.east;
        let dn = self.north - other.north;
        (de * de + dn * dn).sqrt()
    }

    /// Length of the East/North part
    #[inline]
    pub fn planar_length(&self) -> f32 {
        (self.east * self.east + self.north * self.north).sqrt()
    }

    /// Bearing in degrees, clockwise from north, in [0, 360).
    ///
    /// Returns `None` when the planar length is below `min_length`, since the
    /// direction of a near-zero vector is meaningless.
    pub fn bearing_degrees(&self, min_length: f32) -> Option<f32> {
        if self.planar_length() < min_length {
            return None;
        }
        let bearing = self.east.atan2(self.north).to_degrees();
        Some(if bearing < 0.0 { bearing + 360.0 } else { bearing })
    }
}

impl Add for EnuVector {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        EnuVector::new(
            self.east + other.east,
            self.north + other.north,
            self.up + other.up,
        )
    }
}

impl AddAssign for EnuVector {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for EnuVector {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        EnuVector::new(
            self.east - other.east,
            self.north - other.north,
            self.up - other.up,
        )
    }
}

impl SubAssign for EnuVector {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for EnuVector {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        EnuVector::new(-self.east, -self.north, -self.up)
    }
}

impl Mul<f32> for EnuVector {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        EnuVector::new(self.east * scalar, self.north * scalar, self.up * scalar)
    }
}
