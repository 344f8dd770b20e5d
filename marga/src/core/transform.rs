//! Coordinate transforms between the tracker's local frame and ENU.
//!
//! The tracker reports positions in an arbitrary local frame whose forward
//! axis is wherever the device pointed when tracking started. Navigation needs
//! a frame that is stable across sessions, so every sample goes through:
//!
//! ```text
//! local pose ──(rotate by -heading about Y)──▶ north-aligned local
//!            ──(axis remap)──────────────────▶ East-North-Up
//! ```
//!
//! All functions here are pure. The heading itself is locked elsewhere
//! (see [`HeadingLock`](super::HeadingLock)).

use super::vector::{EnuVector, LocalPoint};

/// Rotate a local position about the vertical axis so forward points north.
///
/// `heading_degrees` is the compass heading (clockwise from north) the device
/// had when the local frame was established. The rotation angle is
/// `-heading`, so a larger heading turns the measured frame counter-clockwise.
#[inline]
pub fn to_north_aligned(pose: LocalPoint, heading_degrees: f64) -> LocalPoint {
    let theta = (-heading_degrees).to_radians() as f32;
    let (s, c) = theta.sin_cos();
    LocalPoint::new(c * pose.x + s * pose.z, pose.y, -s * pose.x + c * pose.z)
}

/// Inverse of [`to_north_aligned`] for the same heading.
#[inline]
pub fn from_north_aligned(aligned: LocalPoint, heading_degrees: f64) -> LocalPoint {
    to_north_aligned(aligned, -heading_degrees)
}

/// Remap north-aligned local axes into East-North-Up.
///
/// east = local right (x), north = negative local depth (-z),
/// up = local vertical (y).
#[inline]
pub fn local_to_enu(aligned: LocalPoint) -> EnuVector {
    EnuVector::new(aligned.x, -aligned.z, aligned.y)
}

/// Exact inverse of [`local_to_enu`].
#[inline]
pub fn enu_to_local(enu: EnuVector) -> LocalPoint {
    LocalPoint::new(enu.east, enu.up, -enu.north)
}

/// Full pipeline: local pose + heading to ENU.
#[inline]
pub fn pose_to_enu(pose: LocalPoint, heading_degrees: f64) -> EnuVector {
    local_to_enu(to_north_aligned(pose, heading_degrees))
}

/// Zero the Up component.
#[inline]
pub fn drop_elevation(v: EnuVector) -> EnuVector {
    v.drop_elevation()
}

/// Distance over East/North only.
#[inline]
pub fn planar_distance(a: EnuVector, b: EnuVector) -> f32 {
    a.planar_distance(&b)
}
