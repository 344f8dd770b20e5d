//! Core types for the Marga library.
//!
//! ## Frames
//!
//! - **Local**: the tracker's frame. X right, Y up, Z toward the viewer
//!   (forward is -Z). Origin is wherever tracking started and drifts over time.
//! - **ENU**: East-North-Up. Produced from the local frame by rotating with the
//!   locked compass heading and remapping axes. Navigation works on the
//!   East/North plane only.
//!
//! ## Type Categories
//!
//! - [`LocalPoint`]: device-local position
//! - [`EnuVector`]: ENU position or offset
//! - [`HeadingLock`]: first-valid-heading retention
//!
//! ## Example
//!
//! ```rust
//! use marga::core::{pose_to_enu, LocalPoint};
//!
//! // Device faced east when tracking started; user walked 2m forward
//! let enu = pose_to_enu(LocalPoint::new(0.0, 0.0, -2.0), 90.0);
//! assert!((enu.east - 2.0).abs() < 1e-5);
//! ```

mod heading;
mod transform;
mod vector;

pub use heading::HeadingLock;
pub use transform::{
    drop_elevation, enu_to_local, from_north_aligned, local_to_enu, planar_distance, pose_to_enu,
    to_north_aligned,
};
pub use vector::{EnuVector, LocalPoint};
