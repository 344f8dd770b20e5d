//! Turn-by-turn navigation.
//!
//! - [`PosePipeline`]: raw tracker samples to planar ENU positions
//! - [`NavigationSession`]: per-edge progress along a route
//! - [`SharedSession`]: the same session behind locks for threaded use

mod config;
mod pipeline;
mod session;
mod shared;

pub use config::NavigationConfig;
pub use pipeline::{PosePipeline, PoseSample};
pub use session::{GuidanceSnapshot, GuidanceUpdate, NavigationSession, NavigationState};
pub use shared::{SharedGraph, SharedSession, share_graph};
