//! Point-and-click navigation over a walkable-area mask
//!
//! This crate provides:
//! - A navigability mask sampled from a grayscale image
//! - A uniform navigation grid with corner-aware 8-directional A*
//! - Line-of-sight path smoothing and nearest-walkable fallback search
//! - A per-tick agent motor with arrival and stuck detection
//! - An off-mesh guard that snaps a drifting agent back onto walkable ground

pub mod agent;
pub mod assets;
pub mod core;
pub mod nav;

// Re-exports for convenience
pub use glam;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::agent::{AgentMotor, Facing, MotorState, MotorStep};
    pub use crate::assets::ImageStore;
    pub use crate::core::{AgentConfig, EventQueue, NavConfig, NavEvent, NavScene, Time};
    pub use crate::nav::{NavError, NavGrid, NavMask, NavigationSystem, PixelSource};
    pub use glam::Vec2;
}
