//! Navigation over a mask-derived walkable area
//!
//! Provides the navigability mask, the grid built from it, corner-aware A*,
//! line-of-sight smoothing, nearest-walkable search, and the
//! [`NavigationSystem`] that ties them together for click-to-move.

mod feedback;
mod grid;
mod mask;
mod pathfinding;
mod resolve;
mod smoothing;
mod system;

pub use feedback::{Marker, MarkerKind, MarkerLayer};
pub use grid::{Cell, NavGrid};
pub use mask::{DEFAULT_WALKABLE_THRESHOLD, NavMask, PixelSource, agent_padding};
pub use pathfinding::{GridPath, find_path, octile_distance, plan_world_path};
pub use resolve::{RingSearch, find_nearest_walkable};
pub use smoothing::{has_line_of_sight, smooth_path};
pub use system::{NavError, NavigationSystem};
