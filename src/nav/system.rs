//! Click-to-move navigation
//!
//! [`NavigationSystem`] turns a clicked world point into a smoothed path for
//! an [`AgentMotor`], and keeps the agent on walkable ground between clicks.
//! Every failure ends in one of two places: a path handed to the motor, or a
//! dropped request with an "invalid" marker. Nothing here panics or returns
//! a hard error to the tick loop.

use std::time::Duration;

use glam::Vec2;

use super::feedback::MarkerLayer;
use super::grid::NavGrid;
use super::mask::{NavMask, PixelSource};
use super::pathfinding::plan_world_path;
use super::resolve::{RingSearch, find_nearest_walkable};
use super::smoothing::smooth_path;
use crate::agent::AgentMotor;
use crate::core::NavConfig;

/// Why a move request was dropped
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavError {
    /// The target is blocked and nothing walkable lies within search range
    UnresolvableGoal {
        /// Clamped click position
        target: Vec2,
    },
    /// Start and goal are both walkable but not connected
    NoPath {
        /// Resolved start
        start: Vec2,
        /// Resolved goal
        end: Vec2,
    },
}

impl std::fmt::Display for NavError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnresolvableGoal { target } => {
                write!(f, "No walkable point near {target}")
            }
            Self::NoPath { start, end } => write!(f, "No path from {start} to {end}"),
        }
    }
}

impl std::error::Error for NavError {}

/// Mask, grid and click feedback for one scene
#[derive(Debug, Clone)]
pub struct NavigationSystem {
    mask: NavMask,
    grid: Option<NavGrid>,
    cell_size: f32,
    padding: f32,
    fallback: RingSearch,
    markers: MarkerLayer,
}

impl NavigationSystem {
    /// Sample the configured mask image and build the grid.
    ///
    /// A missing image leaves the system in always-walkable mode.
    pub fn new(source: &dyn PixelSource, config: &NavConfig) -> Self {
        let mask = NavMask::from_source(source, &config.mask_key, config.walkable_threshold);
        Self::with_mask(mask, config)
    }

    /// Build the system around an already sampled mask
    #[must_use]
    pub fn with_mask(mask: NavMask, config: &NavConfig) -> Self {
        let grid = NavGrid::build(&mask, config.cell_size);
        Self {
            mask,
            grid,
            cell_size: config.cell_size,
            padding: config.agent.padding(),
            fallback: config.fallback,
            markers: MarkerLayer::new(config.marker_lifetime()),
        }
    }

    /// Swap in a new mask and rebuild the grid
    pub fn set_mask(&mut self, mask: NavMask) {
        self.grid = NavGrid::build(&mask, self.cell_size);
        self.mask = mask;
    }

    /// The navigability mask
    #[must_use]
    pub fn mask(&self) -> &NavMask {
        &self.mask
    }

    /// The navigation grid, if a mask is present
    #[must_use]
    pub fn grid(&self) -> Option<&NavGrid> {
        self.grid.as_ref()
    }

    /// Edge padding used for clamping
    #[must_use]
    pub fn padding(&self) -> f32 {
        self.padding
    }

    /// Click feedback markers
    #[must_use]
    pub fn markers(&self) -> &MarkerLayer {
        &self.markers
    }

    /// Click feedback markers, for the renderer to expire
    pub fn markers_mut(&mut self) -> &mut MarkerLayer {
        &mut self.markers
    }

    /// Check a world point against the mask
    #[must_use]
    pub fn is_walkable(&self, point: Vec2) -> bool {
        self.mask.is_walkable(point)
    }

    /// Clamp a point into the mask with the agent's padding
    #[must_use]
    pub fn clamp_to_bounds(&self, point: Vec2) -> Vec2 {
        self.mask.clamp_to_bounds(point, self.padding)
    }

    /// Nearest walkable point by ring search
    #[must_use]
    pub fn find_nearest_walkable(&self, point: Vec2) -> Option<Vec2> {
        find_nearest_walkable(&self.mask, point, &self.fallback)
    }

    /// Where to place an agent that should appear near `desired`
    #[must_use]
    pub fn spawn_point(&self, desired: Vec2) -> Vec2 {
        self.find_nearest_walkable(desired).unwrap_or(desired)
    }

    /// Plan and smooth a path between two points.
    ///
    /// Without a grid the path is the straight segment between the clamped
    /// endpoints.
    #[must_use]
    pub fn calculate_path(&self, start: Vec2, end: Vec2) -> Option<Vec<Vec2>> {
        let start = self.clamp_to_bounds(start);
        let end = self.clamp_to_bounds(end);

        let Some(grid) = &self.grid else {
            return Some(vec![start, end]);
        };

        let path = plan_world_path(grid, &self.mask, start, end, self.padding)?;
        Some(smooth_path(&self.mask, &path, self.cell_size))
    }

    /// Send `agent` towards a clicked point.
    ///
    /// A blocked click is moved to the nearest walkable point; an agent that
    /// is itself off the walkable area plans from its nearest walkable point.
    /// On success the agent's path is replaced and the resolved destination
    /// returned. On failure the agent is left alone and an invalid marker is
    /// shown.
    ///
    /// # Errors
    ///
    /// [`NavError::UnresolvableGoal`] if nothing walkable is near the click,
    /// [`NavError::NoPath`] if start and goal are not connected.
    pub fn move_to(
        &mut self,
        agent: &mut AgentMotor,
        target: Vec2,
        now: Duration,
    ) -> Result<Vec2, NavError> {
        let clamped = self.clamp_to_bounds(target);

        let goal = if self.is_walkable(clamped) {
            clamped
        } else {
            match self.find_nearest_walkable(clamped) {
                Some(nearest) => self.clamp_to_bounds(nearest),
                None => return Err(self.reject(NavError::UnresolvableGoal { target: clamped }, now)),
            }
        };

        let position = agent.position();
        let start = if self.is_walkable(position) {
            self.clamp_to_bounds(position)
        } else {
            self.find_nearest_walkable(position).unwrap_or(position)
        };

        match self.calculate_path(start, goal) {
            Some(path) if !path.is_empty() => {
                log::debug!("Move to {goal} accepted with {} waypoints", path.len());
                agent.set_path(path, now);
                self.markers.set_target(goal, now);
                Ok(goal)
            }
            _ => Err(self.reject(NavError::NoPath { start, end: goal }, now)),
        }
    }

    /// Put an agent that drifted off the walkable area back onto it.
    ///
    /// Call once per tick. The agent counts as off-mesh when clamping moves it
    /// by more than a pixel or the clamped point is blocked. If a walkable
    /// point is found the agent is teleported there and its path aborted;
    /// the new position is returned.
    pub fn enforce_on_navmesh(&self, agent: &mut AgentMotor) -> Option<Vec2> {
        if !self.mask.exists() {
            return None;
        }

        let position = agent.position();
        let clamped = self.clamp_to_bounds(position);

        let out_of_bounds =
            (position.x - clamped.x).abs() > 1.0 || (position.y - clamped.y).abs() > 1.0;
        if !out_of_bounds && self.is_walkable(clamped) {
            return None;
        }

        let safe = self.find_nearest_walkable(clamped)?;
        log::warn!("Agent off the walkable area at {position}, moving to {safe}");
        agent.teleport(safe);
        Some(safe)
    }

    fn reject(&mut self, error: NavError, now: Duration) -> NavError {
        let at = match error {
            NavError::UnresolvableGoal { target } => target,
            NavError::NoPath { end, .. } => end,
        };
        log::debug!("Move rejected: {error}");
        self.markers.push_invalid(at, now);
        error
    }
}
