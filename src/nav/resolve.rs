//! Nearest-walkable-point search
//!
//! Probes concentric rings at fixed angular steps. This is an approximation:
//! a walkable point lying between two probed angles can be missed in favour
//! of one on a larger ring.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::mask::NavMask;

/// Ring search parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingSearch {
    /// Distance between consecutive rings, also the first ring's radius
    pub step: f32,
    /// Largest ring radius probed
    pub max_radius: f32,
    /// Angle between probes on one ring, in degrees
    pub angle_step_deg: f32,
}

impl Default for RingSearch {
    fn default() -> Self {
        Self {
            step: 8.0,
            max_radius: 500.0,
            angle_step_deg: 15.0,
        }
    }
}

impl RingSearch {
    /// Set ring spacing
    #[must_use]
    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Set the largest radius searched
    #[must_use]
    pub fn with_max_radius(mut self, max_radius: f32) -> Self {
        self.max_radius = max_radius;
        self
    }
}

/// Find the first walkable point around `origin`.
///
/// `origin` itself is returned when walkable. Otherwise rings are probed
/// from the smallest radius outwards, and within a ring from angle 0 upwards;
/// probes are floored to whole pixels. `None` if nothing within
/// `max_radius` is walkable.
#[must_use]
pub fn find_nearest_walkable(mask: &NavMask, origin: Vec2, search: &RingSearch) -> Option<Vec2> {
    if mask.is_walkable(origin) {
        return Some(origin);
    }

    if search.step <= 0.0 || search.angle_step_deg <= 0.0 {
        return None;
    }

    let rings = (search.max_radius / search.step).floor() as u32;
    let probes = (360.0 / search.angle_step_deg).ceil() as u32;

    for ring in 1..=rings {
        let radius = search.step * ring as f32;
        for probe in 0..probes {
            let angle = (probe as f32 * search.angle_step_deg).to_radians();
            let point = (origin + Vec2::from_angle(angle) * radius).floor();
            if mask.is_walkable(point) {
                return Some(point);
            }
        }
    }

    None
}
