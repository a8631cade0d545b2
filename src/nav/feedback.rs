//! Transient click feedback
//!
//! Markers carry an absolute expiry time. Whoever draws them removes expired
//! ones on its own tick with [`MarkerLayer::retain_live`]; the navigation
//! code only spawns them.

use std::time::Duration;

use glam::Vec2;

/// What a marker signals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// Red cross: the click could not be turned into a path
    Invalid,
    /// Yellow circle: the agent is heading here
    Target,
}

impl MarkerKind {
    /// Half-size of the cross arms, or the circle radius, in pixels
    #[must_use]
    pub fn extent(self) -> f32 {
        match self {
            Self::Invalid => 10.0,
            Self::Target => 8.0,
        }
    }
}

/// A fading marker in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub position: Vec2,
    pub spawned_at: Duration,
    pub expires_at: Duration,
}

impl Marker {
    /// Check whether the marker should be gone at `now`
    #[must_use]
    pub fn is_expired(&self, now: Duration) -> bool {
        now >= self.expires_at
    }

    /// Opacity at `now`, fading linearly from 1 to 0 over the lifetime
    #[must_use]
    pub fn alpha(&self, now: Duration) -> f32 {
        let lifetime = self.expires_at.saturating_sub(self.spawned_at);
        if lifetime.is_zero() {
            return 0.0;
        }
        let remaining = self.expires_at.saturating_sub(now);
        (remaining.as_secs_f32() / lifetime.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// Live feedback markers
#[derive(Debug, Clone)]
pub struct MarkerLayer {
    markers: Vec<Marker>,
    lifetime: Duration,
}

impl MarkerLayer {
    /// Create an empty layer whose markers live for `lifetime`
    #[must_use]
    pub fn new(lifetime: Duration) -> Self {
        Self {
            markers: Vec::new(),
            lifetime,
        }
    }

    /// Spawn an "invalid" cross. Several may be visible at once.
    pub fn push_invalid(&mut self, position: Vec2, now: Duration) {
        self.markers.push(self.marker(MarkerKind::Invalid, position, now));
    }

    /// Spawn the target circle, replacing any previous one.
    pub fn set_target(&mut self, position: Vec2, now: Duration) {
        self.markers.retain(|m| m.kind != MarkerKind::Target);
        self.markers.push(self.marker(MarkerKind::Target, position, now));
    }

    /// Drop every marker that has expired by `now`
    pub fn retain_live(&mut self, now: Duration) {
        self.markers.retain(|m| !m.is_expired(now));
    }

    /// Iterate over current markers
    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    /// Number of current markers
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Check if there are no markers
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    fn marker(&self, kind: MarkerKind, position: Vec2, now: Duration) -> Marker {
        Marker {
            kind,
            position,
            spawned_at: now,
            expires_at: now + self.lifetime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIFETIME: Duration = Duration::from_millis(500);

    #[test]
    fn test_markers_expire() {
        let mut layer = MarkerLayer::new(LIFETIME);
        layer.push_invalid(Vec2::new(10.0, 10.0), Duration::ZERO);
        layer.push_invalid(Vec2::new(20.0, 10.0), Duration::from_millis(300));

        layer.retain_live(Duration::from_millis(499));
        assert_eq!(layer.len(), 2);

        layer.retain_live(Duration::from_millis(500));
        assert_eq!(layer.len(), 1);

        layer.retain_live(Duration::from_millis(800));
        assert!(layer.is_empty());
    }

    #[test]
    fn test_target_replaces_previous_target() {
        let mut layer = MarkerLayer::new(LIFETIME);
        layer.push_invalid(Vec2::ZERO, Duration::ZERO);
        layer.set_target(Vec2::new(1.0, 1.0), Duration::ZERO);
        layer.set_target(Vec2::new(2.0, 2.0), Duration::from_millis(100));

        let targets: Vec<_> = layer
            .iter()
            .filter(|m| m.kind == MarkerKind::Target)
            .collect();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].position, Vec2::new(2.0, 2.0));
        assert_eq!(layer.len(), 2);
    }

    #[test]
    fn test_marker_extents() {
        let mut layer = MarkerLayer::new(LIFETIME);
        layer.push_invalid(Vec2::ZERO, Duration::ZERO);
        layer.set_target(Vec2::ONE, Duration::ZERO);

        let extents: Vec<_> = layer.iter().map(|m| m.kind.extent()).collect();
        assert_eq!(extents, vec![10.0, 8.0]);
    }

    #[test]
    fn test_alpha_fades() {
        let mut layer = MarkerLayer::new(LIFETIME);
        layer.set_target(Vec2::ZERO, Duration::from_millis(1000));
        let marker = *layer.iter().next().unwrap();

        assert!((marker.alpha(Duration::from_millis(1000)) - 1.0).abs() < 1e-6);
        assert!((marker.alpha(Duration::from_millis(1250)) - 0.5).abs() < 1e-6);
        assert_eq!(marker.alpha(Duration::from_millis(2000)), 0.0);
    }
}
