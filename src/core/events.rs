//! Navigation event queue
//!
//! A double-buffered queue that lets animation, audio and UI code react to
//! what the navigation core did without being called from it. Events pushed
//! during tick N become readable after the `swap()` at the start of tick N+1.
//!
//! # Example
//!
//! ```ignore
//! // Start of tick
//! scene.events.swap();
//! for event in scene.events.iter() {
//!     if let NavEvent::Arrived { .. } = event {
//!         play_idle_animation();
//!     }
//! }
//! ```

use std::collections::VecDeque;

use glam::Vec2;

use crate::nav::NavError;

// ============================================================================
// Event Types
// ============================================================================

/// Things that happened to the navigating agent.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum NavEvent {
    /// A click produced a path and the agent started following it.
    PathAssigned {
        /// Resolved destination (may differ from the click)
        destination: Vec2,
        /// Number of waypoints after smoothing
        waypoints: usize,
    },

    /// A click was dropped.
    MoveRejected {
        /// Why no path was established
        error: NavError,
    },

    /// An intermediate waypoint was reached.
    WaypointReached {
        /// Index of the reached waypoint
        index: usize,
        /// Agent position at the time
        position: Vec2,
    },

    /// The final waypoint was reached and the agent went idle.
    Arrived {
        /// Agent position at the time
        position: Vec2,
    },

    /// The stuck sampler fired.
    StuckRecovered {
        /// Agent position at the time
        position: Vec2,
        /// Waypoint skipped to, or `None` if movement stopped
        skipped_to: Option<usize>,
    },

    /// The agent was found off the walkable area and moved back onto it.
    Snapped {
        /// Where the agent was
        from: Vec2,
        /// Where it was placed
        to: Vec2,
    },
}

// ============================================================================
// Event Queue
// ============================================================================

/// Double-buffered event queue for tick-consistent event processing.
#[derive(Debug)]
pub struct EventQueue {
    /// Events being written this tick
    pending: VecDeque<NavEvent>,
    /// Events from the previous tick, ready for processing
    processing: VecDeque<NavEvent>,
}

impl EventQueue {
    /// Default initial capacity for event queues.
    const DEFAULT_CAPACITY: usize = 16;

    /// Create a new event queue with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a new event queue with specified initial capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pending: VecDeque::with_capacity(capacity),
            processing: VecDeque::with_capacity(capacity),
        }
    }

    /// Push an event to be processed next tick.
    #[inline]
    pub fn push(&mut self, event: NavEvent) {
        self.pending.push_back(event);
    }

    /// Swap the pending and processing queues.
    ///
    /// Call once per tick, before reading.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.pending, &mut self.processing);
        self.pending.clear();
    }

    /// Iterate over events from the previous tick.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &NavEvent> {
        self.processing.iter()
    }

    /// Drain all events from the previous tick.
    #[inline]
    pub fn drain(&mut self) -> impl Iterator<Item = NavEvent> + '_ {
        self.processing.drain(..)
    }

    /// Check if there are any events to process.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processing.is_empty()
    }

    /// Get the number of events ready for processing.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.processing.len()
    }

    /// Get the number of events pending for next tick.
    #[must_use]
    #[inline]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Clear all events (both pending and processing).
    pub fn clear(&mut self) {
        self.pending.clear();
        self.processing.clear();
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_queue_push_and_swap() {
        let mut queue = EventQueue::new();

        queue.push(NavEvent::Arrived {
            position: Vec2::new(5.0, 5.0),
        });
        assert!(queue.is_empty(), "Events should not be visible before swap");
        assert_eq!(queue.pending_count(), 1);

        queue.swap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pending_count(), 0);
    }

    #[test]
    fn test_event_queue_double_buffer_isolation() {
        let mut queue = EventQueue::new();

        queue.push(NavEvent::WaypointReached {
            index: 1,
            position: Vec2::ZERO,
        });
        queue.swap();

        queue.push(NavEvent::WaypointReached {
            index: 2,
            position: Vec2::ZERO,
        });

        let events: Vec<_> = queue.iter().collect();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], NavEvent::WaypointReached { index: 1, .. }));

        queue.swap();
        let events: Vec<_> = queue.iter().collect();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], NavEvent::WaypointReached { index: 2, .. }));
    }

    #[test]
    fn test_event_queue_drain() {
        let mut queue = EventQueue::new();

        queue.push(NavEvent::Snapped {
            from: Vec2::new(-5.0, 0.0),
            to: Vec2::new(12.0, 12.0),
        });
        queue.push(NavEvent::MoveRejected {
            error: NavError::UnresolvableGoal {
                target: Vec2::new(40.0, 40.0),
            },
        });
        queue.swap();

        let events: Vec<_> = queue.drain().collect();
        assert_eq!(events.len(), 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_event_queue_clear() {
        let mut queue = EventQueue::new();

        queue.push(NavEvent::Arrived { position: Vec2::ZERO });
        queue.swap();
        queue.push(NavEvent::Arrived { position: Vec2::ONE });

        queue.clear();

        assert!(queue.is_empty());
        assert_eq!(queue.pending_count(), 0);
    }
}
