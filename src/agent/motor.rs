//! Per-tick path following
//!
//! The motor owns the agent's continuous position and walks it along a
//! waypoint list. Its state is a single [`MotorState`] value that each
//! [`AgentMotor::update`] takes by value and replaces, so an agent is never
//! half-idle with a stale path lying around.
//!
//! # Lifecycle
//!
//! 1. `set_path()` - Idle -> Moving, targeting waypoint 0
//! 2. `update()` - each tick: arrive/advance, stuck sampling, then step
//! 3. `stop_movement()` or reaching the last waypoint - back to Idle

use std::time::Duration;

use glam::Vec2;

use super::facing::Facing;
use crate::core::AgentConfig;

/// A path being followed
#[derive(Debug, Clone, PartialEq)]
pub struct PathFollow {
    /// Waypoints in world coordinates, never empty
    waypoints: Vec<Vec2>,
    /// Index of the waypoint currently targeted
    index: usize,
    /// Position recorded at the last stuck sample
    sample_position: Vec2,
    /// Time of the last stuck sample
    sampled_at: Duration,
}

impl PathFollow {
    /// Waypoints of the path
    #[must_use]
    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Index of the current target waypoint
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current target waypoint
    #[must_use]
    pub fn target(&self) -> Vec2 {
        self.waypoints[self.index]
    }

    fn has_next(&self) -> bool {
        self.index + 1 < self.waypoints.len()
    }

    fn resample(&mut self, position: Vec2, now: Duration) {
        self.sample_position = position;
        self.sampled_at = now;
    }
}

/// Motor state
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MotorState {
    /// Standing still
    #[default]
    Idle,
    /// Following a path
    Moving(PathFollow),
}

/// What a single update did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorStep {
    /// Nothing to do
    Idle,
    /// Stepped towards the current waypoint
    Moved,
    /// Reached waypoint `n`, now targeting `n + 1`
    WaypointReached(usize),
    /// Reached the last waypoint, now idle
    Arrived,
    /// No progress since the last sample, skipped ahead to waypoint `n`
    StuckSkipped(usize),
    /// No progress on the last waypoint, gave up
    StuckStopped,
}

/// Moves an agent along waypoint paths
#[derive(Debug, Clone)]
pub struct AgentMotor {
    position: Vec2,
    velocity: Vec2,
    facing: Facing,
    config: AgentConfig,
    state: MotorState,
}

impl AgentMotor {
    /// Create an idle motor at `position`
    #[must_use]
    pub fn new(position: Vec2, config: AgentConfig) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            facing: Facing::default(),
            config,
            state: MotorState::Idle,
        }
    }

    /// Current world position
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Velocity applied during the last tick, zero if the agent did not step
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Last facing direction
    #[must_use]
    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Tuning in use
    #[must_use]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> &MotorState {
        &self.state
    }

    /// Check whether a path is being followed
    #[must_use]
    pub fn is_moving(&self) -> bool {
        matches!(self.state, MotorState::Moving(_))
    }

    /// Waypoint currently walked towards
    #[must_use]
    pub fn current_target(&self) -> Option<Vec2> {
        match &self.state {
            MotorState::Moving(follow) => Some(follow.target()),
            MotorState::Idle => None,
        }
    }

    /// Apply an external displacement (collision response and the like).
    ///
    /// The path is kept; the stuck sampler sees the corrected position.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Move instantly, dropping velocity and any path
    pub fn teleport(&mut self, position: Vec2) {
        self.position = position;
        self.stop_movement();
    }

    /// Replace the current path. An empty list stops the agent.
    pub fn set_path(&mut self, waypoints: Vec<Vec2>, now: Duration) {
        if waypoints.is_empty() {
            self.stop_movement();
            return;
        }

        log::debug!("Following path with {} waypoints", waypoints.len());
        self.state = MotorState::Moving(PathFollow {
            waypoints,
            index: 0,
            sample_position: self.position,
            sampled_at: now,
        });
    }

    /// Stop and forget the current path
    pub fn stop_movement(&mut self) {
        self.velocity = Vec2::ZERO;
        self.state = MotorState::Idle;
    }

    /// Advance the agent by `dt` seconds
    pub fn update(&mut self, dt: f32, now: Duration) -> MotorStep {
        let (state, step) = match std::mem::take(&mut self.state) {
            MotorState::Idle => (MotorState::Idle, MotorStep::Idle),
            MotorState::Moving(follow) => self.follow(follow, dt, now),
        };

        if state == MotorState::Idle {
            self.velocity = Vec2::ZERO;
        }
        self.state = state;
        step
    }

    fn follow(&mut self, mut follow: PathFollow, dt: f32, now: Duration) -> (MotorState, MotorStep) {
        let to_target = follow.target() - self.position;
        let distance = to_target.length();

        // The step clamp can land exactly on a waypoint; with a zero threshold
        // that must still count as arrival
        if distance < self.config.arrival_threshold || distance <= f32::EPSILON {
            if follow.has_next() {
                let reached = follow.index;
                follow.index += 1;
                self.velocity = Vec2::ZERO;
                return (MotorState::Moving(follow), MotorStep::WaypointReached(reached));
            }
            log::debug!("Arrived at {}", self.position);
            return (MotorState::Idle, MotorStep::Arrived);
        }

        if now.saturating_sub(follow.sampled_at) >= self.config.stuck_interval() {
            let moved = self.position.distance(follow.sample_position);
            follow.resample(self.position, now);

            if moved < self.config.stuck_min_movement {
                if follow.has_next() {
                    follow.index += 1;
                    log::warn!(
                        "Agent stuck at {}, skipping to waypoint {}",
                        self.position,
                        follow.index
                    );
                    let skipped_to = follow.index;
                    self.velocity = Vec2::ZERO;
                    return (MotorState::Moving(follow), MotorStep::StuckSkipped(skipped_to));
                }
                log::warn!("Agent stuck at {} on final waypoint, stopping", self.position);
                return (MotorState::Idle, MotorStep::StuckStopped);
            }
        }

        let direction = to_target / distance;
        self.velocity = direction * self.config.speed;
        self.position += direction * (self.config.speed * dt).min(distance);
        if let Some(facing) = Facing::from_direction(direction) {
            self.facing = facing;
        }

        (MotorState::Moving(follow), MotorStep::Moved)
    }
}
