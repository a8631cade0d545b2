//! The owning scene
//!
//! Holds the clock, the navigation system and the agent, and drives them in
//! the order the tick loop expects: events swap, motor update, off-mesh
//! check, marker expiry. Clicks can arrive at any point between ticks; a
//! second click before the agent arrives simply replaces the path.

use std::time::Duration;

use glam::Vec2;

use super::config::NavConfig;
use super::events::{EventQueue, NavEvent};
use super::time::Time;
use crate::agent::{AgentMotor, MotorState, MotorStep};
use crate::nav::{NavError, NavMask, NavigationSystem, PixelSource};

/// A walkable scene with one click-controlled agent
#[derive(Debug)]
pub struct NavScene {
    /// Scene clock
    pub time: Time,
    /// Navigation events, readable the tick after they happen
    pub events: EventQueue,
    nav: NavigationSystem,
    agent: AgentMotor,
}

impl NavScene {
    /// Build a scene from the configured mask image, placing the agent at
    /// the walkable point nearest `spawn`.
    pub fn new(source: &dyn PixelSource, config: &NavConfig, spawn: Vec2) -> Self {
        Self::from_system(NavigationSystem::new(source, config), config, spawn)
    }

    /// Build a scene around an already sampled mask
    #[must_use]
    pub fn with_mask(mask: NavMask, config: &NavConfig, spawn: Vec2) -> Self {
        Self::from_system(NavigationSystem::with_mask(mask, config), config, spawn)
    }

    fn from_system(nav: NavigationSystem, config: &NavConfig, spawn: Vec2) -> Self {
        let position = nav.spawn_point(spawn);
        log::info!("Scene ready, agent spawned at {position}");
        Self {
            time: Time::new(),
            events: EventQueue::new(),
            nav,
            agent: AgentMotor::new(position, config.agent.clone()),
        }
    }

    /// The navigation system
    #[must_use]
    pub fn nav(&self) -> &NavigationSystem {
        &self.nav
    }

    /// The controlled agent
    #[must_use]
    pub fn agent(&self) -> &AgentMotor {
        &self.agent
    }

    /// The controlled agent, for physics corrections
    pub fn agent_mut(&mut self) -> &mut AgentMotor {
        &mut self.agent
    }

    /// Handle a pointer click at a world position
    ///
    /// # Errors
    ///
    /// Returns the reason when the click could not be turned into a path;
    /// feedback has already been shown.
    pub fn click(&mut self, point: Vec2) -> Result<Vec2, NavError> {
        let now = self.time.elapsed();
        let result = self.nav.move_to(&mut self.agent, point, now);

        match result {
            Ok(destination) => {
                let waypoints = match self.agent.state() {
                    MotorState::Moving(follow) => follow.waypoints().len(),
                    MotorState::Idle => 0,
                };
                self.events.push(NavEvent::PathAssigned {
                    destination,
                    waypoints,
                });
            }
            Err(error) => self.events.push(NavEvent::MoveRejected { error }),
        }

        result
    }

    /// Advance the scene by one tick
    pub fn tick(&mut self, delta: Duration) {
        self.time.advance(delta);
        self.events.swap();

        let now = self.time.elapsed();
        let step = self.agent.update(self.time.delta_seconds(), now);
        let position = self.agent.position();

        match step {
            MotorStep::WaypointReached(index) => {
                self.events.push(NavEvent::WaypointReached { index, position });
            }
            MotorStep::Arrived => self.events.push(NavEvent::Arrived { position }),
            MotorStep::StuckSkipped(index) => self.events.push(NavEvent::StuckRecovered {
                position,
                skipped_to: Some(index),
            }),
            MotorStep::StuckStopped => self.events.push(NavEvent::StuckRecovered {
                position,
                skipped_to: None,
            }),
            MotorStep::Idle | MotorStep::Moved => {}
        }

        if let Some(to) = self.nav.enforce_on_navmesh(&mut self.agent) {
            self.events.push(NavEvent::Snapped { from: position, to });
        }

        self.nav.markers_mut().retain_live(now);
    }
}
