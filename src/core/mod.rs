//! Core scene plumbing
//!
//! Contains configuration, the scene clock, the event queue and the scene
//! that drives navigation each tick.

mod config;
mod events;
mod scene;
mod time;

pub use config::{AgentConfig, ConfigError, NavConfig};
pub use events::{EventQueue, NavEvent};
pub use scene::NavScene;
pub use time::Time;
