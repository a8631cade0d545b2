//! Navigation and agent configuration
//!
//! Loadable from RON or JSON. Every field has a default, so a config file
//! only needs to list what it changes.

use std::fs;
use std::path::Path;
use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::nav::{DEFAULT_WALKABLE_THRESHOLD, RingSearch, agent_padding};

/// Movement tuning for one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Movement speed in pixels per second
    pub speed: f32,
    /// Distance at which a waypoint counts as reached
    pub arrival_threshold: f32,
    /// Time between stuck samples, in milliseconds
    pub stuck_interval_ms: u64,
    /// Displacement below which a sample counts as stuck
    pub stuck_min_movement: f32,
    /// Collision half-extents of the agent's body
    pub half_extents: Vec2,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            speed: 200.0,
            arrival_threshold: 5.0,
            stuck_interval_ms: 400,
            stuck_min_movement: 2.0,
            half_extents: Vec2::splat(16.0),
        }
    }
}

impl AgentConfig {
    /// Set movement speed
    #[must_use]
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Set the stuck sampling interval
    #[must_use]
    pub fn with_stuck_interval(mut self, interval: Duration) -> Self {
        self.stuck_interval_ms = interval.as_millis() as u64;
        self
    }

    /// Set collision half-extents
    #[must_use]
    pub fn with_half_extents(mut self, half_extents: Vec2) -> Self {
        self.half_extents = half_extents;
        self
    }

    /// Stuck sampling interval
    #[must_use]
    pub fn stuck_interval(&self) -> Duration {
        Duration::from_millis(self.stuck_interval_ms)
    }

    /// Edge padding used when clamping points for this agent
    #[must_use]
    pub fn padding(&self) -> f32 {
        agent_padding(self.half_extents)
    }
}

/// Navigation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Image key of the navigability mask
    pub mask_key: String,
    /// Brightness at or above which a pixel is walkable
    pub walkable_threshold: u8,
    /// Grid cell size in pixels
    pub cell_size: f32,
    /// Nearest-walkable search used for goals, start and recovery
    pub fallback: RingSearch,
    /// How long click markers stay visible, in milliseconds
    pub marker_lifetime_ms: u64,
    /// The controlled agent
    pub agent: AgentConfig,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            mask_key: String::from("hub_navmap"),
            walkable_threshold: DEFAULT_WALKABLE_THRESHOLD,
            cell_size: 32.0,
            fallback: RingSearch::default(),
            marker_lifetime_ms: 500,
            agent: AgentConfig::default(),
        }
    }
}

impl NavConfig {
    /// Set the mask image key
    #[must_use]
    pub fn with_mask_key(mut self, key: impl Into<String>) -> Self {
        self.mask_key = key.into();
        self
    }

    /// Set grid cell size
    #[must_use]
    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Set the nearest-walkable search
    #[must_use]
    pub fn with_fallback(mut self, fallback: RingSearch) -> Self {
        self.fallback = fallback;
        self
    }

    /// Set agent tuning
    #[must_use]
    pub fn with_agent(mut self, agent: AgentConfig) -> Self {
        self.agent = agent;
        self
    }

    /// Marker lifetime
    #[must_use]
    pub fn marker_lifetime(&self) -> Duration {
        Duration::from_millis(self.marker_lifetime_ms)
    }

    /// Save the config to a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_ron(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let ron_string = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;
        fs::write(path, ron_string).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Load a config from a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        ron::from_str(&content).map_err(|e| ConfigError::DeserializeError(e.to_string()))
    }

    /// Load a config from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| ConfigError::DeserializeError(e.to_string()))
    }

    /// Load a config, picking the format from the file extension
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::load_json(path),
            _ => Self::load_ron(path),
        }
    }
}

/// Errors that can occur while loading or saving configuration
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// IO error
    IoError(String),
    /// Serialization error
    SerializeError(String),
    /// Deserialization error
    DeserializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::SerializeError(e) => write!(f, "Serialization error: {e}"),
            Self::DeserializeError(e) => write!(f, "Deserialization error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}
