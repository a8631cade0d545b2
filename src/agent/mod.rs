//! The navigating agent
//!
//! Provides the path-following motor and the facing derived from its motion.

mod facing;
mod motor;

pub use facing::Facing;
pub use motor::{AgentMotor, MotorState, MotorStep, PathFollow};
