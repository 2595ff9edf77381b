//! Character locomotion for 2D platforming.
//!
//! This module implements kinematic platformer movement with:
//!
//! - Direct horizontal control (no acceleration curves)
//! - Gravity integration
//! - Coyote time and jump buffering
//! - Axis-separated swept collision
//!
//! # Design
//!
//! Movement is driven by the [`LocomotionController`], which takes a frame's
//! input and updates a [`MovementState`] through any [`CollisionQuery`].
//!
//! The controller is stateless apart from its configuration, so a single
//! controller can drive many characters.
//!
//! [`CollisionQuery`]: crate::collision::CollisionQuery

mod config;
mod controller;
mod state;
mod timers;

pub use config::LocomotionConfig;
pub use controller::{LocomotionController, StepReport};
pub use state::{Facing, KinematicBody, LocomotionInput, MovementState};
pub use timers::TimingCounters;
