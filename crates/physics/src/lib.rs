//! Tether Physics
//!
//! Kinematic movement for a 2D platformer character. Nothing here is a
//! rigid-body simulation: velocities are set directly from input and
//! gravity, and collision is resolved by sweeping the character's box
//! along one axis at a time.
//!
//! # Architecture
//!
//! - **Collision**: Sweeps boxes through the world, reports the nearest contact
//! - **Movement**: Uses sweeps to implement run, fall, and jump with grace windows

pub mod collision;
pub mod movement;

// Re-export commonly used types
pub use collision::{BoxShape, CollisionQuery, CollisionWorld, LayerMask, SweepHit};
pub use movement::{
    Facing, KinematicBody, LocomotionConfig, LocomotionController, LocomotionInput,
    MovementState, StepReport, TimingCounters,
};
