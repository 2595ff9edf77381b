//! Tether Game Logic
//!
//! This crate contains the player simulation built on `tether_physics`:
//!
//! - Player input and edge detection
//! - Slow-motion targeting and weighted grapple pulls
//! - Props, camera and the global time scale
//! - Configuration loading
//!
//! # Architecture
//!
//! Each frame the grapple runs first. While it is targeting or pulling it
//! owns the character and locomotion is paused; otherwise locomotion runs
//! as usual. The camera follows afterwards.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Simulation                           │
//! │  ┌─────────┐    ┌──────────┐    ┌────────────┐    ┌───────┐  │
//! │  │ Input   │───►│ Grapple  │───►│ Locomotion │───►│Camera │  │
//! │  │ Tracker │    │ (targets,│    │ (paused if │    │follow │  │
//! │  └─────────┘    │  pulls)  │    │  grappling)│    └───────┘  │
//! │                 └──────────┘    └────────────┘               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Targeting slows the shared [`TimeScale`]; everything that must keep
//! real-time pace reads the unscaled delta from [`FrameTime`].

pub mod camera;
pub mod config;
pub mod entities;
pub mod error;
pub mod grapple;
pub mod input;
pub mod player;
pub mod simulation;
pub mod time;

// Re-export main types
pub use camera::{Camera2D, CameraConfig, Viewport};
pub use config::SimulationConfig;
pub use entities::{EntityId, EntityStore, Prop, TargetWorld, WeightClass};
pub use error::ConfigError;
pub use grapple::{
    GrappleConfig, GrappleController, GrappleEvent, GrappleInput, GrappleMode, GrappleTick,
};
pub use input::{FrameInput, InputTracker, PlayerInput};
pub use player::{Player, PlayerTick};
pub use simulation::Simulation;
pub use time::{FrameTime, TimeDilation, TimeScale};

// Re-export physics types for convenience
pub use tether_physics::{
    BoxShape, CollisionQuery, CollisionWorld, Facing, LayerMask, LocomotionConfig,
    LocomotionController, LocomotionInput, MovementState,
};
