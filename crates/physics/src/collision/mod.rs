//! Collision detection for 2D character movement.
//!
//! Characters are axis-aligned boxes. Movement code never moves a box
//! through geometry directly; it asks for a sweep along one axis and
//! decides what to do with the reported contact.
//!
//! # Key Types
//!
//! - [`CollisionQuery`]: The sweep interface movement code depends on
//! - [`CollisionWorld`]: Reference world of static boxes
//! - [`SweepHit`]: Output from a sweep that hit something
//! - [`BoxShape`]: The swept box (size + offset)

mod layers;
mod sweep;
mod world;

pub use layers::LayerMask;
pub use sweep::{BoxShape, CollisionQuery, SweepHit};
pub use world::{CollisionWorld, Solid};
