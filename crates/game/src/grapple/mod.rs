//! Slow-motion targeting and weighted grapple pulls.
//!
//! - [`targeting`] - Candidate gathering and selection
//! - [`pull`] - Per-weight-class pull steps
//! - [`controller`] - The Idle / Targeting / Pulling mode machine

pub mod config;
pub mod controller;
pub mod pull;
pub mod targeting;

pub use config::GrappleConfig;
pub use controller::{
    GrappleController, GrappleEvent, GrappleInput, GrappleMode, GrappleTick, Pulling, Rope,
    Targeting,
};
pub use pull::PullStep;
pub use targeting::{gather_candidates, planar_distance, Candidates, GrappleTarget};
