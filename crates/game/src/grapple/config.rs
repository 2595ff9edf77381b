//! Grapple tuning.

use serde::{Deserialize, Serialize};

/// Configuration for targeting and pulling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrappleConfig {
    /// Pull speed (units/second). Medium pulls split it between both ends.
    pub grapple_speed: f32,

    /// Maximum 2D distance to a candidate when targeting starts.
    pub grapple_radius: f32,

    /// How long targeting lasts before it cancels itself (real seconds).
    pub targeting_duration: f32,

    /// Time scale applied while targeting.
    pub slow_motion_scale: f32,

    /// A pull ends once the 2D separation drops below this.
    pub arrive_distance: f32,
}

impl Default for GrappleConfig {
    fn default() -> Self {
        Self {
            grapple_speed: 25.0,
            grapple_radius: 10.0,
            targeting_duration: 2.5,
            slow_motion_scale: 0.1,
            arrive_distance: 0.2,
        }
    }
}
