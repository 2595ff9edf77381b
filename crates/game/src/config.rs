//! Simulation configuration.
//!
//! Every field has a tuned default, so a config file only needs to name
//! what it changes:
//!
//! ```toml
//! tick_rate = 120
//!
//! [locomotion]
//! jump_force = 18.0
//!
//! [grapple]
//! slow_motion_scale = 0.2
//! ```

use serde::{Deserialize, Serialize};
use tether_physics::LocomotionConfig;

use crate::camera::CameraConfig;
use crate::error::ConfigError;
use crate::grapple::GrappleConfig;

/// Game simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulation tick rate (ticks per second).
    pub tick_rate: u32,

    /// Movement physics configuration.
    pub locomotion: LocomotionConfig,

    /// Targeting and pull configuration.
    pub grapple: GrappleConfig,

    /// Camera follow configuration.
    pub camera: CameraConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            locomotion: LocomotionConfig::default(),
            grapple: GrappleConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Parse a config from TOML. Missing fields keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Get the time step per tick in seconds.
    pub fn delta_time(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }

    /// Reject values that make the game misbehave.
    ///
    /// The simulation never calls this itself; degenerate values are
    /// tolerated at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let loco = &self.locomotion;
        let grapple = &self.grapple;

        if self.tick_rate == 0 {
            return Err(ConfigError::invalid("tick_rate", "must be at least 1"));
        }
        if loco.move_speed < 0.0 {
            return Err(ConfigError::invalid("locomotion.move_speed", "must not be negative"));
        }
        if loco.gravity > 0.0 {
            return Err(ConfigError::invalid("locomotion.gravity", "must point down"));
        }
        if loco.collider.size.x <= 0.0 || loco.collider.size.y <= 0.0 {
            return Err(ConfigError::invalid("locomotion.collider.size", "must be positive"));
        }
        if loco.skin_width < 0.0 || loco.skin_width >= loco.ground_probe_distance {
            return Err(ConfigError::invalid(
                "locomotion.skin_width",
                "must be non-negative and below ground_probe_distance",
            ));
        }
        if loco.coyote_time < 0.0 || loco.jump_buffer_time < 0.0 {
            return Err(ConfigError::invalid("locomotion.coyote_time", "windows must not be negative"));
        }
        if grapple.grapple_speed <= 0.0 {
            return Err(ConfigError::invalid("grapple.grapple_speed", "must be positive"));
        }
        if grapple.grapple_radius < 0.0 {
            return Err(ConfigError::invalid("grapple.grapple_radius", "must not be negative"));
        }
        if grapple.targeting_duration <= 0.0 {
            return Err(ConfigError::invalid("grapple.targeting_duration", "must be positive"));
        }
        if !(grapple.slow_motion_scale > 0.0 && grapple.slow_motion_scale <= 1.0) {
            return Err(ConfigError::invalid("grapple.slow_motion_scale", "must be in (0, 1]"));
        }
        if grapple.arrive_distance <= 0.0 {
            return Err(ConfigError::invalid("grapple.arrive_distance", "must be positive"));
        }
        if self.camera.aspect <= 0.0 {
            return Err(ConfigError::invalid("camera.aspect", "must be positive"));
        }
        Ok(())
    }
}
