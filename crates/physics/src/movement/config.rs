//! Movement configuration constants.
//!
//! All locomotion parameters are grouped here for easy tuning.
//! Units are world units and seconds. Gravity is negative (down is -Y).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::collision::{BoxShape, LayerMask};

/// Configuration for character locomotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    // ========================================================================
    // Movement
    // ========================================================================
    /// Horizontal speed at full axis deflection (units/second).
    pub move_speed: f32,

    /// Vertical velocity set when a jump fires (units/second).
    pub jump_force: f32,

    /// Gravity acceleration (units/second², negative).
    pub gravity: f32,

    // ========================================================================
    // Collision
    // ========================================================================
    /// Character collision box.
    pub collider: BoxShape,

    /// Layers the character collides with.
    pub ground_mask: LayerMask,

    /// How far below the box the grounded probe reaches.
    pub ground_probe_distance: f32,

    /// Clearance kept between the box and a floor or ceiling.
    pub skin_width: f32,

    /// Vertical velocity held while grounded so the probe keeps touching.
    pub grounded_stick_velocity: f32,

    // ========================================================================
    // Timers (seconds, unscaled)
    // ========================================================================
    /// Grace period after leaving the ground during which jump still fires.
    pub coyote_time: f32,

    /// How long a jump press is remembered before landing.
    pub jump_buffer_time: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 8.0,
            jump_force: 16.0,
            gravity: -40.0,

            collider: BoxShape {
                size: Vec2::new(0.9, 1.8),
                offset: Vec2::ZERO,
            },
            ground_mask: LayerMask::GROUND,
            ground_probe_distance: 0.05,
            skin_width: 0.01,
            grounded_stick_velocity: -2.0,

            coyote_time: 0.1,
            jump_buffer_time: 0.1,
        }
    }
}

impl LocomotionConfig {
    /// Low gravity with generous input windows.
    pub fn floaty() -> Self {
        Self {
            move_speed: 6.0,
            jump_force: 12.0,
            gravity: -20.0,
            coyote_time: 0.15,
            jump_buffer_time: 0.15,
            ..Default::default()
        }
    }

    /// Heavy gravity, high jump, tight windows.
    pub fn snappy() -> Self {
        Self {
            move_speed: 10.0,
            jump_force: 20.0,
            gravity: -60.0,
            coyote_time: 0.07,
            jump_buffer_time: 0.08,
            ..Default::default()
        }
    }

    /// Apex height of a jump from rest, ignoring ceilings.
    pub fn jump_height(&self) -> f32 {
        if self.gravity >= 0.0 {
            return f32::INFINITY;
        }
        self.jump_force * self.jump_force / (-2.0 * self.gravity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LocomotionConfig::default();
        assert_eq!(config.move_speed, 8.0);
        assert!(config.gravity < 0.0);
        assert!(config.skin_width < config.ground_probe_distance);
        assert!(config.grounded_stick_velocity < 0.0);
    }

    #[test]
    fn test_jump_height() {
        let config = LocomotionConfig::default();
        // 16² / 80
        assert!((config.jump_height() - 3.2).abs() < 1e-5);
    }

    #[test]
    fn test_presets_keep_collider() {
        let base = LocomotionConfig::default();
        assert_eq!(LocomotionConfig::floaty().collider, base.collider);
        assert!(LocomotionConfig::snappy().gravity < base.gravity);
    }
}
