//! Movement state and input structures.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::timers::TimingCounters;

/// Which way the character faces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// `-1.0` for left, `1.0` for right.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Facing that matches a horizontal input, or `None` for zero input.
    pub fn from_axis(axis: f32) -> Option<Self> {
        if axis > 0.0 {
            Some(Self::Right)
        } else if axis < 0.0 {
            Some(Self::Left)
        } else {
            None
        }
    }
}

/// Position, velocity and facing of a character.
///
/// Position is 3D so the character can share a scene with depth-sorted
/// props; movement only ever changes `x` and `y`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    /// Position in world space (centre of the character).
    pub position: Vec3,

    /// Velocity (units/second).
    pub velocity: Vec2,

    /// Which way the character faces.
    pub facing: Facing,
}

impl KinematicBody {
    /// Create a body at rest at the given position.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Move by a 2D displacement.
    #[inline]
    pub fn translate(&mut self, displacement: Vec2) {
        self.position += displacement.extend(0.0);
    }
}

/// Complete locomotion state for a character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementState {
    /// Position, velocity, facing.
    pub body: KinematicBody,

    /// Coyote and jump-buffer windows.
    pub timers: TimingCounters,

    /// Result of the last grounded probe.
    pub grounded: bool,
}

impl MovementState {
    /// Create a new movement state at the given position.
    pub fn new(position: Vec3) -> Self {
        Self {
            body: KinematicBody::new(position),
            ..Default::default()
        }
    }

    /// Current position.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    /// Current velocity.
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    /// Airborne and moving up.
    pub fn is_rising(&self) -> bool {
        !self.grounded && self.body.velocity.y > 0.0
    }

    /// Airborne and moving down (or hanging at the apex).
    pub fn is_falling(&self) -> bool {
        !self.grounded && self.body.velocity.y <= 0.0
    }
}

/// Input for a single locomotion tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LocomotionInput {
    /// Horizontal axis in `[-1, 1]`.
    pub axis: f32,

    /// Jump was pressed this frame (edge, not held).
    pub jump_pressed: bool,
}

impl LocomotionInput {
    /// Input with only a horizontal axis.
    pub fn axis(axis: f32) -> Self {
        Self {
            axis,
            jump_pressed: false,
        }
    }

    /// Input with only a jump press.
    pub fn jump() -> Self {
        Self {
            axis: 0.0,
            jump_pressed: true,
        }
    }

    /// Check if any horizontal input is active.
    #[inline]
    pub fn has_movement_input(&self) -> bool {
        self.axis != 0.0
    }
}
