//! Player input handling.
//!
//! This module converts held-button state (keyboard, gamepad) into the
//! pressed edges and axis values the controllers consume.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tether_physics::LocomotionInput;

use crate::grapple::GrappleInput;

/// Raw player input for a single frame.
///
/// This is the input format received from the client input system. Buttons
/// are held state; [`InputTracker`] turns them into presses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerInput {
    /// Movement keys held.
    pub movement: MovementInput,

    /// Analog stick value. Overrides the movement keys when nonzero.
    pub analog_axis: f32,

    /// Action buttons held.
    pub actions: ActionInput,

    /// Frame number this input was generated.
    pub frame: u32,
}

/// Movement key states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementInput {
    pub left: bool,
    pub right: bool,
}

/// Action button states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionInput {
    pub jump: bool,
    pub grapple: bool,
    pub cycle_left: bool,
    pub cycle_right: bool,
    pub select_up: bool,
    pub select_down: bool,
}

impl PlayerInput {
    /// Horizontal axis in `[-1, 1]`.
    ///
    /// Opposing keys cancel out.
    pub fn axis(&self) -> f32 {
        if self.analog_axis != 0.0 {
            return self.analog_axis.clamp(-1.0, 1.0);
        }

        let mut axis = 0.0;
        if self.movement.right {
            axis += 1.0;
        }
        if self.movement.left {
            axis -= 1.0;
        }
        axis
    }

    /// Check if any movement input is active.
    pub fn has_movement(&self) -> bool {
        self.axis() != 0.0
    }
}

/// Input for one tick, ready for the controllers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub locomotion: LocomotionInput,
    pub grapple: GrappleInput,
}

/// Derives pressed edges from held buttons, frame to frame.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    previous: ActionInput,
}

impl InputTracker {
    /// Create a tracker with nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume this frame's held state and produce the tick input.
    pub fn update(&mut self, input: &PlayerInput) -> FrameInput {
        let held = input.actions;
        let prev = self.previous;
        self.previous = held;

        let pressed = |now: bool, before: bool| now && !before;

        let direction = if pressed(held.select_up, prev.select_up) {
            Some(Vec2::Y)
        } else if pressed(held.select_down, prev.select_down) {
            Some(-Vec2::Y)
        } else {
            None
        };

        FrameInput {
            locomotion: LocomotionInput {
                axis: input.axis(),
                jump_pressed: pressed(held.jump, prev.jump),
            },
            grapple: GrappleInput {
                toggle: pressed(held.grapple, prev.grapple),
                cycle_previous: pressed(held.cycle_left, prev.cycle_left),
                cycle_next: pressed(held.cycle_right, prev.cycle_right),
                direction,
            },
        }
    }

    /// Forget held state, so the next frame's buttons all count as presses.
    pub fn reset(&mut self) {
        self.previous = ActionInput::default();
    }
}
