//! Character locomotion controller.
//!
//! This is the main entry point for character movement. It takes a frame's
//! input and advances the [`MovementState`] through the collision world.

use glam::{Vec2, Vec3};

use crate::collision::CollisionQuery;

use super::config::LocomotionConfig;
use super::state::{Facing, LocomotionInput, MovementState};

/// How far below a spawn point to look for ground.
const SPAWN_PROBE_DISTANCE: f32 = 10.0;

/// What happened during a locomotion tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// A jump fired this tick.
    pub jumped: bool,

    /// The horizontal sweep was blocked and horizontal motion cancelled.
    pub blocked_horizontal: bool,

    /// The vertical sweep was blocked (landed or bonked a ceiling).
    pub blocked_vertical: bool,
}

/// Character locomotion controller.
///
/// Each tick runs, in order: jump buffering, horizontal input, gravity,
/// ground probe, coyote window, jump, ground stick, then one swept move per
/// axis. Horizontal contact stops the character dead; vertical contact lets
/// it advance to just short of the surface.
///
/// # Example
///
/// ```ignore
/// let controller = LocomotionController::new(LocomotionConfig::default());
/// let mut state = MovementState::new(spawn_position);
///
/// // Each frame:
/// controller.update(&mut state, &input, &world, dt, unscaled_dt, paused);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocomotionController {
    /// Movement configuration.
    pub config: LocomotionConfig,
}

impl LocomotionController {
    /// Create a new controller with the given configuration.
    pub fn new(config: LocomotionConfig) -> Self {
        Self { config }
    }

    /// Place a character on the ground below `spawn_pos`, if there is any.
    ///
    /// The character ends up one skin width above the surface and is
    /// marked grounded. With no ground in range it is left at `spawn_pos`.
    pub fn spawn_at<W: CollisionQuery + ?Sized>(
        &self,
        state: &mut MovementState,
        spawn_pos: Vec3,
        world: &W,
    ) {
        *state = MovementState::new(spawn_pos);

        let shape = &self.config.collider;
        let hit = world.sweep_box(
            shape.center_at(spawn_pos),
            shape.size,
            -Vec2::Y,
            SPAWN_PROBE_DISTANCE,
            self.config.ground_mask,
        );

        if let Some(hit) = hit {
            let drop = (hit.distance - self.config.skin_width).max(0.0);
            state.body.position.y -= drop;
            state.grounded = true;
        }
    }

    /// Advance a character by one tick.
    ///
    /// # Arguments
    ///
    /// * `state` - The character's movement state (will be modified)
    /// * `input` - Horizontal axis and jump edge for this frame
    /// * `world` - Collision geometry
    /// * `delta_time` - Scaled time step (seconds), drives physics
    /// * `unscaled_delta_time` - Real time step (seconds), drives the grace windows
    /// * `paused` - When set, nothing changes
    pub fn update<W: CollisionQuery + ?Sized>(
        &self,
        state: &mut MovementState,
        input: &LocomotionInput,
        world: &W,
        delta_time: f32,
        unscaled_delta_time: f32,
        paused: bool,
    ) -> StepReport {
        if paused {
            return StepReport::default();
        }

        let config = &self.config;
        let mut report = StepReport::default();

        state
            .timers
            .update_jump_buffer(input.jump_pressed, config.jump_buffer_time, unscaled_delta_time);

        // Horizontal input
        let axis = input.axis.clamp(-1.0, 1.0);
        if let Some(facing) = Facing::from_axis(axis) {
            state.body.facing = facing;
        }
        state.body.velocity.x = axis * config.move_speed;

        // Gravity
        state.body.velocity.y += config.gravity * delta_time;

        // Ground, coyote, jump
        state.grounded = self.check_ground(state, world);
        state
            .timers
            .update_coyote(state.grounded, config.coyote_time, unscaled_delta_time);

        if state.timers.try_consume_jump() {
            state.body.velocity.y = config.jump_force;
            report.jumped = true;
            log::debug!("jump fired at {:?} (grounded={})", state.body.position, state.grounded);
        }

        if state.grounded && state.body.velocity.y <= 0.0 {
            state.body.velocity.y = config.grounded_stick_velocity;
        }

        // Swept move, one axis at a time
        let mut displacement = state.body.velocity * delta_time;
        report.blocked_horizontal = self.sweep_horizontal(state, world, &mut displacement);
        report.blocked_vertical = self.sweep_vertical(state, world, &mut displacement);

        state.body.translate(displacement);

        report
    }

    /// Probe a short distance below the character for ground.
    pub fn check_ground<W: CollisionQuery + ?Sized>(&self, state: &MovementState, world: &W) -> bool {
        let shape = &self.config.collider;
        world
            .sweep_box(
                shape.center_at(state.body.position),
                shape.size,
                -Vec2::Y,
                self.config.ground_probe_distance,
                self.config.ground_mask,
            )
            .is_some()
    }

    // ========================================================================
    // Axis sweeps
    // ========================================================================

    /// Horizontal contact cancels horizontal motion entirely.
    fn sweep_horizontal<W: CollisionQuery + ?Sized>(
        &self,
        state: &mut MovementState,
        world: &W,
        displacement: &mut Vec2,
    ) -> bool {
        if displacement.x == 0.0 {
            return false;
        }

        let shape = &self.config.collider;
        let direction = Vec2::new(displacement.x.signum(), 0.0);
        let hit = world.sweep_box(
            shape.center_at(state.body.position),
            shape.size,
            direction,
            displacement.x.abs(),
            self.config.ground_mask,
        );

        if hit.is_none() {
            return false;
        }

        displacement.x = 0.0;
        state.body.velocity.x = 0.0;
        true
    }

    /// Vertical contact advances up to one skin width short of the surface.
    fn sweep_vertical<W: CollisionQuery + ?Sized>(
        &self,
        state: &mut MovementState,
        world: &W,
        displacement: &mut Vec2,
    ) -> bool {
        if displacement.y == 0.0 {
            return false;
        }

        let shape = &self.config.collider;
        let sign = displacement.y.signum();
        let requested = displacement.y.abs();
        let hit = world.sweep_box(
            shape.center_at(state.body.position),
            shape.size,
            Vec2::new(0.0, sign),
            requested,
            self.config.ground_mask,
        );

        let Some(hit) = hit else {
            return false;
        };

        let allowed = requested
            .min(hit.distance - self.config.skin_width)
            .max(0.0);
        displacement.y = allowed * sign;
        state.body.velocity.y = 0.0;
        true
    }
}

// ============================================================================
// Tests
// ============================================================================
