//! Player entity and state.

use glam::{Vec2, Vec3};
use tether_physics::{CollisionQuery, Facing, LocomotionController, MovementState, StepReport};

use crate::camera::Viewport;
use crate::config::SimulationConfig;
use crate::entities::TargetWorld;
use crate::grapple::{GrappleController, GrappleTick};
use crate::input::FrameInput;
use crate::time::{FrameTime, TimeScale};

/// The player character: locomotion state plus both controllers.
///
/// Each tick the grapple runs first; when it owns the frame, locomotion is
/// paused.
#[derive(Debug)]
pub struct Player {
    /// Movement physics state.
    pub movement: MovementState,

    /// Walking, gravity and jumping.
    pub locomotion: LocomotionController,

    /// Targeting and pulling.
    pub grapple: GrappleController,
}

/// What happened to the player during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerTick {
    pub grapple: GrappleTick,
    pub step: StepReport,
}

impl Player {
    /// Create a new player at the given position.
    pub fn new(config: &SimulationConfig, time_scale: TimeScale, spawn_position: Vec3) -> Self {
        Self {
            movement: MovementState::new(spawn_position),
            locomotion: LocomotionController::new(config.locomotion.clone()),
            grapple: GrappleController::new(config.grapple.clone(), time_scale),
        }
    }

    /// Place the player on the ground below `position`.
    pub fn spawn_at<C: CollisionQuery + ?Sized>(&mut self, position: Vec3, collision: &C) {
        self.grapple.cancel();
        self.locomotion.spawn_at(&mut self.movement, position, collision);
    }

    /// Advance the player by one tick.
    pub fn update<C, W>(
        &mut self,
        input: &FrameInput,
        collision: &C,
        world: &mut W,
        viewport: Option<&dyn Viewport>,
        time: FrameTime,
    ) -> PlayerTick
    where
        C: CollisionQuery + ?Sized,
        W: TargetWorld + ?Sized,
    {
        let grapple = self.grapple.update(
            &input.grapple,
            &mut self.movement.body,
            world,
            viewport,
            time,
        );

        let step = self.locomotion.update(
            &mut self.movement,
            &input.locomotion,
            collision,
            time.delta,
            time.unscaled_delta,
            grapple.suspends_locomotion,
        );

        PlayerTick { grapple, step }
    }

    // ========================================================================
    // Render queries
    // ========================================================================

    /// Get the player's current position.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.movement.position()
    }

    /// Get the player's current velocity.
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.movement.velocity()
    }

    /// Which way the sprite should face.
    #[inline]
    pub fn facing(&self) -> Facing {
        self.movement.body.facing
    }

    /// Check if the player is on the ground.
    #[inline]
    pub fn on_ground(&self) -> bool {
        self.movement.grounded
    }

    /// Rope endpoints while pulling.
    pub fn rope(&self) -> Option<(Vec3, Vec3)> {
        self.grapple.rope().map(|rope| (rope.start, rope.end))
    }

    /// Position of the selected target while targeting.
    pub fn marker<W: TargetWorld + ?Sized>(&self, world: &W) -> Option<Vec3> {
        self.grapple.marker_position(world)
    }

    /// Fill level of the targeting countdown bar, hidden outside targeting.
    pub fn targeting_fraction(&self) -> Option<f32> {
        self.grapple.targeting_fraction()
    }

    /// Collider box as `(min, max)`.
    pub fn collider_bounds(&self) -> (Vec2, Vec2) {
        self.locomotion.config.collider.bounds_at(self.position())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EntityStore, WeightClass};
    use crate::grapple::GrappleInput;
    use tether_physics::{CollisionWorld, LayerMask, LocomotionInput};

    const DT: f32 = 1.0 / 60.0;

    struct Everything;

    impl Viewport for Everything {
        fn world_to_viewport(&self, _position: Vec3) -> Vec3 {
            Vec3::new(0.5, 0.5, 1.0)
        }
    }

    fn floor() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.add_box(Vec2::new(0.0, -0.5), Vec2::new(50.0, 0.5), LayerMask::GROUND);
        world
    }

    fn player(scale: &TimeScale) -> Player {
        Player::new(&SimulationConfig::default(), scale.clone(), Vec3::new(0.0, 3.0, 0.0))
    }

    #[test]
    fn test_spawn_lands_on_floor() {
        let scale = TimeScale::new();
        let collision = floor();
        let mut player = player(&scale);

        player.spawn_at(Vec3::new(1.0, 3.0, 0.0), &collision);

        assert!(player.on_ground());
        // Collider half-height 0.9 above the floor top, plus skin
        assert!((player.position().y - 0.91).abs() < 1e-4);
        let (min, max) = player.collider_bounds();
        assert!((min.y - 0.01).abs() < 1e-4);
        assert!((max.x - min.x - 0.9).abs() < 1e-5);
    }

    #[test]
    fn test_walks_when_grapple_idle() {
        let scale = TimeScale::new();
        let collision = floor();
        let mut store = EntityStore::new();
        let mut player = player(&scale);
        player.spawn_at(Vec3::new(0.0, 3.0, 0.0), &collision);

        let input = FrameInput {
            locomotion: LocomotionInput::axis(-1.0),
            ..Default::default()
        };
        let tick = player.update(&input, &collision, &mut store, None, scale.frame(DT));

        assert!(!tick.grapple.suspends_locomotion);
        assert!(player.position().x < 0.0);
        assert_eq!(player.facing(), Facing::Left);
    }

    #[test]
    fn test_targeting_pauses_locomotion() {
        let scale = TimeScale::new();
        let collision = floor();
        let mut store = EntityStore::new();
        store.spawn(Vec3::new(3.0, 1.0, 0.0), WeightClass::Light);
        let mut player = player(&scale);
        player.spawn_at(Vec3::new(0.0, 3.0, 0.0), &collision);
        let start = player.position();

        let input = FrameInput {
            locomotion: LocomotionInput { axis: 1.0, jump_pressed: true },
            grapple: GrappleInput::toggle(),
        };
        let tick = player.update(&input, &collision, &mut store, Some(&Everything), scale.frame(DT));

        assert!(tick.grapple.suspends_locomotion);
        assert!(!tick.step.jumped);
        assert_eq!(player.position(), start);
        assert_eq!(player.marker(&store), Some(Vec3::new(3.0, 1.0, 0.0)));
        assert!(player.targeting_fraction().is_some());
        assert_eq!(player.rope(), None);
    }

    #[test]
    fn test_respawn_cancels_targeting() {
        let scale = TimeScale::new();
        let collision = floor();
        let mut store = EntityStore::new();
        let mut player = player(&scale);

        let input = FrameInput {
            grapple: GrappleInput::toggle(),
            ..Default::default()
        };
        player.update(&input, &collision, &mut store, Some(&Everything), scale.frame(DT));
        assert!(!scale.is_normal());

        player.spawn_at(Vec3::new(0.0, 3.0, 0.0), &collision);
        assert!(scale.is_normal());
        assert!(player.grapple.is_idle());
    }
}
