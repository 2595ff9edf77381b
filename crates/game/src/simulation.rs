//! Game simulation - the main game loop.
//!
//! This module owns the world and runs one frame at a time: grapple first,
//! then locomotion (unless the grapple owns the frame), then the camera.
//! Given the same inputs and frame times it always produces the same state.

use glam::{Vec2, Vec3};
use tether_physics::{CollisionWorld, LayerMask};

use crate::camera::{Camera2D, Viewport};
use crate::config::SimulationConfig;
use crate::entities::{EntityStore, WeightClass};
use crate::input::{InputTracker, PlayerInput};
use crate::player::{Player, PlayerTick};
use crate::time::TimeScale;

/// The main game simulation.
#[derive(Debug)]
pub struct Simulation {
    /// Current frame/tick number.
    pub frame: u64,

    /// Simulation configuration.
    pub config: SimulationConfig,

    /// Static level geometry.
    pub collision: CollisionWorld,

    /// Grapple-able props.
    pub props: EntityStore,

    /// Active camera. Without one, nothing can be targeted.
    pub camera: Option<Camera2D>,

    /// The player character.
    pub player: Player,

    time_scale: TimeScale,
    input: InputTracker,
}

impl Simulation {
    /// Create an empty simulation with the player at the origin.
    pub fn new(config: SimulationConfig) -> Self {
        let time_scale = TimeScale::new();
        let player = Player::new(&config, time_scale.clone(), Vec3::ZERO);
        let camera = Camera2D::new(config.camera.clone());

        Self {
            frame: 0,
            config,
            collision: CollisionWorld::new(),
            props: EntityStore::new(),
            camera: Some(camera),
            player,
            time_scale,
            input: InputTracker::new(),
        }
    }

    /// Create a simulation with default configuration and a small test arena.
    ///
    /// A floor spanning x = -20..20 with walls at both ends, one prop of each
    /// weight class, and the player standing at the origin.
    pub fn test() -> Self {
        let mut sim = Self::new(SimulationConfig::default());

        let solid = LayerMask::GROUND | LayerMask::OBSTACLE;
        sim.collision
            .add_box(Vec2::new(0.0, -0.5), Vec2::new(20.0, 0.5), LayerMask::GROUND);
        sim.collision.add_box(Vec2::new(-10.0, 2.0), Vec2::new(0.5, 2.0), solid);
        sim.collision.add_box(Vec2::new(10.0, 2.0), Vec2::new(0.5, 2.0), solid);

        sim.props.spawn(Vec3::new(4.0, 1.5, 0.0), WeightClass::Light);
        sim.props.spawn(Vec3::new(-4.0, 2.0, 0.0), WeightClass::Medium);
        sim.props.spawn(Vec3::new(0.0, 6.0, 0.0), WeightClass::Heavy);

        sim.spawn_player(Vec3::new(0.0, 3.0, 0.0));
        sim
    }

    /// Drop the player onto the ground below `position` and snap the camera.
    pub fn spawn_player(&mut self, position: Vec3) {
        self.player.spawn_at(position, &self.collision);
        self.input.reset();
        if let Some(camera) = &mut self.camera {
            camera.snap_to(self.player.position());
        }
    }

    /// Advance the simulation by one fixed tick.
    pub fn tick(&mut self, input: &PlayerInput) -> PlayerTick {
        self.tick_with_delta(input, self.config.delta_time())
    }

    /// Advance the simulation by `unscaled_delta` real seconds.
    ///
    /// The frame's scaled delta uses the time scale as it stands at the
    /// start of the tick.
    pub fn tick_with_delta(&mut self, input: &PlayerInput, unscaled_delta: f32) -> PlayerTick {
        let time = self.time_scale.frame(unscaled_delta);
        let frame_input = self.input.update(input);

        let viewport = self.camera.as_ref().map(|camera| camera as &dyn Viewport);
        let report = self.player.update(
            &frame_input,
            &self.collision,
            &mut self.props,
            viewport,
            time,
        );

        if let Some(camera) = &mut self.camera {
            camera.follow(self.player.position(), time.delta);
        }

        self.frame += 1;
        report
    }

    /// Shared time scale. Clones observe the live value.
    pub fn time_scale(&self) -> &TimeScale {
        &self.time_scale
    }

    /// Get the delta time for this simulation.
    pub fn delta_time(&self) -> f32 {
        self.config.delta_time()
    }

    // ========================================================================
    // Render queries
    // ========================================================================

    /// Rope endpoints while pulling.
    pub fn rope(&self) -> Option<(Vec3, Vec3)> {
        self.player.rope()
    }

    /// Position of the selected target while targeting.
    pub fn marker(&self) -> Option<Vec3> {
        self.player.marker(&self.props)
    }

    /// Fill level of the targeting countdown bar, hidden outside targeting.
    pub fn targeting_fraction(&self) -> Option<f32> {
        self.player.targeting_fraction()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::TargetWorld;
    use crate::grapple::GrappleEvent;

    fn grapple_pressed() -> PlayerInput {
        let mut input = PlayerInput::default();
        input.actions.grapple = true;
        input
    }

    /// Press and release grapple over two ticks.
    fn tap_grapple(sim: &mut Simulation) -> Vec<GrappleEvent> {
        let mut events = sim.tick(&grapple_pressed()).grapple.events;
        events.extend(sim.tick(&PlayerInput::default()).grapple.events);
        events
    }

    #[test]
    fn test_simulation_creation() {
        let sim = Simulation::test();
        assert_eq!(sim.frame, 0);
        assert_eq!(sim.props.len(), 3);
        assert!(sim.player.on_ground());
        assert!(sim.time_scale().is_normal());
    }

    #[test]
    fn test_tick_advances_frame() {
        let mut sim = Simulation::test();

        sim.tick(&PlayerInput::default());
        assert_eq!(sim.frame, 1);

        sim.tick(&PlayerInput::default());
        assert_eq!(sim.frame, 2);
    }

    #[test]
    fn test_standing_still_stays_grounded() {
        let mut sim = Simulation::test();
        let start = sim.player.position();

        for _ in 0..120 {
            sim.tick(&PlayerInput::default());
        }

        assert!(sim.player.on_ground());
        assert!((sim.player.position() - start).length() < 1e-4);
    }

    #[test]
    fn test_movement_input() {
        let mut sim = Simulation::test();
        let start_pos = sim.player.position();

        let mut input = PlayerInput::default();
        input.movement.right = true;

        for _ in 0..60 {
            sim.tick(&input);
        }

        let end_pos = sim.player.position();
        let distance = end_pos.x - start_pos.x;

        assert!((distance - 8.0).abs() < 0.05, "distance={}", distance);
        assert!(sim.player.on_ground());
    }

    #[test]
    fn test_wall_stops_player() {
        let mut sim = Simulation::test();

        let mut input = PlayerInput::default();
        input.movement.right = true;

        for _ in 0..180 {
            sim.tick(&input);
        }

        // Wall face at x = 9.5, collider half-width 0.45
        let x = sim.player.position().x;
        assert!(x <= 9.05 + 1e-4, "x={}", x);
        assert!(x > 8.5, "x={}", x);
    }

    #[test]
    fn test_jump() {
        let mut sim = Simulation::test();
        let ground_y = sim.player.position().y;

        let mut input = PlayerInput::default();
        input.actions.jump = true;
        let report = sim.tick(&input);
        assert!(report.step.jumped);

        for _ in 0..10 {
            sim.tick(&input);
        }
        assert!(!sim.player.on_ground());
        assert!(sim.player.position().y > ground_y + 1.0);

        // Holding jump does not jump again; the player lands
        for _ in 0..120 {
            let report = sim.tick(&input);
            assert!(!report.step.jumped);
        }
        assert!(sim.player.on_ground());
    }

    #[test]
    fn test_camera_follows_player() {
        let mut sim = Simulation::test();

        let mut input = PlayerInput::default();
        input.movement.left = true;
        for _ in 0..60 {
            sim.tick(&input);
        }
        input.movement.left = false;
        for _ in 0..120 {
            sim.tick(&input);
        }

        let camera = sim.camera.as_ref().unwrap();
        let player = sim.player.position();
        assert!((camera.position.x - (player.x + 2.0)).abs() < 0.05);
        assert!((camera.position.y - (player.y + 2.0)).abs() < 0.05);
        assert_eq!(camera.position.z, -10.0);
    }

    // ========================================================================
    // Grapple
    // ========================================================================

    #[test]
    fn test_targeting_slows_time() {
        let mut sim = Simulation::test();

        let report = sim.tick(&grapple_pressed());
        assert_eq!(report.grapple.events, vec![GrappleEvent::TargetingStarted { candidates: 3 }]);
        assert_eq!(sim.time_scale().get(), 0.1);

        // Light prop at (4, 1.5) is nearest
        assert_eq!(sim.marker(), Some(Vec3::new(4.0, 1.5, 0.0)));
        assert!(sim.targeting_fraction().is_some());
    }

    #[test]
    fn test_targeting_times_out() {
        let mut sim = Simulation::test();
        sim.tick(&grapple_pressed());

        // Holding the button is not a second press
        for _ in 0..200 {
            sim.tick(&grapple_pressed());
        }

        assert!(sim.player.grapple.is_idle());
        assert!(sim.time_scale().is_normal());
        assert_eq!(sim.targeting_fraction(), None);
        assert_eq!(sim.marker(), None);
    }

    #[test]
    fn test_light_pull_brings_prop() {
        let mut sim = Simulation::test();
        let light = sim.props.find_by_weight(WeightClass::Light)[0];
        let player_start = sim.player.position();

        tap_grapple(&mut sim);
        let events = tap_grapple(&mut sim);
        assert_eq!(events.first(), Some(&GrappleEvent::PullStarted(light)));
        assert!(sim.time_scale().is_normal());

        let mut ticks = 0;
        while !sim.player.grapple.is_idle() {
            assert!(sim.rope().is_some());
            sim.tick(&PlayerInput::default());
            ticks += 1;
            assert!(ticks < 600, "pull never finished");
        }

        let prop = sim.props.position(light).unwrap();
        assert!((prop.truncate() - sim.player.position().truncate()).length() < 0.2);
        assert!((sim.player.position() - player_start).length() < 1e-4);
        assert_eq!(sim.rope(), None);
    }

    #[test]
    fn test_no_camera_means_no_targets() {
        let mut sim = Simulation::test();
        sim.camera = None;

        let report = sim.tick(&grapple_pressed());
        assert_eq!(report.grapple.events, vec![GrappleEvent::TargetingStarted { candidates: 0 }]);
        assert_eq!(sim.marker(), None);

        sim.tick(&PlayerInput::default());
        let report = sim.tick(&grapple_pressed());
        assert_eq!(report.grapple.events, vec![GrappleEvent::TargetingCancelled]);
        assert!(sim.time_scale().is_normal());
    }

    #[test]
    fn test_drop_while_targeting_restores_time() {
        let mut sim = Simulation::test();
        let scale = sim.time_scale().clone();

        sim.tick(&grapple_pressed());
        assert!(!scale.is_normal());

        drop(sim);
        assert!(scale.is_normal());
    }

    #[test]
    fn test_determinism() {
        // Run simulation twice with same inputs - should get same results
        let inputs: Vec<_> = (0..300)
            .map(|i| {
                let mut input = PlayerInput::default();
                input.movement.right = i % 2 == 0;
                input.movement.left = i % 7 == 0;
                input.actions.jump = i % 10 == 0;
                input.actions.grapple = i % 45 == 0;
                input.actions.cycle_right = i % 13 == 0;
                input
            })
            .collect();

        let mut sim1 = Simulation::test();
        let mut sim2 = Simulation::test();
        for input in &inputs {
            let a = sim1.tick(input);
            let b = sim2.tick(input);
            assert_eq!(a, b);
        }

        assert_eq!(sim1.player.movement, sim2.player.movement);
        let props1: Vec<_> = sim1.props.iter().map(|(id, p)| (id, *p)).collect();
        let props2: Vec<_> = sim2.props.iter().map(|(id, p)| (id, *p)).collect();
        assert_eq!(props1, props2);
    }
}
