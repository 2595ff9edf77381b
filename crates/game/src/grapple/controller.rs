//! Grapple mode machine.
//!
//! ```text
//!            toggle                        toggle (target selected)
//!   Idle ─────────────► Targeting ─────────────────────────► Pulling
//!    ▲                   │   │                                 │
//!    │   toggle (none)   │   │ countdown ≤ 0                   │ arrived /
//!    ├───────────────────┘   │                                 │ target gone
//!    ├───────────────────────┘                                 │
//!    └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Targeting holds a [`TimeDilation`] guard, so every way out of it
//! restores normal time.

use glam::{Vec2, Vec3};
use tether_physics::KinematicBody;

use crate::camera::Viewport;
use crate::entities::{EntityId, TargetWorld};
use crate::time::{FrameTime, TimeDilation, TimeScale};

use super::config::GrappleConfig;
use super::targeting::{gather_candidates, planar_distance, Candidates, GrappleTarget};

/// Grapple input for one frame. All fields are pressed edges.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GrappleInput {
    /// Enter targeting, or commit/cancel it.
    pub toggle: bool,

    /// Select the previous candidate.
    pub cycle_previous: bool,

    /// Select the next candidate.
    pub cycle_next: bool,

    /// Select the candidate lying most in this direction.
    pub direction: Option<Vec2>,
}

impl GrappleInput {
    /// Input with only the toggle pressed.
    pub fn toggle() -> Self {
        Self {
            toggle: true,
            ..Default::default()
        }
    }
}

/// Both ends of the rope while pulling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rope {
    pub start: Vec3,
    pub end: Vec3,
}

/// Targeting session state.
#[derive(Debug)]
pub struct Targeting {
    candidates: Candidates,
    remaining: f32,
    _dilation: TimeDilation,
}

impl Targeting {
    /// Candidates and the current selection.
    pub fn candidates(&self) -> &Candidates {
        &self.candidates
    }

    /// Real seconds left before targeting cancels itself.
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    fn handle_selection<W: TargetWorld + ?Sized>(
        &mut self,
        input: &GrappleInput,
        world: &W,
        origin: Vec3,
    ) {
        if self.candidates.len() < 2 {
            return;
        }

        if input.cycle_previous {
            self.candidates.cycle_previous();
        } else if input.cycle_next {
            self.candidates.cycle_next();
        }

        if let Some(direction) = input.direction {
            self.candidates.select_toward(world, origin, direction);
        }
    }
}

/// Pull in progress.
#[derive(Debug, Clone, Copy)]
pub struct Pulling {
    target: GrappleTarget,
    rope: Option<Rope>,
}

impl Pulling {
    /// The target being pulled.
    pub fn target(&self) -> GrappleTarget {
        self.target
    }
}

/// Grapple mode. Exactly one is active.
#[derive(Debug, Default)]
pub enum GrappleMode {
    #[default]
    Idle,
    Targeting(Targeting),
    Pulling(Pulling),
}

/// Something the grapple did this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrappleEvent {
    /// Targeting started with this many candidates.
    TargetingStarted { candidates: usize },
    /// Targeting was toggled off with nothing selected.
    TargetingCancelled,
    /// The targeting countdown ran out.
    TargetingTimedOut,
    /// A pull started toward this entity.
    PullStarted(EntityId),
    /// The pull closed the gap.
    PullFinished(EntityId),
    /// The pulled entity stopped existing mid-pull.
    TargetLost(EntityId),
}

/// Result of a grapple tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrappleTick {
    /// Locomotion must not run this tick.
    pub suspends_locomotion: bool,

    /// Transitions that happened, in order.
    pub events: Vec<GrappleEvent>,
}

/// Slow-motion targeting and weighted grapple pulls.
///
/// The controller is the only writer of the shared [`TimeScale`].
#[derive(Debug)]
pub struct GrappleController {
    /// Grapple configuration.
    pub config: GrappleConfig,

    mode: GrappleMode,
    time_scale: TimeScale,
}

impl GrappleController {
    /// Create an idle controller that dilates `time_scale` while targeting.
    pub fn new(config: GrappleConfig, time_scale: TimeScale) -> Self {
        Self {
            config,
            mode: GrappleMode::Idle,
            time_scale,
        }
    }

    /// Advance the grapple by one tick.
    ///
    /// # Arguments
    ///
    /// * `input` - Pressed edges for this frame
    /// * `body` - The character; moved directly during heavy and medium pulls
    /// * `world` - Target lookup; props are moved during light and medium pulls
    /// * `viewport` - Camera used to filter candidates
    /// * `time` - Frame timing; the countdown uses the unscaled delta
    pub fn update<W: TargetWorld + ?Sized>(
        &mut self,
        input: &GrappleInput,
        body: &mut KinematicBody,
        world: &mut W,
        viewport: Option<&dyn Viewport>,
        time: FrameTime,
    ) -> GrappleTick {
        let mut tick = GrappleTick::default();

        if input.toggle {
            if let Some(event) = self.toggle(body.position, &*world, viewport) {
                tick.events.push(event);
            }
        }

        let event = if self.is_targeting() {
            tick.suspends_locomotion = true;
            self.tick_targeting(input, body.position, &*world, time)
        } else if self.is_pulling() {
            tick.suspends_locomotion = true;
            self.tick_pull(body, world, time)
        } else {
            None
        };
        tick.events.extend(event);

        tick
    }

    /// Drop back to Idle from any mode.
    pub fn cancel(&mut self) {
        self.leave_targeting();
        self.mode = GrappleMode::Idle;
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Current mode.
    pub fn mode(&self) -> &GrappleMode {
        &self.mode
    }

    /// Whether no grapple activity is running.
    pub fn is_idle(&self) -> bool {
        matches!(self.mode, GrappleMode::Idle)
    }

    /// Whether targeting is active.
    pub fn is_targeting(&self) -> bool {
        matches!(self.mode, GrappleMode::Targeting(_))
    }

    /// Whether a pull is active.
    pub fn is_pulling(&self) -> bool {
        matches!(self.mode, GrappleMode::Pulling(_))
    }

    /// Selected candidate while targeting, or the pull target while pulling.
    pub fn current_target(&self) -> Option<GrappleTarget> {
        match &self.mode {
            GrappleMode::Idle => None,
            GrappleMode::Targeting(targeting) => targeting.candidates.selected(),
            GrappleMode::Pulling(pull) => Some(pull.target),
        }
    }

    /// Candidates of the running targeting session (empty otherwise).
    pub fn candidates(&self) -> &[GrappleTarget] {
        match &self.mode {
            GrappleMode::Targeting(targeting) => targeting.candidates.targets(),
            _ => &[],
        }
    }

    /// Where to draw the selection marker, if it should be drawn.
    pub fn marker_position<W: TargetWorld + ?Sized>(&self, world: &W) -> Option<Vec3> {
        match &self.mode {
            GrappleMode::Targeting(targeting) => {
                let target = targeting.candidates.selected()?;
                world.position(target.id)
            }
            _ => None,
        }
    }

    /// Rope endpoints, if the rope should be drawn.
    pub fn rope(&self) -> Option<Rope> {
        match &self.mode {
            GrappleMode::Pulling(pull) => pull.rope,
            _ => None,
        }
    }

    /// Fraction of the targeting countdown left, in `[0, 1]`.
    ///
    /// `None` when not targeting.
    pub fn targeting_fraction(&self) -> Option<f32> {
        let GrappleMode::Targeting(targeting) = &self.mode else {
            return None;
        };
        if self.config.targeting_duration <= 0.0 {
            return Some(0.0);
        }
        Some((targeting.remaining / self.config.targeting_duration).clamp(0.0, 1.0))
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    fn toggle<W: TargetWorld + ?Sized>(
        &mut self,
        origin: Vec3,
        world: &W,
        viewport: Option<&dyn Viewport>,
    ) -> Option<GrappleEvent> {
        if self.is_idle() {
            return Some(self.enter_targeting(origin, world, viewport));
        }
        // Ignored until the pull completes
        if self.is_pulling() {
            return None;
        }

        match self.leave_targeting() {
            Some(target) => {
                log::debug!("grapple pull toward {} ({:?})", target.id, target.weight);
                self.mode = GrappleMode::Pulling(Pulling { target, rope: None });
                Some(GrappleEvent::PullStarted(target.id))
            }
            None => {
                log::debug!("grapple targeting cancelled with no target");
                Some(GrappleEvent::TargetingCancelled)
            }
        }
    }

    fn enter_targeting<W: TargetWorld + ?Sized>(
        &mut self,
        origin: Vec3,
        world: &W,
        viewport: Option<&dyn Viewport>,
    ) -> GrappleEvent {
        let dilation = self.time_scale.dilate(self.config.slow_motion_scale);
        let targets = gather_candidates(world, origin, self.config.grapple_radius, viewport);
        let candidates = Candidates::with_nearest(targets, world, origin);
        let count = candidates.len();

        log::debug!(
            "grapple targeting: {} candidates, selected {:?}",
            count,
            candidates.selected().map(|t| t.id)
        );

        self.mode = GrappleMode::Targeting(Targeting {
            candidates,
            remaining: self.config.targeting_duration,
            _dilation: dilation,
        });

        GrappleEvent::TargetingStarted { candidates: count }
    }

    /// The single way out of Targeting.
    ///
    /// Drops the session (and with it the time dilation) and returns its
    /// selection. Leaves any other mode untouched.
    fn leave_targeting(&mut self) -> Option<GrappleTarget> {
        match std::mem::take(&mut self.mode) {
            GrappleMode::Targeting(targeting) => targeting.candidates.selected(),
            other => {
                self.mode = other;
                None
            }
        }
    }

    fn tick_targeting<W: TargetWorld + ?Sized>(
        &mut self,
        input: &GrappleInput,
        origin: Vec3,
        world: &W,
        time: FrameTime,
    ) -> Option<GrappleEvent> {
        let GrappleMode::Targeting(targeting) = &mut self.mode else {
            return None;
        };

        targeting.handle_selection(input, world, origin);
        targeting.remaining -= time.unscaled_delta;
        if targeting.remaining > 0.0 {
            return None;
        }

        log::debug!("grapple targeting timed out");
        self.leave_targeting();
        Some(GrappleEvent::TargetingTimedOut)
    }

    fn tick_pull<W: TargetWorld + ?Sized>(
        &mut self,
        body: &mut KinematicBody,
        world: &mut W,
        time: FrameTime,
    ) -> Option<GrappleEvent> {
        let GrappleMode::Pulling(pull) = &mut self.mode else {
            return None;
        };
        let target = pull.target;

        let Some(target_position) = world.position(target.id) else {
            log::warn!("grapple target {} vanished mid-pull", target.id);
            self.mode = GrappleMode::Idle;
            return Some(GrappleEvent::TargetLost(target.id));
        };

        let step = target.weight.pull_step(
            body.position,
            target_position,
            self.config.grapple_speed,
            time.delta,
        );
        body.position = step.character;
        if step.target != target_position {
            world.set_position(target.id, step.target);
        }
        pull.rope = Some(Rope {
            start: step.character,
            end: step.target,
        });

        if planar_distance(step.character, step.target) >= self.config.arrive_distance {
            return None;
        }

        log::debug!("grapple pull toward {} finished", target.id);
        self.mode = GrappleMode::Idle;
        Some(GrappleEvent::PullFinished(target.id))
    }
}

// ============================================================================
// Tests
// ============================================================================
