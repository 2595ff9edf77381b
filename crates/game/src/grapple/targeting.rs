//! Candidate gathering and target selection.
//!
//! Candidates are gathered once when targeting starts and keep that order
//! for the rest of the session: all light props, then medium, then heavy,
//! each group in world query order. Selection moves around inside that
//! fixed list.

use glam::{Vec2, Vec3};

use crate::camera::Viewport;
use crate::entities::{EntityId, TargetWorld, WeightClass};

/// A grapple candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrappleTarget {
    /// Handle to the world entity.
    pub id: EntityId,

    /// Weight class at the time it was gathered.
    pub weight: WeightClass,
}

/// Gather candidates around `origin`.
///
/// A candidate must be within `radius` (2D distance) and visible to the
/// viewport. Without a viewport nothing is visible.
pub fn gather_candidates<W: TargetWorld + ?Sized>(
    world: &W,
    origin: Vec3,
    radius: f32,
    viewport: Option<&dyn Viewport>,
) -> Vec<GrappleTarget> {
    let Some(viewport) = viewport else {
        log::warn!("grapple targeting without a camera: no candidates");
        return Vec::new();
    };

    let mut targets = Vec::new();
    for weight in WeightClass::ALL {
        for id in world.find_by_weight(weight) {
            let Some(position) = world.position(id) else {
                continue;
            };
            if planar_distance(origin, position) > radius {
                continue;
            }
            if viewport.is_visible(position) {
                targets.push(GrappleTarget { id, weight });
            }
        }
    }
    targets
}

/// 2D distance, ignoring depth.
#[inline]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    a.truncate().distance(b.truncate())
}

/// Candidate list with a selection that always points inside it.
#[derive(Debug, Clone, Default)]
pub struct Candidates {
    targets: Vec<GrappleTarget>,
    selected: Option<usize>,
}

impl Candidates {
    /// Wrap a gathered list, selecting the nearest live candidate.
    pub fn with_nearest<W: TargetWorld + ?Sized>(
        targets: Vec<GrappleTarget>,
        world: &W,
        origin: Vec3,
    ) -> Self {
        let selected = nearest_index(&targets, world, origin);
        Self { targets, selected }
    }

    /// All candidates in their fixed order.
    pub fn targets(&self) -> &[GrappleTarget] {
        &self.targets
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether there are no candidates.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Index of the selected candidate.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// The selected candidate.
    pub fn selected(&self) -> Option<GrappleTarget> {
        self.selected.map(|i| self.targets[i])
    }

    /// Step the selection backward, wrapping. Needs at least two candidates.
    pub fn cycle_previous(&mut self) -> bool {
        let len = self.targets.len();
        if len < 2 {
            return false;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        });
        true
    }

    /// Step the selection forward, wrapping. Needs at least two candidates.
    pub fn cycle_next(&mut self) -> bool {
        let len = self.targets.len();
        if len < 2 {
            return false;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % len,
            None => 0,
        });
        true
    }

    /// Select the candidate that lies most in `direction` from `origin`.
    ///
    /// The current selection is never picked. Scores are compared with
    /// strict greater-than starting from -1, so ties keep the earliest
    /// candidate and a candidate exactly opposite `direction` never wins.
    /// Returns whether the selection changed.
    pub fn select_toward<W: TargetWorld + ?Sized>(
        &mut self,
        world: &W,
        origin: Vec3,
        direction: Vec2,
    ) -> bool {
        let wanted = direction.normalize_or_zero();
        if wanted == Vec2::ZERO {
            return false;
        }

        let mut best = None;
        let mut best_dot = -1.0;

        for (i, target) in self.targets.iter().enumerate() {
            if Some(i) == self.selected {
                continue;
            }
            let Some(position) = world.position(target.id) else {
                continue;
            };

            let toward = (position - origin).truncate().normalize_or_zero();
            let dot = wanted.dot(toward);
            if dot > best_dot {
                best = Some(i);
                best_dot = dot;
            }
        }

        match best {
            Some(i) => {
                self.selected = Some(i);
                true
            }
            None => false,
        }
    }
}

/// Index of the nearest candidate whose entity still exists.
fn nearest_index<W: TargetWorld + ?Sized>(
    targets: &[GrappleTarget],
    world: &W,
    origin: Vec3,
) -> Option<usize> {
    let mut best = None;
    let mut closest = f32::INFINITY;

    for (i, target) in targets.iter().enumerate() {
        let Some(position) = world.position(target.id) else {
            continue;
        };
        let distance = planar_distance(origin, position);
        if distance < closest {
            best = Some(i);
            closest = distance;
        }
    }

    best
}

// ============================================================================
// Tests
// ============================================================================
