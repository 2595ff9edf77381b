//! Collision world containing static axis-aligned solids.
//!
//! The world stores level geometry as boxes and answers box sweeps against
//! them. Sweeps are exact: each solid is expanded by the half extents of the
//! moving box and the sweep becomes a ray test against the expanded box.

use glam::Vec2;

use super::layers::LayerMask;
use super::sweep::{CollisionQuery, SweepHit};

/// Direction components smaller than this are treated as parallel to an axis.
const PARALLEL_EPSILON: f32 = 1e-6;

/// A piece of static geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solid {
    /// Unique identifier for this solid.
    pub id: u32,
    /// Lower-left corner.
    pub min: Vec2,
    /// Upper-right corner.
    pub max: Vec2,
    /// Layers this solid is on.
    pub layers: LayerMask,
}

impl Solid {
    /// Check if this solid strictly overlaps the box `[min, max]`.
    ///
    /// Boxes that only share an edge do not overlap.
    pub fn overlaps(&self, min: Vec2, max: Vec2) -> bool {
        self.min.x < max.x && self.max.x > min.x && self.min.y < max.y && self.max.y > min.y
    }
}

/// The collision world.
///
/// Immutable during a tick; movement code only reads it through
/// [`CollisionQuery`].
#[derive(Debug, Default, Clone)]
pub struct CollisionWorld {
    solids: Vec<Solid>,
    next_id: u32,
}

impl CollisionWorld {
    /// Create an empty collision world.
    pub fn new() -> Self {
        Self {
            solids: Vec::new(),
            next_id: 0,
        }
    }

    /// Add an axis-aligned box to the world.
    ///
    /// # Arguments
    ///
    /// * `center` - Centre of the box in world space
    /// * `half_extents` - Half-size in each axis
    /// * `layers` - Layers the box is on
    pub fn add_box(&mut self, center: Vec2, half_extents: Vec2, layers: LayerMask) -> u32 {
        let id = self.next_id;
        self.next_id += 1;

        self.solids.push(Solid {
            id,
            min: center - half_extents,
            max: center + half_extents,
            layers,
        });

        id
    }

    /// Remove a solid by id. Returns whether it existed.
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.solids.len();
        self.solids.retain(|s| s.id != id);
        self.solids.len() != before
    }

    /// Remove all collision geometry.
    pub fn clear(&mut self) {
        self.solids.clear();
    }

    /// Number of solids in the world.
    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }

    /// Iterate over all solids.
    pub fn solids(&self) -> impl Iterator<Item = &Solid> {
        self.solids.iter()
    }

    /// Check if a box centred at `center` overlaps any solid on `mask`.
    pub fn box_overlaps(&self, center: Vec2, size: Vec2, mask: LayerMask) -> bool {
        let half = size * 0.5;
        let (min, max) = (center - half, center + half);
        self.solids
            .iter()
            .any(|s| mask.intersects(s.layers) && s.overlaps(min, max))
    }

    // ========================================================================
    // Private helpers
    // ========================================================================

    /// Sweep a box against a single solid.
    ///
    /// Returns the entry distance and the face normal that was crossed.
    fn sweep_solid(
        solid: &Solid,
        center: Vec2,
        half_extents: Vec2,
        direction: Vec2,
        max_distance: f32,
    ) -> Option<(f32, Vec2)> {
        let min = solid.min - half_extents;
        let max = solid.max + half_extents;

        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut normal = Vec2::ZERO;

        for axis in 0..2 {
            let origin = center[axis];
            let d = direction[axis];

            if d.abs() < PARALLEL_EPSILON {
                // Sliding along a face is not a contact.
                if origin <= min[axis] || origin >= max[axis] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let (near, far) = {
                let t1 = (min[axis] - origin) * inv;
                let t2 = (max[axis] - origin) * inv;
                if t1 <= t2 { (t1, t2) } else { (t2, t1) }
            };

            if near > t_enter {
                t_enter = near;
                normal = Vec2::ZERO;
                normal[axis] = -d.signum();
            }
            t_exit = t_exit.min(far);
        }

        if t_enter > t_exit || t_exit <= 0.0 || t_enter > max_distance {
            return None;
        }

        Some((t_enter.max(0.0), normal))
    }
}

impl CollisionQuery for CollisionWorld {
    fn sweep_box(
        &self,
        center: Vec2,
        size: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<SweepHit> {
        let direction = direction.normalize_or_zero();
        let half_extents = size * 0.5;

        let mut closest: Option<SweepHit> = None;

        for solid in &self.solids {
            if !mask.intersects(solid.layers) {
                continue;
            }

            let Some((distance, normal)) =
                Self::sweep_solid(solid, center, half_extents, direction, max_distance)
            else {
                continue;
            };

            let is_closer = closest.as_ref().map_or(true, |hit| distance < hit.distance);
            if is_closer {
                closest = Some(SweepHit {
                    distance,
                    normal,
                    layers: solid.layers,
                });
            }
        }

        closest
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYER_SIZE: Vec2 = Vec2::new(1.0, 2.0);

    fn create_test_world() -> CollisionWorld {
        let mut world = CollisionWorld::new();

        // Floor with its top at y=0
        world.add_box(Vec2::new(0.0, -0.5), Vec2::new(50.0, 0.5), LayerMask::GROUND);

        // Wall whose left face is at x=10
        world.add_box(Vec2::new(10.5, 5.0), Vec2::new(0.5, 5.0), LayerMask::GROUND);

        world
    }

    #[test]
    fn test_sweep_down_hits_floor() {
        let world = create_test_world();

        // Box bottom at y=0.5, half a unit above the floor
        let hit = world
            .sweep_box(Vec2::new(0.0, 1.5), PLAYER_SIZE, -Vec2::Y, 2.0, LayerMask::GROUND)
            .expect("should hit floor");

        assert!((hit.distance - 0.5).abs() < 1e-5, "distance={}", hit.distance);
        assert_eq!(hit.normal, Vec2::Y);
    }

    #[test]
    fn test_sweep_short_of_floor_misses() {
        let world = create_test_world();

        let hit = world.sweep_box(Vec2::new(0.0, 1.5), PLAYER_SIZE, -Vec2::Y, 0.4, LayerMask::GROUND);
        assert!(hit.is_none());
    }

    #[test]
    fn test_sweep_right_hits_wall() {
        let world = create_test_world();

        // Box right face at x=8.5, wall at x=10
        let hit = world
            .sweep_box(Vec2::new(8.0, 2.0), PLAYER_SIZE, Vec2::X, 5.0, LayerMask::GROUND)
            .expect("should hit wall");

        assert!((hit.distance - 1.5).abs() < 1e-5, "distance={}", hit.distance);
        assert_eq!(hit.normal, -Vec2::X);
    }

    #[test]
    fn test_sweep_left_misses() {
        let world = create_test_world();

        let hit = world.sweep_box(Vec2::new(8.0, 2.0), PLAYER_SIZE, -Vec2::X, 5.0, LayerMask::GROUND);
        assert!(hit.is_none());
    }

    #[test]
    fn test_resting_on_floor_does_not_block_horizontal_sweep() {
        let world = create_test_world();

        // Box bottom exactly on the floor surface
        let hit = world.sweep_box(Vec2::new(0.0, 1.0), PLAYER_SIZE, Vec2::X, 1.0, LayerMask::GROUND);
        assert!(hit.is_none());
    }

    #[test]
    fn test_touching_floor_reports_zero_distance() {
        let world = create_test_world();

        let hit = world
            .sweep_box(Vec2::new(0.0, 1.0), PLAYER_SIZE, -Vec2::Y, 0.05, LayerMask::GROUND)
            .expect("touching floor should register");
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn test_started_inside_reports_zero_distance() {
        let world = create_test_world();

        let hit = world
            .sweep_box(Vec2::new(0.0, 0.5), PLAYER_SIZE, Vec2::X, 1.0, LayerMask::GROUND)
            .expect("overlapping start should hit");
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn test_nearest_solid_wins() {
        let mut world = create_test_world();
        world.add_box(Vec2::new(5.5, 2.0), Vec2::new(0.5, 0.5), LayerMask::GROUND);

        let hit = world
            .sweep_box(Vec2::new(0.0, 2.0), PLAYER_SIZE, Vec2::X, 20.0, LayerMask::GROUND)
            .expect("should hit");
        assert!((hit.distance - 4.5).abs() < 1e-5);
    }

    #[test]
    fn test_layer_mask_filtering() {
        let mut world = CollisionWorld::new();

        world.add_box(Vec2::new(5.0, 0.0), Vec2::new(0.5, 5.0), LayerMask::GROUND);
        world.add_box(Vec2::new(3.0, 0.0), Vec2::new(0.5, 5.0), LayerMask::TRIGGER);

        let hit = world
            .sweep_box(Vec2::ZERO, Vec2::ONE, Vec2::X, 100.0, LayerMask::GROUND)
            .expect("should hit ground wall");

        // Left face at 4.5, box half width 0.5
        assert!((hit.distance - 4.0).abs() < 1e-5);
        assert_eq!(hit.layers, LayerMask::GROUND);
    }

    #[test]
    fn test_box_overlaps_and_remove() {
        let mut world = CollisionWorld::new();
        let id = world.add_box(Vec2::ZERO, Vec2::ONE, LayerMask::GROUND);

        assert!(world.box_overlaps(Vec2::new(1.5, 0.0), Vec2::ONE * 2.0, LayerMask::GROUND));
        assert!(!world.box_overlaps(Vec2::new(2.0, 0.0), Vec2::ONE * 2.0, LayerMask::GROUND));
        assert!(!world.box_overlaps(Vec2::ZERO, Vec2::ONE, LayerMask::PROP));

        assert!(world.remove(id));
        assert!(!world.remove(id));
        assert_eq!(world.solid_count(), 0);
    }
}
