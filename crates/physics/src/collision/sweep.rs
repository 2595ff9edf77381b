//! Sweep queries and the shape they sweep.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::layers::LayerMask;

/// Result of a box sweep that hit something.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepHit {
    /// Distance travelled along the sweep direction before contact.
    ///
    /// `0.0` means the box was already touching or overlapping the solid
    /// at the start of the sweep.
    pub distance: f32,

    /// Surface normal of the solid at the contact point.
    pub normal: Vec2,

    /// Layers of the solid that was hit.
    pub layers: LayerMask,
}

impl SweepHit {
    /// Create a hit against ground at the given distance.
    pub fn at(distance: f32, normal: Vec2) -> Self {
        Self {
            distance,
            normal,
            layers: LayerMask::GROUND,
        }
    }
}

/// Axis-aligned collision box attached to a character.
///
/// The box is centred on `position + offset` and never rotates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxShape {
    /// Full width and height.
    pub size: Vec2,
    /// Offset of the box centre from the owner's position.
    pub offset: Vec2,
}

impl BoxShape {
    /// Standard player box: 0.9 wide, 1.8 tall, centred on the position.
    pub const PLAYER: Self = Self {
        size: Vec2::new(0.9, 1.8),
        offset: Vec2::ZERO,
    };

    /// Create a box with no offset.
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            offset: Vec2::ZERO,
        }
    }

    /// Half extents of the box.
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    /// World-space centre of the box for an owner at `position`.
    #[inline]
    pub fn center_at(&self, position: Vec3) -> Vec2 {
        position.truncate() + self.offset
    }

    /// World-space (min, max) corners for an owner at `position`.
    pub fn bounds_at(&self, position: Vec3) -> (Vec2, Vec2) {
        let center = self.center_at(position);
        let half = self.half_extents();
        (center - half, center + half)
    }
}

impl Default for BoxShape {
    fn default() -> Self {
        Self::PLAYER
    }
}

/// Read-only collision query used by movement code.
///
/// Implemented by [`CollisionWorld`](super::CollisionWorld); tests and
/// embedding engines can provide their own.
pub trait CollisionQuery {
    /// Sweep an axis-aligned box through the world.
    ///
    /// # Arguments
    ///
    /// * `center` - World-space centre of the box at the start of the sweep
    /// * `size` - Full width and height of the box
    /// * `direction` - Unit direction of travel
    /// * `max_distance` - How far to sweep
    /// * `mask` - Layers to collide with
    ///
    /// Returns the nearest blocking contact within `max_distance`, if any.
    fn sweep_box(
        &self,
        center: Vec2,
        size: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<SweepHit>;
}

impl<T: CollisionQuery + ?Sized> CollisionQuery for &T {
    fn sweep_box(
        &self,
        center: Vec2,
        size: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<SweepHit> {
        (**self).sweep_box(center, size, direction, max_distance, mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_bounds_with_offset() {
        let shape = BoxShape {
            size: Vec2::new(1.0, 2.0),
            offset: Vec2::new(0.0, 1.0),
        };
        let (min, max) = shape.bounds_at(Vec3::new(3.0, 0.0, 5.0));
        assert_eq!(min, Vec2::new(2.5, 0.0));
        assert_eq!(max, Vec2::new(3.5, 2.0));
    }

    #[test]
    fn test_sweep_hit_defaults_to_ground() {
        let hit = SweepHit::at(0.5, Vec2::Y);
        assert_eq!(hit.distance, 0.5);
        assert_eq!(hit.layers, LayerMask::GROUND);
    }
}
