//! Side-on orthographic camera.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Projection from world space to normalized viewport space.
///
/// Viewport `x` and `y` are `0..1` across the visible area; `z` is the
/// depth in front of the camera (positive = in front).
pub trait Viewport {
    fn world_to_viewport(&self, position: Vec3) -> Vec3;

    /// Whether a world point is inside the view and in front of the camera.
    fn is_visible(&self, position: Vec3) -> bool {
        let p = self.world_to_viewport(position);
        p.z > 0.0 && (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y)
    }
}

/// Camera follow and zoom tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Offset from the followed target.
    pub offset: Vec2,

    /// Follow smoothing rate (per second).
    pub smooth_speed: f32,

    /// Target orthographic half-height.
    pub zoom: f32,

    /// Zoom smoothing rate (per second).
    pub zoom_speed: f32,

    /// Aspect ratio (width / height).
    pub aspect: f32,

    /// Camera depth. The camera looks toward +Z.
    pub depth: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            offset: Vec2::new(2.0, 2.0),
            smooth_speed: 5.0,
            zoom: 5.0,
            zoom_speed: 5.0,
            aspect: 16.0 / 9.0,
            depth: -10.0,
        }
    }
}

/// Orthographic camera looking down +Z.
#[derive(Debug, Clone)]
pub struct Camera2D {
    /// Camera position in world space.
    pub position: Vec3,

    /// Orthographic half-height (world units from centre to top edge).
    pub ortho_size: f32,

    /// Follow and zoom tuning.
    pub config: CameraConfig,
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

impl Camera2D {
    /// Create a camera at the origin with its configured zoom.
    pub fn new(config: CameraConfig) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, config.depth),
            ortho_size: config.zoom,
            config,
        }
    }

    /// Snap onto a target with no smoothing.
    pub fn snap_to(&mut self, target: Vec3) {
        self.position.x = target.x + self.config.offset.x;
        self.position.y = target.y + self.config.offset.y;
    }

    /// Ease toward a target and toward the configured zoom.
    ///
    /// Depth is never changed.
    pub fn follow(&mut self, target: Vec3, delta_time: f32) {
        let desired = Vec3::new(
            target.x + self.config.offset.x,
            target.y + self.config.offset.y,
            self.position.z,
        );
        let t = (self.config.smooth_speed * delta_time).clamp(0.0, 1.0);
        self.position = self.position.lerp(desired, t);

        let z = (self.config.zoom_speed * delta_time).clamp(0.0, 1.0);
        self.ortho_size += (self.config.zoom - self.ortho_size) * z;
    }

    /// Visible world-space width and height.
    pub fn view_size(&self) -> Vec2 {
        let height = self.ortho_size * 2.0;
        Vec2::new(height * self.config.aspect, height)
    }
}

impl Viewport for Camera2D {
    fn world_to_viewport(&self, position: Vec3) -> Vec3 {
        let view = self.view_size();
        Vec3::new(
            (position.x - self.position.x) / view.x + 0.5,
            (position.y - self.position.y) / view.y + 0.5,
            position.z - self.position.z,
        )
    }
}
