//=========================================================================
// Camera
//=========================================================================
//
// 2D orthographic camera. The renderer reads both matrices once per
// batch draw and never mutates the camera.
//
//=========================================================================

use glam::{Mat4, Vec2, Vec3};

/// Default viewport: 40 × 21 tiles of 32 pixels.
pub const DEFAULT_VIEWPORT: Vec2 = Vec2::new(32.0 * 40.0, 32.0 * 21.0);

const NEAR: f32 = 0.0;
const FAR: f32 = 100.0;
const EYE_DEPTH: f32 = 20.0;

/// Orthographic camera looking down -Z at a 2D position.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec2,
    viewport: Vec2,
    projection: Mat4,
}

impl Camera {
    pub fn new(position: Vec2) -> Self {
        Self::with_viewport(position, DEFAULT_VIEWPORT)
    }

    pub fn with_viewport(position: Vec2, viewport: Vec2) -> Self {
        let mut camera = Self {
            position,
            viewport,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    /// Recomputes the projection from the current viewport size.
    pub fn update_projection(&mut self) {
        self.projection =
            Mat4::orthographic_rh_gl(0.0, self.viewport.x, 0.0, self.viewport.y, NEAR, FAR);
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        self.update_projection();
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// View matrix for the current position.
    pub fn view_matrix(&self) -> Mat4 {
        let eye = Vec3::new(self.position.x, self.position.y, EYE_DEPTH);
        let center = Vec3::new(self.position.x, self.position.y, -1.0);
        Mat4::look_at_rh(eye, center, Vec3::Y)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}
