use super::constants::*;
use super::error::SceneError;
use glam::{Mat4, Vec2, Vec3};

/// Output surface size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Result<Self, SceneError> {
        if width == 0 || height == 0 {
            return Err(SceneError::EmptyViewport { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    #[inline]
    pub fn centre(&self) -> Vec2 {
        Vec2::new(self.width as f32 * 0.5, self.height as f32 * 0.5)
    }
}

/// Fixed isometric orthographic camera.
///
/// Position and orientation never change; only the frustum follows the
/// viewport aspect. Frustum height is always `frustum_size`.
#[derive(Clone, Debug, PartialEq)]
pub struct OrthoCamera {
    pub frustum_size: f32,
    pub aspect: f32,
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl OrthoCamera {
    pub fn isometric(frustum_size: f32, viewport: Viewport) -> Self {
        let mut cam = Self {
            frustum_size,
            aspect: 1.0,
            left: 0.0,
            right: 0.0,
            top: 0.0,
            bottom: 0.0,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            position: CAMERA_POSITION,
            target: Vec3::ZERO,
            up: Vec3::Y,
        };
        cam.set_aspect(viewport.aspect());
        cam
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        let half_h = self.frustum_size * 0.5;
        let half_w = self.frustum_size * aspect * 0.5;
        self.aspect = aspect;
        self.left = -half_w;
        self.right = half_w;
        self.top = half_h;
        self.bottom = -half_h;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Depth range 0..1, as wgpu expects.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(self.left, self.right, self.bottom, self.top, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Unit vector from the scene toward the camera.
    pub fn facing(&self) -> Vec3 {
        (self.position - self.target).normalize()
    }
}

/// Pointer parallax and viewport tracking for the scene group.
///
/// Listeners only store targets here; the group moves in [`ViewportController::ease`]
/// once per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportController {
    pub viewport: Viewport,
    pub sensitivity: f32,
    pub ease_rate: f32,
    pub base_offset: Vec3,
    /// Last pointer offset, normalized by the half-viewport and scaled by
    /// `sensitivity`. x follows the pointer's x, y its vertical position.
    pub raw_target: Vec2,
}

impl ViewportController {
    pub fn new(viewport: Viewport, sensitivity: f32, ease_rate: f32) -> Self {
        Self {
            viewport,
            sensitivity,
            ease_rate,
            base_offset: GROUP_BASE_OFFSET,
            raw_target: Vec2::ZERO,
        }
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        let c = self.viewport.centre();
        let offset = (Vec2::new(x, y) - c) / c.max(Vec2::ONE);
        self.raw_target = offset * self.sensitivity;
    }

    /// Horizontal point (x, z) the group eases toward.
    pub fn group_target(&self) -> Vec2 {
        Vec2::new(self.base_offset.x, self.base_offset.z) + self.raw_target * POINTER_TARGET_SCALE
    }

    /// One easing step: moves `ease_rate` of the remaining distance on the
    /// horizontal axes and sets the breathing height for `time`.
    pub fn ease(&self, group_position: &mut Vec3, time: f32) {
        let target = self.group_target();
        group_position.x += (target.x - group_position.x) * self.ease_rate;
        group_position.z += (target.y - group_position.z) * self.ease_rate;
        group_position.y = breathing_height(self.base_offset.y, time);
    }

    /// Apply a resize: store the viewport and refit the camera frustum.
    /// Returns the surface size the host must resize its output to.
    pub fn on_resize(&mut self, viewport: Viewport, camera: &mut OrthoCamera) -> Viewport {
        self.viewport = viewport;
        camera.set_aspect(viewport.aspect());
        viewport
    }
}

#[inline]
pub fn breathing_height(base: f32, time: f32) -> f32 {
    base + BREATH_AMPLITUDE * (time * BREATH_FREQUENCY).sin()
}
