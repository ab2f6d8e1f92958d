mod common;

use common::assert_close;
use common::core::camera::{breathing_height, OrthoCamera, Viewport, ViewportController};
use common::core::constants::*;
use common::core::error::SceneError;
use glam::{Vec2, Vec3};

fn controller(w: u32, h: u32) -> ViewportController {
    ViewportController::new(Viewport::new(w, h).unwrap(), POINTER_SENSITIVITY, GROUP_EASE_RATE)
}

#[test]
fn zero_sized_viewport_is_rejected() {
    assert_eq!(
        Viewport::new(0, 768).unwrap_err(),
        SceneError::EmptyViewport { width: 0, height: 768 }
    );
    assert!(Viewport::new(1024, 0).is_err());
}

#[test]
fn camera_aspect_follows_viewport() {
    let cam = OrthoCamera::isometric(FRUSTUM_SIZE, Viewport::new(1024, 768).unwrap());
    assert_close(cam.aspect, 1024.0 / 768.0, 1e-6);
    assert_close(cam.top - cam.bottom, FRUSTUM_SIZE, 1e-5);
    assert_close(cam.right - cam.left, FRUSTUM_SIZE * cam.aspect, 1e-4);
    assert_close(cam.left, -cam.right, 1e-6);
}

#[test]
fn camera_is_isometric_and_fixed() {
    let cam = OrthoCamera::isometric(FRUSTUM_SIZE, Viewport::new(800, 600).unwrap());
    assert_eq!(cam.position, Vec3::new(20.0, 20.0, 20.0));
    assert_eq!(cam.target, Vec3::ZERO);
    assert_eq!(cam.near, 1.0);
    assert_eq!(cam.far, 1000.0);
    let f = cam.facing();
    assert_close(f.x, f.y, 1e-6);
    assert_close(f.y, f.z, 1e-6);
}

#[test]
fn origin_projects_to_screen_centre() {
    let cam = OrthoCamera::isometric(FRUSTUM_SIZE, Viewport::new(1280, 720).unwrap());
    let clip = cam.view_projection().project_point3(Vec3::ZERO);
    assert_close(clip.x, 0.0, 1e-5);
    assert_close(clip.y, 0.0, 1e-5);
    assert!((0.0..=1.0).contains(&clip.z));
}

#[test]
fn resize_refits_frustum_and_returns_new_size() {
    let mut c = controller(1024, 768);
    let mut cam = OrthoCamera::isometric(FRUSTUM_SIZE, c.viewport);
    let out = c.on_resize(Viewport::new(500, 500).unwrap(), &mut cam);

    assert_eq!(out, Viewport { width: 500, height: 500 });
    assert_eq!(c.viewport, out);
    assert_close(cam.aspect, 1.0, 1e-6);
    assert_close(cam.left, -FRUSTUM_SIZE / 2.0, 1e-6);
    assert_close(cam.right, FRUSTUM_SIZE / 2.0, 1e-6);
    assert_close(cam.top, FRUSTUM_SIZE / 2.0, 1e-6);
    assert_close(cam.bottom, -FRUSTUM_SIZE / 2.0, 1e-6);
}

#[test]
fn pointer_at_centre_gives_zero_target() {
    let mut c = controller(1024, 768);
    c.on_pointer_move(512.0, 384.0);
    assert_eq!(c.raw_target, Vec2::ZERO);
    let t = c.group_target();
    assert_close(t.x, GROUP_BASE_OFFSET.x, 1e-6);
    assert_close(t.y, GROUP_BASE_OFFSET.z, 1e-6);
}

#[test]
fn pointer_offset_is_scaled_by_sensitivity() {
    let mut c = controller(1000, 800);
    // Right edge, top edge.
    c.on_pointer_move(1000.0, 0.0);
    assert_close(c.raw_target.x, POINTER_SENSITIVITY, 1e-6);
    assert_close(c.raw_target.y, -POINTER_SENSITIVITY, 1e-6);
}

#[test]
fn easing_converges_monotonically_without_overshoot() {
    let mut c = controller(1000, 800);
    c.on_pointer_move(1000.0, 800.0);
    let target = c.group_target();
    let mut pos = GROUP_BASE_OFFSET;
    let mut prev = Vec2::new(pos.x, pos.z).distance(target);
    for frame in 0..600 {
        c.ease(&mut pos, frame as f32 / 60.0);
        let d = Vec2::new(pos.x, pos.z).distance(target);
        assert!(d <= prev + 1e-7, "distance grew at frame {frame}: {prev} -> {d}");
        assert!(pos.x <= target.x + 1e-6 && pos.z <= target.y + 1e-6, "overshoot at {frame}");
        prev = d;
    }
    assert!(prev < 1e-3, "did not converge: {prev}");
}

#[test]
fn single_ease_step_moves_two_percent() {
    let mut c = controller(100, 100);
    c.raw_target = Vec2::new(2.0, -2.0);
    let mut pos = Vec3::new(GROUP_BASE_OFFSET.x, 0.0, GROUP_BASE_OFFSET.z);
    c.ease(&mut pos, 0.0);
    // Remaining distance is raw * 0.5 on each axis.
    assert_close(pos.x, GROUP_BASE_OFFSET.x + 1.0 * GROUP_EASE_RATE, 1e-6);
    assert_close(pos.z, GROUP_BASE_OFFSET.z - 1.0 * GROUP_EASE_RATE, 1e-6);
}

#[test]
fn ease_sets_breathing_height() {
    let c = controller(100, 100);
    let mut pos = GROUP_BASE_OFFSET;
    for t in [0.0, 0.7, std::f32::consts::PI, 11.0] {
        c.ease(&mut pos, t);
        assert_close(pos.y, breathing_height(GROUP_BASE_OFFSET.y, t), 1e-6);
        assert!(pos.y.abs() <= BREATH_AMPLITUDE + 1e-6);
    }
}

#[test]
fn parallax_shift_is_bounded_by_sensitivity() {
    let mut c = controller(1024, 768);
    for (x, y) in [(0.0, 0.0), (1024.0, 768.0), (0.0, 768.0), (1024.0, 0.0)] {
        c.on_pointer_move(x, y);
        let shift = c.group_target() - Vec2::new(GROUP_BASE_OFFSET.x, GROUP_BASE_OFFSET.z);
        let bound = POINTER_SENSITIVITY * POINTER_TARGET_SCALE;
        assert_close(shift.x.abs(), bound, 1e-6);
        assert_close(shift.y.abs(), bound, 1e-6);
    }
}
