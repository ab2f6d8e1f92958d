mod common;

use common::assert_close;
use common::core::camera::Viewport;
use common::core::config::SceneConfig;
use common::core::constants::*;
use common::core::context::SceneContext;
use common::core::entities::line_glow;
use common::core::error::SceneError;

fn context(seed: Option<u64>) -> SceneContext {
    let config = SceneConfig {
        seed,
        ..SceneConfig::default()
    };
    SceneContext::new(config, Viewport::new(1024, 768).unwrap(), 99).unwrap()
}

#[test]
fn config_seed_wins_over_fallback() {
    assert_eq!(context(Some(5)).seed, 5);
    assert_eq!(context(None).seed, 99);
}

#[test]
fn new_context_starts_at_base_offset() {
    let ctx = context(Some(1));
    assert_eq!(ctx.group_position, GROUP_BASE_OFFSET);
    assert_close(ctx.camera.aspect, 1024.0 / 768.0, 1e-6);
}

#[test]
fn update_writes_entity_state_into_graph() {
    let mut ctx = context(Some(1));
    ctx.on_pointer_move(1024.0, 768.0);
    for frame in 1..=30 {
        ctx.update(frame as f32 / 60.0);
    }
    assert_close(ctx.last_time, 0.5, 1e-6);

    for p in &ctx.entities.pulses {
        let t = ctx.graph.node(p.node).unwrap().transform.translation;
        assert_eq!(t, p.position);
        assert_close(t.y, PULSE_HEIGHT, 1e-6);
    }
    for f in &ctx.entities.floaters {
        let t = ctx.graph.node(f.node).unwrap().transform.translation;
        assert_close(t.y, f.height, 1e-6);
    }
    let line = ctx.entities.line_material.unwrap();
    assert_close(ctx.graph.material(line).unwrap().opacity, line_glow(0.5), 1e-6);

    let group = ctx.graph.node(ctx.group).unwrap().transform.translation;
    assert_eq!(group, ctx.group_position);
    // Pointer at the bottom-right corner pulls the group toward +x / +z.
    assert!(group.x > GROUP_BASE_OFFSET.x);
    assert!(group.z > GROUP_BASE_OFFSET.z);
}

#[test]
fn resize_applies_synchronously() {
    let mut ctx = context(Some(1));
    let out = ctx.on_resize(500, 500).unwrap();
    assert_eq!(out, Viewport::new(500, 500).unwrap());
    assert_close(ctx.camera.aspect, 1.0, 1e-6);
    assert_eq!(ctx.controller.viewport, out);
}

#[test]
fn zero_resize_is_rejected_and_keeps_previous_state() {
    let mut ctx = context(Some(1));
    let before = ctx.camera.clone();
    assert_eq!(
        ctx.on_resize(0, 400).unwrap_err(),
        SceneError::EmptyViewport { width: 0, height: 400 }
    );
    assert_eq!(ctx.camera, before);
}
