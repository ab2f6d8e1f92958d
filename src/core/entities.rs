use super::constants::*;
use super::path::Path;
use super::scene::{MaterialId, NodeId, SceneGraph};
use glam::Vec3;

/// Marker travelling repeatedly along one path.
#[derive(Clone, Debug, PartialEq)]
pub struct Pulse {
    pub node: NodeId,
    /// Index into the scene's path list.
    pub path: usize,
    pub progress: f32,
    /// Progress added per frame.
    pub speed: f32,
    pub position: Vec3,
}

impl Pulse {
    pub fn new(node: NodeId, path: usize, progress: f32, speed: f32) -> Self {
        Self {
            node,
            path,
            progress: progress.clamp(0.0, 1.0),
            speed,
            position: Vec3::ZERO,
        }
    }

    /// Advance one frame. Overflow past 1 resets to exactly 0; the excess is
    /// dropped, not carried.
    #[inline]
    pub fn advance(&mut self) {
        self.progress += self.speed;
        if self.progress > 1.0 {
            self.progress = 0.0;
        }
    }
}

/// Stationary marker that bobs vertically and pulses its inner glow.
#[derive(Clone, Debug, PartialEq)]
pub struct Floater {
    pub node: NodeId,
    pub inner_material: MaterialId,
    pub base_position: Vec3,
    pub phase: f32,
    pub height: f32,
    pub glow_opacity: f32,
}

impl Floater {
    pub fn new(node: NodeId, inner_material: MaterialId, base_position: Vec3, phase: f32) -> Self {
        let mut f = Self {
            node,
            inner_material,
            base_position,
            phase,
            height: base_position.y,
            glow_opacity: 1.0,
        };
        f.update(0.0);
        f
    }

    #[inline]
    pub fn update(&mut self, time: f32) {
        self.height = floater_height(self.base_position.y, time, self.phase);
        self.glow_opacity = floater_glow(time, self.phase);
    }
}

#[inline]
pub fn floater_height(base: f32, time: f32, phase: f32) -> f32 {
    base + FLOATER_AMPLITUDE * (time * FLOATER_FREQUENCY + phase).sin()
}

#[inline]
pub fn floater_glow(time: f32, phase: f32) -> f32 {
    (0.5 + 0.5 * (time * FLOATER_OPACITY_FREQUENCY + phase).sin()).clamp(0.0, 1.0)
}

/// Opacity of the shared tube material at `time`, within [0.2, 1.0].
#[inline]
pub fn line_glow(time: f32) -> f32 {
    (GLOW_BASE + GLOW_SPAN * (time * GLOW_FREQUENCY).sin())
        .clamp(GLOW_BASE - GLOW_SPAN, GLOW_BASE + GLOW_SPAN)
}

/// All per-frame mutable visual state.
#[derive(Clone, Debug, Default)]
pub struct AnimatedEntities {
    pub pulses: Vec<Pulse>,
    pub floaters: Vec<Floater>,
    /// Shared material of every circuit tube.
    pub line_material: Option<MaterialId>,
    pub line_opacity: f32,
}

impl AnimatedEntities {
    /// Advance everything to elapsed `time` (seconds since start). Pulses
    /// step once per call regardless of `time`.
    pub fn update(&mut self, time: f32, paths: &[Path]) {
        for p in &mut self.pulses {
            p.advance();
            if let Some(path) = paths.get(p.path) {
                let at = path.point_at(p.progress);
                p.position = Vec3::new(at.x, PULSE_HEIGHT, at.z);
            }
        }
        for f in &mut self.floaters {
            f.update(time);
        }
        self.line_opacity = line_glow(time);
    }

    /// Copy the current state into node transforms and material opacities.
    pub fn write_to(&self, graph: &mut SceneGraph) {
        for p in &self.pulses {
            graph.set_translation(p.node, p.position);
        }
        for f in &self.floaters {
            let pos = Vec3::new(f.base_position.x, f.height, f.base_position.z);
            graph.set_translation(f.node, pos);
            graph.set_opacity(f.inner_material, f.glow_opacity);
        }
        if let Some(m) = self.line_material {
            graph.set_opacity(m, self.line_opacity);
        }
    }
}
