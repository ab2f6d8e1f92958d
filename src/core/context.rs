use super::builder::{build_factory, FactoryScene};
use super::camera::{OrthoCamera, Viewport, ViewportController};
use super::config::SceneConfig;
use super::entities::AnimatedEntities;
use super::error::SceneError;
use super::path::Path;
use super::scene::{NodeId, SceneGraph};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Everything one running scene owns. Update and render both take this
/// object; nothing lives in globals.
pub struct SceneContext {
    pub config: SceneConfig,
    pub seed: u64,
    pub graph: SceneGraph,
    pub group: NodeId,
    pub group_position: Vec3,
    pub paths: Vec<Path>,
    pub entities: AnimatedEntities,
    pub camera: OrthoCamera,
    pub controller: ViewportController,
    pub last_time: f32,
}

impl SceneContext {
    /// Build the world for `viewport`. `fallback_seed` is used when the
    /// config carries no seed.
    pub fn new(config: SceneConfig, viewport: Viewport, fallback_seed: u64) -> Result<Self, SceneError> {
        let seed = config.seed.unwrap_or(fallback_seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let FactoryScene {
            graph,
            group,
            paths,
            entities,
        } = build_factory(&config, &mut rng)?;
        let camera = OrthoCamera::isometric(config.frustum_size, viewport);
        let controller = ViewportController::new(viewport, config.pointer_sensitivity, config.ease_rate);
        let group_position = graph
            .node(group)
            .map(|n| n.transform.translation)
            .unwrap_or(controller.base_offset);
        Ok(Self {
            config,
            seed,
            graph,
            group,
            group_position,
            paths,
            entities,
            camera,
            controller,
            last_time: 0.0,
        })
    }

    /// Per-frame state advance for elapsed `time`: entities first, then the
    /// group easing, then everything is written into the graph.
    pub fn update(&mut self, time: f32) {
        self.last_time = time;
        self.entities.update(time, &self.paths);
        self.controller.ease(&mut self.group_position, time);
        self.entities.write_to(&mut self.graph);
        self.graph.set_translation(self.group, self.group_position);
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.controller.on_pointer_move(x, y);
    }

    /// Refit the camera to a new viewport; returns the size to give the surface.
    pub fn on_resize(&mut self, width: u32, height: u32) -> Result<Viewport, SceneError> {
        let viewport = Viewport::new(width, height)?;
        Ok(self.controller.on_resize(viewport, &mut self.camera))
    }
}
