pub mod builder;
pub mod camera;
pub mod config;
pub mod constants;
pub mod context;
pub mod driver;
pub mod entities;
pub mod error;
pub mod interactions;
pub mod mesh;
pub mod path;
pub mod scene;

pub use camera::Viewport;
pub use config::SceneConfig;
pub use context::SceneContext;
pub use error::SceneError;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
pub static SHADOW_WGSL: &str = include_str!("../../shaders/shadow.wgsl");
