// The main crate is wasm-only, so the pure scene modules are included directly.
#![allow(dead_code)]

pub mod core {
    pub mod builder {
        include!("../../src/core/builder.rs");
    }
    pub mod camera {
        include!("../../src/core/camera.rs");
    }
    pub mod config {
        include!("../../src/core/config.rs");
    }
    pub mod constants {
        include!("../../src/core/constants.rs");
    }
    pub mod context {
        include!("../../src/core/context.rs");
    }
    pub mod driver {
        include!("../../src/core/driver.rs");
    }
    pub mod entities {
        include!("../../src/core/entities.rs");
    }
    pub mod error {
        include!("../../src/core/error.rs");
    }
    pub mod interactions {
        include!("../../src/core/interactions.rs");
    }
    pub mod mesh {
        include!("../../src/core/mesh.rs");
    }
    pub mod path {
        include!("../../src/core/path.rs");
    }
    pub mod scene {
        include!("../../src/core/scene.rs");
    }
}

/// Assert two floats agree within `eps`.
#[track_caller]
pub fn assert_close(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "expected {b}, got {a} (eps {eps})");
}
