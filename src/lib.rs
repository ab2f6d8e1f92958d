#![cfg(target_arch = "wasm32")]
use crate::core::driver::{LaunchGate, LoopState};
use crate::core::{SceneContext, SceneError};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub mod core;
mod dom;
mod events;
mod frame;
mod page;
mod render;

thread_local! {
    // The one running scene, kept so `stop_scene` can tear it down.
    static RUNTIME: RefCell<Option<Rc<RefCell<frame::SceneRuntime>>>> = const { RefCell::new(None) };
    // Holds a stop that arrives while init is still awaiting the GPU.
    static GATE: LaunchGate = LaunchGate::default();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("factory-scene starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Stop the animation loop and detach the scene's pointer/resize listeners.
#[wasm_bindgen]
pub fn stop_scene() {
    let runtime = RUNTIME.with(|r| r.borrow_mut().take());
    match runtime {
        Some(rt) => match rt.try_borrow_mut() {
            Ok(mut rt) => rt.stop(),
            Err(_) => log::warn!("[loop] stop requested mid-frame, ignored"),
        },
        None => {
            GATE.with(|g| g.request_stop());
            log::info!("[loop] stop requested before the scene started");
        }
    }
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    page::wire_all(&window, &document);

    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let container_id = crate::core::constants::DEFAULT_CONTAINER_ID;
    let Some(container) = document.get_element_by_id(container_id) else {
        // Not every page hosts the scene.
        log::warn!("[scene] {}; skipping scene init", SceneError::MissingContainer(container_id.to_string()));
        return Ok(());
    };
    let config = dom::read_config(&container);
    let viewport = dom::viewport_size(&window)?;
    let shadows = config.shadows;

    let scene = SceneContext::new(config, viewport, dom::random_seed())?;
    log::info!(
        "[scene] built seed={} nodes={} meshes={} pulses={} floaters={} aspect={:.3}",
        scene.seed,
        scene.graph.node_count(),
        scene.graph.mesh_count(),
        scene.entities.pulses.len(),
        scene.entities.floaters.len(),
        scene.camera.aspect
    );

    let canvas = dom::create_canvas(&document, &container)?;
    dom::size_canvas(&canvas, viewport);

    let gpu = match render::GpuState::new(&canvas, &scene, shadows).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("[gpu] WebGPU init error: {:?}", e);
            None
        }
    };

    let gate = GATE.with(|g| g.clone());
    if gate.stop_requested() {
        log::info!("[loop] stopped during init, not starting");
        return Ok(());
    }
    let runtime = frame::start_loop(
        &window,
        frame::FrameContext {
            scene,
            gpu,
            canvas,
        },
        &gate,
    )?;
    if runtime.borrow().driver.state() == LoopState::Stopped {
        return Ok(());
    }
    let listeners = vec![
        events::wire_pointermove(&window, Rc::downgrade(&runtime))?,
        events::wire_resize(&window, Rc::downgrade(&runtime))?,
    ];
    runtime.borrow_mut().listeners = listeners;
    RUNTIME.with(|r| *r.borrow_mut() = Some(runtime));
    log::info!("[loop] running");
    Ok(())
}
