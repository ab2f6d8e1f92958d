use crate::core::driver::{FrameScheduler, FrameTarget, InstantClock, LaunchGate, RenderLoop};
use crate::core::{SceneContext, Viewport};
use crate::dom;
use crate::events::Listener;
use crate::render;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Scene state plus the optional GPU backend that draws it.
pub struct FrameContext {
    pub scene: SceneContext,
    pub gpu: Option<render::GpuState>,
    pub canvas: web::HtmlCanvasElement,
}

impl FrameTarget for FrameContext {
    fn update(&mut self, time: f32) {
        self.scene.update(time);
    }

    fn render(&mut self) -> anyhow::Result<()> {
        match &mut self.gpu {
            Some(g) => g.render(&self.scene),
            // No adapter: state keeps animating, nothing to draw.
            None => Ok(()),
        }
    }
}

impl FrameContext {
    pub fn resize(&mut self, viewport: Viewport) {
        let viewport = match self.scene.on_resize(viewport.width, viewport.height) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("[scene] {}", e);
                return;
            }
        };
        let (w_px, h_px) = dom::size_canvas(&self.canvas, viewport);
        if let Some(g) = &mut self.gpu {
            g.resize(w_px, h_px);
        }
        log::debug!(
            "[scene] resized to {}x{} (aspect {:.3})",
            viewport.width,
            viewport.height,
            self.scene.camera.aspect
        );
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// requestAnimationFrame-backed scheduler.
pub struct RafScheduler {
    window: web::Window,
    callback: FrameCallback,
    pending: Option<i32>,
}

impl FrameScheduler for RafScheduler {
    fn schedule_next(&mut self) -> anyhow::Result<()> {
        let cb = self.callback.borrow();
        let cb = cb
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("frame callback released"))?;
        let id = self
            .window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("requestAnimationFrame: {:?}", e))?;
        self.pending = Some(id);
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(id) = self.pending.take() {
            _ = self.window.cancel_animation_frame(id);
        }
        // Releasing the closure breaks the callback chain for good.
        self.callback.borrow_mut().take();
    }
}

/// A running scene: loop driver, frame state and the listeners feeding it.
pub struct SceneRuntime {
    pub driver: RenderLoop<InstantClock, RafScheduler>,
    pub frame: FrameContext,
    pub listeners: Vec<Listener>,
}

impl SceneRuntime {
    pub fn stop(&mut self) {
        self.driver.stop();
        for l in self.listeners.drain(..) {
            l.detach();
        }
    }
}

/// Build the runtime and request the first frame unless `gate` already saw a
/// stop. Each callback holds only a weak reference, so dropping the returned
/// handle ends the chain.
pub fn start_loop(
    window: &web::Window,
    frame: FrameContext,
    gate: &LaunchGate,
) -> anyhow::Result<Rc<RefCell<SceneRuntime>>> {
    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let scheduler = RafScheduler {
        window: window.clone(),
        callback: callback.clone(),
        pending: None,
    };
    let runtime = Rc::new(RefCell::new(SceneRuntime {
        driver: RenderLoop::new(InstantClock::start(), scheduler),
        frame,
        listeners: Vec::new(),
    }));

    let weak: Weak<RefCell<SceneRuntime>> = Rc::downgrade(&runtime);
    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let Some(rt) = weak.upgrade() else {
            return;
        };
        let mut rt = rt.borrow_mut();
        let SceneRuntime { driver, frame, .. } = &mut *rt;
        driver.run_frame(frame);
    }) as Box<dyn FnMut()>));

    gate.launch(&mut runtime.borrow_mut().driver)?;
    Ok(runtime)
}
