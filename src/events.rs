use crate::dom;
use crate::frame::SceneRuntime;
use std::cell::RefCell;
use std::rc::Weak;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// An attached event listener that can be removed again.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn attach(
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("add {} listener: {:?}", kind, e))?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }

    pub fn detach(self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Pointer moves only record the parallax target; the group eases toward it
/// on the next frame.
pub fn wire_pointermove(
    window: &web::Window,
    runtime: Weak<RefCell<SceneRuntime>>,
) -> anyhow::Result<Listener> {
    Listener::attach(window, "pointermove", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
            return;
        };
        let Some(rt) = runtime.upgrade() else {
            return;
        };
        let Ok(mut rt) = rt.try_borrow_mut() else {
            return;
        };
        rt.frame
            .scene
            .on_pointer_move(ev.client_x() as f32, ev.client_y() as f32);
    })
}

/// Resizes are applied immediately: frustum, canvas and swapchain together.
pub fn wire_resize(
    window: &web::Window,
    runtime: Weak<RefCell<SceneRuntime>>,
) -> anyhow::Result<Listener> {
    let window_for_size = window.clone();
    Listener::attach(window, "resize", move |_ev: web::Event| {
        let viewport = match dom::viewport_size(&window_for_size) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("[scene] resize ignored: {}", e);
                return;
            }
        };
        let Some(rt) = runtime.upgrade() else {
            return;
        };
        match rt.try_borrow_mut() {
            Ok(mut rt) => rt.frame.resize(viewport),
            Err(_) => log::warn!("[scene] resize during frame, skipped"),
        };
    })
}
