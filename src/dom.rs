use crate::core::{SceneConfig, SceneError, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Current window inner size in CSS pixels.
pub fn viewport_size(window: &web::Window) -> Result<Viewport, SceneError> {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    Viewport::new(w.max(0.0) as u32, h.max(0.0) as u32)
}

/// Defaults overridden by the container's `data-*` attributes.
pub fn read_config(container: &web::Element) -> SceneConfig {
    let mut config = SceneConfig::default();
    for key in SceneConfig::ATTRIBUTES {
        if let Some(value) = container.get_attribute(key) {
            if let Err(e) = config.apply_attribute(key, &value) {
                log::warn!("[scene] ignoring {}", e);
            }
        }
    }
    config
}

/// Create the output canvas inside `container`.
pub fn create_canvas(
    document: &web::Document,
    container: &web::Element,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("not a canvas: {:?}", e))?;
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(canvas)
}

/// Size the canvas to `viewport` CSS pixels with a devicePixelRatio-scaled
/// backing store. Returns the backing size in device pixels.
pub fn size_canvas(canvas: &web::HtmlCanvasElement, viewport: Viewport) -> (u32, u32) {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let w_px = ((viewport.width as f64 * dpr) as u32).max(1);
    let h_px = ((viewport.height as f64 * dpr) as u32).max(1);
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", viewport.width));
    _ = style.set_property("height", &format!("{}px", viewport.height));
    _ = style.set_property("display", "block");
    (w_px, h_px)
}

/// Fallback seed when the container does not pin one.
pub fn random_seed() -> u64 {
    rand::random()
}
