use crate::core::interactions::{button_transform, hero_tilt};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// Landing-page enhancements next to the scene. They live as long as the page,
// so their closures are forgotten rather than tracked.

fn elements(document: &web::Document, selector: &str) -> Vec<web::HtmlElement> {
    let Ok(list) = document.query_selector_all(selector) else {
        log::warn!("[page] bad selector {}", selector);
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::HtmlElement>().ok())
        .collect()
}

fn on(target: &web::EventTarget, kind: &str, handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
    _ = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn set_transform(el: &web::HtmlElement, value: &str) {
    _ = el.style().set_property("transform", value);
}

/// Press feedback on the call-to-action buttons.
pub fn wire_buttons(document: &web::Document) {
    let buttons = elements(document, ".nav-cta, .primary-cta");
    for btn in &buttons {
        for (kind, pressed) in [("mousedown", true), ("mouseup", false), ("mouseleave", false)] {
            let b = btn.clone();
            on(btn, kind, move || set_transform(&b, &button_transform(pressed)));
        }
    }
    log::debug!("[page] {} buttons wired", buttons.len());
}

/// Scroll-driven tilt of the hero device, applied once for the current scroll.
pub fn wire_hero_tilt(window: &web::Window, document: &web::Document) {
    let Some(hero) = document
        .get_element_by_id("hero-ipad")
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    else {
        return;
    };
    let apply = {
        let window = window.clone();
        move || {
            let scroll_y = window.scroll_y().unwrap_or(0.0);
            let inner_width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            set_transform(&hero, &hero_tilt(scroll_y, inner_width).css());
        }
    };
    let initial = apply.clone();
    on(window, "scroll", apply);
    initial();
}

/// Tab buttons toggle `active` on themselves and their `data-target` pane.
pub fn wire_tabs(document: &web::Document) {
    let buttons = elements(document, ".ai-tab-btn");
    for btn in &buttons {
        let document = document.clone();
        let clicked = btn.clone();
        on(btn, "click", move || {
            for b in elements(&document, ".ai-tab-btn") {
                _ = b.class_list().remove_1("active");
            }
            for p in elements(&document, ".ai-tab-pane") {
                _ = p.class_list().remove_1("active");
            }
            _ = clicked.class_list().add_1("active");
            match clicked.get_attribute("data-target") {
                Some(id) => match document.get_element_by_id(&id) {
                    Some(pane) => {
                        _ = pane.class_list().add_1("active");
                    }
                    None => log::warn!("[page] tab target #{} not found", id),
                },
                None => log::warn!("[page] tab button without data-target"),
            }
        });
    }
}

pub fn wire_all(window: &web::Window, document: &web::Document) {
    wire_buttons(document);
    wire_hero_tilt(window, document);
    wire_tabs(document);
}
