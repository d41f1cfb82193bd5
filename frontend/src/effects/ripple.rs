use gloo_timers::callback::Timeout;
use log::{error, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, MouseEvent};
use yew::prelude::*;

use crate::dom::{self, BindError};

/// Everything clickable that gets a ripple.
pub const RIPPLE_SELECTOR: &str =
    "button, .btn-primary, .btn-secondary, .cta-button, .course-btn, .submit-btn";

/// Matches the `ripple` keyframes; the span is removed after this even if the
/// animation never runs.
pub const RIPPLE_MS: u32 = 600;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleGeometry {
    pub size: f64,
    pub x: f64,
    pub y: f64,
}

/// Circle as large as the button's longer side, centred on the click.
pub fn ripple_geometry(left: f64, top: f64, width: f64, height: f64, client_x: f64, client_y: f64) -> RippleGeometry {
    let size = width.max(height);
    RippleGeometry {
        size,
        x: client_x - left - size / 2.0,
        y: client_y - top - size / 2.0,
    }
}

/// The ripple host a click landed in, if any. Clicks reach the document
/// from the innermost node, so walk up from the actual target.
fn ripple_host(e: &MouseEvent) -> Option<HtmlElement> {
    e.target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest(RIPPLE_SELECTOR).ok().flatten())
        .and_then(|el| el.dyn_into().ok())
}

/// Adds a ripple to the clicked button. The ripple removes itself when its
/// CSS animation ends, or after `RIPPLE_MS` at the latest.
pub fn spawn_ripple(e: &MouseEvent) -> Result<(), BindError> {
    let button = ripple_host(e).ok_or(BindError::Unmounted("ripple target"))?;
    let rect = button.get_bounding_client_rect();
    let g = ripple_geometry(
        rect.left(),
        rect.top(),
        rect.width(),
        rect.height(),
        f64::from(e.client_x()),
        f64::from(e.client_y()),
    );

    let ripple: HtmlElement = dom::document()?
        .create_element("span")
        .map_err(|_| BindError::Unmounted("ripple"))?
        .unchecked_into();
    ripple.set_class_name("ripple");
    let _ = ripple.set_attribute(
        "style",
        &format!("width: {0}px; height: {0}px; left: {1}px; top: {2}px;", g.size, g.x, g.y),
    );

    let _ = button.style().set_property("position", "relative");
    let _ = button.style().set_property("overflow", "hidden");
    let _ = button.append_child(&ripple);

    let target: Element = ripple.clone().into();
    let cleanup = Closure::once_into_js(move || target.remove());
    let _ = ripple.add_event_listener_with_callback("animationend", cleanup.unchecked_ref());
    let fallback: Element = ripple.into();
    Timeout::new(RIPPLE_MS, move || fallback.remove()).forget();
    Ok(())
}

/// Ripples every button and call-to-action on the page from one
/// document-level click listener.
#[hook]
pub fn use_document_ripples() {
    use_effect_with_deps(
        |_| {
            let document = dom::document().ok();
            let on_click = Closure::wrap(Box::new(move |e: MouseEvent| {
                if ripple_host(&e).is_none() {
                    return;
                }
                if let Err(err) = spawn_ripple(&e) {
                    warn!("ripple: {}", err);
                }
            }) as Box<dyn FnMut(MouseEvent)>);

            if let Some(document) = &document {
                if let Err(e) = document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref()) {
                    error!("ripple: could not listen for clicks: {:?}", e);
                }
            }

            move || {
                if let Some(document) = document {
                    let _ = document.remove_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
                }
            }
        },
        (),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ripple_is_centred_on_click() {
        let g = ripple_geometry(10.0, 20.0, 200.0, 50.0, 60.0, 45.0);
        assert_eq!(g.size, 200.0);
        assert_eq!(g.x, -50.0);
        assert_eq!(g.y, -75.0);
    }

    #[test]
    fn every_call_to_action_ripples() {
        let selectors: Vec<&str> = RIPPLE_SELECTOR.split(", ").collect();
        for wanted in ["button", ".btn-primary", ".btn-secondary", ".cta-button", ".course-btn", ".submit-btn"] {
            assert!(selectors.contains(&wanted), "{wanted}");
        }
    }

    #[test]
    fn fallback_removal_matches_animation_length() {
        let css = crate::pages::landing::LANDING_STYLES;
        let keyframes = format!("animation: ripple {}s linear;", f64::from(RIPPLE_MS) / 1000.0);
        assert!(css.contains(&keyframes), "{keyframes}");
    }

    #[test]
    fn tall_buttons_use_height() {
        let g = ripple_geometry(0.0, 0.0, 40.0, 120.0, 20.0, 60.0);
        assert_eq!(g.size, 120.0);
        assert_eq!((g.x, g.y), (-40.0, 0.0));
    }
}
