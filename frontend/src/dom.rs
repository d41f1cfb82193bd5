//! Binding helpers between components and the DOM.
//!
//! Components never look elements up by class name. They either own a
//! `NodeRef` or ask for a well-known id, and a missing handle surfaces as a
//! [`BindError`] so the failure shows up in the console instead of a feature
//! quietly doing nothing.

use log::warn;
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, MouseEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, ScrollToOptions, Window,
};
use yew::{Callback, NodeRef};

/// Extra room left above a section when scrolling to it.
const ANCHOR_GAP: f64 = 20.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BindError {
    #[error("no window object available")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("required element #{0} is missing from the page")]
    MissingElement(String),
    #[error("{0} is not mounted")]
    Unmounted(&'static str),
    #[error("browser refused to create {0}")]
    Unsupported(&'static str),
}

pub fn window() -> Result<Window, BindError> {
    web_sys::window().ok_or(BindError::NoWindow)
}

pub fn document() -> Result<Document, BindError> {
    window()?.document().ok_or(BindError::NoDocument)
}

pub fn element_by_id(id: &str) -> Result<Element, BindError> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| BindError::MissingElement(id.to_string()))
}

/// Resolves a component-owned handle, naming it in the error if it is not
/// mounted (or not of the expected element type).
pub fn require<T: JsCast>(node: &NodeRef, name: &'static str) -> Result<T, BindError> {
    node.get()
        .and_then(|n| n.dyn_into::<T>().ok())
        .ok_or(BindError::Unmounted(name))
}

pub fn scroll_y() -> f64 {
    web_sys::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

pub fn smooth_scroll_to(top: f64) -> Result<(), BindError> {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window()?.scroll_to_with_scroll_to_options(&options);
    Ok(())
}

/// Where the page has to scroll so that a section starts just below the
/// fixed header.
pub fn anchor_target(section_top: f64, header_height: f64) -> f64 {
    (section_top - header_height - ANCHOR_GAP).max(0.0)
}

/// Smooth-scrolls to the section with the given id, compensating for the
/// fixed header.
pub fn scroll_to_section(section_id: &str, header: &NodeRef) -> Result<(), BindError> {
    let section: HtmlElement = element_by_id(section_id)?
        .dyn_into()
        .map_err(|_| BindError::MissingElement(section_id.to_string()))?;
    let header_height = require::<HtmlElement>(header, "header")
        .map(|h| f64::from(h.offset_height()))
        .unwrap_or(0.0);
    smooth_scroll_to(anchor_target(f64::from(section.offset_top()), header_height))
}

/// The fixed page header, shared through context so any in-page link can
/// compensate for its height.
#[derive(Clone, Default, PartialEq)]
pub struct HeaderRef(pub NodeRef);

/// Click handler for an in-page link to `section_id`.
pub fn anchor_callback(section_id: &'static str, header: &HeaderRef) -> Callback<MouseEvent> {
    let header = header.0.clone();
    Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        if let Err(err) = scroll_to_section(section_id, &header) {
            warn!("anchor #{}: {}", section_id, err);
        }
    })
}

pub fn scroll_into_view_centered(node: &NodeRef, name: &'static str) -> Result<(), BindError> {
    let element = require::<Element>(node, name)?;
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Center);
    element.scroll_into_view_with_scroll_into_view_options(&options);
    Ok(())
}

/// Offset tops of the given section ids, skipping ids that are not on the
/// page.
pub fn section_offsets(ids: &[&'static str]) -> Vec<(&'static str, f64)> {
    let Ok(document) = document() else {
        return Vec::new();
    };
    ids.iter()
        .filter_map(|id| {
            let el = document.get_element_by_id(id)?;
            let el: HtmlElement = el.dyn_into().ok()?;
            Some((*id, f64::from(el.offset_top())))
        })
        .collect()
}

/// Last section whose top (minus a 200px lead) has been scrolled past.
pub fn active_section(scroll_y: f64, sections: &[(&'static str, f64)]) -> Option<&'static str> {
    let mut current = None;
    for (id, top) in sections {
        if scroll_y >= top - 200.0 {
            current = Some(*id);
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_target_leaves_room_for_header() {
        assert_eq!(anchor_target(1000.0, 80.0), 900.0);
        assert_eq!(anchor_target(50.0, 80.0), 0.0);
    }

    #[test]
    fn active_section_picks_last_passed_section() {
        let sections = [("home", 0.0), ("courses", 800.0), ("pricing", 1600.0)];
        assert_eq!(active_section(0.0, &sections), Some("home"));
        assert_eq!(active_section(599.0, &sections), Some("home"));
        assert_eq!(active_section(600.0, &sections), Some("courses"));
        assert_eq!(active_section(5000.0, &sections), Some("pricing"));
    }

    #[test]
    fn active_section_is_none_without_sections() {
        assert_eq!(active_section(100.0, &[]), None);
    }

    #[test]
    fn unbound_handle_is_reported_by_name() {
        let node = NodeRef::default();
        let err = require::<Element>(&node, "chat input").err();
        assert_eq!(err, Some(BindError::Unmounted("chat input")));
        assert_eq!(
            require::<HtmlElement>(&node, "header").map_err(|e| e.to_string()).err().as_deref(),
            Some("header is not mounted")
        );
    }

    #[test]
    fn bind_error_names_missing_element() {
        let err = BindError::MissingElement("app".into());
        assert_eq!(err.to_string(), "required element #app is missing from the page");
    }
}
