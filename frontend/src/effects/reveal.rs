use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

use crate::dom::{self, BindError};

pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// An observer that fires once per target and is disconnected on drop.
pub struct VisibilityWatch {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for VisibilityWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub fn watch_visibility(
    target: &Element,
    threshold: f64,
    root_margin: Option<&str>,
    on_visible: impl Fn() + 'static,
) -> Result<VisibilityWatch, BindError> {
    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            if entry.is_intersecting() {
                observer.unobserve(&entry.target());
                on_visible();
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        options.set_root_margin(margin);
    }
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .map_err(|_| BindError::Unsupported("IntersectionObserver"))?;
    observer.observe(target);
    Ok(VisibilityWatch {
        observer,
        _callback: callback,
    })
}

/// True once the element behind `node` has scrolled into view. Stays true.
#[hook]
pub fn use_first_visible(node: NodeRef, threshold: f64, root_margin: Option<&'static str>) -> bool {
    let visible = use_state(|| false);
    {
        let visible = visible.clone();
        use_effect_with_deps(
            move |node: &NodeRef| {
                let watch = dom::require::<Element>(node, "reveal target").and_then(|target| {
                    watch_visibility(&target, threshold, root_margin, move || visible.set(true))
                });
                let watch = match watch {
                    Ok(watch) => Some(watch),
                    Err(e) => {
                        warn!("reveal: {}", e);
                        None
                    }
                };
                move || drop(watch)
            },
            node,
        );
    }
    *visible
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealKind {
    FadeIn,
    SlideLeft,
    SlideRight,
}

impl RevealKind {
    pub fn class(self) -> &'static str {
        match self {
            RevealKind::FadeIn => "fade-in",
            RevealKind::SlideLeft => "slide-in-left",
            RevealKind::SlideRight => "slide-in-right",
        }
    }

    /// Left for even positions, right for odd.
    pub fn alternating(index: usize) -> Self {
        if index % 2 == 0 {
            RevealKind::SlideLeft
        } else {
            RevealKind::SlideRight
        }
    }
}

pub fn stagger(index: usize, step_ms: u32) -> u32 {
    index as u32 * step_ms
}

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    #[prop_or(RevealKind::FadeIn)]
    pub kind: RevealKind,
    #[prop_or_default]
    pub delay_ms: u32,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Reveal)]
pub fn reveal(props: &RevealProps) -> Html {
    let node = use_node_ref();
    let visible = use_first_visible(node.clone(), REVEAL_THRESHOLD, Some(REVEAL_ROOT_MARGIN));
    let style = (props.delay_ms > 0).then(|| format!("transition-delay: {}ms;", props.delay_ms));

    html! {
        <div ref={node}
             class={classes!(props.class.clone(), props.kind.class(), visible.then(|| "visible"))}
             {style}>
            { for props.children.iter() }
        </div>
    }
}

pub const REVEAL_STYLES: &str = r#"
.fade-in {
    opacity: 0;
    transform: translateY(30px);
    transition: opacity 0.8s ease, transform 0.8s ease;
}
.slide-in-left {
    opacity: 0;
    transform: translateX(-50px);
    transition: opacity 0.8s ease, transform 0.8s ease;
}
.slide-in-right {
    opacity: 0;
    transform: translateX(50px);
    transition: opacity 0.8s ease, transform 0.8s ease;
}
.fade-in.visible,
.slide-in-left.visible,
.slide-in-right.visible {
    opacity: 1;
    transform: none;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn features_alternate_sides() {
        let kinds: Vec<_> = (0..4).map(RevealKind::alternating).collect();
        assert_eq!(
            kinds,
            vec![
                RevealKind::SlideLeft,
                RevealKind::SlideRight,
                RevealKind::SlideLeft,
                RevealKind::SlideRight
            ]
        );
    }

    #[test]
    fn stagger_grows_with_index() {
        assert_eq!(stagger(0, 200), 0);
        assert_eq!(stagger(3, 200), 600);
        assert_eq!(stagger(2, 300), 600);
    }

    #[test]
    fn kinds_map_to_css_classes() {
        assert_eq!(RevealKind::FadeIn.class(), "fade-in");
        assert_eq!(RevealKind::SlideLeft.class(), "slide-in-left");
        assert_eq!(RevealKind::SlideRight.class(), "slide-in-right");
    }
}
