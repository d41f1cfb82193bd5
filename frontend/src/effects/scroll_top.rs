use log::warn;
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::dom;

pub const SHOW_AFTER_PX: f64 = 500.0;

pub fn scroll_top_visible(scroll_y: f64) -> bool {
    scroll_y > SHOW_AFTER_PX
}

#[function_component(ScrollToTop)]
pub fn scroll_to_top() -> Html {
    let (_, scroll_y) = use_window_scroll();
    let onclick = Callback::from(|_: MouseEvent| {
        if let Err(e) = dom::smooth_scroll_to(0.0) {
            warn!("scroll to top: {}", e);
        }
    });

    html! {
        <button class={classes!("scroll-to-top", scroll_top_visible(scroll_y).then(|| "visible"))}
                aria-label="Scroll to top"
                {onclick}>
            <i class="fas fa-arrow-up"></i>
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appears_past_threshold() {
        assert!(!scroll_top_visible(0.0));
        assert!(!scroll_top_visible(500.0));
        assert!(scroll_top_visible(500.5));
    }
}
