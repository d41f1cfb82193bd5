use yew::prelude::*;
use yew_hooks::prelude::*;

pub const PLANE_COUNT: usize = 3;

/// Vertical offset (px) and rotation (deg) of the `index`th floating plane.
/// Later planes drift faster.
pub fn parallax_offset(scroll_y: f64, index: usize) -> (f64, f64) {
    let speed = 0.5 + index as f64 * 0.2;
    // `+ 0.0` turns -0.0 into 0.0 so an unscrolled page renders "0px".
    (-(scroll_y * 0.5) * speed + 0.0, scroll_y * 0.01)
}

pub fn parallax_transform(scroll_y: f64, index: usize) -> String {
    let (offset, rotation) = parallax_offset(scroll_y, index);
    format!("translateY({}px) rotate({}deg)", offset, rotation)
}

#[function_component(FloatingPlanes)]
pub fn floating_planes() -> Html {
    let (_, scroll_y) = use_window_scroll();

    html! {
        <div class="floating-elements">
            { for (0..PLANE_COUNT).map(|i| html! {
                <div class={format!("floating-plane plane-{}", i + 1)}
                     style={format!("transform: {};", parallax_transform(scroll_y, i))}>
                    <i class="fas fa-plane"></i>
                </div>
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_scroll_means_no_offset() {
        assert_eq!(parallax_transform(0.0, 0), "translateY(0px) rotate(0deg)");
    }

    #[test]
    fn later_planes_move_faster() {
        let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
        let (first, rotation) = parallax_offset(100.0, 0);
        assert!(close(first, -25.0));
        assert!(close(rotation, 1.0));
        assert!(close(parallax_offset(100.0, 1).0, -35.0));
        assert!(close(parallax_offset(100.0, 2).0, -45.0));
    }
}
