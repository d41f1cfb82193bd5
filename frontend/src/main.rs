use yew::prelude::*;
use yew_router::prelude::*;
use log::{error, info, Level};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

mod config;
mod dom;
mod components {
    pub mod notification;
}
mod chat {
    pub mod api;
    pub mod attachment;
    pub mod error;
    pub mod format;
    pub mod history;
    pub mod session;
    pub mod widget;
}
mod milestone {
    pub mod flight_path;
    pub mod track;
}
mod pricing {
    pub mod calculator;
    pub mod pricing_section;
}
mod contact {
    pub mod enquiry_form;
    pub mod submission;
    pub mod validation;
}
mod effects {
    pub mod cockpit;
    pub mod counter;
    pub mod parallax;
    pub mod reveal;
    pub mod ripple;
    pub mod scroll_top;
}
mod pages {
    pub mod landing;
}

use components::notification::NotificationHost;
use config::{MOUNT_POINT_ID, SITE_NAME};
use dom::{anchor_callback, HeaderRef};
use effects::ripple::use_document_ripples;
use pages::landing::{section_ids, Landing, SECTIONS};

const SCROLLED_AFTER_PX: f64 = 100.0;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Landing /> }
        }
        Route::NotFound => {
            info!("Rendering not-found page");
            html! {
                <section class="not-found">
                    <div class="container">
                        <h1>{"404"}</h1>
                        <p>{"This page has flown off the radar."}</p>
                        <Link<Route> to={Route::Home} classes="btn-primary">{"Back to base"}</Link<Route>>
                    </div>
                </section>
            }
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct NavProps {
    pub header: HeaderRef,
}

#[function_component(Nav)]
pub fn nav(props: &NavProps) -> Html {
    let menu_open = use_state(|| false);
    let is_scrolled = use_state(|| false);
    let active = use_state(|| None::<&'static str>);

    {
        let is_scrolled = is_scrolled.clone();
        let active = active.clone();
        use_effect_with_deps(move |_| {
            let window = dom::window().ok();
            let ids = section_ids();

            let scroll_callback = Closure::wrap(Box::new(move || {
                let scroll_y = dom::scroll_y();
                is_scrolled.set(scroll_y > SCROLLED_AFTER_PX);
                // Offsets shift as images load and sections reveal, so read them fresh.
                active.set(dom::active_section(scroll_y, &dom::section_offsets(&ids)));
            }) as Box<dyn FnMut()>);

            if let Some(window) = &window {
                if let Err(e) = window.add_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref()) {
                    error!("nav: could not listen for scroll: {:?}", e);
                }
            }

            move || {
                if let Some(window) = window {
                    let _ = window.remove_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref());
                }
            }
        }, ());
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let link = |id: &'static str, label: &'static str| {
        let scroll = anchor_callback(id, &props.header);
        let menu_open = menu_open.clone();
        let onclick = Callback::from(move |e: MouseEvent| {
            menu_open.set(false);
            scroll.emit(e);
        });
        html! {
            <li>
                <a href={format!("#{}", id)}
                   class={classes!("nav-link", (*active == Some(id)).then(|| "active"))}
                   {onclick}>
                    { label }
                </a>
            </li>
        }
    };

    html! {
        <header ref={props.header.0.clone()} class={classes!("header", (*is_scrolled).then(|| "scrolled"))}>
            <nav class="navbar container">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    <i class="fas fa-plane"></i>
                    { SITE_NAME }
                </Link<Route>>

                <ul class={classes!("nav-menu", (*menu_open).then(|| "active"))}>
                    { for SECTIONS.iter().map(|(id, label)| link(*id, *label)) }
                </ul>

                <button class={classes!("hamburger", (*menu_open).then(|| "active"))}
                        aria-label="Toggle navigation"
                        onclick={toggle_menu}>
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
            </nav>
        </header>
    }
}

#[function_component]
fn App() -> Html {
    let header = use_memo(|_| HeaderRef::default(), ());
    use_document_ripples();

    html! {
        <BrowserRouter>
            <NotificationHost>
                <ContextProvider<HeaderRef> context={(*header).clone()}>
                    <Nav header={(*header).clone()} />
                    <Switch<Route> render={switch} />
                </ContextProvider<HeaderRef>>
            </NotificationHost>
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging (fails only if a logger is already installed)
    let _ = console_log::init_with_level(Level::Info);

    info!("Starting application");
    match dom::element_by_id(MOUNT_POINT_ID) {
        Ok(root) => {
            yew::Renderer::<App>::with_root(root).render();
        }
        Err(e) => error!("cannot start {}: {}", SITE_NAME, e),
    }
}
