use std::collections::HashMap;

use gloo_timers::callback::Timeout;
use log::{error, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Element;
use yew::prelude::*;

use crate::dom::{self, BindError};
use crate::milestone::track::{
    MilestoneTrack, Span, Transition, CLICK_GUARD_MS, FLIGHT_DURATION_MS, RESIZE_SETTLE_MS,
};

pub struct Milestone {
    pub title: &'static str,
    pub duration: &'static str,
    pub summary: &'static str,
    pub icon: &'static str,
}

pub const MILESTONES: &[Milestone] = &[
    Milestone {
        title: "Ground School",
        duration: "Months 1-4",
        summary: "Classroom and online coaching for all six DGCA CPL papers.",
        icon: "fas fa-book-open",
    },
    Milestone {
        title: "DGCA Exams",
        duration: "Months 4-6",
        summary: "Mock tests, doubt sessions and exam-day strategy until every paper is cleared.",
        icon: "fas fa-file-signature",
    },
    Milestone {
        title: "Medical & RTR",
        duration: "Month 6",
        summary: "Class 1 medical guidance and Radio Telephony licence preparation.",
        icon: "fas fa-headset",
    },
    Milestone {
        title: "Flight Training",
        duration: "Months 7-15",
        summary: "200 hours of flying with partner flight schools, solo and cross-country.",
        icon: "fas fa-plane-departure",
    },
    Milestone {
        title: "CPL Issued",
        duration: "Month 16",
        summary: "Checkride, licence paperwork and your Commercial Pilot Licence.",
        icon: "fas fa-id-card",
    },
    Milestone {
        title: "Airline Ready",
        duration: "Beyond",
        summary: "Type rating counselling and airline interview preparation.",
        icon: "fas fa-plane",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    Card(usize),
    Dot(usize),
}

pub enum Msg {
    Clicked(Marker),
    ReleaseGuard(Marker),
    Landed,
    Resized,
    Settle,
    Advance,
    Back,
    RippleDone(u64),
}

/// Interactive training timeline with an aircraft flying between waypoints.
pub struct FlightPath {
    track: MilestoneTrack,
    aircraft_left: f64,
    flying: bool,
    flight_timer: Option<Timeout>,
    resize_timer: Option<Timeout>,
    guards: HashMap<Marker, Timeout>,
    ripples: HashMap<u64, (usize, Timeout)>,
    next_ripple: u64,
    on_resize: Option<Closure<dyn FnMut()>>,
    track_ref: NodeRef,
    card_refs: Vec<NodeRef>,
}

fn span_of(node: &NodeRef, name: &'static str) -> Result<Span, BindError> {
    let rect = dom::require::<Element>(node, name)?.get_bounding_client_rect();
    Ok(Span {
        left: rect.left(),
        width: rect.width(),
    })
}

impl FlightPath {
    fn geometry(&self, step: usize) -> Result<(Span, Span), BindError> {
        let card = self
            .card_refs
            .get(step)
            .ok_or(BindError::Unmounted("milestone card"))?;
        Ok((span_of(card, "milestone card")?, span_of(&self.track_ref, "flight track")?))
    }

    fn fly_to(&mut self, ctx: &Context<Self>, step: usize) -> bool {
        if step >= self.track.len() {
            return false;
        }
        let (waypoint, track) = match self.geometry(step) {
            Ok(geometry) => geometry,
            Err(e) => {
                error!("flight path: {}", e);
                return false;
            }
        };
        match self.track.move_to(step, waypoint, track) {
            Some(transition) => {
                self.apply(ctx, transition);
                true
            }
            None => false,
        }
    }

    fn replace_aircraft(&mut self, ctx: &Context<Self>) -> bool {
        let placed = self
            .geometry(self.track.current())
            .map(|(waypoint, track)| self.track.place(waypoint, track));
        match placed {
            Ok(Some(transition)) => {
                self.apply(ctx, transition);
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!("flight path: cannot place aircraft: {}", e);
                false
            }
        }
    }

    fn apply(&mut self, ctx: &Context<Self>, transition: Transition) {
        self.aircraft_left = transition.offset;
        if transition.animate {
            self.flying = true;
            let link = ctx.link().clone();
            self.flight_timer = Some(Timeout::new(FLIGHT_DURATION_MS, move || {
                link.send_message(Msg::Landed)
            }));
        }
    }

    fn arm_guard(&mut self, ctx: &Context<Self>, marker: Marker) {
        let link = ctx.link().clone();
        self.guards.insert(
            marker,
            Timeout::new(CLICK_GUARD_MS, move || link.send_message(Msg::ReleaseGuard(marker))),
        );
    }

    fn spawn_ripple(&mut self, ctx: &Context<Self>, card: usize) {
        self.next_ripple += 1;
        let id = self.next_ripple;
        let link = ctx.link().clone();
        let timer = Timeout::new(CLICK_GUARD_MS, move || link.send_message(Msg::RippleDone(id)));
        self.ripples.insert(id, (card, timer));
    }

    fn listen_for_resize(&mut self, ctx: &Context<Self>) -> Result<(), BindError> {
        let window = dom::window()?;
        let link = ctx.link().clone();
        let closure =
            Closure::wrap(Box::new(move || link.send_message(Msg::Resized)) as Box<dyn FnMut()>);
        if let Err(e) =
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        {
            error!("flight path: could not listen for resize: {:?}", e);
        }
        self.on_resize = Some(closure);
        Ok(())
    }

    fn aircraft_style(&self) -> String {
        let (transform, filter) = if self.flying {
            ("translateY(-50%) scale(1.1)", "drop-shadow(0 6px 20px rgba(59, 130, 246, 0.6))")
        } else {
            ("translateY(-50%)", "drop-shadow(0 4px 12px rgba(59, 130, 246, 0.4))")
        };
        format!(
            "left: {}px; transform: {}; filter: {};",
            self.aircraft_left, transform, filter
        )
    }
}

impl Component for FlightPath {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            track: MilestoneTrack::new(MILESTONES.len()),
            aircraft_left: 0.0,
            flying: false,
            flight_timer: None,
            resize_timer: None,
            guards: HashMap::new(),
            ripples: HashMap::new(),
            next_ripple: 0,
            on_resize: None,
            track_ref: NodeRef::default(),
            card_refs: MILESTONES.iter().map(|_| NodeRef::default()).collect(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Clicked(marker) => {
                // Re-clicks inside the guard window are ignored.
                if self.guards.contains_key(&marker) {
                    return false;
                }
                let step = match marker {
                    Marker::Card(i) | Marker::Dot(i) => i,
                };
                self.fly_to(ctx, step);
                self.arm_guard(ctx, marker);
                if let Marker::Card(card) = marker {
                    self.spawn_ripple(ctx, card);
                }
                true
            }
            Msg::ReleaseGuard(marker) => {
                self.guards.remove(&marker);
                false
            }
            Msg::Landed => {
                self.flying = false;
                self.flight_timer = None;
                true
            }
            Msg::Resized => {
                let link = ctx.link().clone();
                self.resize_timer = Some(Timeout::new(RESIZE_SETTLE_MS, move || {
                    link.send_message(Msg::Settle)
                }));
                false
            }
            Msg::Settle => {
                self.resize_timer = None;
                self.replace_aircraft(ctx)
            }
            Msg::Advance => {
                let next = self.track.next_step();
                self.fly_to(ctx, next)
            }
            Msg::Back => match self.track.current().checked_sub(1) {
                Some(previous) => self.fly_to(ctx, previous),
                None => false,
            },
            Msg::RippleDone(id) => self.ripples.remove(&id).is_some(),
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            // Geometry only exists once the cards are in the DOM.
            ctx.link().send_message(Msg::Settle);
            if let Err(e) = self.listen_for_resize(ctx) {
                error!("flight path: {}", e);
            }
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let (Some(closure), Ok(window)) = (self.on_resize.take(), dom::window()) {
            let _ = window
                .remove_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let on_key = link.batch_callback(|e: KeyboardEvent| match e.key().as_str() {
            "ArrowRight" => Some(Msg::Advance),
            "ArrowLeft" => Some(Msg::Back),
            _ => None,
        });

        html! {
            <div class="flight-path" tabindex="0" onkeydown={on_key}>
                <style>{FLIGHT_PATH_STYLES}</style>
                <div ref={self.track_ref.clone()} class={self.track.track_class()}>
                    <div class="track-line"></div>
                    { for MILESTONES.iter().enumerate().map(|(i, _)| html! {
                        <button class={classes!("track-dot", self.track.is_active(i).then(|| "active"),
                                                self.guards.contains_key(&Marker::Dot(i)).then(|| "clicked"))}
                                aria-label={format!("Go to step {}", i + 1)}
                                onclick={link.callback(move |_| Msg::Clicked(Marker::Dot(i)))}>
                        </button>
                    }) }
                    <div id="aircraft" class={classes!("aircraft", self.flying.then(|| "flying"))}
                         style={self.aircraft_style()}>
                        <i class="fas fa-plane"></i>
                    </div>
                </div>
                <div class="milestones">
                    { for MILESTONES.iter().enumerate().map(|(i, milestone)| {
                        let ripples = self.ripples.iter().filter(|(_, (card, _))| *card == i).map(|(id, _)| html! {
                            <span key={*id} class="milestone-ripple"></span>
                        });
                        html! {
                            <div ref={self.card_refs[i].clone()}
                                 class={classes!("milestone", self.track.is_active(i).then(|| "active"),
                                                 self.guards.contains_key(&Marker::Card(i)).then(|| "clicked"))}
                                 onclick={link.callback(move |_| Msg::Clicked(Marker::Card(i)))}>
                                <div class="milestone-icon"><i class={milestone.icon}></i></div>
                                <h4>{ milestone.title }</h4>
                                <span class="milestone-duration">{ milestone.duration }</span>
                                <p>{ milestone.summary }</p>
                                { for ripples }
                            </div>
                        }
                    }) }
                </div>
            </div>
        }
    }
}

const FLIGHT_PATH_STYLES: &str = r#"
    .flight-path { outline: none; }
    .flight-track {
        position: relative;
        height: 60px;
        display: flex;
        justify-content: space-around;
        align-items: center;
        margin-bottom: 30px;
    }
    .track-line {
        position: absolute;
        left: 0;
        right: 0;
        top: 50%;
        height: 2px;
        background: linear-gradient(90deg, #3b82f6, rgba(255, 255, 255, 0.2));
    }
    .track-dot {
        position: relative;
        width: 16px;
        height: 16px;
        border-radius: 50%;
        border: 2px solid #3b82f6;
        background: #0f172a;
        cursor: pointer;
        transition: transform 0.3s ease, box-shadow 0.3s ease;
    }
    .track-dot:not(.active):hover { transform: scale(1.2); box-shadow: 0 0 20px rgba(59, 130, 246, 0.6); }
    .track-dot.active { background: #3b82f6; box-shadow: 0 0 16px rgba(59, 130, 246, 0.8); }
    .aircraft {
        position: absolute;
        top: 50%;
        width: 40px;
        height: 40px;
        display: flex;
        align-items: center;
        justify-content: center;
        font-size: 24px;
        color: #93c5fd;
        transition: left 1.5s cubic-bezier(0.4, 0, 0.2, 1), transform 0.3s ease, filter 0.3s ease;
    }
    .milestones { display: grid; grid-template-columns: repeat(auto-fit, minmax(150px, 1fr)); gap: 16px; }
    .milestone {
        position: relative;
        overflow: hidden;
        padding: 20px;
        border-radius: 16px;
        background: rgba(255, 255, 255, 0.06);
        border: 1px solid rgba(255, 255, 255, 0.12);
        cursor: pointer;
        transition: box-shadow 0.3s ease, transform 0.3s ease;
    }
    .milestone:not(.active):hover { box-shadow: 0 25px 50px rgba(59, 130, 246, 0.3); }
    .milestone.active { border-color: #3b82f6; transform: translateY(-4px); }
    .milestone.clicked { transform: scale(0.98); }
    .milestone-ripple {
        position: absolute;
        top: 50%;
        left: 50%;
        width: 100px;
        height: 100px;
        margin: -50px 0 0 -50px;
        border-radius: 50%;
        background: rgba(59, 130, 246, 0.3);
        transform: scale(0);
        animation: ripple 0.6s linear;
        pointer-events: none;
    }
"#;
