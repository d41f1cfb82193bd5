use gloo_timers::callback::Timeout;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::notification::{use_notify, Notice};
use crate::pricing::calculator::{
    format_inr, quote, selection_summary, Selection, PACKAGE_NAME, PACKAGE_PRICE, SUBJECTS,
};

const PRICE_POP_MS: u32 = 200;

#[function_component(PricingSection)]
pub fn pricing_section() -> Html {
    let notify = use_notify();
    let selection = use_state(|| Selection::empty(SUBJECTS.len()));
    let popped = use_state(|| false);

    let current = quote(SUBJECTS, &selection);

    // Pop the price whenever the selection changes.
    {
        let popped = popped.clone();
        use_effect_with_deps(
            move |_| {
                popped.set(true);
                let reset = {
                    let popped = popped.clone();
                    Timeout::new(PRICE_POP_MS, move || popped.set(false))
                };
                move || drop(reset)
            },
            (*selection).clone(),
        );
    }

    let on_custom = {
        let notify = notify.clone();
        let current = current.clone();
        Callback::from(move |_: MouseEvent| {
            if !current.can_enroll() {
                return;
            }
            notify.show(Notice::success(current.summary()));
        })
    };

    let on_package = {
        let notify = notify.clone();
        Callback::from(move |_: MouseEvent| {
            notify.show(Notice::success(selection_summary(PACKAGE_NAME, PACKAGE_PRICE)));
        })
    };

    html! {
        <div class="pricing-grid">
            <div class="pricing-card featured">
                <span class="pricing-badge">{"Best Value"}</span>
                <h3>{ PACKAGE_NAME }</h3>
                <div class="price">{"₹"}<span>{ format_inr(u64::from(PACKAGE_PRICE)) }</span></div>
                <ul class="pricing-features">
                    <li>{"All six DGCA CPL subjects"}</li>
                    <li>{"Unlimited mock tests"}</li>
                    <li>{"One-on-one doubt sessions"}</li>
                    <li>{"Flight school placement support"}</li>
                </ul>
                <button class="pricing-btn" onclick={on_package}>{"Enroll Now"}</button>
            </div>

            <div class="pricing-card custom">
                <h3>{"Build Your Own"}</h3>
                <div class="price">
                    {"₹"}
                    <span id="customPrice" class={classes!("custom-price", (*popped).then(|| "pop"))}>
                        { format_inr(u64::from(current.total)) }
                    </span>
                </div>
                <div class="subject-list">
                    { for SUBJECTS.iter().enumerate().map(|(i, subject)| {
                        let onchange = {
                            let selection = selection.clone();
                            Callback::from(move |e: Event| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                let mut next = (*selection).clone();
                                next.set(i, input.checked());
                                selection.set(next);
                            })
                        };
                        html! {
                            <label class="subject-checkbox">
                                <input type="checkbox"
                                       data-subject={subject.id}
                                       data-price={subject.price.to_string()}
                                       checked={selection.is_checked(i)}
                                       {onchange} />
                                <span class="subject-name">{ subject.name }</span>
                                <span class="subject-price">{ format!("₹{}", format_inr(u64::from(subject.price))) }</span>
                            </label>
                        }
                    }) }
                </div>
                <button id="customBtn" class="pricing-btn" disabled={!current.can_enroll()} onclick={on_custom}>
                    { current.enroll_label() }
                </button>
            </div>
        </div>
    }
}
