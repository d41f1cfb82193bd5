use std::rc::Rc;

use log::{error, info, warn};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::contact::submission::{
    notice_for, simulate_submission, ContactForm, FormPhase, SubmitError,
};
use crate::contact::validation::{Field, MESSAGE_MAX_CHARS};
use crate::components::notification::use_notify;
use crate::dom;

const COURSES: &[(&str, &str)] = &[
    ("cpl-ground", "CPL Ground School"),
    ("atpl-ground", "ATPL Ground School"),
    ("rtr", "RTR (Aero) Preparation"),
    ("individual", "Individual Subjects"),
    ("other", "Other"),
];

pub enum FormAction {
    Input(Field, String),
    Blur(Field),
    Terms(bool),
    Replace(ContactForm),
    Finished(Result<(), SubmitError>),
    Reset,
}

impl Reducible for ContactForm {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            FormAction::Input(field, value) => next.input(field, value),
            FormAction::Blur(field) => next.blur(field),
            FormAction::Terms(agreed) => next.set_terms(agreed),
            FormAction::Replace(form) => next = form,
            FormAction::Finished(outcome) => {
                next.finish(outcome);
            }
            FormAction::Reset => next.reset(),
        }
        next.into()
    }
}

/// A group's label stays raised after blur only while its field has a value.
fn label_stays_raised(value: &str) -> bool {
    !value.is_empty()
}

/// Floating-label state for one `.form-group`: the `focused` class goes on
/// with focus and comes off on blur if the field was left empty.
#[hook]
fn use_floating_label(has_value: bool) -> (bool, Callback<FocusEvent>, Callback<FocusEvent>) {
    let focused = use_state(|| false);
    let onfocus = {
        let focused = focused.clone();
        Callback::from(move |_: FocusEvent| focused.set(true))
    };
    let onblur = {
        let focused = focused.clone();
        Callback::from(move |_: FocusEvent| {
            if !has_value {
                focused.set(false);
            }
        })
    };
    (*focused, onfocus, onblur)
}

/// Runs the label update before the form's own blur handling.
fn blur_then(lower: Callback<FocusEvent>, then: Callback<FocusEvent>) -> Callback<FocusEvent> {
    Callback::from(move |e: FocusEvent| {
        lower.emit(e.clone());
        then.emit(e);
    })
}

#[derive(Properties, PartialEq)]
struct TextFieldProps {
    field: Field,
    kind: AttrValue,
    value: AttrValue,
    error: Option<AttrValue>,
    placeholder: AttrValue,
    form: UseReducerDispatcher<ContactForm>,
}

#[function_component(TextField)]
fn text_field(props: &TextFieldProps) -> Html {
    let field = props.field;
    let (focused, onfocus, lower) = use_floating_label(label_stays_raised(&props.value));
    let oninput = {
        let form = props.form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.dispatch(FormAction::Input(field, input.value()));
        })
    };
    let onblur = {
        let form = props.form.clone();
        blur_then(lower, Callback::from(move |_: FocusEvent| form.dispatch(FormAction::Blur(field))))
    };
    let label = if field.required() {
        format!("{} *", field.label())
    } else {
        field.label().to_string()
    };

    html! {
        <div class={classes!("form-group", focused.then(|| "focused"))}>
            <label for={field.name()}>{ label }</label>
            <input id={field.name()}
                   name={field.name()}
                   type={props.kind.clone()}
                   class={classes!(props.error.is_some().then(|| "error"))}
                   placeholder={props.placeholder.clone()}
                   value={props.value.clone()}
                   {oninput}
                   {onfocus}
                   {onblur} />
            <span class="error-message">{ props.error.clone().unwrap_or_default() }</span>
        </div>
    }
}

/// Enquiry form with inline validation and a simulated send.
#[function_component(EnquiryForm)]
pub fn enquiry_form() -> Html {
    let notify = use_notify();
    let form = use_reducer(ContactForm::default);
    let success_ref = use_node_ref();
    let form_ref = use_node_ref();

    {
        let success_ref = success_ref.clone();
        use_effect_with_deps(
            move |phase| {
                if *phase == FormPhase::Sent {
                    if let Err(e) = dom::scroll_into_view_centered(&success_ref, "form success") {
                        warn!("contact: {}", e);
                    }
                }
                || ()
            },
            form.phase,
        );
    }

    let onsubmit = {
        let form = form.clone();
        let notify = notify.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let mut next = (*form).clone();
            let started = next.begin_submit();
            form.dispatch(FormAction::Replace(next));
            match started {
                Ok(draft) => {
                    let form = form.dispatcher();
                    let notify = notify.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        let outcome = simulate_submission(draft).await;
                        match &outcome {
                            Ok(()) => info!("contact: enquiry sent"),
                            Err(err) => error!("Form submission error: {}", err),
                        }
                        notify.show(notice_for(&outcome));
                        form.dispatch(FormAction::Finished(outcome));
                    });
                }
                Err(notice) => notify.show(notice),
            }
        })
    };

    let on_reset = {
        let form = form.clone();
        let form_ref = form_ref.clone();
        Callback::from(move |_: MouseEvent| {
            form.dispatch(FormAction::Reset);
            if let Some(el) = form_ref.cast::<web_sys::Element>() {
                el.scroll_into_view();
            }
        })
    };

    let on_course = {
        let form = form.dispatcher();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            form.dispatch(FormAction::Input(Field::Course, select.value()));
        })
    };

    let on_message = {
        let form = form.dispatcher();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            form.dispatch(FormAction::Input(Field::Message, area.value()));
        })
    };

    let on_terms = {
        let form = form.dispatcher();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.dispatch(FormAction::Terms(input.checked()));
        })
    };

    let (course_focused, course_focus, course_lower) = use_floating_label(label_stays_raised(&form.draft.course));
    let (message_focused, message_focus, message_lower) = use_floating_label(label_stays_raised(&form.draft.message));

    let blur = |field: Field| {
        let form = form.dispatcher();
        Callback::from(move |_: FocusEvent| form.dispatch(FormAction::Blur(field)))
    };

    let text_field = |field: Field, kind: &'static str, placeholder: &'static str| {
        html! {
            <TextField {field}
                       kind={kind}
                       value={form.draft.text(field).to_string()}
                       error={form.error(field).map(|e| AttrValue::from(e.to_string()))}
                       placeholder={placeholder}
                       form={form.dispatcher()} />
        }
    };

    let sent = form.phase == FormPhase::Sent;
    let submitting = form.phase == FormPhase::Submitting;

    html! {
        <div class="contact-form-container">
            <form id="contactForm"
                  ref={form_ref}
                  class="contact-form"
                  style={sent.then(|| "display: none;")}
                  novalidate={true}
                  {onsubmit}>
                <div class="form-row">
                    { text_field(Field::FirstName, "text", "Your first name") }
                    { text_field(Field::LastName, "text", "Your last name") }
                </div>
                <div class="form-row">
                    { text_field(Field::Email, "email", "you@example.com") }
                    { text_field(Field::Phone, "tel", "+91 98765 43210") }
                </div>
                <div class={classes!("form-group", course_focused.then(|| "focused"))}>
                    <label for="course">{"Course of Interest"}</label>
                    <select id="course"
                            name="course"
                            onchange={on_course}
                            onfocus={course_focus}
                            onblur={blur_then(course_lower, blur(Field::Course))}>
                        <option value="" selected={form.draft.course.is_empty()}>{"Select a course"}</option>
                        { for COURSES.iter().map(|(value, label)| html! {
                            <option value={*value} selected={form.draft.course == *value}>{ *label }</option>
                        }) }
                    </select>
                </div>
                <div class={classes!("form-group", message_focused.then(|| "focused"))}>
                    <label for="message">{"Message *"}</label>
                    <textarea id="message"
                              name="message"
                              rows="5"
                              class={classes!(form.error(Field::Message).is_some().then(|| "error"))}
                              placeholder="Tell us about your flying goals..."
                              value={form.draft.message.clone()}
                              oninput={on_message}
                              onfocus={message_focus}
                              onblur={blur_then(message_lower, blur(Field::Message))} />
                    <div class="char-counter">
                        <span id="charCount" class={classes!("char-count", form.counter.class())}>
                            { form.message_len() }
                        </span>
                        { format!(" / {}", MESSAGE_MAX_CHARS) }
                    </div>
                    <span class="error-message">{ form.error(Field::Message).unwrap_or_default() }</span>
                </div>
                <div class="form-group checkbox-group">
                    <label class="checkbox-label">
                        <input type="checkbox"
                               name="terms"
                               class={classes!(form.error(Field::Terms).is_some().then(|| "error"))}
                               checked={form.draft.terms}
                               onchange={on_terms}
                               onblur={blur(Field::Terms)} />
                        <span>{"I agree to the terms and conditions and privacy policy *"}</span>
                    </label>
                    <span class="error-message">{ form.error(Field::Terms).unwrap_or_default() }</span>
                </div>
                <button type="submit"
                        class="submit-btn"
                        disabled={submitting}>
                    if submitting {
                        <span class="btn-loading"><i class="fas fa-spinner fa-spin"></i>{" Sending..."}</span>
                    } else {
                        <span class="btn-text"><i class="fas fa-paper-plane"></i>{" Send Message"}</span>
                    }
                </button>
            </form>

            <div id="formSuccess"
                 ref={success_ref}
                 class="form-success"
                 style={(!sent).then(|| "display: none;")}>
                <i class="fas fa-check-circle"></i>
                <h3>{"Message Sent!"}</h3>
                <p>{"Thank you for reaching out. Our admissions team will get back to you within 24 hours."}</p>
                <button class="btn-secondary" onclick={on_reset}>{"Send another message"}</button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce(form: ContactForm, action: FormAction) -> ContactForm {
        (*Rc::new(form).reduce(action)).clone()
    }

    #[test]
    fn reducer_forwards_edits() {
        let form = reduce(ContactForm::default(), FormAction::Input(Field::Email, "bad".into()));
        assert_eq!(form.draft.email, "bad");
        let form = reduce(form, FormAction::Blur(Field::Email));
        assert!(form.error(Field::Email).is_some());
        let form = reduce(form, FormAction::Terms(true));
        assert!(form.draft.terms);
    }

    #[test]
    fn finished_failure_returns_to_editing() {
        let mut submitting = ContactForm::default();
        submitting.phase = FormPhase::Submitting;
        let form = reduce(submitting, FormAction::Finished(Err(SubmitError)));
        assert_eq!(form.phase, FormPhase::Editing);
    }

    #[test]
    fn reset_after_sent_shows_empty_form() {
        let mut sent = ContactForm::default();
        sent.draft.first_name = "Meera".into();
        sent.phase = FormPhase::Sent;
        let form = reduce(sent, FormAction::Reset);
        assert_eq!(form, ContactForm::default());
    }

    #[test]
    fn label_drops_only_when_left_empty() {
        assert!(!label_stays_raised(""));
        assert!(label_stays_raised("Asha"));
        assert!(label_stays_raised(" "));
    }

    #[test]
    fn every_course_has_a_label() {
        assert!(COURSES.iter().all(|(value, label)| !value.is_empty() && !label.is_empty()));
    }
}
