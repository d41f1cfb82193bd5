use log::info;
use thiserror::Error;

use crate::components::notification::Notice;
use crate::contact::validation::{
    clamp_message, validate_all, validate_field, ContactDraft, CounterTone, Field, FieldErrors,
};

pub const SUBMIT_DELAY_MS: u32 = 2_000;
/// Share of simulated submissions that fail.
pub const FAILURE_RATE: f64 = 0.05;

pub const INVALID_FORM: &str = "Please correct the errors in the form.";
pub const SENT: &str = "Message sent successfully! We'll get back to you within 24 hours.";
pub const NOT_SENT: &str = "Sorry, there was an error sending your message. Please try again.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Network error")]
pub struct SubmitError;

pub fn outcome_for(roll: f64) -> Result<(), SubmitError> {
    if roll > FAILURE_RATE {
        Ok(())
    } else {
        Err(SubmitError)
    }
}

/// Stand-in for a real delivery endpoint: waits, then succeeds most of the time.
pub async fn simulate_submission(draft: ContactDraft) -> Result<(), SubmitError> {
    gloo_timers::future::TimeoutFuture::new(SUBMIT_DELAY_MS).await;
    info!(
        "contact: submitting enquiry from {} {} <{}>",
        draft.first_name, draft.last_name, draft.email
    );
    outcome_for(web_sys::js_sys::Math::random())
}

pub fn notice_for(outcome: &Result<(), SubmitError>) -> Notice {
    match outcome {
        Ok(()) => Notice::success(SENT),
        Err(_) => Notice::error(NOT_SENT),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
    Sent,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContactForm {
    pub draft: ContactDraft,
    pub errors: FieldErrors,
    pub phase: FormPhase,
    pub counter: CounterTone,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self {
            draft: ContactDraft::default(),
            errors: FieldErrors::new(),
            phase: FormPhase::Editing,
            counter: CounterTone::Normal,
        }
    }
}

impl ContactForm {
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(|e| e.0.as_str())
    }

    fn revalidate(&mut self, field: Field) {
        match validate_field(field, &self.draft) {
            Ok(()) => {
                self.errors.remove(&field);
            }
            Err(e) => {
                self.errors.insert(field, e);
            }
        }
    }

    pub fn blur(&mut self, field: Field) {
        self.revalidate(field);
    }

    /// Stores typed text. A field already showing an error is checked again
    /// so the message clears as soon as the value is fixed.
    pub fn input(&mut self, field: Field, value: String) {
        let value = if field == Field::Message {
            let (kept, tone) = clamp_message(value);
            self.counter = tone;
            kept
        } else {
            value
        };
        self.draft.set_text(field, value);
        if self.errors.contains_key(&field) {
            self.revalidate(field);
        }
    }

    pub fn set_terms(&mut self, agreed: bool) {
        self.draft.terms = agreed;
        if self.errors.contains_key(&Field::Terms) {
            self.revalidate(Field::Terms);
        }
    }

    pub fn message_len(&self) -> usize {
        self.draft.message.chars().count()
    }

    /// Validates everything. On success the form is locked and the draft to
    /// send is returned; otherwise the notice to show.
    pub fn begin_submit(&mut self) -> Result<ContactDraft, Notice> {
        if self.phase != FormPhase::Editing {
            return Err(Notice::info("Your message is already on its way."));
        }
        self.errors = validate_all(&self.draft);
        if !self.errors.is_empty() {
            return Err(Notice::error(INVALID_FORM));
        }
        self.phase = FormPhase::Submitting;
        Ok(self.draft.clone())
    }

    pub fn finish(&mut self, outcome: Result<(), SubmitError>) -> Notice {
        self.phase = match outcome {
            Ok(()) => FormPhase::Sent,
            Err(_) => FormPhase::Editing,
        };
        notice_for(&outcome)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::notification::NoticeKind;

    fn filled() -> ContactForm {
        let mut form = ContactForm::default();
        form.input(Field::FirstName, "Vikram".into());
        form.input(Field::LastName, "Sethi".into());
        form.input(Field::Email, "vikram@example.com".into());
        form.input(Field::Message, "Please share the next batch dates.".into());
        form.set_terms(true);
        form
    }

    #[test]
    fn rolls_above_failure_rate_succeed() {
        assert_eq!(outcome_for(0.5), Ok(()));
        assert_eq!(outcome_for(0.06), Ok(()));
        assert_eq!(outcome_for(0.05), Err(SubmitError));
        assert_eq!(outcome_for(0.0), Err(SubmitError));
    }

    #[test]
    fn invalid_form_is_not_submitted() {
        let mut form = ContactForm::default();
        let notice = form.begin_submit().unwrap_err();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, INVALID_FORM);
        assert_eq!(form.phase, FormPhase::Editing);
        assert!(form.error(Field::Email).is_some());
    }

    #[test]
    fn valid_submission_ends_on_success_panel() {
        let mut form = filled();
        let draft = form.begin_submit().unwrap();
        assert_eq!(draft.first_name, "Vikram");
        assert_eq!(form.phase, FormPhase::Submitting);

        let notice = form.finish(Ok(()));
        assert_eq!(form.phase, FormPhase::Sent);
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.message, SENT);
    }

    #[test]
    fn failed_submission_reenables_the_form() {
        let mut form = filled();
        form.begin_submit().unwrap();
        let notice = form.finish(Err(SubmitError));
        assert_eq!(form.phase, FormPhase::Editing);
        assert_eq!(notice.message, NOT_SENT);
        assert_eq!(form.draft.first_name, "Vikram");
    }

    #[test]
    fn second_submit_while_in_flight_is_refused() {
        let mut form = filled();
        form.begin_submit().unwrap();
        assert!(form.begin_submit().is_err());
        assert_eq!(form.phase, FormPhase::Submitting);
    }

    #[test]
    fn errors_appear_on_blur_and_clear_on_input() {
        let mut form = ContactForm::default();
        form.input(Field::Email, "pilot@".into());
        assert_eq!(form.error(Field::Email), None);

        form.blur(Field::Email);
        assert_eq!(form.error(Field::Email), Some("Please enter a valid email address."));

        form.input(Field::Email, "pilot@sky.in".into());
        assert_eq!(form.error(Field::Email), None);
    }

    #[test]
    fn reset_clears_everything() {
        let mut form = filled();
        form.input(Field::Message, "m".repeat(600));
        assert_eq!(form.counter, CounterTone::Limit);
        assert_eq!(form.message_len(), 500);
        form.begin_submit().unwrap();
        form.finish(Ok(()));

        form.reset();
        assert_eq!(form, ContactForm::default());
    }
}
