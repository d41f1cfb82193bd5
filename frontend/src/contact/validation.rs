use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));
static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("phone pattern"));
static PHONE_NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\-()]").expect("phone noise pattern"));

pub const MESSAGE_MAX_CHARS: usize = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    Course,
    Message,
    Terms,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Phone,
        Field::Course,
        Field::Message,
        Field::Terms,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Course => "course",
            Field::Message => "message",
            Field::Terms => "terms",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Email => "Email Address",
            Field::Phone => "Phone Number",
            Field::Course => "Course",
            Field::Message => "Message",
            Field::Terms => "Terms and Conditions",
        }
    }

    pub fn required(self) -> bool {
        !matches!(self, Field::Phone | Field::Course)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub course: String,
    pub message: String,
    pub terms: bool,
}

impl ContactDraft {
    /// Text value of a field. The terms checkbox has none.
    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Course => &self.course,
            Field::Message => &self.message,
            Field::Terms => "",
        }
    }

    pub fn set_text(&mut self, field: Field, value: String) {
        match field {
            Field::FirstName => self.first_name = value,
            Field::LastName => self.last_name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::Course => self.course = value,
            Field::Message => self.message = value,
            Field::Terms => {}
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct FieldError(pub String);

pub type FieldErrors = BTreeMap<Field, FieldError>;

fn too_short(value: &str, min: usize) -> bool {
    value.chars().count() < min
}

pub fn validate_field(field: Field, draft: &ContactDraft) -> Result<(), FieldError> {
    if field == Field::Terms {
        return if draft.terms {
            Ok(())
        } else {
            Err(FieldError("You must agree to the terms and conditions.".into()))
        };
    }

    let value = draft.text(field).trim();
    if value.is_empty() {
        return if field.required() {
            Err(FieldError(format!("{} is required.", field.label())))
        } else {
            Ok(())
        };
    }

    let problem = match field {
        Field::Email if !EMAIL.is_match(value) => Some("Please enter a valid email address."),
        Field::Phone if !PHONE.is_match(&PHONE_NOISE.replace_all(value, "")) => {
            Some("Please enter a valid phone number.")
        }
        Field::FirstName if too_short(value, 2) => Some("First name must be at least 2 characters long."),
        Field::LastName if too_short(value, 2) => Some("Last name must be at least 2 characters long."),
        Field::Message if too_short(value, 10) => Some("Message must be at least 10 characters long."),
        _ => None,
    };
    match problem {
        Some(message) => Err(FieldError(message.to_string())),
        None => Ok(()),
    }
}

pub fn validate_all(draft: &ContactDraft) -> FieldErrors {
    Field::ALL
        .iter()
        .filter_map(|&field| validate_field(field, draft).err().map(|e| (field, e)))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterTone {
    Normal,
    Warning,
    Limit,
}

impl CounterTone {
    pub fn class(self) -> &'static str {
        match self {
            CounterTone::Normal => "normal",
            CounterTone::Warning => "warning",
            CounterTone::Limit => "limit",
        }
    }
}

/// Caps the message at `MESSAGE_MAX_CHARS`, reporting how close the visitor
/// is to the limit.
pub fn clamp_message(value: String) -> (String, CounterTone) {
    let typed = value.chars().count();
    if typed > MESSAGE_MAX_CHARS {
        let cut = value
            .char_indices()
            .nth(MESSAGE_MAX_CHARS)
            .map(|(i, _)| i)
            .unwrap_or(value.len());
        return (value[..cut].to_string(), CounterTone::Limit);
    }
    let tone = if typed * 10 > MESSAGE_MAX_CHARS * 9 {
        CounterTone::Warning
    } else {
        CounterTone::Normal
    };
    (value, tone)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> ContactDraft {
        ContactDraft {
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            email: "asha@example.in".into(),
            phone: "+91 98765-43210".into(),
            course: "cpl".into(),
            message: "I'd like to know about the CPL batch.".into(),
            terms: true,
        }
    }

    fn error_for(field: Field, draft: &ContactDraft) -> Option<String> {
        validate_field(field, draft).err().map(|e| e.to_string())
    }

    #[test]
    fn valid_draft_has_no_errors() {
        assert!(validate_all(&valid_draft()).is_empty());
    }

    #[test]
    fn email_pattern() {
        let mut draft = valid_draft();
        draft.email = "not-an-email".into();
        assert_eq!(error_for(Field::Email, &draft).as_deref(), Some("Please enter a valid email address."));
        draft.email = "a@b.co".into();
        assert_eq!(error_for(Field::Email, &draft), None);
    }

    #[test]
    fn required_fields_report_their_label() {
        let draft = ContactDraft::default();
        let errors = validate_all(&draft);
        assert_eq!(errors[&Field::FirstName].to_string(), "First Name is required.");
        assert_eq!(errors[&Field::Email].to_string(), "Email Address is required.");
        assert_eq!(errors[&Field::Message].to_string(), "Message is required.");
        assert_eq!(errors[&Field::Terms].to_string(), "You must agree to the terms and conditions.");
        assert!(!errors.contains_key(&Field::Phone));
        assert!(!errors.contains_key(&Field::Course));
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let mut draft = valid_draft();
        draft.last_name = "   ".into();
        assert_eq!(error_for(Field::LastName, &draft).as_deref(), Some("Last Name is required."));
    }

    #[test]
    fn phone_ignores_formatting_characters() {
        let mut draft = valid_draft();
        for ok in ["+91 98765 43210", "(22) 2345-6789", "9876543210"] {
            draft.phone = ok.into();
            assert_eq!(error_for(Field::Phone, &draft), None, "{ok}");
        }
        for bad in ["0123456", "phone", "+91 98765 43210 12345 678"] {
            draft.phone = bad.into();
            assert_eq!(
                error_for(Field::Phone, &draft).as_deref(),
                Some("Please enter a valid phone number."),
                "{bad}"
            );
        }
    }

    #[test]
    fn phone_accepts_only_ascii_digits() {
        let mut draft = valid_draft();
        for bad in ["9८७६", "+٩١ 98765 43210", "9876５43210"] {
            draft.phone = bad.into();
            assert_eq!(
                error_for(Field::Phone, &draft).as_deref(),
                Some("Please enter a valid phone number."),
                "{bad}"
            );
        }
    }

    #[test]
    fn minimum_lengths() {
        let mut draft = valid_draft();
        draft.first_name = "A".into();
        draft.message = "too short".into();
        let errors = validate_all(&draft);
        assert_eq!(
            errors[&Field::FirstName].to_string(),
            "First name must be at least 2 characters long."
        );
        assert_eq!(
            errors[&Field::Message].to_string(),
            "Message must be at least 10 characters long."
        );
    }

    #[test]
    fn message_is_clamped_at_limit() {
        let (kept, tone) = clamp_message("x".repeat(520));
        assert_eq!(kept.len(), MESSAGE_MAX_CHARS);
        assert_eq!(tone, CounterTone::Limit);

        assert_eq!(clamp_message("x".repeat(451)).1, CounterTone::Warning);
        assert_eq!(clamp_message("x".repeat(450)).1, CounterTone::Normal);
    }
}
