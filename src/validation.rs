use lazy_static::lazy_static;
use regex::Regex;

use crate::error::FieldErrors;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Trimmed value of a required text field; records an error when it is
/// absent or blank.
pub(crate) fn required_text(errors: &mut FieldErrors, field: &str, value: Option<String>) -> Option<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Some(v),
        Some(_) => {
            errors.add(field, "must not be blank");
            None
        }
        None => {
            errors.add(field, "is required");
            None
        }
    }
}

/// Same as [`required_text`] for patch fields, where absence is allowed.
pub(crate) fn optional_text(errors: &mut FieldErrors, field: &str, value: Option<String>) -> Option<String> {
    let v = value?.trim().to_string();
    if v.is_empty() {
        errors.add(field, "must not be blank");
        return None;
    }
    Some(v)
}

/// Emails are compared case-insensitively, so they are stored lower-cased.
pub(crate) fn email(errors: &mut FieldErrors, value: String) -> Option<String> {
    let email = value.to_lowercase();
    if !is_valid_email(&email) {
        errors.add("email", "is not a valid email address");
        return None;
    }
    Some(email)
}
