use std::sync::OnceLock;

use regex::Regex;

use crate::domain::{error::ValidationError, models::user::UserProfileDraft};

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = concat!(
            r"^[a-zA-Z0-9+._%\-]{1,256}",
            r"@[a-zA-Z0-9][a-zA-Z0-9\-]{0,64}",
            r"(\.[a-zA-Z0-9][a-zA-Z0-9\-]{0,25})+$",
        );
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Whether `email` has the shape of an email address
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Check a draft against every submission rule, stopping at the first
/// failure.
pub fn validate(draft: &UserProfileDraft) -> Result<(), ValidationError> {
    if draft.encoded_image.is_none() {
        return Err(ValidationError::MissingImage);
    }
    if draft.name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    if draft.email.is_empty() {
        return Err(ValidationError::MissingEmail);
    }
    if !is_valid_email(&draft.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if draft.password.is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    if draft.confirm_password.is_empty() {
        return Err(ValidationError::MissingConfirmPassword);
    }
    if draft.password != draft.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

pub fn is_submittable(draft: &UserProfileDraft) -> bool {
    validate(draft).is_ok()
}
