//! Input rules shared by the browser forms and the API handlers.
//!
//! The form rules only gate submission; the server re-checks everything and
//! stays the authority.
use serde_json::Value;

pub const MIN_CREDENTIAL_LEN: usize = 4;
pub const MIN_PASSWORD_LEN: usize = 6;

/// Hard-coded account behind the "Demo User" shortcut.
pub const DEMO_CREDENTIAL: &str = "Demo-lition";
pub const DEMO_PASSWORD: &str = "password";

pub const REVIEW_DRAFT_ERROR: &str = "Please provide a comment and star rating.";
pub const STARS_ERROR: &str = "Stars must be an integer from 1 to 5";
pub const REVIEW_TEXT_ERROR: &str = "Review text is required";
pub const IMAGE_URL_ERROR: &str = "Image url is required";
pub const CREDENTIAL_REQUIRED: &str = "Email or username is required";
pub const PASSWORD_REQUIRED: &str = "Password is required";

/// Whether the login form may be submitted.
pub fn login_ready(credential: &str, password: &str) -> bool {
    credential.chars().count() >= MIN_CREDENTIAL_LEN
        && password.chars().count() >= MIN_PASSWORD_LEN
}

/// Single combined message shown by the review form, if the draft is incomplete.
pub fn review_draft_error(text: &str, stars: u8) -> Option<&'static str> {
    if text.is_empty() || stars == 0 {
        Some(REVIEW_DRAFT_ERROR)
    } else {
        None
    }
}

/// Accepts an integral star count in 1..=5. Missing, null, zero, `false`,
/// empty strings and anything out of range are rejected.
pub fn parse_stars(value: Option<&Value>) -> Result<i64, &'static str> {
    let stars = match value {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(v) => v,
            None => match n.as_f64() {
                Some(f) if f.fract() == 0.0 => f as i64,
                _ => return Err(STARS_ERROR),
            },
        },
        _ => return Err(STARS_ERROR),
    };
    if (1..=5).contains(&stars) {
        Ok(stars)
    } else {
        Err(STARS_ERROR)
    }
}

/// Review text must be a non-empty string.
pub fn parse_review_text(value: Option<&Value>) -> Result<String, &'static str> {
    match value {
        Some(Value::String(text)) if !text.is_empty() => Ok(text.clone()),
        _ => Err(REVIEW_TEXT_ERROR),
    }
}

pub fn parse_image_url(value: Option<&Value>) -> Result<String, &'static str> {
    match value {
        Some(Value::String(url)) if !url.trim().is_empty() => Ok(url.clone()),
        _ => Err(IMAGE_URL_ERROR),
    }
}
