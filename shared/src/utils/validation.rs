//! Access code format validation

use once_cell::sync::Lazy;
use regex::Regex;

/// Number of digits in an access code
pub const ACCESS_CODE_LENGTH: usize = 6;

static ACCESS_CODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{6}$").unwrap()
});

/// Check if a string is exactly six ASCII digits
pub fn is_valid_access_code(code: &str) -> bool {
    ACCESS_CODE_REGEX.is_match(code)
}

/// Mask a code for logging (e.g., 48****)
pub fn mask_code(code: &str) -> String {
    let visible: String = code.chars().take(2).collect();
    let hidden = code.chars().count().saturating_sub(2);
    format!("{}{}", visible, "*".repeat(hidden))
}
