//! Ordered pattern engine for six-digit verification codes

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use mg_shared::types::Language;

use super::normalize::normalize;

const CODE_DIGITS: usize = 6;

/// Six single digits, each pair optionally separated by `-`, `.` or whitespace
static FORMATTED_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9](?:[-.\s]*[0-9]){5}").unwrap());
static BARE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[0-9]{6}\b").unwrap());
static LABELED: Lazy<Regex> = Lazy::new(|| {
    let labels: Vec<String> = Language::ALL
        .iter()
        .map(|language| regex::escape(language.code_label()))
        .collect();
    Regex::new(&format!(r"(?i)(?:{})[:\s]*[0-9]{{6}}", labels.join("|"))).unwrap()
});
static REFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:№|#)\s*[0-9]{6}").unwrap());

/// Candidate patterns, tried in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodePattern {
    /// `123-456`, `12 34 56`, `123456`; not adjacent to other digits
    Formatted,
    /// Exactly six digits between word boundaries
    Bare,
    /// `код: 123456`, `Code 123456`
    Labeled,
    /// `№123456`, `# 123456`
    Reference,
}

impl CodePattern {
    pub const PRIORITY: [CodePattern; 4] = [
        CodePattern::Formatted,
        CodePattern::Bare,
        CodePattern::Labeled,
        CodePattern::Reference,
    ];

    /// Leftmost span matched by this pattern
    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        match self {
            CodePattern::Formatted => find_formatted(text),
            CodePattern::Bare => BARE_RUN.find(text).map(|m| m.as_str()),
            CodePattern::Labeled => LABELED.find(text).map(|m| m.as_str()),
            CodePattern::Reference => REFERENCE.find(text).map(|m| m.as_str()),
        }
    }
}

/// Extract the verification code from raw message text
///
/// The text is normalized, then each pattern is tried in priority order.
/// The first pattern that matches has its span reduced to digits; if that
/// leaves exactly six digits they are the code, otherwise the next pattern
/// is tried.
///
/// # Examples
///
/// ```
/// use mg_core::services::extraction::extract;
///
/// assert_eq!(extract("Ваш код: 482917").as_deref(), Some("482917"));
/// assert_eq!(extract("12-34-56").as_deref(), Some("123456"));
/// assert_eq!(extract("order 12345"), None);
/// ```
pub fn extract(raw: &str) -> Option<String> {
    let text = normalize(raw);

    CodePattern::PRIORITY.iter().find_map(|pattern| {
        let span = pattern.find(&text)?;
        let digits: String = span.chars().filter(char::is_ascii_digit).collect();
        if digits.len() == CODE_DIGITS {
            trace!(pattern = ?pattern, "Verification code pattern matched");
            Some(digits)
        } else {
            None
        }
    })
}

/// Leftmost formatted run whose neighbours are not digits
fn find_formatted(text: &str) -> Option<&str> {
    let mut previous: Option<char> = None;

    for (start, c) in text.char_indices() {
        let preceded_by_digit = previous.map_or(false, |p| p.is_ascii_digit());
        previous = Some(c);
        if !c.is_ascii_digit() || preceded_by_digit {
            continue;
        }

        if let Some(m) = FORMATTED_RUN.find(&text[start..]) {
            let end = start + m.end();
            let followed_by_digit = text[end..].chars().next().map_or(false, |n| n.is_ascii_digit());
            if !followed_by_digit {
                return Some(&text[start..end]);
            }
        }
    }
    None
}
