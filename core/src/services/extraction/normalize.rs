//! Reduce message text to its visible words

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[a-zA-Z!/][^>]*>").unwrap());
static HIDDEN_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>|<!--.*?-->").unwrap()
});
static ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]+);").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Check if the text contains at least one markup tag
pub fn looks_like_markup(text: &str) -> bool {
    MARKUP_TAG.is_match(text)
}

/// Normalize raw message text
///
/// Markup is stripped to its visible text with a space where each tag was,
/// and character references are decoded. Non-breaking and zero-width spaces
/// become ordinary spaces, whitespace runs collapse to one space, and the
/// result is trimmed.
pub fn normalize(raw: &str) -> String {
    let visible = if looks_like_markup(raw) {
        let without_hidden = HIDDEN_BLOCK.replace_all(raw, " ");
        let without_tags = MARKUP_TAG.replace_all(&without_hidden, " ");
        decode_entities(&without_tags)
    } else {
        raw.to_string()
    };

    let spaced = visible.replace(['\u{a0}', '\u{200b}'], " ");
    WHITESPACE.replace_all(&spaced, " ").trim().to_string()
}

fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            let decoded = match name {
                "nbsp" => Some('\u{a0}'),
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => numeric_reference(name),
            };
            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn numeric_reference(name: &str) -> Option<char> {
    let number = name.strip_prefix('#')?;
    let value = match number.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => number.parse().ok()?,
    };
    char::from_u32(value)
}
