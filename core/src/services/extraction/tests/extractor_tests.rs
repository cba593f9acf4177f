//! Unit tests for verification code extraction

use crate::services::extraction::{extract, CodePattern};

#[test]
fn test_labeled_russian() {
    assert_eq!(extract("Ваш код: 482917").as_deref(), Some("482917"));
}

#[test]
fn test_formatted_sequences() {
    assert_eq!(extract("12-34-56").as_deref(), Some("123456"));
    assert_eq!(extract("Use 123.456 to sign in").as_deref(), Some("123456"));
    assert_eq!(extract("код 1 2 3 4 5 6").as_deref(), Some("123456"));
    assert_eq!(extract("x-12--34. 56-y").as_deref(), Some("123456"));
}

#[test]
fn test_reference_in_markup() {
    assert_eq!(
        extract("<p>Ref #203948 confirmed</p>").as_deref(),
        Some("203948")
    );
}

#[test]
fn test_too_few_digits() {
    assert_eq!(extract("order 12345"), None);
    assert_eq!(extract(""), None);
    assert_eq!(extract("no digits here"), None);
}

#[test]
fn test_leftmost_match_wins() {
    assert_eq!(extract("call 123456 at 789012").as_deref(), Some("123456"));
}

#[test]
fn test_run_adjacent_to_digits_is_skipped() {
    // Seven digits never form a formatted or bare code.
    assert_eq!(extract("invoice 1234567"), None);
    assert_eq!(extract("1234 5678"), None);
    assert_eq!(extract("1234567 then 654321").as_deref(), Some("654321"));
}

#[test]
fn test_label_takes_first_six_of_longer_run() {
    assert_eq!(extract("code:1234567").as_deref(), Some("123456"));
    assert_eq!(extract("КОД 9876543").as_deref(), Some("987654"));
}

#[test]
fn test_reference_takes_first_six_of_longer_run() {
    assert_eq!(extract("№1234567").as_deref(), Some("123456"));
}

#[test]
fn test_invisible_spaces_normalized() {
    assert_eq!(extract("Code:\u{a0}482\u{200b}917").as_deref(), Some("482917"));
}

#[test]
fn test_markup_elements_are_separated() {
    let html = "<html><body><td>Your code</td><td><b>771</b>&nbsp;<b>204</b></td></body></html>";
    assert_eq!(extract(html).as_deref(), Some("771204"));
}

#[test]
fn test_hidden_markup_ignored() {
    let html = "<style>.brand{color:#102030}</style><p>Code: 555111</p>";
    assert_eq!(extract(html).as_deref(), Some("555111"));
}

#[test]
fn test_non_ascii_digits_ignored() {
    assert_eq!(extract("١٢٣٤٥٦"), None);
}

#[test]
fn test_pattern_spans() {
    assert_eq!(CodePattern::Formatted.find("a 12-34-56 b"), Some("12-34-56"));
    assert_eq!(CodePattern::Bare.find("x 654321 y"), Some("654321"));
    assert_eq!(CodePattern::Labeled.find("Code: 111222"), Some("Code: 111222"));
    assert_eq!(CodePattern::Reference.find("# 333444"), Some("# 333444"));
    assert_eq!(CodePattern::Formatted.find("1234567"), None);
}
