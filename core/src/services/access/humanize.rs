//! Human-readable elapsed time for operator listings

use chrono::Duration;

use mg_shared::types::Language;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Unit length in seconds with Russian forms (one, few, many) and English forms (one, other)
struct Unit {
    seconds: i64,
    ru: [&'static str; 3],
    en: [&'static str; 2],
}

const UNITS: [Unit; 5] = [
    Unit { seconds: YEAR, ru: ["год", "года", "лет"], en: ["year", "years"] },
    Unit { seconds: MONTH, ru: ["месяц", "месяца", "месяцев"], en: ["month", "months"] },
    Unit { seconds: DAY, ru: ["день", "дня", "дней"], en: ["day", "days"] },
    Unit { seconds: HOUR, ru: ["час", "часа", "часов"], en: ["hour", "hours"] },
    Unit { seconds: MINUTE, ru: ["минуту", "минуты", "минут"], en: ["minute", "minutes"] },
];

/// Render an elapsed duration, e.g. `1 час 5 минут назад` or `1 hour 5 minutes ago`
///
/// Seconds are dropped; anything under a minute (or negative) is "just now".
pub fn humanize_elapsed(elapsed: Duration, language: Language) -> String {
    let mut remaining = elapsed.num_seconds().max(0);
    let mut parts = Vec::new();

    for unit in &UNITS {
        if remaining >= unit.seconds {
            let value = remaining / unit.seconds;
            remaining %= unit.seconds;
            parts.push(format!("{} {}", value, unit_name(unit, value, language)));
        }
    }

    if parts.is_empty() {
        return match language {
            Language::Russian => "только что".to_string(),
            Language::English => "just now".to_string(),
        };
    }

    let suffix = match language {
        Language::Russian => "назад",
        Language::English => "ago",
    };
    format!("{} {}", parts.join(" "), suffix)
}

fn unit_name(unit: &Unit, value: i64, language: Language) -> &'static str {
    match language {
        Language::Russian => unit.ru[russian_plural_form(value)],
        Language::English if value == 1 => unit.en[0],
        Language::English => unit.en[1],
    }
}

/// Index into (one, few, many) following Russian agreement with numerals
fn russian_plural_form(value: i64) -> usize {
    let (last, last_two) = (value % 10, value % 100);
    if last == 1 && last_two != 11 {
        0
    } else if (2..=4).contains(&last) && !(12..=14).contains(&last_two) {
        1
    } else {
        2
    }
}
