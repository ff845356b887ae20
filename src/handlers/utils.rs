// handlers/utils.rs - request body helpers shared by several handlers

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

/// Non-empty string field, untouched.
pub fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Movie ids arrive as strings from the search screen and as numbers from
/// TMDB payloads. Both are stored as text.
pub fn movie_id_from_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => {
            let id = match n.as_i64() {
                Some(i) => i,
                None if n.is_f64() => integral_i64(n.as_f64()?)?,
                // u64 beyond i64::MAX
                None => return None,
            };
            (id != 0).then(|| id.to_string())
        }
        _ => None,
    }
}

/// Whole floats that fit in an i64; anything else is refused rather than
/// saturated by `as`.
fn integral_i64(f: f64) -> Option<i64> {
    const BOUND: f64 = 9_223_372_036_854_775_808.0; // 2^63
    (f.fract() == 0.0 && (-BOUND..BOUND).contains(&f)).then_some(f as i64)
}

/// Integer rating in 1..=5, given as a JSON number or a numeric string.
pub fn rating_from_value(value: Option<&Value>) -> Option<i32> {
    let rating = match value? {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i,
            None => integral_i64(n.as_f64()?)?,
        },
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    (1..=5).contains(&rating).then_some(rating as i32)
}

/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_release_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
