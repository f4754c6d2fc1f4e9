//! Value coercion
//!
//! Converts raw field values and literal operands into comparable forms
//! per value kind: numbers parse as floats, durations reduce to total
//! seconds, dates parse to instants, ids and strings normalize to
//! lowercase with whitespace stripped. All parsing is fail-soft: malformed
//! input coerces to `None` and the caller treats it as a non-match.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};

use crate::key::{Key, ValueKind};
use crate::model::PlaylistItem;

/// A value coerced into its comparable form.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    /// Numbers, and durations reduced to total seconds
    Number(f64),
    /// Ids and strings, normalized
    Text(String),
    /// Calendar dates
    Instant(DateTime<Utc>),
}

impl Coerced {
    /// Compare two coerced values of the same shape. Values of different
    /// shapes (a coercion mismatch upstream) are incomparable.
    pub fn compare(&self, other: &Coerced) -> Option<Ordering> {
        match (self, other) {
            (Coerced::Number(a), Coerced::Number(b)) => a.partial_cmp(b),
            (Coerced::Text(a), Coerced::Text(b)) => Some(a.cmp(b)),
            (Coerced::Instant(a), Coerced::Instant(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Lowercase and strip all whitespace.
///
/// Search needles and haystacks, and string-kind comparisons, all pass
/// through this, so "Al Pha" and "Alpha" collapse to the same token.
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Parse an ISO-8601 duration (e.g. "PT1H2M3S", "P1DT30M") to total
/// seconds. Calendar components weigh in at 365 days per year and 30 days
/// per month. Returns `None` for anything malformed, including a bare
/// "P" or "PT" with no components.
pub fn duration_seconds(s: &str) -> Option<f64> {
    let rest = s.strip_prefix('P')?;
    let mut in_time = false;
    let mut seen_component = false;
    let mut total = 0.0f64;
    let mut digits = String::new();
    for c in rest.chars() {
        if c == 'T' {
            if in_time || !digits.is_empty() {
                return None;
            }
            in_time = true;
        } else if c.is_ascii_digit() || c == '.' {
            digits.push(c);
        } else {
            let value: f64 = digits.parse().ok()?;
            digits.clear();
            let unit = match (c, in_time) {
                ('Y', false) => 365.0 * 86_400.0,
                ('M', false) => 30.0 * 86_400.0,
                ('W', false) => 7.0 * 86_400.0,
                ('D', false) => 86_400.0,
                ('H', true) => 3_600.0,
                ('M', true) => 60.0,
                ('S', true) => 1.0,
                _ => return None,
            };
            total += value * unit;
            seen_component = true;
        }
    }
    if !digits.is_empty() || !seen_component {
        return None;
    }
    Some(total)
}

/// Parse a date literal: RFC 3339 first, then a bare `YYYY-MM-DD`
/// (midnight UTC) as users type it into the check value box.
pub fn date_instant(s: &str) -> Option<DateTime<Utc>> {
    let trimmed = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
}

/// Coerce a literal operand into `kind`'s comparable form.
///
/// Duration literals double-coerce: the ISO string parses down to seconds
/// so it can compare numerically against item durations.
pub fn literal(kind: ValueKind, raw: &str) -> Option<Coerced> {
    match kind {
        ValueKind::Number => raw.trim().parse::<f64>().ok().map(Coerced::Number),
        ValueKind::Id | ValueKind::String => Some(Coerced::Text(normalize(raw))),
        ValueKind::Duration => duration_seconds(raw.trim()).map(Coerced::Number),
        ValueKind::Date => date_instant(raw).map(Coerced::Instant),
    }
}

/// Coerce the keyed field of `item` into the key's comparable form.
/// `index` is the item's position in the sequence currently being
/// evaluated, substituted for the synthetic `index` key.
pub fn field(item: &PlaylistItem, key: Key, index: usize) -> Option<Coerced> {
    match key.kind() {
        ValueKind::Number => match key {
            Key::Index => Some(Coerced::Number(index as f64)),
            Key::Position => Some(Coerced::Number(item.position as f64)),
            _ => key
                .field_text(item, index)
                .trim()
                .parse::<f64>()
                .ok()
                .map(Coerced::Number),
        },
        ValueKind::Id | ValueKind::String => {
            Some(Coerced::Text(normalize(&key.field_text(item, index))))
        }
        ValueKind::Duration => duration_seconds(item.duration.trim()).map(Coerced::Number),
        ValueKind::Date => match key {
            Key::AddedAt => Some(Coerced::Instant(item.added_at)),
            Key::PublishedAt => Some(Coerced::Instant(item.published_at)),
            _ => None,
        },
    }
}
