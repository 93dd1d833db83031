//! Scalar normalizers shared by both dialect parsers.
//!
//! None of these functions fail: input that cannot be understood
//! normalizes to `None` (or to a documented fallback).

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::types::DEFAULT_PAYMENT_MODEL;

/// Length of a Croatian OIB.
pub const OIB_LEN: usize = 11;

/// Characters of a `HR`-prefixed model in an unseparated payment id.
const MODEL_LEN: usize = 4;

lazy_static! {
    static ref ISO_DATE: Regex = Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap();

    static ref NUMERIC_PREFIX: Regex =
        Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]+)?|\.[0-9]+)").unwrap();

    static ref DIGIT_RUN: Regex = Regex::new(r"[0-9]+").unwrap();
}

/// Parse a strict ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// Anything else, including the empty string, yields `None`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if !ISO_DATE.is_match(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse a decimal literal.
///
/// Trailing garbage is ignored as long as a numeric prefix exists
/// (`"12.50 EUR"` → `12.50`). Yields `None` when no digits lead the input.
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = Decimal::from_str(s) {
        return Some(d);
    }
    let prefix = NUMERIC_PREFIX.find(s)?;
    Decimal::from_str(prefix.as_str()).ok()
}

/// Derive the OIB from a raw tax identifier.
///
/// Returns the first run of exactly 11 ASCII digits (`"HR12345678901"` →
/// `"12345678901"`). When no such run exists the trimmed raw value is
/// returned unchanged; empty input yields `None`.
pub fn extract_oib(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let oib = DIGIT_RUN
        .find_iter(raw)
        .map(|m| m.as_str())
        .find(|run| run.len() == OIB_LEN)
        .unwrap_or(raw);
    Some(oib.to_string())
}

/// Split a combined payment identifier into `(model, reference)`.
///
/// - `"HR01 123-456"` → first whitespace token is the model.
/// - `"HR0112345"` → leading `HR` means the first four characters are the model.
/// - anything else is a bare reference under model `HR99`.
pub fn split_payment_id(combined: &str) -> (String, String) {
    let value = combined.trim();
    if let Some((model, reference)) = value.split_once(char::is_whitespace) {
        return (model.to_string(), reference.trim().to_string());
    }
    if value.starts_with("HR") && value.chars().count() >= MODEL_LEN {
        let at = value
            .char_indices()
            .nth(MODEL_LEN)
            .map_or(value.len(), |(i, _)| i);
        let (model, reference) = value.split_at(at);
        return (model.to_string(), reference.to_string());
    }
    (DEFAULT_PAYMENT_MODEL.to_string(), value.to_string())
}
