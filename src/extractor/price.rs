use crate::utils::round_to_cents;
use regex::Regex;
use std::sync::LazyLock;

/// Everything that can never be part of a number
static NON_NUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9,.]").unwrap());

/// Longest leading float, the way a browser's `parseFloat` reads it
static LEADING_FLOAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)").unwrap());

/// First numeric token of the raw text, digit groups split by spaces included
static NUMERIC_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9](?:[0-9,.]|\s+[0-9])*").unwrap());

/// Letters directly after the numeric token, whitespace allowed in between
static TRAILING_LETTERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(\p{L}+)").unwrap());

/// Price and currency read from the text of a price element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceInfo {
    pub amount: f64,
    pub currency: String,
}

impl PriceInfo {
    /// Reads price and currency from raw price text, defaulting each to zero/empty
    pub fn from_text(raw: &str) -> Self {
        let raw = raw.trim();
        Self {
            amount: parse_amount(raw).unwrap_or(0.0),
            currency: parse_currency(raw).unwrap_or_default(),
        }
    }
}

/// Normalizes price text to a parseable number string.
///
/// Keeps digits, commas and periods only, then turns the first comma into a
/// period. Lossy for thousands separators: `"1,234.56"` becomes `"1.234.56"`.
pub fn normalize_number(raw: &str) -> String {
    NON_NUMERIC.replace_all(raw, "").replacen(',', ".", 1)
}

/// Parses the amount from raw price text, rounded to cents.
///
/// Returns `None` when the text has no leading number after normalization,
/// or when the amount is too large to survive rounding.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let normalized = normalize_number(raw);
    let prefix = LEADING_FLOAT.find(&normalized)?.as_str();

    match prefix.parse::<f64>().map(round_to_cents) {
        Ok(amount) if amount.is_finite() => Some(amount),
        Ok(_) => {
            ::log::debug!("Price {:?} is out of range", prefix);
            None
        }
        Err(e) => {
            ::log::debug!("Unparseable price prefix {:?}: {}", prefix, e);
            None
        }
    }
}

/// Parses the currency token anchored right after the first number.
///
/// A symbol placed before the number (`"$ 5"`) is not picked up.
pub fn parse_currency(raw: &str) -> Option<String> {
    let number = NUMERIC_TOKEN.find(raw)?;
    TRAILING_LETTERS
        .captures(&raw[number.end()..])
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
