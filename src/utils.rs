use url::Url;

/// Canonical identity of a location: origin followed by path.
///
/// Query string and fragment are dropped so tracking parameters and anchors
/// never split one page into several cart lines.
pub fn canonical_id(location: &Url) -> String {
    format!("{}{}", location.origin().ascii_serialization(), location.path())
}

/// Round a price to two fractional digits, half-up on the scaled value
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Collapse every run of whitespace into a single space and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
