use std::sync::LazyLock;

use regex::Regex;

/// Color used when a user-provided color is not a `#rgb` / `#rrggbb` hex string.
pub const DEFAULT_COLOR: &str = "#3b82f6";
/// Rating used when a user-provided value cannot be interpreted as a number.
pub const DEFAULT_VALUE: u8 = 5;
/// Lowest accepted rating.
pub const MIN_VALUE: u8 = 0;
/// Highest accepted rating.
pub const MAX_VALUE: u8 = 10;
/// Maximum length (in characters) of an export file name.
pub const MAX_FILE_NAME_LEN: usize = 100;

static ANGLE_BRACKETS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[<>]").unwrap());
static SCRIPT_PROTOCOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript:").unwrap());
static EVENT_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)on[A-Za-z0-9_]+=").unwrap());
static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").unwrap());
static RESERVED_FILE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[/\\:*?"<>|]"#).unwrap());

/// An untyped rating as it arrives from a form field or a JSON document.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RawRating<'a> {
    /// Numeric input, possibly fractional or non-finite.
    Number(f64),
    /// Textual input, parsed as a base-10 integer prefix.
    Text(&'a str),
    /// Anything else (null, booleans, objects, absent fields).
    Missing,
}

impl From<f64> for RawRating<'_> {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i64> for RawRating<'_> {
    fn from(v: i64) -> Self {
        Self::Number(v as f64)
    }
}

impl From<i32> for RawRating<'_> {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<u8> for RawRating<'_> {
    fn from(v: u8) -> Self {
        Self::Number(f64::from(v))
    }
}

impl<'a> From<&'a str> for RawRating<'a> {
    fn from(v: &'a str) -> Self {
        Self::Text(v)
    }
}

impl<'a> From<&'a serde_json::Value> for RawRating<'a> {
    fn from(v: &'a serde_json::Value) -> Self {
        match v {
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Missing, Self::Number),
            serde_json::Value::String(s) => Self::Text(s),
            _ => Self::Missing,
        }
    }
}

/// Strip markup and script-injection patterns from free text and trim surrounding whitespace.
pub fn sanitize_text(raw: &str) -> String {
    let s = ANGLE_BRACKETS.replace_all(raw, "");
    let s = SCRIPT_PROTOCOL.replace_all(&s, "");
    let s = EVENT_HANDLER.replace_all(&s, "");
    s.trim().to_owned()
}

/// Borrow the string content of a JSON value; non-strings read as empty text.
pub fn json_text(raw: &serde_json::Value) -> &str {
    raw.as_str().unwrap_or("")
}

/// Sanitize, truncate to `max_len` characters, and fall back when nothing is left.
pub fn validate_name(raw: &str, max_len: usize, fallback: &str) -> String {
    let clean: String = sanitize_text(raw).chars().take(max_len).collect();
    if clean.is_empty() {
        tracing::debug!(fallback, "empty name replaced by fallback");
        fallback.to_owned()
    } else {
        clean
    }
}

/// Interpret any raw rating as an integer in `[MIN_VALUE, MAX_VALUE]`.
///
/// Text is read like a base-10 integer prefix (`"7 stars"` is 7). Unreadable or non-finite input
/// becomes [`DEFAULT_VALUE`]; everything else is rounded half up and clamped.
pub fn validate_value<'a>(raw: impl Into<RawRating<'a>>) -> u8 {
    let n = match raw.into() {
        RawRating::Number(n) => Some(n),
        RawRating::Text(s) => parse_int_prefix(s),
        RawRating::Missing => None,
    };
    match n {
        Some(n) if n.is_finite() => {
            let rounded = (n + 0.5).floor();
            rounded.clamp(f64::from(MIN_VALUE), f64::from(MAX_VALUE)) as u8
        }
        _ => DEFAULT_VALUE,
    }
}

fn parse_int_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    let magnitude: f64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Accept `#rgb` / `#rrggbb` hex colors verbatim; anything else becomes [`DEFAULT_COLOR`].
pub fn validate_color(raw: &str) -> String {
    if HEX_COLOR.is_match(raw) {
        raw.to_owned()
    } else {
        tracing::debug!(raw, "invalid color replaced by default");
        DEFAULT_COLOR.to_owned()
    }
}

/// Make user text safe to use as a single path component.
///
/// The result may be empty; callers pick their own fallback stem.
pub fn validate_file_name(raw: &str) -> String {
    let clean = sanitize_text(raw);
    let mut clean = RESERVED_FILE_CHARS.replace_all(&clean, "").into_owned();
    while clean.contains("..") {
        clean = clean.replace("..", "");
    }
    clean.chars().take(MAX_FILE_NAME_LEN).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/validate/input.rs"]
mod tests;
