//! Input sanitization primitives.
//!
//! Strings are *escaped*, not silently truncated: `<` and `>` become
//! HTML entities so stored values are inert, while validators can still
//! see the attempt (an escaped `&lt;script` is rejected by the order
//! message check rather than quietly accepted).

use std::sync::LazyLock;

use regex::Regex;

static SCRIPT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<\s*/?\s*script").expect("valid regex"));

static ESCAPED_SCRIPT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)&lt;\s*/?\s*script").expect("valid regex"));

static JS_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript\s*:").expect("valid regex"));

static EVENT_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bon\w+\s*=").expect("valid regex"));

/// Sanitize one string value.
///
/// Angle brackets are escaped and active patterns (`javascript:` URIs,
/// inline event handlers) are removed. Idempotent: sanitizing an
/// already-sanitized string changes nothing.
pub fn sanitize_str(input: &str) -> String {
    let escaped = input.replace('<', "&lt;").replace('>', "&gt;");
    let escaped = JS_SCHEME.replace_all(&escaped, "");
    let escaped = EVENT_HANDLER.replace_all(&escaped, "");
    escaped.into_owned()
}

/// Sanitize every string in a JSON document in place, recursing through
/// objects and arrays. Keys are left alone; only values change.
pub fn sanitize_json(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::String(s) => {
            let clean = sanitize_str(s);
            if clean != *s {
                *s = clean;
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                sanitize_json(item);
            }
        }
        serde_json::Value::Object(map) => {
            for (_, v) in map.iter_mut() {
                sanitize_json(v);
            }
        }
        _ => {}
    }
}

/// Whether a string still carries a script-injection attempt, in raw or
/// escaped form. Used by validators to reject rather than just disarm.
pub fn contains_script_pattern(input: &str) -> bool {
    SCRIPT_TAG.is_match(input)
        || ESCAPED_SCRIPT_TAG.is_match(input)
        || JS_SCHEME.is_match(input)
        || EVENT_HANDLER.is_match(input)
}
