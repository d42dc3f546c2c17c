//! Parameter extraction
//!
//! Macro block bodies carry ad-hoc `KEY="value"` or `KEY=value` lines.
//! Keys match case-insensitively; values keep their case. When the same
//! key occurs more than once in a block, only the first occurrence is
//! authoritative.
//!
//! No type coercion happens here. Numeric interpretation belongs to the
//! caller, and [`param_f64`] folds parse failure into absence so a single
//! malformed field can never abort a file pass.

use std::sync::LazyLock;

use regex::Regex;

/// One parameter line: optional leading whitespace, the key, `=` with
/// optional surrounding whitespace, then either a double-quoted string
/// (possibly empty, no embedded quote) or a bare token running until
/// whitespace or backslash.
static PARAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(?:"([^"]*)"|([^\s\\]+))"#)
        .expect("invalid parameter regex")
});

/// Extract the first value of `key` from a block's text.
///
/// Returns the quoted contents or the bare token, trimmed, or `None`
/// when the key never appears.
pub fn param<'a>(block: &'a str, key: &str) -> Option<&'a str> {
    PARAM_RE.captures_iter(block).find_map(|caps| {
        if !caps[1].eq_ignore_ascii_case(key) {
            return None;
        }
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .expect("one value alternative always matches");
        Some(value.as_str().trim())
    })
}

/// Extract the first value of `key` and parse it as a float.
///
/// Absent keys and unparsable values both answer `None`.
pub fn param_f64(block: &str, key: &str) -> Option<f64> {
    param(block, key)?.parse::<f64>().ok()
}
