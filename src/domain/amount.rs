//! Dollar-value normalization.
//!
//! The form prints positive amounts as `$12.34` and negative amounts in
//! accounting style as `($12.34)`. Downstream consumers treat amounts as
//! display text, so the value is kept as a string and only the sign is
//! rewritten.

use crate::domain::error::ScanError;
use regex::Regex;
use std::sync::LazyLock;

const POSITIVE: &str = r"^\$(\d+\.\d+)$";
const NEGATIVE: &str = r"^\(\$(\d+\.\d+)\)$";

static POSITIVE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(POSITIVE).unwrap());
static NEGATIVE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(NEGATIVE).unwrap());

/// Convert a `$d.dd` or `($d.dd)` token into signed numeric text.
///
/// The error has no line position; the scanner adds it with
/// [`ScanError::at_line`].
///
/// Callers only pass tokens their own pattern already shaped like an
/// amount, but anything that is not exactly one of the two forms is still
/// rejected rather than guessed at.
pub fn normalize(token: &str) -> Result<String, ScanError> {
    if let Some(caps) = POSITIVE_RE.captures(token) {
        return Ok(caps[1].to_string());
    }
    if let Some(caps) = NEGATIVE_RE.captures(token) {
        return Ok(format!("-{}", &caps[1]));
    }
    Err(ScanError::MalformedAmount {
        line_number: None,
        line: None,
        token: token.to_string(),
        patterns: vec![POSITIVE.to_string(), NEGATIVE.to_string()],
    })
}
