//! Document identification: issuer line and tax year.

use crate::domain::error::Prosper1099Error;
use regex::Regex;
use std::sync::LazyLock;

/// First line of every Prosper tax document.
pub const EXPECTED_FIRST_LINE: &str = "PROSPER FUNDING LLC";

const TAX_YEAR_PATTERNS: [&str; 2] = [
    r"^Tax Year (\d\d\d\d) Combined Form$",
    r"^Tax Year (\d\d\d\d) Form 1099[−\-]B$",
];

static TAX_YEAR_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    TAX_YEAR_PATTERNS
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

/// The tax year printed on the first line that names one.
pub fn extract_tax_year(lines: &[String]) -> Result<String, Prosper1099Error> {
    lines
        .iter()
        .find_map(|line| {
            TAX_YEAR_RES
                .iter()
                .find_map(|re| re.captures(line).map(|caps| caps[1].to_string()))
        })
        .ok_or_else(|| Prosper1099Error::TaxYearNotFound {
            patterns: TAX_YEAR_PATTERNS.iter().map(|p| p.to_string()).collect(),
        })
}

/// Reject documents from another issuer before trying to parse them.
/// An empty `expected` disables the check.
pub fn check_first_line(lines: &[String], expected: &str) -> Result<(), Prosper1099Error> {
    if expected.is_empty() {
        return Ok(());
    }
    match lines.first() {
        Some(first) if first == expected => Ok(()),
        other => Err(Prosper1099Error::UnexpectedFirstLine {
            expected: expected.to_string(),
            found: other.cloned().unwrap_or_default(),
        }),
    }
}
