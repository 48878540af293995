//! Boilerplate line classification.
//!
//! Page headers, repeated column headings and footers can land between any
//! two fragments of a record when a record spans a page break. The scanner
//! never sees these lines: [`NoiseFilter::is_noise`] is consulted inside the
//! cursor advance.

use crate::domain::pattern::Pattern;

#[derive(Debug, Clone, Default)]
pub struct NoiseFilter {
    patterns: Vec<Pattern>,
}

impl NoiseFilter {
    pub fn new(patterns: Vec<Pattern>) -> Self {
        Self { patterns }
    }

    /// A filter that treats nothing as noise.
    pub fn none() -> Self {
        Self::default()
    }

    /// The first noise pattern matching `line`, if any.
    pub fn matching(&self, line: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.is_match(line))
    }

    pub fn is_noise(&self, line: &str) -> bool {
        self.matching(line).is_some()
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }
}

/// Noise shared by every 1099-B layout: the form banner, per-part section
/// banners, column headings, PDF file-name footers and the stray row of
/// bare page/sequence numbers that text extraction leaves at page breaks.
pub fn form_1099b_noise() -> Vec<Pattern> {
    vec![
        Pattern::new("form banner", r"1099[−\-]B \(OMB No\. 1545[−\-]0715\)", &[]),
        Pattern::new(
            "short-term section banner",
            r"Short[−\-]term transactions for which basis is not reported to the IRS[−\-][−\-]Report on Form 8949, Part I, with Box B checked\.",
            &[],
        ),
        Pattern::new(
            "long-term section banner",
            r"Long[−\-]term transactions for which basis is not reported to the IRS[−\-][−\-]Report on Form 8949, Part II, with Box E checked\.",
            &[],
        ),
        Pattern::new(
            "column heading",
            r"1c\. Date sold 1b\. Date 1d\. Proceeds 6\. Reported to IRS 1a\. Description Other",
            &[],
        ),
        Pattern::new("column heading continuation", r"or disposed acquired of property", &[]),
        Pattern::new(
            "page number row",
            r"\d* \d* \d* \d* \d*[−\-]\d* \d* \d\d/\d\d/\d\d .*",
            &[],
        ),
        Pattern::new("file name footer", r".*\.PDF", &[]),
    ]
}
