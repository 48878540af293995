//! Per-version grammar tables.
//!
//! Each document era is described by one [`Grammar`] value: the pattern
//! that starts a record, the fragments that must follow it in order, an
//! optional category declaration whose value is carried across records,
//! the era's noise lines, and where a record's holding period comes from.
//! The scanning algorithm itself lives in [`crate::domain::scanner`] and is
//! shared by all eras.

use crate::domain::error::ScanError;
use crate::domain::noise::{NoiseFilter, form_1099b_noise};
use crate::domain::pattern::{Pattern, Role};
use crate::domain::scanner;
use crate::domain::transaction::{TermFilter, TransactionRecord};
use std::sync::LazyLock;

/// Prepended to every description; the form prints only the note id.
pub const DESCRIPTION_PREFIX: &str = "Prosper Note ";

/// Where a record's holding period is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermSource {
    /// A [`Role::Term`] fragment of the record itself.
    Fragment,
    /// Derived from the Form 8949 box letter.
    Category,
}

#[derive(Debug, Clone)]
pub struct Grammar {
    pub name: &'static str,
    pub record_start: Pattern,
    pub trailing: Vec<Pattern>,
    pub category_declaration: Option<Pattern>,
    pub noise: NoiseFilter,
    pub description_prefix: &'static str,
    pub term_source: TermSource,
}

impl Grammar {
    /// Scan `lines` with this grammar. See [`scanner::scan`].
    pub fn parse(
        &self,
        lines: &[String],
        filter: TermFilter,
    ) -> Result<Vec<TransactionRecord>, ScanError> {
        scanner::scan(self, lines, filter)
    }

    /// Every pattern that can start or continue a record, in scan order.
    pub fn fragment_patterns(&self) -> impl Iterator<Item = &Pattern> {
        std::iter::once(&self.record_start)
            .chain(self.trailing.iter())
            .chain(self.category_declaration.iter())
    }
}

const SUMMARY_RECORD_START: &str =
    r"(\d\d/\d\d/\d\d\d\d) (\d\d/\d\d/\d\d\d\d) (\(?\$\d*\.\d*\)?) (.*[A-Z]+).*";
const SUMMARY_ROLES: &[Role] = &[
    Role::DateSold,
    Role::DateAcquired,
    Role::Proceeds,
    Role::Description,
];

fn cost_basis() -> Pattern {
    Pattern::new("cost basis", r".*Box 1e\. (\(?\$.*\)?)", &[Role::CostBasis])
}

/// Tax years up to 2016: every record repeats its holding period
/// (`Box 2.`) and its Form 8949 box.
pub fn legacy() -> Grammar {
    Grammar {
        name: "legacy",
        record_start: Pattern::new("record start", SUMMARY_RECORD_START, SUMMARY_ROLES),
        trailing: vec![
            cost_basis(),
            Pattern::new("term", r"Box 2\. (Short|Long)[−\-]term", &[Role::Term]),
            Pattern::new(
                "reporting category",
                r"Applicable check box on Form 8949 ([A-Z])",
                &[Role::Category],
            ),
        ],
        category_declaration: None,
        noise: NoiseFilter::new(form_1099b_noise()),
        description_prefix: DESCRIPTION_PREFIX,
        term_source: TermSource::Fragment,
    }
}

/// Tax years 2017 to 2020: the `Box 2.` line is gone and the checkbox
/// wording varies between "check box" and "checkbox".
pub fn summary_2017() -> Grammar {
    Grammar {
        name: "2017-plus",
        record_start: Pattern::new("record start", SUMMARY_RECORD_START, SUMMARY_ROLES),
        trailing: vec![
            cost_basis(),
            Pattern::new(
                "reporting category",
                r"Applicable check\s?box on Form 8949 ([A-Z])",
                &[Role::Category],
            ),
        ],
        category_declaration: None,
        noise: NoiseFilter::new(form_1099b_noise()),
        description_prefix: DESCRIPTION_PREFIX,
        term_source: TermSource::Category,
    }
}

/// Tax years from 2024: one line per record in a table, grouped under a
/// section heading naming the Form 8949 box for every row below it.
pub fn tabular_2024() -> Grammar {
    Grammar {
        name: "2024-plus",
        record_start: Pattern::new(
            "transaction row",
            TABULAR_ROW,
            &[
                Role::Description,
                Role::DateAcquired,
                Role::DateSold,
                Role::Proceeds,
                Role::CostBasis,
            ],
        ),
        trailing: Vec::new(),
        category_declaration: Some(Pattern::new(
            "category heading",
            r"Covered \w*[−\-]Term Gains or Losses on Net Proceeds Report on Form 8949, Part II? with Box ([A-Z]) checked\s*",
            &[Role::Category],
        )),
        noise: NoiseFilter::new(vec![
            Pattern::new("form banner", r"1099[−\-]B \(OMB No\. 1545[−\-]0715\)", &[]),
            Pattern::new("file name footer", r".*\.PDF", &[]),
        ]),
        description_prefix: DESCRIPTION_PREFIX,
        term_source: TermSource::Category,
    }
}

// loan id and note, acquired, sold, proceeds, cost basis, then accrued
// market discount, wash sale loss and gain/loss which are not reported.
const TABULAR_ROW: &str = concat!(
    r"(\d*-\d* \w*) ",
    r"(\d\d/\d\d/\d\d\d\d) (\d\d/\d\d/\d\d\d\d) ",
    r"(\(?\$[^\s)]*\)?) (\(?\$[^\s)]*\)?) ",
    r"(?:\(?\$[^\s)]*\)?) (?:\(?\$[^\s)]*\)?) (?:\(?\$[^\s)]*\)?).*"
);

pub static LEGACY: LazyLock<Grammar> = LazyLock::new(legacy);
pub static SUMMARY_2017: LazyLock<Grammar> = LazyLock::new(summary_2017);
pub static TABULAR_2024: LazyLock<Grammar> = LazyLock::new(tabular_2024);
