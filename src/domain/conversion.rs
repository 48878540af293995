//! Whole-document conversion: identify the document, pick the grammar for
//! its tax year and scan it.

use crate::domain::error::Prosper1099Error;
use crate::domain::registry::ParserRegistry;
use crate::domain::tax_year::{EXPECTED_FIRST_LINE, check_first_line, extract_tax_year};
use crate::domain::transaction::{TermFilter, TransactionRecord};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOptions {
    /// Required first line; empty to accept any document.
    pub expected_first_line: String,
    /// Use this tax year instead of reading it from the document.
    pub tax_year: Option<String>,
    pub filter: TermFilter,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            expected_first_line: EXPECTED_FIRST_LINE.to_string(),
            tax_year: None,
            filter: TermFilter::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub tax_year: String,
    pub grammar: &'static str,
    pub records: Vec<TransactionRecord>,
}

pub fn convert(
    lines: &[String],
    registry: &ParserRegistry,
    options: &ConversionOptions,
) -> Result<Conversion, Prosper1099Error> {
    check_first_line(lines, &options.expected_first_line)?;

    let tax_year = match &options.tax_year {
        Some(year) => year.clone(),
        None => extract_tax_year(lines)?,
    };
    let grammar = registry.lookup(&tax_year)?;
    info!(%tax_year, grammar = grammar.name, lines = lines.len(), "parsing 1099-B transactions");

    let records = grammar.parse(lines, options.filter)?;
    info!(records = records.len(), "parsed 1099-B transactions");

    Ok(Conversion {
        tax_year,
        grammar: grammar.name,
        records,
    })
}
