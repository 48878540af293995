//! Line-grammar scanning engine.
//!
//! The extracted text has no record delimiters. A record is recognized by
//! its start pattern and completed by finding each trailing fragment of the
//! grammar in order. Between fragments the scan skips noise (inside the
//! cursor) and unrecognized lines, but a line matching any *other* fragment
//! pattern of the grammar aborts the scan: silently re-synchronizing there
//! would pair amounts with the wrong note.
//!
//! State is threaded explicitly. Each step takes a [`ScanState`] by value
//! and returns the next one, so a scan is a pure function of its input.

use crate::domain::amount;
use crate::domain::error::ScanError;
use crate::domain::grammar::{Grammar, TermSource};
use crate::domain::noise::NoiseFilter;
use crate::domain::pattern::{Pattern, Role};
use crate::domain::transaction::{Term, TermFilter, TransactionRecord};
use tracing::debug;

/// Progress of one scan: the next unread line and the category carried
/// from the most recent category declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanState {
    pub position: usize,
    pub carried_category: Option<String>,
}

/// What one step of the scan produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A record was completed. `None` when the term filter excluded it.
    Record(Option<TransactionRecord>, ScanState),
    /// A category declaration or an unrecognized line was consumed.
    Continue(ScanState),
    /// The input is exhausted between records.
    End,
}

/// How a non-noise line relates to what the scan is looking for.
#[derive(Debug)]
enum LineClass<'g> {
    Expected(&'g Pattern, Vec<(Role, String)>),
    OutOfTurn(&'g Pattern),
    Unrecognized,
}

/// Forward-only view of the lines that never yields a noise line.
struct Cursor<'a> {
    lines: &'a [String],
    noise: &'a NoiseFilter,
}

impl<'a> Cursor<'a> {
    fn new(lines: &'a [String], noise: &'a NoiseFilter) -> Self {
        Self { lines, noise }
    }

    /// The first non-noise line at or after `position`, with its index.
    fn next_candidate(&self, position: usize) -> Option<(usize, &'a str)> {
        for (index, line) in self.lines.iter().enumerate().skip(position) {
            match self.noise.matching(line) {
                Some(pattern) => {
                    debug!(line_number = index + 1, pattern = pattern.name(), %line, "skipping noise line");
                }
                None => return Some((index, line.as_str())),
            }
        }
        None
    }
}

fn classify<'g>(grammar: &'g Grammar, expected: &[&'g Pattern], line: &str) -> LineClass<'g> {
    for pattern in expected {
        if let Some(captures) = pattern.capture(line) {
            return LineClass::Expected(*pattern, captures);
        }
    }
    for pattern in grammar.fragment_patterns() {
        let is_expected = expected.iter().any(|e| std::ptr::eq(*e, pattern));
        if !is_expected && pattern.is_match(line) {
            return LineClass::OutOfTurn(pattern);
        }
    }
    LineClass::Unrecognized
}

/// A captured field and the line it came from.
#[derive(Debug)]
struct Captured {
    value: String,
    line_number: usize,
    line: String,
}

impl Captured {
    /// The field normalized as a dollar amount, with the source line
    /// attached to any error.
    fn amount(&self) -> Result<String, ScanError> {
        amount::normalize(&self.value).map_err(|e| e.at_line(self.line_number, &self.line))
    }
}

/// Captured values of one record's fragments.
#[derive(Debug, Default)]
struct Fragments {
    date_sold: Option<Captured>,
    date_acquired: Option<Captured>,
    proceeds: Option<Captured>,
    description: Option<Captured>,
    cost_basis: Option<Captured>,
    category: Option<Captured>,
    term: Option<Captured>,
}

impl Fragments {
    fn absorb(&mut self, line_number: usize, line: &str, captures: Vec<(Role, String)>) {
        for (role, value) in captures {
            debug!(line_number, ?role, %value, "captured field");
            let slot = match role {
                Role::DateSold => &mut self.date_sold,
                Role::DateAcquired => &mut self.date_acquired,
                Role::Proceeds => &mut self.proceeds,
                Role::Description => &mut self.description,
                Role::CostBasis => &mut self.cost_basis,
                Role::Category => &mut self.category,
                Role::Term => &mut self.term,
            };
            *slot = Some(Captured {
                value,
                line_number,
                line: line.to_string(),
            });
        }
    }
}

fn value(captured: Option<Captured>) -> String {
    captured.map(|c| c.value).unwrap_or_default()
}

/// Roles a record must get from its own fragments. The category may come
/// from a declaration instead.
const RECORD_ROLES: [Role; 5] = [
    Role::DateSold,
    Role::DateAcquired,
    Role::Proceeds,
    Role::Description,
    Role::CostBasis,
];

/// The first role `grammar` can never supply, if any.
pub fn missing_role(grammar: &Grammar) -> Option<Role> {
    let supplied: Vec<Role> = std::iter::once(&grammar.record_start)
        .chain(grammar.trailing.iter())
        .flat_map(|p| p.roles().iter().copied())
        .collect();
    let category_source = supplied.contains(&Role::Category)
        || grammar
            .category_declaration
            .as_ref()
            .is_some_and(|d| d.roles().contains(&Role::Category));

    if let Some(role) = RECORD_ROLES.iter().find(|r| !supplied.contains(*r)) {
        return Some(*role);
    }
    if !category_source {
        return Some(Role::Category);
    }
    if grammar.term_source == TermSource::Fragment && !supplied.contains(&Role::Term) {
        return Some(Role::Term);
    }
    None
}

/// Scan `lines` front to back and return every record that passes
/// `filter`, in document order.
///
/// Fails on the first structural problem; no partial output is returned.
pub fn scan(
    grammar: &Grammar,
    lines: &[String],
    filter: TermFilter,
) -> Result<Vec<TransactionRecord>, ScanError> {
    if let Some(role) = missing_role(grammar) {
        return Err(ScanError::IncompleteGrammar {
            grammar: grammar.name.to_string(),
            role: format!("{role:?}"),
        });
    }

    let mut records = Vec::new();
    let mut state = ScanState::default();
    loop {
        match step(grammar, lines, state, filter)? {
            Step::Record(record, next) => {
                records.extend(record);
                state = next;
            }
            Step::Continue(next) => state = next,
            Step::End => break,
        }
    }
    debug!(grammar = grammar.name, records = records.len(), "scan complete");
    Ok(records)
}

/// Consume the next non-noise line outside a record and everything up to
/// the end of the record it starts, if it starts one.
pub fn step(
    grammar: &Grammar,
    lines: &[String],
    state: ScanState,
    filter: TermFilter,
) -> Result<Step, ScanError> {
    let cursor = Cursor::new(lines, &grammar.noise);
    let Some((index, line)) = cursor.next_candidate(state.position) else {
        return Ok(Step::End);
    };
    let state = ScanState {
        position: index + 1,
        ..state
    };

    let mut seeking = vec![&grammar.record_start];
    seeking.extend(grammar.category_declaration.as_ref());

    match classify(grammar, &seeking, line) {
        LineClass::Expected(pattern, captures) if std::ptr::eq(pattern, &grammar.record_start) => {
            debug!(line_number = index + 1, %line, "record start");
            complete_record(grammar, lines, (index, line), captures, state, filter)
        }
        LineClass::Expected(_, captures) => {
            let category = captures
                .into_iter()
                .find(|(role, _)| *role == Role::Category)
                .map(|(_, value)| value);
            debug!(line_number = index + 1, ?category, "category declaration");
            Ok(Step::Continue(ScanState {
                carried_category: category.or(state.carried_category),
                ..state
            }))
        }
        LineClass::OutOfTurn(pattern) => Err(ScanError::OutOfOrderFragment {
            line_number: index + 1,
            line: line.to_string(),
            found: pattern.describe(),
            expected: seeking.iter().map(|p| p.describe()).collect(),
        }),
        LineClass::Unrecognized => {
            debug!(line_number = index + 1, %line, "ignoring unrecognized line");
            Ok(Step::Continue(state))
        }
    }
}

fn complete_record(
    grammar: &Grammar,
    lines: &[String],
    start: (usize, &str),
    captures: Vec<(Role, String)>,
    mut state: ScanState,
    filter: TermFilter,
) -> Result<Step, ScanError> {
    let cursor = Cursor::new(lines, &grammar.noise);
    let mut fragments = Fragments::default();
    fragments.absorb(start.0 + 1, start.1, captures);

    for expected in &grammar.trailing {
        loop {
            let Some((index, line)) = cursor.next_candidate(state.position) else {
                return Err(ScanError::TruncatedRecord {
                    line_number: start.0 + 1,
                    line: start.1.to_string(),
                    expected: vec![expected.describe()],
                });
            };
            state.position = index + 1;

            match classify(grammar, &[expected], line) {
                LineClass::Expected(_, captures) => {
                    fragments.absorb(index + 1, line, captures);
                    break;
                }
                LineClass::OutOfTurn(pattern) => {
                    return Err(ScanError::OutOfOrderFragment {
                        line_number: index + 1,
                        line: line.to_string(),
                        found: pattern.describe(),
                        expected: vec![expected.describe()],
                    });
                }
                LineClass::Unrecognized => {
                    debug!(line_number = index + 1, %line, expected = expected.name(), "ignoring unrecognized line");
                }
            }
        }
    }

    let (record, term) = assemble(grammar, start, fragments, &state)?;
    if filter.includes(term) {
        debug!(line_number = start.0 + 1, ?term, ?record, "emitting record");
        Ok(Step::Record(Some(record), state))
    } else {
        debug!(line_number = start.0 + 1, ?term, "record excluded by term filter");
        Ok(Step::Record(None, state))
    }
}

fn assemble(
    grammar: &Grammar,
    start: (usize, &str),
    fragments: Fragments,
    state: &ScanState,
) -> Result<(TransactionRecord, Option<Term>), ScanError> {
    let reporting_category = match fragments
        .category
        .map(|c| c.value)
        .or_else(|| state.carried_category.clone())
    {
        Some(category) => category,
        None => {
            return Err(ScanError::MissingCarriedCategory {
                line_number: start.0 + 1,
                line: start.1.to_string(),
                declaration: grammar
                    .category_declaration
                    .as_ref()
                    .map(|d| d.describe())
                    .unwrap_or_default(),
            });
        }
    };

    let term = match grammar.term_source {
        TermSource::Fragment => fragments.term.and_then(|c| Term::from_label(&c.value)),
        TermSource::Category => Term::from_category(&reporting_category),
    };

    // Roles were checked by `missing_role` before the scan started.
    let sales_proceeds = fragments.proceeds.as_ref().map(Captured::amount).transpose()?;
    let cost_basis = fragments.cost_basis.as_ref().map(Captured::amount).transpose()?;
    let record = TransactionRecord {
        date_sold: value(fragments.date_sold),
        date_acquired: value(fragments.date_acquired),
        sales_proceeds: sales_proceeds.unwrap_or_default(),
        description: format!(
            "{}{}",
            grammar.description_prefix,
            value(fragments.description)
        ),
        cost_basis: cost_basis.unwrap_or_default(),
        reporting_category,
    };
    Ok((record, term))
}
