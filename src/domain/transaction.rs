//! Normalized 1099-B transaction records.

/// Column names of the six-field output layout, in record order.
pub const HEADER: [&str; 6] = [
    "Date Sold",
    "Date Acquired",
    "Sales Proceeds",
    "Description",
    "Cost Basis",
    "Reporting Category",
];

/// One sale of a note as reported on the form. Amounts are signed display
/// text (`"12.34"`, `"-5.00"`), dates are copied as printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub date_sold: String,
    pub date_acquired: String,
    pub sales_proceeds: String,
    pub description: String,
    pub cost_basis: String,
    pub reporting_category: String,
}

impl TransactionRecord {
    /// Fields in [`HEADER`] order.
    pub fn to_row(&self) -> [&str; 6] {
        [
            &self.date_sold,
            &self.date_acquired,
            &self.sales_proceeds,
            &self.description,
            &self.cost_basis,
            &self.reporting_category,
        ]
    }
}

/// Holding period of a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    ShortTerm,
    LongTerm,
}

impl Term {
    /// Parse the word printed in a `Box 2.` line.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Short" => Some(Term::ShortTerm),
            "Long" => Some(Term::LongTerm),
            _ => None,
        }
    }

    /// Form 8949 boxes A-C are Part I (short-term), D-F are Part II
    /// (long-term). Other letters carry no holding period.
    pub fn from_category(category: &str) -> Option<Self> {
        match category {
            "A" | "B" | "C" => Some(Term::ShortTerm),
            "D" | "E" | "F" => Some(Term::LongTerm),
            _ => None,
        }
    }
}

/// Record-level inclusion by holding period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermFilter {
    pub include_short_term: bool,
    pub include_long_term: bool,
}

impl Default for TermFilter {
    fn default() -> Self {
        Self {
            include_short_term: true,
            include_long_term: true,
        }
    }
}

impl TermFilter {
    /// Records whose term is unknown are always included.
    pub fn includes(&self, term: Option<Term>) -> bool {
        match term {
            Some(Term::ShortTerm) => self.include_short_term,
            Some(Term::LongTerm) => self.include_long_term,
            None => true,
        }
    }
}
