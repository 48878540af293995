//! Domain error types.

/// A structural error raised while scanning the extracted lines.
///
/// Every variant carries the offending text and the pattern(s) it was
/// checked against so that layout drift in new documents can be diagnosed
/// from the message alone.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error(
        "{}malformed dollar amount '{token}': expected one of {patterns:?}",
        location(.line_number, .line)
    )]
    MalformedAmount {
        /// Set once the scanner knows which line the token came from.
        line_number: Option<usize>,
        line: Option<String>,
        token: String,
        patterns: Vec<String>,
    },

    #[error(
        "line {line_number} '{line}' matches {found} without a preceding line matching {expected:?}"
    )]
    OutOfOrderFragment {
        line_number: usize,
        line: String,
        found: String,
        expected: Vec<String>,
    },

    #[error(
        "reached end of input while completing the record started at line {line_number} '{line}': expected a line matching {expected:?}"
    )]
    TruncatedRecord {
        line_number: usize,
        line: String,
        expected: Vec<String>,
    },

    #[error(
        "line {line_number} '{line}' has no reporting category: no line matching {declaration:?} seen before it"
    )]
    MissingCarriedCategory {
        line_number: usize,
        line: String,
        declaration: String,
    },

    #[error("grammar {grammar} has no fragment supplying {role}")]
    IncompleteGrammar { grammar: String, role: String },
}

impl ScanError {
    /// 1-based position of the offending line, when the error has one.
    pub fn line_number(&self) -> Option<usize> {
        match self {
            ScanError::MalformedAmount { line_number, .. } => *line_number,
            ScanError::IncompleteGrammar { .. } => None,
            ScanError::OutOfOrderFragment { line_number, .. }
            | ScanError::TruncatedRecord { line_number, .. }
            | ScanError::MissingCarriedCategory { line_number, .. } => Some(*line_number),
        }
    }

    /// Attach the source line to a `MalformedAmount`. Other variants
    /// already carry their position and are returned unchanged.
    pub fn at_line(self, number: usize, text: &str) -> Self {
        match self {
            ScanError::MalformedAmount {
                token, patterns, ..
            } => ScanError::MalformedAmount {
                line_number: Some(number),
                line: Some(text.to_string()),
                token,
                patterns,
            },
            other => other,
        }
    }
}

fn location(line_number: &Option<usize>, line: &Option<String>) -> String {
    match (line_number, line) {
        (Some(n), Some(text)) => format!("line {n} '{text}': "),
        (Some(n), None) => format!("line {n}: "),
        _ => String::new(),
    }
}

/// Top-level error type for prosper1099.
#[derive(Debug, thiserror::Error)]
pub enum Prosper1099Error {
    #[error("tax year {version} isn't supported")]
    UnsupportedVersion { version: String },

    #[error("a transaction parser is already registered for tax year {version}")]
    DuplicateVersionRegistration { version: String },

    #[error("unable to find tax year: expected a line matching one of {patterns:?}")]
    TaxYearNotFound { patterns: Vec<String> },

    #[error("first line must be '{expected}', found '{found}'")]
    UnexpectedFirstLine { expected: String, found: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("output error: {reason}")]
    Output { reason: String },

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&Prosper1099Error> for std::process::ExitCode {
    fn from(err: &Prosper1099Error) -> Self {
        let code: u8 = match err {
            Prosper1099Error::Io(_) => 1,
            Prosper1099Error::ConfigParse { .. }
            | Prosper1099Error::ConfigInvalid { .. }
            | Prosper1099Error::DuplicateVersionRegistration { .. } => 2,
            Prosper1099Error::Output { .. } => 3,
            Prosper1099Error::Scan(_) => 4,
            Prosper1099Error::UnsupportedVersion { .. }
            | Prosper1099Error::TaxYearNotFound { .. }
            | Prosper1099Error::UnexpectedFirstLine { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
