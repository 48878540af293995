//! Named line patterns and the semantic roles of their capture groups.
//!
//! Grammar versions differ in literal wording and group layout, but every
//! capture group plays one of a small set of roles. A [`Pattern`] records
//! which role each group plays so the scanner can collect fragment values
//! without knowing the version it is running.

use regex::Regex;

/// What a captured group means in the assembled record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    DateSold,
    DateAcquired,
    Proceeds,
    Description,
    CostBasis,
    Category,
    Term,
}

/// A regular expression that must match a whole line, plus one role per
/// capture group (group `i + 1` plays `roles[i]`).
#[derive(Debug, Clone)]
pub struct Pattern {
    name: &'static str,
    source: &'static str,
    regex: Regex,
    roles: &'static [Role],
}

impl Pattern {
    /// Compile `source` anchored at both ends.
    ///
    /// Panics if `source` is not a valid regex or its group count differs
    /// from `roles.len()`. Patterns are compile-time constants, so either
    /// case is a programming error caught by the grammar table tests.
    pub fn new(name: &'static str, source: &'static str, roles: &'static [Role]) -> Self {
        let regex = Regex::new(&format!("^(?:{source})$"))
            .unwrap_or_else(|e| panic!("invalid pattern {name}: {e}"));
        assert_eq!(
            regex.captures_len() - 1,
            roles.len(),
            "pattern {name} has {} groups but {} roles",
            regex.captures_len() - 1,
            roles.len()
        );
        Self {
            name,
            source,
            regex,
            roles,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The pattern text as written, without the added anchors.
    pub fn source(&self) -> &'static str {
        self.source
    }

    pub fn roles(&self) -> &'static [Role] {
        self.roles
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// Match `line` and return the captured text for every role.
    pub fn capture(&self, line: &str) -> Option<Vec<(Role, String)>> {
        let caps = self.regex.captures(line)?;
        Some(
            self.roles
                .iter()
                .enumerate()
                .filter_map(|(i, role)| caps.get(i + 1).map(|m| (*role, m.as_str().to_string())))
                .collect(),
        )
    }

    /// `"<name> /<source>/"`, the form used in error messages.
    pub fn describe(&self) -> String {
        format!("{} /{}/", self.name, self.source)
    }
}
