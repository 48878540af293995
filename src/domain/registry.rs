//! Tax-year to grammar dispatch.
//!
//! The form layout changes between tax years, so each supported year is
//! registered against the grammar of its era. The registry is filled once
//! at startup and only read afterwards.

use crate::domain::error::Prosper1099Error;
use crate::domain::grammar::{Grammar, LEGACY, SUMMARY_2017, TABULAR_2024};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct ParserRegistry {
    grammars: BTreeMap<String, &'static Grammar>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in grammar registered for the tax years it covers.
    /// 2021 to 2023 are not supported.
    pub fn standard() -> Result<Self, Prosper1099Error> {
        let mut registry = Self::new();
        for year in 2015..=2016 {
            registry.register(&year.to_string(), &LEGACY)?;
        }
        for year in 2017..=2020 {
            registry.register(&year.to_string(), &SUMMARY_2017)?;
        }
        for year in 2024..=2044 {
            registry.register(&year.to_string(), &TABULAR_2024)?;
        }
        Ok(registry)
    }

    pub fn register(
        &mut self,
        version: &str,
        grammar: &'static Grammar,
    ) -> Result<(), Prosper1099Error> {
        if self.grammars.contains_key(version) {
            return Err(Prosper1099Error::DuplicateVersionRegistration {
                version: version.to_string(),
            });
        }
        self.grammars.insert(version.to_string(), grammar);
        Ok(())
    }

    pub fn lookup(&self, version: &str) -> Result<&'static Grammar, Prosper1099Error> {
        self.grammars
            .get(version)
            .copied()
            .ok_or_else(|| Prosper1099Error::UnsupportedVersion {
                version: version.to_string(),
            })
    }

    /// Registered tax years in ascending order, with their grammar.
    pub fn versions(&self) -> impl Iterator<Item = (&str, &'static Grammar)> {
        self.grammars.iter().map(|(k, g)| (k.as_str(), *g))
    }
}
