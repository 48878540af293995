//! Configuration validation.
//!
//! Validates all config fields before a conversion runs.

use crate::domain::error::Prosper1099Error;
use crate::domain::transaction::TermFilter;
use crate::ports::config_port::ConfigPort;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), Prosper1099Error> {
    validate_bool(config, "filter", "include_short_term")?;
    validate_bool(config, "filter", "include_long_term")?;
    validate_terms(config)?;
    validate_tax_year(config)?;
    Ok(())
}

fn validate_bool(config: &dyn ConfigPort, section: &str, key: &str) -> Result<(), Prosper1099Error> {
    let Some(value) = config.get_string(section, key) else {
        return Ok(());
    };
    // A value get_bool cannot read would silently fall back to the default.
    if config.get_bool(section, key, true) != config.get_bool(section, key, false) {
        return Err(Prosper1099Error::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("'{value}' is not a boolean (true/false, yes/no, 1/0)"),
        });
    }
    Ok(())
}

fn validate_terms(config: &dyn ConfigPort) -> Result<(), Prosper1099Error> {
    check_term_filter(TermFilter {
        include_short_term: config.get_bool("filter", "include_short_term", true),
        include_long_term: config.get_bool("filter", "include_long_term", true),
    })
}

/// A filter must let at least one holding period through. Shared by config
/// validation and the command-line overrides applied after it.
pub fn check_term_filter(filter: TermFilter) -> Result<(), Prosper1099Error> {
    if !filter.include_short_term && !filter.include_long_term {
        return Err(Prosper1099Error::ConfigInvalid {
            section: "filter".to_string(),
            key: "include_long_term".to_string(),
            reason: "at least one of include_short_term and include_long_term must be true"
                .to_string(),
        });
    }
    Ok(())
}

fn validate_tax_year(config: &dyn ConfigPort) -> Result<(), Prosper1099Error> {
    match config.get_string("document", "tax_year") {
        Some(year) if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) => {
            Err(Prosper1099Error::ConfigInvalid {
                section: "document".to_string(),
                key: "tax_year".to_string(),
                reason: format!("'{year}' is not a four-digit year"),
            })
        }
        _ => Ok(()),
    }
}
