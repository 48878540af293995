//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_lines_adapter::TextLinesAdapter;
use crate::domain::config_validation::{check_term_filter, validate_config};
use crate::domain::conversion::{ConversionOptions, convert};
use crate::domain::error::Prosper1099Error;
use crate::domain::registry::ParserRegistry;
use crate::domain::tax_year::EXPECTED_FIRST_LINE;
use crate::domain::transaction::TermFilter;
use crate::ports::config_port::ConfigPort;
use crate::ports::line_port::LinePort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "prosper1099",
    about = "Convert Prosper 1099-B tax form text into CSV transactions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert extracted 1099-B text (one line per PDF line) to CSV
    Convert {
        /// Text file with the extracted lines, or - for stdin
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// CSV output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Parse as this tax year instead of reading it from the document
        #[arg(long)]
        tax_year: Option<String>,
        #[arg(long)]
        exclude_short_term: bool,
        #[arg(long)]
        exclude_long_term: bool,
    },
    /// List supported tax years
    Years,
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Convert {
            input,
            config,
            output,
            tax_year,
            exclude_short_term,
            exclude_long_term,
        } => {
            let overrides = Overrides {
                tax_year,
                exclude_short_term,
                exclude_long_term,
            };
            run_convert(&input, config.as_ref(), output, &overrides)
        }
        Command::Years => run_years(),
        Command::Validate { config } => run_validate(&config),
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub tax_year: Option<String>,
    pub exclude_short_term: bool,
    pub exclude_long_term: bool,
}

/// Log filter from `RUST_LOG` directives, `warn` when unset or unreadable.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = Prosper1099Error::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn build_conversion_options(
    config: Option<&dyn ConfigPort>,
    overrides: &Overrides,
) -> Result<ConversionOptions, Prosper1099Error> {
    let mut options = ConversionOptions::default();

    if let Some(config) = config {
        validate_config(config)?;
        options.expected_first_line = config
            .get_string("document", "expected_first_line")
            .unwrap_or_else(|| EXPECTED_FIRST_LINE.to_string());
        options.tax_year = config.get_string("document", "tax_year");
        options.filter = TermFilter {
            include_short_term: config.get_bool("filter", "include_short_term", true),
            include_long_term: config.get_bool("filter", "include_long_term", true),
        };
    }

    if overrides.tax_year.is_some() {
        options.tax_year = overrides.tax_year.clone();
    }
    if overrides.exclude_short_term {
        options.filter.include_short_term = false;
    }
    if overrides.exclude_long_term {
        options.filter.include_long_term = false;
    }
    check_term_filter(options.filter)?;

    Ok(options)
}

/// Read, convert and write. Split from `run_convert` so it can be driven
/// with any ports.
pub fn run_conversion(
    lines: &dyn LinePort,
    report: &dyn ReportPort,
    options: &ConversionOptions,
) -> Result<usize, Prosper1099Error> {
    let registry = ParserRegistry::standard()?;
    let lines = lines.read_lines()?;
    let conversion = convert(&lines, &registry, options)?;
    report.write(&conversion.records)?;
    Ok(conversion.records.len())
}

fn run_convert(
    input: &PathBuf,
    config_path: Option<&PathBuf>,
    output: Option<PathBuf>,
    overrides: &Overrides,
) -> ExitCode {
    let adapter = match config_path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            match load_config(path) {
                Ok(a) => Some(a),
                Err(code) => return code,
            }
        }
        None => None,
    };

    let options = match build_conversion_options(
        adapter.as_ref().map(|a| a as &dyn ConfigPort),
        overrides,
    ) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let lines = TextLinesAdapter::new(input.clone());
    let report = CsvAdapter::new(output.clone());
    match run_conversion(&lines, &report, &options) {
        Ok(count) => {
            if let Some(path) = &output {
                eprintln!("Wrote {} transactions to {}", count, path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_years() -> ExitCode {
    let registry = match ParserRegistry::standard() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    for (year, grammar) in registry.versions() {
        println!("{year}\t{}", grammar.name);
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    match validate_config(&adapter) {
        Ok(()) => {
            println!("Config is valid");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
