//! CLI integration tests.
//!
//! Tests cover:
//! - Argument parsing for each subcommand
//! - Config to option mapping (build_conversion_options) and flag overrides
//! - Full convert runs over real files on disk
//! - Exit codes for each failure class

mod common;

use clap::Parser;
use common::*;
use prosper1099::adapters::file_config_adapter::FileConfigAdapter;
use prosper1099::cli::{self, Cli, Command, Overrides};
use prosper1099::domain::error::Prosper1099Error;
use prosper1099::domain::tax_year::EXPECTED_FIRST_LINE;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

fn write_temp_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn write_document(lines: &[String]) -> tempfile::NamedTempFile {
    write_temp_file(&(lines.join("\n") + "\n"))
}

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("prosper1099").chain(args.iter().copied())).unwrap()
}

fn same_code(actual: ExitCode, expected: ExitCode) -> bool {
    // ExitCode has no PartialEq on every toolchain; compare the debug form
    format!("{actual:?}") == format!("{expected:?}")
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    rdr.records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

const VALID_INI: &str = r#"
[document]
expected_first_line = PROSPER FUNDING LLC

[filter]
include_short_term = true
include_long_term = true
"#;

mod argument_parsing {
    use super::*;

    #[test]
    fn convert_with_all_flags() {
        let cli = parse(&[
            "convert",
            "--input",
            "in.txt",
            "--config",
            "c.ini",
            "--output",
            "out.csv",
            "--tax-year",
            "2019",
            "--exclude-long-term",
        ]);
        match cli.command {
            Command::Convert {
                input,
                config,
                output,
                tax_year,
                exclude_short_term,
                exclude_long_term,
            } => {
                assert_eq!(input.to_str(), Some("in.txt"));
                assert_eq!(config.unwrap().to_str(), Some("c.ini"));
                assert_eq!(output.unwrap().to_str(), Some("out.csv"));
                assert_eq!(tax_year.as_deref(), Some("2019"));
                assert!(!exclude_short_term);
                assert!(exclude_long_term);
            }
            other => panic!("expected Convert, got {other:?}"),
        }
    }

    #[test]
    fn convert_requires_input() {
        assert!(Cli::try_parse_from(["prosper1099", "convert"]).is_err());
    }

    #[test]
    fn years_and_validate() {
        assert!(matches!(parse(&["years"]).command, Command::Years));
        assert!(matches!(
            parse(&["validate", "-c", "x.ini"]).command,
            Command::Validate { .. }
        ));
    }
}

mod config_loading {
    use super::*;

    #[test]
    fn defaults_without_config() {
        let options = cli::build_conversion_options(None, &Overrides::default()).unwrap();
        assert_eq!(options.expected_first_line, EXPECTED_FIRST_LINE);
        assert_eq!(options.tax_year, None);
        assert!(options.filter.include_short_term);
        assert!(options.filter.include_long_term);
    }

    #[test]
    fn reads_document_and_filter_sections() {
        let adapter = FileConfigAdapter::from_string(
            "[document]\nexpected_first_line = ACME\ntax_year = 2018\n\n[filter]\ninclude_short_term = no\n",
        )
        .unwrap();
        let options = cli::build_conversion_options(Some(&adapter), &Overrides::default()).unwrap();
        assert_eq!(options.expected_first_line, "ACME");
        assert_eq!(options.tax_year.as_deref(), Some("2018"));
        assert!(!options.filter.include_short_term);
        assert!(options.filter.include_long_term);
    }

    #[test]
    fn flags_override_config() {
        let adapter =
            FileConfigAdapter::from_string("[document]\ntax_year = 2018\n").unwrap();
        let overrides = Overrides {
            tax_year: Some("2024".to_string()),
            exclude_short_term: true,
            exclude_long_term: false,
        };
        let options = cli::build_conversion_options(Some(&adapter), &overrides).unwrap();
        assert_eq!(options.tax_year.as_deref(), Some("2024"));
        assert!(!options.filter.include_short_term);
    }

    #[test]
    fn excluding_both_terms_is_rejected() {
        let overrides = Overrides {
            exclude_short_term: true,
            exclude_long_term: true,
            ..Overrides::default()
        };
        let err = cli::build_conversion_options(None, &overrides).unwrap_err();
        assert!(matches!(err, Prosper1099Error::ConfigInvalid { .. }));
    }

    #[test]
    fn flags_and_config_report_both_terms_excluded_alike() {
        let adapter = FileConfigAdapter::from_string(
            "[filter]\ninclude_short_term = false\ninclude_long_term = false\n",
        )
        .unwrap();
        let from_config =
            cli::build_conversion_options(Some(&adapter), &Overrides::default()).unwrap_err();

        let adapter = FileConfigAdapter::from_string("[filter]\ninclude_short_term = false\n").unwrap();
        let overrides = Overrides {
            exclude_long_term: true,
            ..Overrides::default()
        };
        let from_flags = cli::build_conversion_options(Some(&adapter), &overrides).unwrap_err();

        assert_eq!(from_config.to_string(), from_flags.to_string());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let adapter = FileConfigAdapter::from_string("[filter]\ninclude_long_term = sometimes\n").unwrap();
        let err = cli::build_conversion_options(Some(&adapter), &Overrides::default()).unwrap_err();
        assert!(matches!(
            err,
            Prosper1099Error::ConfigInvalid { key, .. } if key == "include_long_term"
        ));
    }

    #[test]
    fn load_config_missing_file_fails() {
        let path = std::path::PathBuf::from("/nonexistent/prosper1099.ini");
        assert!(cli::load_config(&path).is_err());
    }
}

mod logging {
    use super::*;

    #[test]
    fn rust_log_level_is_kept() {
        let filter = cli::log_filter(Some("debug")).to_string();
        assert!(filter.contains("debug"), "{filter}");
        assert!(!filter.contains("warn"), "{filter}");
    }

    #[test]
    fn rust_log_targets_are_kept() {
        let filter = cli::log_filter(Some("prosper1099=trace")).to_string();
        assert!(filter.contains("prosper1099=trace"), "{filter}");
    }

    #[test]
    fn defaults_to_warn() {
        assert_eq!(cli::log_filter(None).to_string(), "warn");
        assert_eq!(cli::log_filter(Some("  ")).to_string(), "warn");
    }
}

mod convert_command {
    use super::*;

    #[test]
    fn writes_csv_for_summary_document() {
        let input = write_document(&summary_document());
        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("out.csv");

        let code = cli::run(parse(&[
            "convert",
            "-i",
            input.path().to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]));
        assert!(same_code(code, ExitCode::SUCCESS));

        let rows = read_rows(&output);
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            vec![
                "02/01/2019",
                "03/04/2018",
                "10.00",
                "Prosper Note 111111 AAA",
                "9.50",
                "B"
            ]
        );
    }

    #[test]
    fn config_filter_applies() {
        let input = write_document(&tabular_document());
        let config = write_temp_file("[filter]\ninclude_short_term = false\n");
        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("out.csv");

        let code = cli::run(parse(&[
            "convert",
            "-i",
            input.path().to_str().unwrap(),
            "-c",
            config.path().to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]));
        assert!(same_code(code, ExitCode::SUCCESS));

        let rows = read_rows(&output);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][5], "D");
    }

    #[test]
    fn crlf_input_converts() {
        let input = write_temp_file(&(legacy_document().join("\r\n") + "\r\n"));
        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("out.csv");

        let code = cli::run(parse(&[
            "convert",
            "-i",
            input.path().to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]));
        assert!(same_code(code, ExitCode::SUCCESS));
        assert_eq!(read_rows(&output).len(), 2);
    }

    #[test]
    fn missing_input_exits_with_io_code() {
        let code = cli::run(parse(&["convert", "-i", "/nonexistent/lines.txt"]));
        assert!(same_code(code, ExitCode::from(1)));
    }

    #[test]
    fn scan_error_exits_with_scan_code() {
        let mut doc = summary_document();
        doc.truncate(12);
        let input = write_document(&doc);
        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("out.csv");

        let code = cli::run(parse(&[
            "convert",
            "-i",
            input.path().to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]));
        assert!(same_code(code, ExitCode::from(4)));
        assert!(!output.exists());
    }

    #[test]
    fn unsupported_year_exits_with_document_code() {
        let input = write_document(&summary_document());
        let code = cli::run(parse(&[
            "convert",
            "-i",
            input.path().to_str().unwrap(),
            "--tax-year",
            "2022",
        ]));
        assert!(same_code(code, ExitCode::from(5)));
    }

    #[test]
    fn bad_config_exits_with_config_code() {
        let input = write_document(&summary_document());
        let config = write_temp_file("[document]\ntax_year = 19\n");
        let code = cli::run(parse(&[
            "convert",
            "-i",
            input.path().to_str().unwrap(),
            "-c",
            config.path().to_str().unwrap(),
        ]));
        assert!(same_code(code, ExitCode::from(2)));
    }
}

mod other_commands {
    use super::*;

    #[test]
    fn years_succeeds() {
        assert!(same_code(cli::run(parse(&["years"])), ExitCode::SUCCESS));
    }

    #[test]
    fn validate_accepts_valid_config() {
        let config = write_temp_file(VALID_INI);
        let code = cli::run(parse(&["validate", "-c", config.path().to_str().unwrap()]));
        assert!(same_code(code, ExitCode::SUCCESS));
    }

    #[test]
    fn validate_rejects_malformed_ini() {
        let config = write_temp_file("[filter\ninclude_long_term = no\n");
        let code = cli::run(parse(&["validate", "-c", config.path().to_str().unwrap()]));
        assert!(same_code(code, ExitCode::from(2)));
    }

    #[test]
    fn validate_rejects_both_terms_excluded() {
        let config =
            write_temp_file("[filter]\ninclude_short_term = false\ninclude_long_term = false\n");
        let code = cli::run(parse(&["validate", "-c", config.path().to_str().unwrap()]));
        assert!(same_code(code, ExitCode::from(2)));
    }
}
