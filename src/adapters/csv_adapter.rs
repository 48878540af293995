//! CSV report adapter.

use crate::domain::error::Prosper1099Error;
use crate::domain::transaction::{HEADER, TransactionRecord};
use crate::ports::report_port::ReportPort;
use std::fs;
use std::io;
use std::path::PathBuf;

pub struct CsvAdapter {
    output_path: Option<PathBuf>,
}

impl CsvAdapter {
    /// Write to `output_path`, or to standard output when `None`.
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }
}

/// Write the header row followed by one row per record.
pub fn write_records<W: io::Write>(
    writer: W,
    records: &[TransactionRecord],
) -> Result<(), Prosper1099Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER).map_err(csv_error)?;
    for record in records {
        wtr.write_record(record.to_row()).map_err(csv_error)?;
    }
    wtr.flush()?;
    Ok(())
}

fn csv_error(e: csv::Error) -> Prosper1099Error {
    Prosper1099Error::Output {
        reason: format!("CSV write error: {}", e),
    }
}

impl ReportPort for CsvAdapter {
    fn write(&self, records: &[TransactionRecord]) -> Result<(), Prosper1099Error> {
        match &self.output_path {
            Some(path) => {
                let file = fs::File::create(path).map_err(|e| Prosper1099Error::Output {
                    reason: format!("failed to create {}: {}", path.display(), e),
                })?;
                write_records(file, records)
            }
            None => write_records(io::stdout().lock(), records),
        }
    }
}
