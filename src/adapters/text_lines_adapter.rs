//! Plain-text line source adapter.
//!
//! Reads text already extracted from the PDF, one document line per text
//! line, from a file or standard input.

use crate::domain::error::Prosper1099Error;
use crate::ports::line_port::LinePort;
use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;

pub enum TextLinesAdapter {
    File(PathBuf),
    Stdin,
}

impl TextLinesAdapter {
    /// `-` reads standard input.
    pub fn new(path: PathBuf) -> Self {
        if path.as_os_str() == "-" {
            Self::Stdin
        } else {
            Self::File(path)
        }
    }

    fn collect<R: BufRead>(reader: R) -> Result<Vec<String>, Prosper1099Error> {
        reader
            .lines()
            .map(|line| line.map_err(Prosper1099Error::from))
            .collect()
    }
}

impl LinePort for TextLinesAdapter {
    fn read_lines(&self) -> Result<Vec<String>, Prosper1099Error> {
        match self {
            Self::File(path) => {
                let file = fs::File::open(path).map_err(|e| {
                    Prosper1099Error::Io(io::Error::new(
                        e.kind(),
                        format!("failed to read {}: {}", path.display(), e),
                    ))
                })?;
                Self::collect(io::BufReader::new(file))
            }
            Self::Stdin => Self::collect(io::stdin().lock()),
        }
    }
}
