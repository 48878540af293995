#![allow(dead_code)]

use prosper1099::domain::error::Prosper1099Error;
use prosper1099::domain::transaction::TransactionRecord;
use prosper1099::ports::line_port::LinePort;
use prosper1099::ports::report_port::ReportPort;
use std::cell::RefCell;

pub struct MockLinePort {
    pub lines: Vec<String>,
    pub error: Option<String>,
}

impl MockLinePort {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines, error: None }
    }

    pub fn with_error(reason: &str) -> Self {
        Self {
            lines: Vec::new(),
            error: Some(reason.to_string()),
        }
    }
}

impl LinePort for MockLinePort {
    fn read_lines(&self) -> Result<Vec<String>, Prosper1099Error> {
        if let Some(reason) = &self.error {
            return Err(Prosper1099Error::Io(std::io::Error::other(reason.clone())));
        }
        Ok(self.lines.clone())
    }
}

#[derive(Default)]
pub struct MockReportPort {
    pub written: RefCell<Vec<TransactionRecord>>,
}

impl ReportPort for MockReportPort {
    fn write(&self, records: &[TransactionRecord]) -> Result<(), Prosper1099Error> {
        self.written.borrow_mut().extend_from_slice(records);
        Ok(())
    }
}

pub fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

/// A 2016 document: one short-term and one long-term note, with the form
/// banner and page-break rows between fragments.
pub fn legacy_document() -> Vec<String> {
    lines(&[
        "PROSPER FUNDING LLC",
        "Tax Year 2016 Form 1099-B",
        "1099-B (OMB No. 1545-0715)",
        "Short-term transactions for which basis is not reported to the IRS--Report on Form 8949, Part I, with Box B checked.",
        "1c. Date sold 1b. Date 1d. Proceeds 6. Reported to IRS 1a. Description Other",
        "or disposed acquired of property",
        "03/15/2016 01/10/2015 $43.87 123456 ABC note",
        ". Box 1e. $43.87",
        "Box 2a. Federal income tax withheld",
        "Box 3. Cost or other basis reported to IRS",
        "Box 2. Short−term",
        "Box 5. Noncovered security",
        "Box 7. Loss not allowed",
        "Applicable check box on Form 8949 B",
        "1 2 3 4 5-6 7 12/31/16 page",
        "PROSPER_2016_1099B.PDF",
        "07/01/2016 05/05/2014 ($1.25) 654321 XYZ note",
        ". Box 1e. $37.32",
        "Box 2. Long−term",
        "Applicable check box on Form 8949 E",
    ])
}

/// A 2019 document with three notes across both holding periods.
pub fn summary_document() -> Vec<String> {
    lines(&[
        "PROSPER FUNDING LLC",
        "Tax Year 2019 Combined Form",
        "02/01/2019 03/04/2018 $10.00 111111 AAA",
        "Box 1e. $9.50",
        "Applicable check box on Form 8949 B",
        "1099-B (OMB No. 1545-0715)",
        "04/05/2019 06/07/2016 $0.00 222222 BBB",
        "Box 1e. ($37.32)",
        "Applicable checkbox on Form 8949 E",
        "ACCOUNT_1099B.PDF",
        "08/09/2019 10/11/2018 $25.50 333333 CCC",
        "Box 1e. $30.00",
        "Applicable check box on Form 8949 B",
    ])
}

/// A 2024 document: two box A rows, then one box D row.
pub fn tabular_document() -> Vec<String> {
    lines(&[
        "PROSPER FUNDING LLC",
        "Tax Year 2024 Form 1099-B",
        "Covered Short-Term Gains or Losses on Net Proceeds Report on Form 8949, Part I with Box A checked",
        "1234-1 NOTE 03/04/2024 05/06/2024 $25.00 $30.00 $0.00 $0.00 ($5.00)",
        "1234-2 NOTE 01/01/2024 02/02/2024 ($1.00) $2.50 $0.00 $0.00 ($3.50)",
        "1099-B (OMB No. 1545-0715)",
        "Covered Long-Term Gains or Losses on Net Proceeds Report on Form 8949, Part II with Box D checked",
        "5678-9 NOTE 01/01/2020 02/02/2024 $4.00 $5.00 $0.00 $0.00 ($1.00)",
        "PROSPER_2024.PDF",
    ])
}
