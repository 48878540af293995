//! Record output port trait.

use crate::domain::error::Prosper1099Error;
use crate::domain::transaction::TransactionRecord;

/// Port for writing converted transactions.
pub trait ReportPort {
    fn write(&self, records: &[TransactionRecord]) -> Result<(), Prosper1099Error>;
}
