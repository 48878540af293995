//! Extracted-text access port trait.

use crate::domain::error::Prosper1099Error;

/// Source of the ordered text lines extracted from a 1099-B document.
pub trait LinePort {
    fn read_lines(&self) -> Result<Vec<String>, Prosper1099Error>;
}
