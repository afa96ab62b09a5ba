//! Reading and writing `;`-delimited visit tables.

mod reader;
mod writer;

pub use reader::{RowIssue, read_visits};
pub use writer::{SaveOutcome, write_visits};

/// Field separator used by visit files.
pub const DELIMITER: u8 = b';';
