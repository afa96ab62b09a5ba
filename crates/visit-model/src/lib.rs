//! Data model for medical visit tables.
//!
//! A visit table is a `;`-delimited file with five fixed columns. Each data
//! row becomes one immutable [`Visit`]. [`VisitRow`] is the textual form of a
//! row as it appears on disk, before the duration is parsed.

pub mod column;
pub mod error;
pub mod visit;

pub use column::VisitColumn;
pub use error::{Result, VisitError};
pub use visit::{Visit, VisitRow};
