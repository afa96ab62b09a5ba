//! Sorting and filtering of visit records.
//!
//! Four transforms are selectable by option code:
//!
//! | Code | Transform                         |
//! |------|-----------------------------------|
//! | `1`  | sort by duration, descending      |
//! | `2`  | sort by patient name, ascending   |
//! | `3`  | sort by report reason, ascending  |
//! | `4`  | keep visits with duration >= N    |
//!
//! The duration sort is descending while the name sorts are ascending.
//!
//! Option codes are matched after trimming surrounding whitespace, so
//! `" 3 "` selects option 3.
//!
//! All transforms are pure: they borrow the input and return a new vector.

mod engine;
mod error;
mod kind;

pub use engine::{Processed, TransformStatus, apply, process};
pub use error::{Result, TransformError};
pub use kind::{Transform, TransformKind};
