//! Visit table ingestion.
//!
//! This crate covers everything between a directory on disk and an
//! in-memory [`VisitTable`], and back again.
//!
//! # Features
//!
//! - **File Listing**: Snapshot the regular files of a directory
//! - **Encoding Detection**: BOM sniffing plus statistical detection via `chardetng`
//! - **CSV Reading**: `;`-delimited tables with the five visit columns
//! - **CSV Writing**: Overwrite a table in its original encoding
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use visit_ingest::{EncodingFallback, FileListing, VisitTable};
//!
//! let listing = FileListing::open(Path::new("data"));
//! let path = listing.path(0).unwrap();
//! let table = VisitTable::load(&path, EncodingFallback::default());
//! table.save(table.visits())?;
//! ```

mod delimited;
mod discovery;
mod encoding;
mod error;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === File Listing ===
pub use discovery::FileListing;

// === Encoding ===
pub use encoding::{
    EncodingFallback, EncodingSource, ResolvedEncoding, detect_encoding, encoding_for_label,
    resolve_encoding,
};

// === CSV Reading / Writing ===
pub use delimited::{DELIMITER, RowIssue, SaveOutcome, read_visits, write_visits};

// === Record Set ===
pub use table::VisitTable;

/// Re-exported so callers can name encodings without depending on `encoding_rs`.
pub use encoding_rs::{Encoding, UTF_8};
