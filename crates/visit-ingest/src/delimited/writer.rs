//! Visit table serialization.

use std::io;
use std::path::Path;

use encoding_rs::UTF_8;
use visit_model::Visit;

use crate::encoding::{EncodingSource, ResolvedEncoding};
use crate::error::{IngestError, Result};

use super::DELIMITER;

/// Result of a save request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The file was overwritten with `rows` data rows.
    Saved { rows: usize },
    /// Nothing was given to save; the file was left untouched.
    NothingToSave,
}

/// Overwrites `path` with a header row followed by one row per visit.
///
/// An empty `visits` slice leaves the file untouched. Text is encoded with
/// `encoding`; a UTF-8 byte order mark is written back when the source had
/// one.
///
/// # Errors
///
/// Returns [`IngestError::FileWrite`] when serialization or the write fails.
pub fn write_visits(
    path: &Path,
    encoding: ResolvedEncoding,
    visits: &[Visit],
) -> Result<SaveOutcome> {
    if visits.is_empty() {
        tracing::info!(path = %path.display(), "no visits to save");
        return Ok(SaveOutcome::NothingToSave);
    }
    let _span = tracing::info_span!("write_visits", path = %path.display()).entered();

    let write_failed = |source| write_error(path, source);

    let mut writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .from_writer(Vec::new());
    for visit in visits {
        writer
            .serialize(visit.to_row())
            .map_err(|e| write_failed(io::Error::from(e)))?;
    }
    let buffer = writer
        .into_inner()
        .map_err(|e| write_failed(e.into_error()))?;
    let text = String::from_utf8(buffer)
        .map_err(|e| write_failed(io::Error::new(io::ErrorKind::InvalidData, e)))?;

    let (encoded, output_encoding, unmappable) = encoding.encoding.encode(&text);
    if unmappable {
        tracing::warn!(
            encoding = output_encoding.name(),
            "characters not representable in the file encoding were escaped"
        );
    }

    let mut bytes = Vec::with_capacity(encoded.len() + 3);
    if encoding.source == EncodingSource::Bom && output_encoding == UTF_8 {
        bytes.extend_from_slice(b"\xEF\xBB\xBF");
    }
    bytes.extend_from_slice(&encoded);

    std::fs::write(path, &bytes).map_err(write_failed)?;

    tracing::info!(
        rows = visits.len(),
        encoding = output_encoding.name(),
        "saved visit table"
    );
    Ok(SaveOutcome::Saved { rows: visits.len() })
}

/// Every failure on the save path, serialization included, is a write error.
fn write_error(path: &Path, source: io::Error) -> IngestError {
    IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    }
}
