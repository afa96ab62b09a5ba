//! The in-memory record set loaded from one visit file.

use std::ops::Index;
use std::path::{Path, PathBuf};

use encoding_rs::UTF_8;
use visit_model::Visit;

use crate::delimited::{RowIssue, SaveOutcome, read_visits, write_visits};
use crate::encoding::{EncodingFallback, EncodingSource, ResolvedEncoding};
use crate::error::{IngestError, Result};

/// Visits parsed from a single file, in file order.
#[derive(Debug)]
pub struct VisitTable {
    path: PathBuf,
    encoding: Option<ResolvedEncoding>,
    visits: Vec<Visit>,
    issues: Vec<RowIssue>,
    load_error: Option<IngestError>,
}

impl VisitTable {
    pub(crate) fn new(
        path: PathBuf,
        encoding: ResolvedEncoding,
        visits: Vec<Visit>,
        issues: Vec<RowIssue>,
    ) -> Self {
        Self {
            path,
            encoding: Some(encoding),
            visits,
            issues,
            load_error: None,
        }
    }

    /// Reads `path`, returning an empty table when the file cannot be loaded.
    ///
    /// The cause is logged and kept in [`VisitTable::load_error`].
    pub fn load(path: &Path, fallback: EncodingFallback) -> Self {
        match read_visits(path, fallback) {
            Ok(table) => table,
            Err(error) => {
                tracing::error!(path = %path.display(), %error, "failed to read visit file");
                Self {
                    path: path.to_path_buf(),
                    encoding: None,
                    visits: Vec::new(),
                    issues: Vec::new(),
                    load_error: Some(error),
                }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Encoding the file was read with, `None` if loading failed first.
    pub fn encoding(&self) -> Option<ResolvedEncoding> {
        self.encoding
    }

    pub fn encoding_name(&self) -> Option<&'static str> {
        self.encoding.map(|encoding| encoding.name())
    }

    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Rows skipped during parsing.
    pub fn issues(&self) -> &[RowIssue] {
        &self.issues
    }

    pub fn load_error(&self) -> Option<&IngestError> {
        self.load_error.as_ref()
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Visit> {
        self.visits.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Visit> {
        self.visits.iter()
    }

    /// Overwrites the source file with `visits`, using the source encoding.
    pub fn save(&self, visits: &[Visit]) -> Result<SaveOutcome> {
        let encoding = self.encoding.unwrap_or(ResolvedEncoding {
            encoding: UTF_8,
            source: EncodingSource::Fallback,
        });
        write_visits(&self.path, encoding, visits)
    }
}

impl Index<usize> for VisitTable {
    type Output = Visit;

    fn index(&self, index: usize) -> &Self::Output {
        &self.visits[index]
    }
}

impl<'a> IntoIterator for &'a VisitTable {
    type Item = &'a Visit;
    type IntoIter = std::slice::Iter<'a, Visit>;

    fn into_iter(self) -> Self::IntoIter {
        self.visits.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_failure_yields_empty_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.csv");
        std::fs::write(&path, "just;some;columns\n1;2;3\n").unwrap();

        let table = VisitTable::load(&path, EncodingFallback::default());

        assert!(table.is_empty());
        assert!(table.encoding().is_none());
        assert!(matches!(
            table.load_error(),
            Some(IngestError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_save_of_empty_table_is_noop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.csv");
        std::fs::write(&path, "not a visit table").unwrap();

        let table = VisitTable::load(&path, EncodingFallback::default());
        let outcome = table.save(table.visits()).unwrap();

        assert_eq!(outcome, SaveOutcome::NothingToSave);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "not a visit table");
    }
}
