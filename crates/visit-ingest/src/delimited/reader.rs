//! Visit table parsing.

use std::fmt;
use std::path::Path;

use visit_model::{Visit, VisitColumn, VisitRow};

use crate::encoding::{EncodingFallback, resolve_encoding};
use crate::error::{IngestError, Result};
use crate::table::VisitTable;

use super::DELIMITER;

/// A data row that was skipped while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIssue {
    /// 1-based line number in the file.
    pub line: u64,
    pub message: String,
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Reads a visit table from `path`.
///
/// The header row must name all five visit columns; extra columns are
/// ignored. Rows that cannot become a [`Visit`] are skipped and reported in
/// [`VisitTable::issues`].
///
/// # Errors
///
/// Fails when the file cannot be read or decoded, or when a required column
/// is missing.
pub fn read_visits(path: &Path, fallback: EncodingFallback) -> Result<VisitTable> {
    let _span = tracing::info_span!("read_visits", path = %path.display()).entered();

    let bytes = std::fs::read(path).map_err(|e| IngestError::from_read(path, e))?;
    let encoding = resolve_encoding(path, &bytes, fallback)?;
    let (text, had_errors) = encoding.encoding.decode_with_bom_removal(&bytes);
    if had_errors {
        tracing::warn!(
            encoding = encoding.name(),
            "malformed sequences replaced while decoding"
        );
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            source: e,
        })?
        .clone();
    check_headers(path, &headers)?;

    let mut visits = Vec::new();
    let mut issues = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        let line = record.position().map_or(0, csv::Position::line);

        let row = match record.deserialize::<VisitRow>(Some(&headers)) {
            Ok(row) => row,
            Err(error) => {
                issues.push(skip_row(line, format!("incomplete row: {error}")));
                continue;
            }
        };
        match Visit::try_from(row) {
            Ok(visit) => visits.push(visit),
            Err(error) => issues.push(skip_row(line, error.to_string())),
        }
    }

    tracing::info!(
        encoding = encoding.name(),
        visits = visits.len(),
        skipped = issues.len(),
        "loaded visit table"
    );

    Ok(VisitTable::new(
        path.to_path_buf(),
        encoding,
        visits,
        issues,
    ))
}

fn check_headers(path: &Path, headers: &csv::StringRecord) -> Result<()> {
    for column in VisitColumn::ALL {
        if !headers.iter().any(|header| header == column.header()) {
            return Err(IngestError::MissingColumn {
                column: column.header().to_string(),
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}

fn skip_row(line: u64, message: String) -> RowIssue {
    let issue = RowIssue { line, message };
    tracing::warn!(line = issue.line, reason = %issue.message, "skipping row");
    issue
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "№ обращения;ФИО пациента;ФИО врача;Причина обращения;Длительность";

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_visits_in_file_order() {
        let file = create_temp_csv(&format!(
            "{HEADER}\n1;Б;Врач;Осмотр;5\n2;А;Врач;Анализы;10\n"
        ));
        let table = read_visits(file.path(), EncodingFallback::Abort).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table[0].visit_id(), "1");
        assert_eq!(table[1].period(), 10);
        assert!(table.issues().is_empty());
    }

    #[test]
    fn test_non_integer_duration_is_skipped() {
        let file = create_temp_csv(&format!(
            "{HEADER}\n1;Б;Врач;Осмотр;5\n2;А;Врач;Анализы;долго\n3;В;Врач;Осмотр;7\n"
        ));
        let table = read_visits(file.path(), EncodingFallback::Abort).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table[1].visit_id(), "3");
        assert_eq!(table.issues().len(), 1);
        assert_eq!(table.issues()[0].line, 3);
    }

    #[test]
    fn test_short_row_is_skipped() {
        let file = create_temp_csv(&format!("{HEADER}\n1;Б;Врач\n2;А;Врач;Анализы;10\n"));
        let table = read_visits(file.path(), EncodingFallback::Abort).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.issues().len(), 1);
        assert_eq!(table.issues()[0].line, 2);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let content = "№ обращения;ФИО пациента;ФИО врача;Причина обращения\n1;А;Б;В\n";
        let file = create_temp_csv(content);
        let result = read_visits(file.path(), EncodingFallback::Abort);

        assert!(matches!(
            result,
            Err(IngestError::MissingColumn { ref column, .. }) if column == "Длительность"
        ));
    }

    #[test]
    fn test_columns_matched_by_name() {
        let file = create_temp_csv(
            "Длительность;Примечание;ФИО врача;ФИО пациента;Причина обращения;№ обращения\n\
             12;-;Врач;Пациент;Осмотр;9\n",
        );
        let table = read_visits(file.path(), EncodingFallback::Abort).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table[0].visit_id(), "9");
        assert_eq!(table[0].patient_name(), "Пациент");
        assert_eq!(table[0].period(), 12);
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let file = create_temp_csv(&format!("\u{feff}{HEADER}\n1;А;Б;В;3\n"));
        let table = read_visits(file.path(), EncodingFallback::Abort).unwrap();

        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = read_visits(&dir.path().join("missing.csv"), EncodingFallback::default());

        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
