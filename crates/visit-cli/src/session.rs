//! One interactive run: pick a file, transform its visits, maybe save.
//!
//! The session never re-prompts. Any unusable answer is reported and ends
//! the run with [`SessionOutcome::InvalidInput`].
//!
//! Every answer is trimmed before it is interpreted: `" 2 "` selects the
//! second file and `" YES "` confirms the save. The option code accepts the
//! same padding. The directory path is trimmed too, so a path that really
//! starts or ends with spaces cannot be entered.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Result;
use tracing::{debug, info, info_span, warn};

use visit_ingest::{EncodingFallback, EncodingSource, FileListing, SaveOutcome, VisitTable};
use visit_transform::{TransformError, TransformKind, TransformStatus, process};

use crate::console::Console;
use crate::display::{file_table, visit_table};
use crate::logging::redact_value;

/// Settings that shape a session but are not asked interactively.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub encoding_fallback: EncodingFallback,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The directory had no regular files (or could not be read).
    NoFiles,
    /// An answer could not be used; the session stopped there.
    InvalidInput,
    /// The file was overwritten with the transformed visits.
    Saved { rows: usize },
    /// Saving was requested but there were no visits to write.
    NothingToSave,
    /// Saving was requested and the write failed.
    SaveFailed,
    /// The user declined to save.
    Discarded,
}

impl SessionOutcome {
    /// Process exit code for this outcome.
    pub fn exit_code(self) -> i32 {
        match self {
            SessionOutcome::InvalidInput | SessionOutcome::SaveFailed => 1,
            _ => 0,
        }
    }
}

pub struct Session<R, W> {
    console: Console<R, W>,
    options: SessionOptions,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, options: SessionOptions) -> Self {
        Self {
            console: Console::new(input, output),
            options,
        }
    }

    /// Runs the session to completion.
    ///
    /// # Errors
    ///
    /// Only console I/O failures are errors; everything else is reported to
    /// the user and reflected in the returned outcome.
    pub fn run(&mut self) -> Result<SessionOutcome> {
        let _span = info_span!("session").entered();

        // Directory
        let Some(directory) = self.console.prompt("Enter directory path: ")? else {
            return self.invalid_input();
        };
        let listing = FileListing::open(Path::new(directory.trim()));
        if let Some(error) = listing.access_error() {
            self.console
                .say(format_args!("Error listing files: {error}"))?;
        }
        self.console
            .say(format_args!("Files in directory: {}", listing.len()))?;
        if listing.is_empty() {
            self.console.say("This directory has no files.")?;
            return Ok(SessionOutcome::NoFiles);
        }
        self.console.say("Files:")?;
        self.console.say(file_table(&listing))?;

        // File selection
        let Some(table) = self.select_file(&listing)? else {
            return Ok(SessionOutcome::InvalidInput);
        };
        self.report_load(&table)?;
        self.console.blank_line()?;
        self.console.say("Contents of the selected file:")?;
        self.console.say(visit_table(table.visits()))?;
        for visit in &table {
            tracing::trace!(visit = redact_value(&visit.to_string()), "loaded visit");
        }

        // Transform
        self.console.blank_line()?;
        self.console.say("Choose a processing option:")?;
        for kind in TransformKind::ALL {
            self.console
                .say(format_args!("{}. {}", kind.code(), kind.label()))?;
        }
        let Some(code) = self.console.prompt("Enter option number: ")? else {
            return self.invalid_input();
        };
        let criteria = match code.parse::<TransformKind>() {
            Ok(kind) if kind.needs_criteria() => {
                let Some(answer) = self
                    .console
                    .prompt("Enter minimum duration for filtering: ")?
                else {
                    return self.invalid_input();
                };
                match answer.trim().parse::<i64>() {
                    Ok(value) => Some(value),
                    Err(_) => return self.invalid_input(),
                }
            }
            _ => None,
        };
        let processed = process(table.visits(), &code, criteria);
        match &processed.status {
            TransformStatus::Applied(transform) => {
                debug!(transform = %transform.kind(), "transform applied");
            }
            TransformStatus::Rejected(TransformError::InvalidChoice { .. }) => {
                self.console.say("Invalid choice.")?;
            }
            TransformStatus::Rejected(error) => {
                self.console.say(format_args!("{error}."))?;
            }
        }
        self.console.say(visit_table(&processed.visits))?;

        // Save
        let Some(answer) = self
            .console
            .prompt("Save the processed data back to the file? (yes/no): ")?
        else {
            return self.invalid_input();
        };
        if !answer.trim().eq_ignore_ascii_case("yes") {
            self.console.say("Changes not saved.")?;
            info!("changes discarded");
            return Ok(SessionOutcome::Discarded);
        }
        let outcome = match table.save(&processed.visits) {
            Ok(SaveOutcome::Saved { rows }) => {
                self.console
                    .say(format_args!("Changes saved ({rows} records)."))?;
                SessionOutcome::Saved { rows }
            }
            Ok(SaveOutcome::NothingToSave) => {
                self.console.say("No data to save.")?;
                SessionOutcome::NothingToSave
            }
            Err(error) => {
                tracing::error!(%error, "save failed");
                self.console
                    .say(format_args!("Error saving CSV file: {error}"))?;
                SessionOutcome::SaveFailed
            }
        };
        Ok(outcome)
    }

    /// Prompts for a 1-based file number and loads that file.
    ///
    /// Returns `None` after reporting an unusable answer.
    fn select_file(&mut self, listing: &FileListing) -> Result<Option<VisitTable>> {
        let message = format!("Select a file (1-{}): ", listing.len());
        let Some(answer) = self.console.prompt(&message)? else {
            self.invalid_input()?;
            return Ok(None);
        };
        let Ok(number) = answer.trim().parse::<i64>() else {
            self.invalid_input()?;
            return Ok(None);
        };
        let path = usize::try_from(number)
            .ok()
            .and_then(|number| number.checked_sub(1))
            .and_then(|index| listing.path(index));
        let Some(path) = path else {
            warn!(number, files = listing.len(), "file selection out of range");
            self.console.say("Invalid file selection.")?;
            return Ok(None);
        };
        info!(path = %path.display(), "selected file");
        Ok(Some(VisitTable::load(
            &path,
            self.options.encoding_fallback,
        )))
    }

    fn report_load(&mut self, table: &VisitTable) -> Result<()> {
        if let Some(error) = table.load_error() {
            return self
                .console
                .say(format_args!("Error reading CSV file: {error}"));
        }
        if let Some(encoding) = table.encoding() {
            match encoding.source {
                EncodingSource::Fallback => self.console.say(format_args!(
                    "Encoding could not be detected, using {}.",
                    encoding.name()
                ))?,
                EncodingSource::Bom | EncodingSource::Detected => self
                    .console
                    .say(format_args!("Encoding: {}", encoding.name()))?,
            }
        }
        for issue in table.issues() {
            self.console.say(format_args!("Skipped row at {issue}"))?;
        }
        Ok(())
    }

    fn invalid_input(&mut self) -> Result<SessionOutcome> {
        warn!("session ended on invalid input");
        self.console.say("Invalid input.")?;
        Ok(SessionOutcome::InvalidInput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> (SessionOutcome, String) {
        let mut output = Vec::new();
        let outcome = Session::new(input.as_bytes(), &mut output, SessionOptions::default())
            .run()
            .unwrap();
        (outcome, String::from_utf8(output).unwrap())
    }

    #[test]
    fn eof_at_first_prompt_is_invalid_input() {
        let (outcome, output) = run("");
        assert_eq!(outcome, SessionOutcome::InvalidInput);
        assert!(output.ends_with("Invalid input.\n"));
    }

    #[test]
    fn missing_directory_reports_and_ends() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let (outcome, output) = run(&format!("{}\n", missing.display()));

        assert_eq!(outcome, SessionOutcome::NoFiles);
        assert!(output.contains("Error listing files: directory not found"));
        assert!(output.contains("Files in directory: 0"));
        assert!(output.contains("This directory has no files."));
    }

    #[test]
    fn exit_codes() {
        assert_eq!(SessionOutcome::InvalidInput.exit_code(), 1);
        assert_eq!(SessionOutcome::SaveFailed.exit_code(), 1);
        assert_eq!(SessionOutcome::Discarded.exit_code(), 0);
        assert_eq!(SessionOutcome::NoFiles.exit_code(), 0);
        assert_eq!(SessionOutcome::Saved { rows: 2 }.exit_code(), 0);
    }
}
