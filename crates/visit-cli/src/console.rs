//! The session's single channel to the user.
//!
//! Pipeline crates never print; everything the user sees passes through a
//! [`Console`], which makes a session drivable from any reader and writer.

use std::fmt::Display;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `message` without a newline and reads one line of input.
    ///
    /// Returns `None` at end of input. The line terminator is stripped.
    pub fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}").context("write prompt")?;
        self.output.flush().context("flush prompt")?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("read input")?;
        if read == 0 {
            writeln!(self.output).context("write output")?;
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// Prints one line.
    pub fn say(&mut self, message: impl Display) -> Result<()> {
        writeln!(self.output, "{message}").context("write output")
    }

    pub fn blank_line(&mut self) -> Result<()> {
        writeln!(self.output).context("write output")
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}
