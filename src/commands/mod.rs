//! Command handlers for the zenwealth CLI.
//!
//! This module contains implementations for all CLI subcommands. Each one maps to a single user
//! action: adding, deleting, importing, exporting or clearing transactions, or one of the views.

mod delete;
mod export;
mod import;
mod init;
mod insert;
mod query;

use crate::args::OutputFormat;
use crate::Result;
use anyhow::Context;
use serde::Serialize;
use std::fmt::Debug;
use std::io::{BufRead, Write};
use tracing::debug;

pub use delete::{clear, delete_transaction};
pub use export::export;
pub use import::{import, ImportReport};
pub use init::init;
pub use insert::insert_transaction;
pub use query::{breakdown, categories, insights, list, schema, summary, Breakdown, CategoryList};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Renders the output in the requested format.
    ///
    /// `Text` gives the message. `Json` gives the structured data, or the whole `Out` when there is
    /// no structured data.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.message.clone()),
            OutputFormat::Json => match self.structure() {
                Some(structure) => serde_json::to_string_pretty(structure),
                None => serde_json::to_string_pretty(self),
            }
            .context("Unable to serialize command output"),
        }
    }

    /// Print the rendered output to stdout. In `Text` mode the structured data (if it exists) is
    /// also logged as JSON at `debug!`.
    pub fn print(&self, format: OutputFormat) -> Result<()> {
        println!("{}", self.render(format)?);
        if format == OutputFormat::Text {
            if let Some(structure) = self.structure() {
                if let Ok(json) = serde_json::to_string_pretty(structure) {
                    debug!("Command output:\n\n{json}\n\n");
                }
            }
        }
        Ok(())
    }
}

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    /// Returns `true` if the user agreed to `prompt`.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> Result<bool>,
{
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        self(prompt)
    }
}

/// Confirms by asking a yes/no question on the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let mut stderr = std::io::stderr();
        write!(stderr, "{prompt} [y/N] ").context("Unable to write the prompt")?;
        stderr.flush().context("Unable to write the prompt")?;
        let mut answer = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut answer)
            .context("Unable to read the answer")?;
        Ok(is_yes(&answer))
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// "1 transaction", "2 transactions"
pub(crate) fn plural(count: usize, noun: &str) -> String {
    format!("{count} {noun}{}", if count == 1 { "" } else { "s" })
}
