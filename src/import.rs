//! Parsing of import files: a JSON array of transactions, as written by an export.

use crate::model::Transaction;
use crate::Result;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, warn};

/// How strictly individual records in an import file are checked.
#[derive(
    Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    /// Any record that is not a valid transaction rejects the whole file.
    #[default]
    Strict,
    /// Invalid records are skipped and the rest are imported.
    Lenient,
}

serde_plain::derive_display_from_serialize!(ImportMode);
serde_plain::derive_fromstr_from_deserialize!(ImportMode);

/// Parses `raw` into the list of transactions that should replace the current ones.
///
/// # Errors
/// - `raw` is not valid JSON.
/// - The top-level JSON value is not an array.
/// - In `Strict` mode, an element is not a valid transaction, has a negative amount, or repeats
///   an ID that appeared earlier in the file.
pub fn parse_import(raw: &str, mode: ImportMode) -> Result<Vec<Transaction>> {
    let value: Value = serde_json::from_str(raw).context("The file is not valid JSON")?;
    let elements = match value {
        Value::Array(elements) => elements,
        other => bail!(
            "Expected a JSON array of transactions but found {}",
            json_kind(&other)
        ),
    };

    let mut seen = HashSet::new();
    let mut transactions = Vec::with_capacity(elements.len());
    for (ix, element) in elements.into_iter().enumerate() {
        match check_record(element, &mut seen) {
            Ok(t) => transactions.push(t),
            Err(e) => match mode {
                ImportMode::Strict => {
                    return Err(e.context(format!("Record {} is not a valid transaction", ix + 1)))
                }
                ImportMode::Lenient => {
                    warn!("Skipping record {}: {e:#}", ix + 1);
                }
            },
        }
    }
    debug!("Parsed {} transactions for import", transactions.len());
    Ok(transactions)
}

fn check_record(element: Value, seen: &mut HashSet<String>) -> Result<Transaction> {
    let t: Transaction = serde_json::from_value(element)?;
    if t.amount.is_negative() {
        bail!("Amount {} is negative", t.amount);
    }
    if !seen.insert(t.id.clone()) {
        bail!("Duplicate transaction ID '{}'", t.id);
    }
    Ok(t)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
