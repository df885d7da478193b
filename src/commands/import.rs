//! Import command handler.

use crate::args::ImportArgs;
use crate::backup::PRE_IMPORT;
use crate::commands::{plural, Out};
use crate::error::{ErrorType, IntoResult};
use crate::import::parse_import;
use crate::{utils, Config, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// The outcome of a successful import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// How many transactions were in the file and are now stored.
    pub imported: usize,
    /// How many transactions were replaced.
    pub replaced: usize,
    /// The snapshot of the replaced transactions.
    pub backup: PathBuf,
}

/// Replaces all transactions with the contents of the JSON file named in `args`.
///
/// The file must hold a JSON array of transactions, as written by `export`. How invalid records
/// are treated depends on the import mode from `args`, falling back to `import_mode` in
/// `config.json`. Before anything is replaced, a `pre-import` snapshot of the current transactions
/// is written to the backups directory.
///
/// # Errors
/// - Returns an error if the file cannot be read, is not valid JSON, is not an array, or (in
///   strict mode) contains an invalid record. The stored transactions are unchanged.
/// - Returns an error if the snapshot or the record store cannot be written.
pub fn import(config: Config, args: ImportArgs) -> Result<Out<ImportReport>> {
    let mode = args.mode().unwrap_or_else(|| config.import_mode());
    let raw = utils::read(args.file()).pub_result(ErrorType::Import)?;
    let transactions = parse_import(&raw, mode).pub_result(ErrorType::Import)?;

    let mut repo = config.repository().pub_result(ErrorType::Storage)?;
    let replaced = repo.len();
    let backup = config
        .backup()
        .save_json(PRE_IMPORT, repo.transactions())
        .pub_result(ErrorType::Storage)?;

    let imported = transactions.len();
    repo.replace_all(transactions).pub_result(ErrorType::Storage)?;
    info!(
        "Imported {imported} transactions from {} ({mode} mode)",
        args.file().display()
    );

    Ok(Out::new(
        format!(
            "Imported {}, replacing {}. The previous data was saved to {}",
            plural(imported, "transaction"),
            plural(replaced, "transaction"),
            backup.display()
        ),
        ImportReport {
            imported,
            replaced,
            backup,
        },
    ))
}
