//! Delete and clear command handlers.

use crate::args::{ClearArgs, DeleteArgs};
use crate::backup::PRE_CLEAR;
use crate::commands::{plural, Confirm, Out};
use crate::error::{ErrorType, IntoResult};
use crate::model::Transaction;
use crate::{Config, Result};
use tracing::{debug, info};

const CANCELLED: &str = "Cancelled, nothing was changed";

/// Deletes the transaction with the ID given in `args`.
///
/// Unless `args.yes()` is set, `confirm` is asked first, and a declined confirmation leaves the
/// data untouched. Deleting an ID that does not exist is not an error.
///
/// # Errors
/// - Returns an error if the confirmation cannot be read.
/// - Returns an error if the record store cannot be written.
pub fn delete_transaction(
    config: Config,
    args: DeleteArgs,
    confirm: &mut impl Confirm,
) -> Result<Out<Transaction>> {
    let mut repo = config.repository().pub_result(ErrorType::Storage)?;
    let Some(existing) = repo.get(args.id()) else {
        return Ok(format!("No transaction with ID {}, nothing was deleted", args.id()).into());
    };

    if !args.yes() {
        let prompt = format!(
            "Delete the {} of {} in '{}' dated {}?",
            existing.r#type, existing.amount, existing.category, existing.date
        );
        if !confirm.confirm(&prompt)? {
            debug!("Delete of {} declined", args.id());
            return Ok(CANCELLED.into());
        }
    }

    match repo.delete(args.id()).pub_result(ErrorType::Storage)? {
        Some(removed) => {
            info!("Deleted transaction {}", removed.id);
            Ok(Out::new(
                format!("Deleted transaction with ID: {}", removed.id),
                removed,
            ))
        }
        None => Ok(format!("No transaction with ID {}, nothing was deleted", args.id()).into()),
    }
}

/// Deletes every transaction.
///
/// Unless `args.yes()` is set, `confirm` is asked first. Before anything is removed, a `pre-clear`
/// snapshot of the current transactions is written to the backups directory. Returns the number
/// of transactions removed.
///
/// # Errors
/// - Returns an error if the confirmation cannot be read.
/// - Returns an error if the snapshot or the record store cannot be written. Nothing is removed
///   in that case.
pub fn clear(config: Config, args: ClearArgs, confirm: &mut impl Confirm) -> Result<Out<usize>> {
    let mut repo = config.repository().pub_result(ErrorType::Storage)?;
    if repo.is_empty() {
        return Ok(Out::new("There are no transactions to clear", 0));
    }

    let count = repo.len();
    if !args.yes() {
        let prompt = format!(
            "Delete all {}? This cannot be undone",
            plural(count, "transaction")
        );
        if !confirm.confirm(&prompt)? {
            debug!("Clear declined");
            return Ok(CANCELLED.into());
        }
    }

    let snapshot = config
        .backup()
        .save_json(PRE_CLEAR, repo.transactions())
        .pub_result(ErrorType::Storage)?;
    repo.clear().pub_result(ErrorType::Storage)?;
    info!("Cleared {count} transactions");

    Ok(Out::new(
        format!(
            "Deleted {}. A copy was saved to {}",
            plural(count, "transaction"),
            snapshot.display()
        ),
        count,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    fn yes(_: &str) -> Result<bool> {
        Ok(true)
    }

    fn no(_: &str) -> Result<bool> {
        Ok(false)
    }

    fn never(prompt: &str) -> Result<bool> {
        panic!("unexpected prompt: {prompt}")
    }

    fn backups(env: &TestEnv, prefix: &str) -> usize {
        std::fs::read_dir(env.config().backups())
            .unwrap()
            .filter(|e| {
                e.as_ref()
                    .unwrap()
                    .file_name()
                    .to_string_lossy()
                    .starts_with(prefix)
            })
            .count()
    }

    #[test]
    fn test_delete_confirmed() {
        let env = TestEnv::new();
        let inserted = env.insert_scenario();
        let target = inserted[1].clone();

        let out = delete_transaction(env.config(), DeleteArgs::new(&target.id, false), &mut yes)
            .unwrap();
        assert_eq!(out.structure(), Some(&target));

        let stored = env.stored();
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|t| t.id != target.id));
    }

    #[test]
    fn test_delete_declined() {
        let env = TestEnv::new();
        let inserted = env.insert_scenario();
        let out = delete_transaction(env.config(), DeleteArgs::new(&inserted[0].id, false), &mut no)
            .unwrap();
        assert_eq!(out.message(), CANCELLED);
        assert!(out.structure().is_none());
        assert_eq!(env.stored(), inserted);
    }

    #[test]
    fn test_delete_yes_skips_prompt() {
        let env = TestEnv::new();
        let inserted = env.insert_scenario();
        delete_transaction(env.config(), DeleteArgs::new(&inserted[0].id, true), &mut never)
            .unwrap();
        assert_eq!(env.stored().len(), 2);
    }

    #[test]
    fn test_delete_missing_id() {
        let env = TestEnv::new();
        let inserted = env.insert_scenario();
        let out =
            delete_transaction(env.config(), DeleteArgs::new("nope", false), &mut never).unwrap();
        assert!(out.message().contains("nothing was deleted"));
        assert_eq!(env.stored(), inserted);
    }

    #[test]
    fn test_clear_confirmed() {
        let env = TestEnv::new();
        env.insert_scenario();
        let out = clear(env.config(), ClearArgs::new(false), &mut yes).unwrap();
        assert_eq!(out.structure(), Some(&3));
        assert!(env.stored().is_empty());
        assert_eq!(backups(&env, PRE_CLEAR), 1);
    }

    #[test]
    fn test_clear_declined() {
        let env = TestEnv::new();
        let inserted = env.insert_scenario();
        let out = clear(env.config(), ClearArgs::new(false), &mut no).unwrap();
        assert_eq!(out.message(), CANCELLED);
        assert_eq!(env.stored(), inserted);
        assert_eq!(backups(&env, PRE_CLEAR), 0);
    }

    #[test]
    fn test_clear_empty() {
        let env = TestEnv::new();
        let out = clear(env.config(), ClearArgs::new(false), &mut never).unwrap();
        assert_eq!(out.structure(), Some(&0));
    }
}
