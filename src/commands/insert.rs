//! Insert command handler.

use crate::args::AddArgs;
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::{is_known_category, NewTransaction, Transaction};
use crate::{Config, Result};
use anyhow::anyhow;
use chrono::Local;
use tracing::{info, warn};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Records a new income or expense and writes the updated list to the record store.
///
/// A unique transaction ID is generated by the repository and returned as part of the stored
/// record. When `args` has no date, today's local date is used.
///
/// # Errors
///
/// - Returns an error if the amount is zero or negative.
/// - Returns an error if the record store cannot be written. Nothing is added in that case.
pub fn insert_transaction(config: Config, args: AddArgs) -> Result<Out<Transaction>> {
    if !args.amount().is_positive() {
        return Err(anyhow!(
            "The amount must be greater than zero, got {}",
            args.amount()
        ))
        .pub_result(ErrorType::Request);
    }
    if !is_known_category(args.r#type(), args.category()) {
        warn!(
            "'{}' is not one of the built-in {} categories, it will be stored as given",
            args.category(),
            args.r#type()
        );
    }

    let date = args
        .date()
        .unwrap_or_else(|| Local::now().date_naive())
        .format(DATE_FORMAT)
        .to_string();
    let new = NewTransaction::new(
        args.r#type(),
        args.amount(),
        args.category(),
        args.description(),
        date,
    );

    let mut repo = config.repository().pub_result(ErrorType::Storage)?;
    let transaction = repo.add(new).pub_result(ErrorType::Storage)?;
    info!("Added {} of {}", transaction.r#type, transaction.amount);

    Ok(Out::new(
        format!("Inserted transaction with ID: {}", transaction.id),
        transaction,
    ))
}
