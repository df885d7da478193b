//! Types that represent the core data model, such as `Transaction` and `Amount`.
mod amount;
mod category;
mod transaction;

pub use amount::{Amount, AmountError};
pub use category::{categories_for, is_known_category, EXPENSE_CATEGORIES, INCOME_CATEGORIES};
pub use transaction::{NewTransaction, Transaction, TransactionType};
