//! Pure functions that derive totals from a list of transactions: the dashboard `Summary` and the
//! per-category and per-month breakdowns used for charts.

use crate::model::{Amount, Transaction, TransactionType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The month label used for transactions whose date has no `YYYY-MM` prefix.
pub const UNKNOWN_MONTH: &str = "unknown";

/// Aggregate totals across all transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_income: Amount,
    pub total_expenses: Amount,
    /// Always `total_income - total_expenses`. May be negative.
    pub balance: Amount,
}

impl Summary {
    pub fn new(total_income: Amount, total_expenses: Amount) -> Self {
        Self {
            total_income,
            total_expenses,
            balance: Amount::new(total_income.value() - total_expenses.value()),
        }
    }
}

/// Computes the `Summary` of `transactions` in a single pass.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut income = Amount::ZERO;
    let mut expenses = Amount::ZERO;
    for t in transactions {
        match t.r#type {
            TransactionType::Income => income += t.amount,
            TransactionType::Expense => expenses += t.amount,
        }
    }
    Summary::new(income, expenses)
}

/// The total for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Amount,
    /// Percentage of the total for the transaction type, rounded to two places.
    pub share: Decimal,
}

/// Groups the transactions of type `t` by category, largest total first.
pub fn by_category(transactions: &[Transaction], t: TransactionType) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<&str, Amount> = BTreeMap::new();
    for txn in transactions.iter().filter(|txn| txn.r#type == t) {
        *totals.entry(txn.category.as_str()).or_default() += txn.amount;
    }
    let grand_total: Amount = totals.values().copied().sum();

    let mut out: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
            share: percent(total.value(), grand_total.value()),
        })
        .collect();
    // BTreeMap iteration is by name, and the sort is stable, so ties stay alphabetical.
    out.sort_by(|a, b| b.total.cmp(&a.total));
    out
}

/// Income and expenses for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthTotal {
    /// `YYYY-MM`, or `unknown`.
    pub month: String,
    pub income: Amount,
    pub expenses: Amount,
    pub net: Amount,
}

/// Groups transactions by month, oldest first. Transactions without a usable date come last
/// under `unknown`.
pub fn by_month(transactions: &[Transaction]) -> Vec<MonthTotal> {
    let mut months: BTreeMap<&str, (Amount, Amount)> = BTreeMap::new();
    let mut unknown: Option<(Amount, Amount)> = None;
    for t in transactions {
        let entry = match t.month() {
            Some(month) => months.entry(month).or_default(),
            None => unknown.get_or_insert_with(Default::default),
        };
        match t.r#type {
            TransactionType::Income => entry.0 += t.amount,
            TransactionType::Expense => entry.1 += t.amount,
        }
    }

    months
        .into_iter()
        .map(|(month, totals)| (month.to_string(), totals))
        .chain(unknown.map(|totals| (UNKNOWN_MONTH.to_string(), totals)))
        .map(|(month, (income, expenses))| MonthTotal {
            month,
            income,
            expenses,
            net: Amount::new(income.value() - expenses.value()),
        })
        .collect()
}

/// `part` as a percentage of `whole`, rounded to two places. Zero when `whole` is zero.
pub(crate) fn percent(part: Decimal, whole: Decimal) -> Decimal {
    ratio(part, whole).round_dp(2)
}

/// `part` as an unrounded percentage of `whole`. Zero when `whole` is zero. Thresholds are
/// compared against this, not the rounded `percent`.
pub(crate) fn ratio(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part * Decimal::ONE_HUNDRED / whole
}
