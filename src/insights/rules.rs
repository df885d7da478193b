//! The built-in insight rules.

use super::engine::{AnalysisContext, Rule};
use super::types::{Insight, Priority};
use crate::aggregate::{by_category, ratio};
use crate::model::TransactionType;
use rust_decimal::Decimal;

/// A balance at or below this triggers the balance warning.
pub const LOW_BALANCE_THRESHOLD: Decimal = Decimal::ZERO;

/// An expense category above this percentage of all expenses is called out.
pub const CONCENTRATION_SHARE: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

/// Above this percentage the concentration insight becomes high priority.
pub const CONCENTRATION_HIGH_SHARE: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Savings rates (percent of income) below this are flagged.
pub const LOW_SAVINGS_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Savings rates (percent of income) at or above this are healthy.
pub const HEALTHY_SAVINGS_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// Shown when nothing has been recorded yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDataRule;

impl Rule for NoDataRule {
    fn name(&self) -> &'static str {
        "no_data"
    }

    fn runs_on_empty(&self) -> bool {
        true
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<Insight> {
        ctx.is_empty().then(|| {
            Insight::new(
                "No data yet",
                "Add your first income or expense to start seeing budgeting insights.",
                Priority::Low,
            )
        })
    }
}

/// Warns when expenses have caught up with income.
#[derive(Debug, Clone, Copy, Default)]
pub struct BalanceRule;

impl Rule for BalanceRule {
    fn name(&self) -> &'static str {
        "balance"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<Insight> {
        let balance = ctx.summary.balance;
        if balance.value() > LOW_BALANCE_THRESHOLD {
            return None;
        }
        let suggestion = if !ctx.has_income() {
            format!(
                "You have recorded {} of expenses and no income. Record your income, or look for \
                expenses you can cut.",
                ctx.summary.total_expenses
            )
        } else if balance.is_zero() {
            "Your expenses match your income exactly, leaving nothing to save. Look for a \
            recurring expense you can reduce."
                .to_string()
        } else {
            format!(
                "You are spending more than you earn: your balance is {balance}. Review your \
                largest expense categories and cut back where you can."
            )
        };
        let title = if balance.is_zero() {
            "Zero balance"
        } else {
            "Negative balance"
        };
        Some(Insight::new(title, suggestion, Priority::High))
    }
}

/// Calls out a single expense category that takes up a large share of spending.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryConcentrationRule;

impl Rule for CategoryConcentrationRule {
    fn name(&self) -> &'static str {
        "category_concentration"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<Insight> {
        if !ctx.has_income() || !ctx.summary.total_expenses.is_positive() {
            return None;
        }
        let top = by_category(ctx.transactions, TransactionType::Expense)
            .into_iter()
            .next()?;
        let share = ratio(top.total.value(), ctx.summary.total_expenses.value());
        if share <= CONCENTRATION_SHARE {
            return None;
        }
        let priority = if share > CONCENTRATION_HIGH_SHARE {
            Priority::High
        } else {
            Priority::Medium
        };
        Some(Insight::new(
            format!("High spending on {}", top.category),
            format!(
                "{} accounts for {}% of your expenses ({}). Consider setting a limit for this \
                category.",
                top.category,
                top.share.normalize(),
                top.total
            ),
            priority,
        ))
    }
}

/// Comments on the share of income left over after expenses.
#[derive(Debug, Clone, Copy, Default)]
pub struct SavingsRateRule;

impl Rule for SavingsRateRule {
    fn name(&self) -> &'static str {
        "savings_rate"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<Insight> {
        let summary = ctx.summary;
        if !ctx.has_income() || !summary.balance.is_positive() {
            return None;
        }
        let rate = ratio(summary.balance.value(), summary.total_income.value());
        let shown = rate.round_dp(2).normalize();
        let insight = if rate < LOW_SAVINGS_RATE {
            Insight::new(
                "Savings rate is low",
                format!(
                    "You are saving {shown}% of your income. Aim for at least \
                    {LOW_SAVINGS_RATE}% by trimming discretionary spending."
                ),
                Priority::Medium,
            )
        } else if rate < HEALTHY_SAVINGS_RATE {
            Insight::new(
                "Room to save more",
                format!(
                    "You are saving {shown}% of your income. Reaching {HEALTHY_SAVINGS_RATE}% \
                    would build a stronger cushion."
                ),
                Priority::Low,
            )
        } else {
            Insight::new(
                "Healthy savings rate",
                format!(
                    "You are saving {shown}% of your income. Consider putting the surplus to work \
                    in savings or investments."
                ),
                Priority::Low,
            )
        };
        Some(insight)
    }
}
