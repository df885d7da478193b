//! Insight Engine: rule-based budgeting suggestions.
//!
//! The engine looks at the current transactions and their `Summary` and applies a fixed set of
//! heuristic rules. Each rule that qualifies contributes one `Insight`. Nothing is persisted;
//! insights are recomputed whenever they are shown.
//!
//! ## Built-in rules
//!
//! - **No data yet** - placeholder shown when there are no transactions
//! - **Balance** - expenses have caught up with (or passed) income
//! - **Category concentration** - one expense category dominates spending
//! - **Savings rate** - how much of the income is left over
//!
//! ## Usage
//!
//! ```rust
//! use zenwealth::insights::{generate_insights, Priority};
//!
//! let insights = generate_insights(&[], None);
//! assert_eq!(insights.len(), 1);
//! assert_eq!(insights[0].priority, Priority::Low);
//! ```

mod engine;
mod rules;
mod types;

pub use engine::{generate_insights, AnalysisContext, InsightEngine, Rule};
pub use rules::{
    BalanceRule, CategoryConcentrationRule, NoDataRule, SavingsRateRule, CONCENTRATION_HIGH_SHARE,
    CONCENTRATION_SHARE, HEALTHY_SAVINGS_RATE, LOW_BALANCE_THRESHOLD, LOW_SAVINGS_RATE,
};
pub use types::{Insight, Priority};
