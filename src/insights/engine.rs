//! Insight Engine - runs the registered rules over a snapshot of the transactions

use super::rules::{BalanceRule, CategoryConcentrationRule, NoDataRule, SavingsRateRule};
use super::types::Insight;
use crate::aggregate::{summarize, Summary};
use crate::model::Transaction;
use tracing::trace;

/// Everything a rule gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext<'a> {
    pub transactions: &'a [Transaction],
    pub summary: Summary,
}

impl<'a> AnalysisContext<'a> {
    /// Uses `summary` when given, otherwise computes it from `transactions`.
    pub fn new(transactions: &'a [Transaction], summary: Option<&Summary>) -> Self {
        let summary = summary.copied().unwrap_or_else(|| summarize(transactions));
        Self {
            transactions,
            summary,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Whether there is income to compare other amounts against.
    pub fn has_income(&self) -> bool {
        self.summary.total_income.is_positive()
    }
}

/// A single heuristic. Rules are independent of one another.
pub trait Rule: Send + Sync {
    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Whether the rule should run when there are no transactions at all. Most rules have nothing
    /// to say about an empty list.
    fn runs_on_empty(&self) -> bool {
        false
    }

    /// Returns an insight if the rule qualifies.
    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<Insight>;
}

/// Holds the rules and runs them.
pub struct InsightEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create a new insight engine with the built-in rules
    pub fn new() -> Self {
        let mut engine = Self::empty();
        engine.register(Box::new(NoDataRule));
        engine.register(Box::new(BalanceRule));
        engine.register(Box::new(CategoryConcentrationRule));
        engine.register(Box::new(SavingsRateRule));
        engine
    }

    /// An engine with no rules.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Runs every rule and returns the insights, most urgent first. Insights of equal priority
    /// keep the order in which their rules were registered.
    pub fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let mut insights: Vec<Insight> = self
            .rules
            .iter()
            .filter(|rule| !ctx.is_empty() || rule.runs_on_empty())
            .filter_map(|rule| {
                let insight = rule.evaluate(ctx);
                trace!(rule = rule.name(), fired = insight.is_some(), "Evaluated rule");
                insight
            })
            .collect();
        insights.sort_by(|a, b| b.priority.cmp(&a.priority));
        insights
    }
}

/// Runs the built-in rules over `transactions`. `summary` is computed if not supplied.
pub fn generate_insights(transactions: &[Transaction], summary: Option<&Summary>) -> Vec<Insight> {
    InsightEngine::new().analyze(&AnalysisContext::new(transactions, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::Priority;

    struct Always(Priority);

    impl Rule for Always {
        fn name(&self) -> &'static str {
            "always"
        }

        fn runs_on_empty(&self) -> bool {
            true
        }

        fn evaluate(&self, _: &AnalysisContext<'_>) -> Option<Insight> {
            Some(Insight::new(self.0.to_string(), "", self.0))
        }
    }

    #[test]
    fn test_engine_creation() {
        let engine = InsightEngine::new();
        assert_eq!(
            engine.rule_names(),
            vec!["no_data", "balance", "category_concentration", "savings_rate"]
        );
    }

    #[test]
    fn test_sorted_by_priority_stable() {
        let mut engine = InsightEngine::empty();
        engine.register(Box::new(Always(Priority::Low)));
        engine.register(Box::new(Always(Priority::High)));
        engine.register(Box::new(Always(Priority::Medium)));
        engine.register(Box::new(Always(Priority::High)));
        let out = engine.analyze(&AnalysisContext::new(&[], None));
        let priorities: Vec<Priority> = out.iter().map(|i| i.priority).collect();
        assert_eq!(
            priorities,
            vec![
                Priority::High,
                Priority::High,
                Priority::Medium,
                Priority::Low
            ]
        );
    }

    #[test]
    fn test_supplied_summary_is_used() {
        let summary = Summary::new(
            crate::model::Amount::new(rust_decimal::Decimal::ONE),
            crate::model::Amount::ZERO,
        );
        let ctx = AnalysisContext::new(&[], Some(&summary));
        assert_eq!(ctx.summary, summary);
        assert!(ctx.has_income());
    }
}
