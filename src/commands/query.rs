//! Read-only views over the stored transactions.
//!
//! This module provides:
//! - `list`: The transactions, newest first, optionally filtered
//! - `summary`: Total income, total expenses and the balance
//! - `insights`: Budgeting suggestions
//! - `breakdown`: Totals per category or per month
//! - `categories`: The built-in category names
//! - `schema`: The JSON Schema of the persisted record

use crate::aggregate::{by_category, by_month, summarize, CategoryTotal, MonthTotal, Summary};
use crate::args::{BreakdownArgs, CategoriesArgs, ListArgs};
use crate::commands::{plural, Out};
use crate::error::{ErrorType, IntoResult};
use crate::insights::{generate_insights, Insight};
use crate::model::{categories_for, Transaction, TransactionType};
use crate::{Config, Result};
use anyhow::Context;
use schemars::Schema;
use serde::Serialize;

/// The result of `breakdown`, either per category or per month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Breakdown {
    Categories(Vec<CategoryTotal>),
    Months(Vec<MonthTotal>),
}

/// The built-in categories. A list is empty when it was filtered out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryList {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expense: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub income: Vec<String>,
}

/// Lists transactions, newest first. Filters by type and by category (case-insensitive) and then
/// applies the limit.
pub fn list(config: Config, args: ListArgs) -> Result<Out<Vec<Transaction>>> {
    let repo = config.repository().pub_result(ErrorType::Storage)?;
    let transactions: Vec<Transaction> = repo
        .transactions()
        .iter()
        .filter(|t| args.r#type().map_or(true, |wanted| t.r#type == wanted))
        .filter(|t| {
            args.category()
                .map_or(true, |wanted| t.category.eq_ignore_ascii_case(wanted))
        })
        .take(args.limit().unwrap_or(usize::MAX))
        .cloned()
        .collect();

    if transactions.is_empty() {
        return Ok(Out::new("No transactions found", transactions));
    }
    let mut message = table(
        &["Date", "Type", "Category", "Amount", "Description", "ID"],
        transactions.iter().map(|t| {
            vec![
                t.date.clone(),
                t.r#type.to_string(),
                t.category.clone(),
                t.amount.to_string(),
                t.description.clone(),
                t.id.clone(),
            ]
        }),
    );
    message.push('\n');
    message.push_str(&plural(transactions.len(), "transaction"));
    Ok(Out::new(message, transactions))
}

/// Totals across all transactions.
pub fn summary(config: Config) -> Result<Out<Summary>> {
    let repo = config.repository().pub_result(ErrorType::Storage)?;
    let summary = summarize(repo.transactions());
    Ok(Out::new(
        format!(
            "Income:   {}\nExpenses: {}\nBalance:  {}",
            summary.total_income, summary.total_expenses, summary.balance
        ),
        summary,
    ))
}

/// Budgeting suggestions, most urgent first.
pub fn insights(config: Config) -> Result<Out<Vec<Insight>>> {
    let repo = config.repository().pub_result(ErrorType::Storage)?;
    let summary = summarize(repo.transactions());
    let insights = generate_insights(repo.transactions(), Some(&summary));
    let message = insights
        .iter()
        .map(|i| {
            format!(
                "[{}] {}\n    {}",
                i.priority.to_string().to_uppercase(),
                i.title,
                i.suggestion
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    Ok(Out::new(message, insights))
}

/// Totals per category for one transaction type, or per month when `--monthly` is given.
pub fn breakdown(config: Config, args: BreakdownArgs) -> Result<Out<Breakdown>> {
    let repo = config.repository().pub_result(ErrorType::Storage)?;
    if args.monthly() {
        let months = by_month(repo.transactions());
        if months.is_empty() {
            return Ok(Out::new("No transactions found", Breakdown::Months(months)));
        }
        let message = table(
            &["Month", "Income", "Expenses", "Net"],
            months.iter().map(|m| {
                vec![
                    m.month.clone(),
                    m.income.to_string(),
                    m.expenses.to_string(),
                    m.net.to_string(),
                ]
            }),
        );
        return Ok(Out::new(message, Breakdown::Months(months)));
    }

    let categories = by_category(repo.transactions(), args.r#type());
    if categories.is_empty() {
        return Ok(Out::new(
            format!("No {} transactions found", args.r#type()),
            Breakdown::Categories(categories),
        ));
    }
    let message = table(
        &["Category", "Total", "Share"],
        categories.iter().map(|c| {
            vec![
                c.category.clone(),
                c.total.to_string(),
                format!("{:.2}%", c.share),
            ]
        }),
    );
    Ok(Out::new(message, Breakdown::Categories(categories)))
}

/// The built-in category names, optionally for one type only.
pub fn categories(args: CategoriesArgs) -> Result<Out<CategoryList>> {
    let names = |t: TransactionType| -> Vec<String> {
        if args.r#type().map_or(true, |wanted| wanted == t) {
            categories_for(t).iter().map(|s| s.to_string()).collect()
        } else {
            Vec::new()
        }
    };
    let list = CategoryList {
        expense: names(TransactionType::Expense),
        income: names(TransactionType::Income),
    };

    let mut message = String::new();
    for (title, entries) in [("Expense", &list.expense), ("Income", &list.income)] {
        if entries.is_empty() {
            continue;
        }
        if !message.is_empty() {
            message.push('\n');
        }
        message.push_str(&format!("{title} categories:\n"));
        for name in entries {
            message.push_str(&format!("  {name}\n"));
        }
    }
    Ok(Out::new(message.trim_end(), list))
}

/// The JSON Schema of the persisted record: an array of transactions.
pub fn schema() -> Result<Out<Schema>> {
    let schema = schemars::schema_for!(Vec<Transaction>);
    let message =
        serde_json::to_string_pretty(&schema).context("Unable to serialize the JSON Schema")?;
    Ok(Out::new(message, schema))
}

/// Renders a markdown table.
fn table<I>(headers: &[&str], rows: I) -> String
where
    I: IntoIterator<Item = Vec<String>>,
{
    let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let rows: Vec<Vec<String>> = rows.into_iter().collect();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(table_line(&headers, &widths));
    out.push(format!(
        "|{}|",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("|")
    ));
    for row in &rows {
        out.push(table_line(row, &widths));
    }
    out.join("\n")
}

fn table_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    format!("| {} |", padded.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::Priority;
    use crate::test::TestEnv;
    use rust_decimal_macros::dec;

    #[test]
    fn test_list_newest_first_and_filters() {
        let env = TestEnv::new();
        let inserted = env.insert_scenario();

        let out = list(env.config(), ListArgs::default()).unwrap();
        assert_eq!(out.structure().unwrap(), &inserted);
        assert_eq!(out.structure().unwrap()[0].category, "Food & Dining");
        assert!(out.message().ends_with("3 transactions"));

        let out = list(
            env.config(),
            ListArgs::new(Some(TransactionType::Expense), None, Some(1)),
        )
        .unwrap();
        let listed = out.structure().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].category, "Food & Dining");

        let out = list(
            env.config(),
            ListArgs::new(None, Some("salary".to_string()), None),
        )
        .unwrap();
        assert_eq!(out.structure().unwrap().len(), 1);
    }

    #[test]
    fn test_list_empty() {
        let env = TestEnv::new();
        let out = list(env.config(), ListArgs::default()).unwrap();
        assert_eq!(out.message(), "No transactions found");
        assert!(out.structure().unwrap().is_empty());
    }

    #[test]
    fn test_summary_scenario() {
        let env = TestEnv::new();
        env.insert_scenario();
        let out = summary(env.config()).unwrap();
        let s = out.structure().unwrap();
        assert_eq!(s.total_income.value(), dec!(1000));
        assert_eq!(s.total_expenses.value(), dec!(1000));
        assert!(s.balance.is_zero());
        assert!(out.message().contains("Balance:  $0.00"));
    }

    #[test]
    fn test_insights_scenario_has_balance_warning() {
        let env = TestEnv::new();
        env.insert_scenario();
        let out = insights(env.config()).unwrap();
        let insights = out.structure().unwrap();
        assert_eq!(insights[0].priority, Priority::High);
        assert!(out.message().starts_with("[HIGH]"));
    }

    #[test]
    fn test_insights_empty() {
        let env = TestEnv::new();
        let out = insights(env.config()).unwrap();
        assert_eq!(out.structure().unwrap().len(), 1);
        assert!(out.message().contains("No data yet"));
    }

    #[test]
    fn test_breakdown_by_category() {
        let env = TestEnv::new();
        env.insert_scenario();
        let out = breakdown(env.config(), BreakdownArgs::default()).unwrap();
        match out.structure().unwrap() {
            Breakdown::Categories(c) => {
                assert_eq!(c.len(), 2);
                assert_eq!(c[0].category, "Food & Dining");
                assert_eq!(c[0].share, dec!(60));
            }
            other => panic!("unexpected breakdown {other:?}"),
        }
        assert!(out.message().contains("60.00%"));
    }

    #[test]
    fn test_breakdown_monthly() {
        let env = TestEnv::new();
        env.insert_scenario();
        let out = breakdown(
            env.config(),
            BreakdownArgs::new(TransactionType::Expense, true),
        )
        .unwrap();
        match out.structure().unwrap() {
            Breakdown::Months(m) => {
                assert_eq!(m.len(), 1);
                assert_eq!(m[0].month, "2025-01");
                assert!(m[0].net.is_zero());
            }
            other => panic!("unexpected breakdown {other:?}"),
        }
    }

    #[test]
    fn test_categories() {
        let all = categories(CategoriesArgs::default()).unwrap();
        let list = all.structure().unwrap();
        assert!(list.expense.iter().any(|c| c == "Food & Dining"));
        assert!(list.income.iter().any(|c| c == "Salary"));

        let income = categories(CategoriesArgs::new(Some(TransactionType::Income))).unwrap();
        assert!(income.structure().unwrap().expense.is_empty());
        assert!(income.message().starts_with("Income categories:"));
    }

    #[test]
    fn test_schema() {
        let out = schema().unwrap();
        let json: serde_json::Value = serde_json::from_str(out.message()).unwrap();
        assert_eq!(json["type"], "array");
    }

    #[test]
    fn test_table() {
        let t = table(
            &["A", "Long"],
            vec![vec!["xyz".to_string(), "1".to_string()]],
        );
        assert_eq!(t, "| A   | Long |\n|-----|------|\n| xyz | 1    |");
    }
}
