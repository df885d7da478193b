use crate::model::Amount;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Whether a transaction brings money in or takes it out.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionType);
serde_plain::derive_fromstr_from_deserialize!(TransactionType);

/// A single income or expense event entered by the user.
///
/// This is also the persisted record format: the record store holds a JSON array of these, in
/// repository order, with exactly these field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Transaction {
    /// Unique within the repository. Generated when the transaction is added.
    pub id: String,
    /// Calendar date, `YYYY-MM-DD` by convention.
    pub date: String,
    pub description: String,
    /// A magnitude. The sign is implied by `type`.
    pub amount: Amount,
    #[serde(rename = "type")]
    pub r#type: TransactionType,
    /// Free-form, conventionally one of the built-in categories for the type.
    pub category: String,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.r#type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.r#type == TransactionType::Expense
    }

    /// The `YYYY-MM` part of `date`, if it has one.
    pub fn month(&self) -> Option<&str> {
        let month = self.date.get(..7)?;
        let bytes = month.as_bytes();
        let ok = bytes[4] == b'-'
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[5..].iter().all(u8::is_ascii_digit);
        ok.then_some(month)
    }
}

/// A transaction as submitted by the user, before it has been given an ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: String,
    pub description: String,
    pub amount: Amount,
    #[serde(rename = "type")]
    pub r#type: TransactionType,
    pub category: String,
}

impl NewTransaction {
    pub fn new(
        r#type: TransactionType,
        amount: Amount,
        category: impl Into<String>,
        description: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            amount,
            r#type,
            category: category.into(),
        }
    }

    /// Attaches `id` to produce the full record.
    pub(crate) fn with_id(self, id: String) -> Transaction {
        Transaction {
            id,
            date: self.date,
            description: self.description,
            amount: self.amount,
            r#type: self.r#type,
            category: self.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn txn(date: &str) -> Transaction {
        NewTransaction::new(
            TransactionType::Expense,
            Amount::new(dec!(4.50)),
            "Food & Dining",
            "Coffee",
            date,
        )
        .with_id("t-1".to_string())
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(txn("2025-01-15")).unwrap();
        assert_eq!(json["id"], "t-1");
        assert_eq!(json["type"], "expense");
        assert_eq!(json["category"], "Food & Dining");
        assert_eq!(json["amount"], serde_json::json!(4.5));
    }

    #[test]
    fn test_deserialize_rejects_unknown_type() {
        let json = r#"{"id":"x","date":"2025-01-01","description":"","amount":1,"type":"transfer","category":""}"#;
        assert!(serde_json::from_str::<Transaction>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_missing_field() {
        let json = r#"{"id":"x","date":"2025-01-01","amount":1,"type":"income","category":""}"#;
        assert!(serde_json::from_str::<Transaction>(json).is_err());
    }

    #[test]
    fn test_type_display_and_parse() {
        assert_eq!(TransactionType::Income.to_string(), "income");
        assert_eq!(
            "expense".parse::<TransactionType>().unwrap(),
            TransactionType::Expense
        );
    }

    #[test]
    fn test_month() {
        assert_eq!(txn("2025-01-15").month(), Some("2025-01"));
        assert_eq!(txn("2025-1").month(), None);
        assert_eq!(txn("01/15/2025").month(), None);
        assert_eq!(txn("").month(), None);
    }
}
