use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How urgently an insight should be acted on. Ordered from least to most urgent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

serde_plain::derive_display_from_serialize!(Priority);
serde_plain::derive_fromstr_from_deserialize!(Priority);

/// A human-readable budgeting suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Insight {
    pub title: String,
    pub suggestion: String,
    pub priority: Priority,
}

impl Insight {
    pub fn new(title: impl Into<String>, suggestion: impl Into<String>, priority: Priority) -> Self {
        Self {
            title: title.into(),
            suggestion: suggestion.into(),
            priority,
        }
    }
}
