use crate::model::TransactionType;

/// The built-in expense categories offered to the user.
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food & Dining",
    "Shopping",
    "Transportation",
    "Utilities",
    "Entertainment",
    "Rent/Mortgage",
    "Healthcare",
    "Education",
    "Personal Care",
    "Travel",
    "Miscellaneous",
];

/// The built-in income categories offered to the user.
pub const INCOME_CATEGORIES: &[&str] = &[
    "Salary",
    "Freelance",
    "Investments",
    "Gifts",
    "Rental Income",
    "Refunds",
    "Other",
];

/// Returns the built-in categories for transactions of type `t`.
pub fn categories_for(t: TransactionType) -> &'static [&'static str] {
    match t {
        TransactionType::Income => INCOME_CATEGORIES,
        TransactionType::Expense => EXPENSE_CATEGORIES,
    }
}

/// Whether `category` is one of the built-in categories for `t`. Categories are free-form, so
/// this is only used to warn.
pub fn is_known_category(t: TransactionType, category: &str) -> bool {
    categories_for(t).contains(&category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_known_category() {
        assert!(is_known_category(TransactionType::Expense, "Rent/Mortgage"));
        assert!(is_known_category(TransactionType::Income, "Salary"));
        assert!(!is_known_category(TransactionType::Income, "Rent/Mortgage"));
        assert!(!is_known_category(TransactionType::Expense, "rent/mortgage"));
    }

    #[test]
    fn test_categories_for() {
        assert_eq!(categories_for(TransactionType::Expense), EXPENSE_CATEGORIES);
        assert_eq!(categories_for(TransactionType::Income), INCOME_CATEGORIES);
    }
}
