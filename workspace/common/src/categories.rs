/// Category given to expenses seeded from default expense templates.
pub const DEFAULT_CATEGORY: &str = "Default";

/// Fixed catalog of expense categories offered to clients.
///
/// Expenses may carry any non-empty category; this list is only a suggestion.
pub const EXPENSE_CATEGORIES: [&str; 9] = [
    "Food",
    "Transport",
    "Entertainment",
    "Shopping",
    "Health",
    "Bills",
    "Education",
    DEFAULT_CATEGORY,
    "Other",
];
