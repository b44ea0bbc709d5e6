use thiserror::Error;

/// Every way an allocation, spending or chart action can be rejected.
///
/// None of these are fatal: the action is refused and the previous state is
/// kept as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error(
        "Monthly salary must be a number greater than zero and at most $1,000,000,000,000,000"
    )]
    InvalidSalary,
    #[error("Percentages must be numbers between 0 and 100 (got '{0}')")]
    InvalidPercentage(String),
    #[error("Category names cannot be empty")]
    EmptyCategoryName,
    #[error("No categories provided")]
    NoCategoriesProvided,
    #[error("Category '{0}' is listed more than once")]
    DuplicateCategoryName(String),
    #[error("Spending amount must be a number greater than zero")]
    InvalidAmount,
    #[error("Colors must look like #RRGGBB (got '{0}')")]
    InvalidColor(String),
    #[error(
        "Cannot record ${requested} against '{category}': only ${available} is left in this category"
    )]
    InsufficientAllocation {
        category: String,
        requested: String,
        available: String,
    },
    #[error("Category not found: {0}")]
    UnknownCategory(String),
    #[error("Spending entry #{0} not found")]
    UnknownEntry(u64),
    #[error("Build a budget first (:submit on the Setup screen)")]
    NoBudget,
    #[error("The chart has not been built")]
    ChartNotBuilt,
}
