use rust_decimal::Decimal;

use super::AllocationError;

/// Identifier assigned to a category when its budget is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(pub usize);

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The three fixed buckets offered in preset mode, with their chart colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetCategory {
    Utilities,
    Savings,
    PersonalNeeds,
}

impl PresetCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utilities => "Utilities",
            Self::Savings => "Savings",
            Self::PersonalNeeds => "Personal Needs",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Utilities => "#007BFF",
            Self::Savings => "#FADADD",
            Self::PersonalNeeds => "#FFC107",
        }
    }

    pub fn all() -> &'static [PresetCategory] {
        &[Self::Utilities, Self::Savings, Self::PersonalNeeds]
    }
}

impl std::fmt::Display for PresetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One `(name, percentage, color)` tuple handed to `Budget::build`.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryInput {
    pub name: String,
    pub percentage: Decimal,
    pub color: String,
}

impl CategoryInput {
    pub fn new(name: impl Into<String>, percentage: Decimal, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            percentage,
            color: color.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Percentage of the original salary reserved when the budget was built.
    pub base_percentage: Decimal,
    /// Opaque display tag, only interpreted by the chart.
    pub color: String,
    /// Dollars recorded against this category so far.
    pub spent: Decimal,
}

impl Category {
    pub(crate) fn new(id: CategoryId, input: CategoryInput) -> Self {
        Self {
            id,
            name: input.name,
            base_percentage: input.percentage,
            color: input.color,
            spent: Decimal::ZERO,
        }
    }

    /// Percentage still allocated after spending, relative to `original_salary`.
    pub fn percentage(&self, original_salary: Decimal) -> Decimal {
        if original_salary <= Decimal::ZERO {
            return self.base_percentage;
        }
        self.base_percentage - self.spent / original_salary * Decimal::ONE_HUNDRED
    }

    /// Dollars originally reserved for this category.
    pub fn budgeted_amount(&self, original_salary: Decimal) -> Decimal {
        self.base_percentage / Decimal::ONE_HUNDRED * original_salary
    }

    /// Dollars still available to spend.
    pub fn remaining_amount(&self, original_salary: Decimal) -> Decimal {
        self.budgeted_amount(original_salary) - self.spent
    }

    /// Find a category by name (case-insensitive) in a slice.
    pub fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
        let lower = name.trim().to_lowercase();
        categories.iter().find(|c| c.name.to_lowercase() == lower)
    }

    /// Find a category by ID in a slice.
    pub fn find_by_id(categories: &[Category], id: CategoryId) -> Option<&Category> {
        categories.iter().find(|c| c.id == id)
    }

    pub(crate) fn find_by_id_mut(
        categories: &mut [Category],
        id: CategoryId,
    ) -> Result<&mut Category, AllocationError> {
        categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AllocationError::UnknownCategory(id.to_string()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
