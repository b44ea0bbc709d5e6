use std::collections::HashSet;
use std::str::FromStr;

use rust_decimal::Decimal;

use super::{AllocationError, Category, CategoryId, CategoryInput, PresetCategory};

/// Largest accepted monthly salary (10^15). Dollar sums across categories
/// and spending stay well inside `Decimal` range below it.
pub const MAX_SALARY: Decimal = Decimal::from_parts(0xA4C6_8000, 0x38D7E, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationMode {
    Preset,
    Personalized,
}

impl AllocationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preset => "Preset",
            Self::Personalized => "Personalized",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "preset" | "p" => Some(Self::Preset),
            "personal" | "personalized" | "personalize" | "custom" => Some(Self::Personalized),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Preset => Self::Personalized,
            Self::Personalized => Self::Preset,
        }
    }
}

impl std::fmt::Display for AllocationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A monthly salary split into categories.
///
/// Two salary figures coexist: `original_salary` is the fixed basis for every
/// percentage/dollar conversion, `running_salary` is what is left after the
/// recorded spending.
#[derive(Debug, Clone)]
pub struct Budget {
    mode: AllocationMode,
    original_salary: Decimal,
    running_salary: Decimal,
    categories: Vec<Category>,
}

impl Budget {
    pub fn build(
        salary: Decimal,
        mode: AllocationMode,
        entries: Vec<CategoryInput>,
    ) -> Result<Self, AllocationError> {
        if !is_valid_salary(salary) {
            return Err(AllocationError::InvalidSalary);
        }
        if mode == AllocationMode::Personalized && entries.is_empty() {
            return Err(AllocationError::NoCategoriesProvided);
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            let name = entry.name.trim();
            if name.is_empty() {
                return Err(AllocationError::EmptyCategoryName);
            }
            if !is_valid_percentage(entry.percentage) {
                return Err(AllocationError::InvalidPercentage(
                    entry.percentage.normalize().to_string(),
                ));
            }
            if !seen.insert(name.to_lowercase()) {
                return Err(AllocationError::DuplicateCategoryName(name.to_string()));
            }
        }

        let categories = entries
            .into_iter()
            .filter(|e| mode == AllocationMode::Personalized || e.percentage > Decimal::ZERO)
            .enumerate()
            .map(|(i, mut e)| {
                e.name = e.name.trim().to_string();
                Category::new(CategoryId(i), e)
            })
            .collect();

        Ok(Self {
            mode,
            original_salary: salary,
            running_salary: salary,
            categories,
        })
    }

    /// Preset mode: Utilities, Savings and Personal Needs. Zero-percent buckets are left out.
    pub fn preset(
        salary: Decimal,
        utilities: Decimal,
        savings: Decimal,
        personal_needs: Decimal,
    ) -> Result<Self, AllocationError> {
        let entries = PresetCategory::all()
            .iter()
            .zip([utilities, savings, personal_needs])
            .map(|(preset, pct)| CategoryInput::new(preset.as_str(), pct, preset.color()))
            .collect();
        Self::build(salary, AllocationMode::Preset, entries)
    }

    pub fn personalized(
        salary: Decimal,
        entries: Vec<CategoryInput>,
    ) -> Result<Self, AllocationError> {
        Self::build(salary, AllocationMode::Personalized, entries)
    }

    pub fn mode(&self) -> AllocationMode {
        self.mode
    }

    pub fn original_salary(&self) -> Decimal {
        self.original_salary
    }

    pub fn running_salary(&self) -> Decimal {
        self.running_salary
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        Category::find_by_id(&self.categories, id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Category> {
        Category::find_by_name(&self.categories, name)
    }

    pub fn percentage(&self, id: CategoryId) -> Option<Decimal> {
        self.category(id)
            .map(|c| c.percentage(self.original_salary))
    }

    /// Current allocation in dollars: `percentage / 100 * original_salary`.
    pub fn allocated_amount(&self, id: CategoryId) -> Option<Decimal> {
        self.category(id)
            .map(|c| c.remaining_amount(self.original_salary))
    }

    /// Sum of the built percentages. May exceed 100.
    pub fn total_percentage(&self) -> Decimal {
        self.categories.iter().map(|c| c.base_percentage).sum()
    }

    /// Take `amount` out of a category. Rejected (state unchanged) when it
    /// would push the category's percentage below zero.
    pub fn record_spending(
        &mut self,
        id: CategoryId,
        amount: Decimal,
    ) -> Result<Decimal, AllocationError> {
        if amount <= Decimal::ZERO {
            return Err(AllocationError::InvalidAmount);
        }
        let salary = self.original_salary;
        let category = Category::find_by_id_mut(&mut self.categories, id)?;
        let available = category.remaining_amount(salary);
        if amount > available {
            return Err(AllocationError::InsufficientAllocation {
                category: category.name.clone(),
                requested: format!("{:.2}", amount),
                available: format!("{:.2}", available.max(Decimal::ZERO)),
            });
        }
        let (Some(spent), Some(running)) = (
            category.spent.checked_add(amount),
            self.running_salary.checked_sub(amount),
        ) else {
            return Err(AllocationError::InvalidAmount);
        };
        category.spent = spent;
        self.running_salary = running;
        Ok(category.percentage(salary))
    }

    /// Put `amount` back into a category. Callers must pair this with exactly
    /// one earlier `record_spending` of the same amount.
    pub fn reverse_spending(
        &mut self,
        id: CategoryId,
        amount: Decimal,
    ) -> Result<Decimal, AllocationError> {
        if amount <= Decimal::ZERO {
            return Err(AllocationError::InvalidAmount);
        }
        let salary = self.original_salary;
        let category = Category::find_by_id_mut(&mut self.categories, id)?;
        let (Some(spent), Some(running)) = (
            category.spent.checked_sub(amount),
            self.running_salary.checked_add(amount),
        ) else {
            return Err(AllocationError::InvalidAmount);
        };
        category.spent = spent;
        self.running_salary = running;
        Ok(category.percentage(salary))
    }
}

fn is_valid_percentage(pct: Decimal) -> bool {
    pct >= Decimal::ZERO && pct <= Decimal::ONE_HUNDRED
}

fn is_valid_salary(salary: Decimal) -> bool {
    salary > Decimal::ZERO && salary <= MAX_SALARY
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '%'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Parse a salary field. Blank, non-numeric, non-positive or oversized input
/// is rejected.
pub fn parse_salary(s: &str) -> Result<Decimal, AllocationError> {
    match parse_decimal(s) {
        Some(v) if is_valid_salary(v) => Ok(v),
        _ => Err(AllocationError::InvalidSalary),
    }
}

pub fn parse_percentage(s: &str) -> Result<Decimal, AllocationError> {
    match parse_decimal(s) {
        Some(v) if is_valid_percentage(v) => Ok(v),
        _ => Err(AllocationError::InvalidPercentage(s.trim().to_string())),
    }
}

pub fn parse_amount(s: &str) -> Result<Decimal, AllocationError> {
    match parse_decimal(s) {
        Some(v) if v > Decimal::ZERO => Ok(v),
        _ => Err(AllocationError::InvalidAmount),
    }
}
