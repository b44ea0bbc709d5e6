use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::models::{
    parse_percentage, parse_salary, AllocationError, AllocationMode, Budget, CategoryInput,
    PresetCategory, MAX_SALARY,
};

pub(crate) const DEFAULT_COLOR: &str = "#007BFF";

static HEX_COLOR: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").ok());

pub(crate) fn is_hex_color(s: &str) -> bool {
    HEX_COLOR.as_ref().is_some_and(|re| re.is_match(s))
}

/// Unsaved text for one personalized category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategoryDraft {
    pub(crate) name: String,
    pub(crate) percentage: String,
    pub(crate) color: String,
}

impl Default for CategoryDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            percentage: String::new(),
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

/// One editable field in the Setup screen, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Salary,
    Preset(PresetCategory),
    Name(usize),
    Percentage(usize),
    Color(usize),
}

impl FormField {
    pub(crate) fn label(&self) -> String {
        match self {
            Self::Salary => "Monthly Salary".into(),
            Self::Preset(p) => format!("{p} %"),
            Self::Name(i) => format!("Category {} Name", i + 1),
            Self::Percentage(i) => format!("Category {} %", i + 1),
            Self::Color(i) => format!("Category {} Color", i + 1),
        }
    }
}

/// Text typed into the Setup screen. Only one mode is active at a time and
/// nothing is validated until `submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BudgetForm {
    pub(crate) mode: AllocationMode,
    pub(crate) salary: String,
    pub(crate) utilities: String,
    pub(crate) savings: String,
    pub(crate) personal_needs: String,
    pub(crate) categories: Vec<CategoryDraft>,
}

impl Default for BudgetForm {
    fn default() -> Self {
        Self::new(AllocationMode::Preset)
    }
}

impl BudgetForm {
    pub(crate) fn new(mode: AllocationMode) -> Self {
        Self {
            mode,
            salary: String::new(),
            utilities: String::new(),
            savings: String::new(),
            personal_needs: String::new(),
            categories: Vec::new(),
        }
    }

    /// Switch modes. Unsaved input from either mode is thrown away.
    pub(crate) fn set_mode(&mut self, mode: AllocationMode) {
        *self = Self::new(mode);
    }

    pub(crate) fn fields(&self) -> Vec<FormField> {
        let mut fields = vec![FormField::Salary];
        match self.mode {
            AllocationMode::Preset => {
                fields.extend(PresetCategory::all().iter().map(|p| FormField::Preset(*p)));
            }
            AllocationMode::Personalized => {
                for i in 0..self.categories.len() {
                    fields.push(FormField::Name(i));
                    fields.push(FormField::Percentage(i));
                    fields.push(FormField::Color(i));
                }
            }
        }
        fields
    }

    pub(crate) fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Salary => &self.salary,
            FormField::Preset(PresetCategory::Utilities) => &self.utilities,
            FormField::Preset(PresetCategory::Savings) => &self.savings,
            FormField::Preset(PresetCategory::PersonalNeeds) => &self.personal_needs,
            FormField::Name(i) => self.categories.get(i).map_or("", |c| c.name.as_str()),
            FormField::Percentage(i) => self
                .categories
                .get(i)
                .map_or("", |c| c.percentage.as_str()),
            FormField::Color(i) => self.categories.get(i).map_or("", |c| c.color.as_str()),
        }
    }

    pub(crate) fn set_value(&mut self, field: FormField, value: &str) {
        let value = value.trim().to_string();
        match field {
            FormField::Salary => self.salary = value,
            FormField::Preset(PresetCategory::Utilities) => self.utilities = value,
            FormField::Preset(PresetCategory::Savings) => self.savings = value,
            FormField::Preset(PresetCategory::PersonalNeeds) => self.personal_needs = value,
            FormField::Name(i) => {
                if let Some(c) = self.categories.get_mut(i) {
                    c.name = value;
                }
            }
            FormField::Percentage(i) => {
                if let Some(c) = self.categories.get_mut(i) {
                    c.percentage = value;
                }
            }
            FormField::Color(i) => {
                if let Some(c) = self.categories.get_mut(i) {
                    c.color = value;
                }
            }
        }
    }

    /// Append a personalized category draft and return its index.
    pub(crate) fn add_category(&mut self, draft: CategoryDraft) -> usize {
        self.categories.push(draft);
        self.categories.len() - 1
    }

    pub(crate) fn remove_category(&mut self, index: usize) -> Option<CategoryDraft> {
        (index < self.categories.len()).then(|| self.categories.remove(index))
    }

    /// Add `amount` to the salary field. A blank or unreadable salary counts as
    /// zero. The field is left alone when the sum passes `MAX_SALARY`.
    pub(crate) fn add_funds(&mut self, amount: Decimal) -> Result<(), AllocationError> {
        let current = parse_salary(&self.salary).unwrap_or(Decimal::ZERO);
        let total = current
            .checked_add(amount)
            .filter(|total| *total <= MAX_SALARY)
            .ok_or(AllocationError::InvalidSalary)?;
        self.salary = total.normalize().to_string();
        Ok(())
    }

    pub(crate) fn submit(&self) -> Result<Budget, AllocationError> {
        let salary = parse_salary(&self.salary)?;
        match self.mode {
            AllocationMode::Preset => Budget::preset(
                salary,
                parse_percentage(&self.utilities)?,
                parse_percentage(&self.savings)?,
                parse_percentage(&self.personal_needs)?,
            ),
            AllocationMode::Personalized => {
                if self.categories.is_empty() {
                    return Err(AllocationError::NoCategoriesProvided);
                }
                let entries = self
                    .categories
                    .iter()
                    .map(|draft| {
                        if draft.name.trim().is_empty() {
                            return Err(AllocationError::EmptyCategoryName);
                        }
                        let percentage = parse_percentage(&draft.percentage)?;
                        if !is_hex_color(draft.color.trim()) {
                            return Err(AllocationError::InvalidColor(draft.color.clone()));
                        }
                        Ok(CategoryInput::new(
                            draft.name.trim(),
                            percentage,
                            draft.color.trim().to_uppercase(),
                        ))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Budget::personalized(salary, entries)
            }
        }
    }
}
