//! Donut chart state driven by the allocation model.
//!
//! The chart owns a copy of `{labels, values, colors}` and moves through
//! `Absent -> Built -> Updated -> Destroyed`. A rebuild while built always
//! destroys the old instance first so no stale chart survives.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{AllocationError, Budget};
use crate::ui::util::format_amount;

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ChartData {
    pub(crate) labels: Vec<String>,
    /// Percentages of the original salary, one per label.
    pub(crate) values: Vec<Decimal>,
    pub(crate) colors: Vec<String>,
}

impl ChartData {
    pub(crate) fn from_budget(budget: &Budget) -> Self {
        let salary = budget.original_salary();
        let cats = budget.categories();
        Self {
            labels: cats.iter().map(|c| c.name.clone()).collect(),
            values: cats.iter().map(|c| c.percentage(salary)).collect(),
            colors: cats.iter().map(|c| c.color.clone()).collect(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.labels.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChartState {
    Absent,
    Built,
    Updated,
    Destroyed,
}

impl std::fmt::Display for ChartState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Absent => write!(f, "absent"),
            Self::Built => write!(f, "built"),
            Self::Updated => write!(f, "updated"),
            Self::Destroyed => write!(f, "destroyed"),
        }
    }
}

#[derive(Debug)]
pub(crate) struct DonutChart {
    state: ChartState,
    data: ChartData,
    original_salary: Decimal,
    /// Bumped on every build; identity is kept across in-place updates.
    generation: u64,
}

impl Default for DonutChart {
    fn default() -> Self {
        Self::new()
    }
}

impl DonutChart {
    pub(crate) fn new() -> Self {
        Self {
            state: ChartState::Absent,
            data: ChartData::default(),
            original_salary: Decimal::ZERO,
            generation: 0,
        }
    }

    pub(crate) fn state(&self) -> ChartState {
        self.state
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn data(&self) -> &ChartData {
        &self.data
    }

    pub(crate) fn is_built(&self) -> bool {
        matches!(self.state, ChartState::Built | ChartState::Updated)
    }

    pub(crate) fn build(&mut self, data: ChartData, original_salary: Decimal) {
        if self.is_built() {
            self.destroy();
        }
        self.data = data;
        self.original_salary = original_salary;
        self.generation += 1;
        self.state = ChartState::Built;
        tracing::debug!(
            generation = self.generation,
            slices = self.data.len(),
            "chart built"
        );
    }

    /// Replace the slice values without rebuilding the chart.
    pub(crate) fn update_values(&mut self, values: Vec<Decimal>) -> Result<(), AllocationError> {
        if !self.is_built() || values.len() != self.data.len() {
            return Err(AllocationError::ChartNotBuilt);
        }
        self.data.values = values;
        self.state = ChartState::Updated;
        tracing::debug!(generation = self.generation, "chart values updated");
        Ok(())
    }

    pub(crate) fn destroy(&mut self) {
        if self.state == ChartState::Absent {
            return;
        }
        self.data = ChartData::default();
        self.original_salary = Decimal::ZERO;
        self.state = ChartState::Destroyed;
        tracing::debug!(generation = self.generation, "chart destroyed");
    }

    /// Text drawn in the hole of the donut: always the original salary.
    pub(crate) fn center_label(&self) -> Option<String> {
        self.is_built().then(|| format_amount(self.original_salary))
    }

    pub(crate) fn tooltip(&self, index: usize) -> Option<String> {
        if !self.is_built() {
            return None;
        }
        let label = self.data.labels.get(index)?;
        let value = self.data.values.get(index)?;
        let amount = *value / Decimal::ONE_HUNDRED * self.original_salary;
        Some(format!("{label}: {}", format_amount(amount)))
    }

    /// Each slice's share of the whole ring, in chart order. Empty when there
    /// is nothing to draw.
    pub(crate) fn slices(&self) -> Vec<(f64, &str)> {
        if !self.is_built() {
            return Vec::new();
        }
        let total: Decimal = self
            .data
            .values
            .iter()
            .filter(|v| **v > Decimal::ZERO)
            .sum();
        if total <= Decimal::ZERO {
            return Vec::new();
        }
        self.data
            .values
            .iter()
            .zip(&self.data.colors)
            .map(|(v, color)| {
                let share = ((*v).max(Decimal::ZERO) / total).to_f64().unwrap_or(0.0);
                (share, color.as_str())
            })
            .collect()
    }
}
