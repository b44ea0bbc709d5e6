use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::chart::{ChartData, DonutChart};
use crate::models::{AllocationError, Budget, CategoryId, EntryId, Ledger, SpendingEntry};

/// The live budget, its spending ledger and the chart drawn from them.
///
/// Owned by the top-level controller and handed to whatever needs it.
#[derive(Debug)]
pub(crate) struct Session {
    budget: Option<Budget>,
    ledger: Ledger,
    chart: DonutChart,
}

impl Session {
    pub(crate) fn new() -> Self {
        Self {
            budget: None,
            ledger: Ledger::new(),
            chart: DonutChart::new(),
        }
    }

    pub(crate) fn budget(&self) -> Option<&Budget> {
        self.budget.as_ref()
    }

    pub(crate) fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub(crate) fn chart(&self) -> &DonutChart {
        &self.chart
    }

    /// Replace the live budget. Spending recorded against the previous one is
    /// dropped and the chart is rebuilt from scratch.
    pub(crate) fn submit(&mut self, budget: Budget) {
        let dropped = self.ledger.len();
        self.ledger.clear();
        self.chart
            .build(ChartData::from_budget(&budget), budget.original_salary());
        tracing::info!(
            mode = %budget.mode(),
            salary = %budget.original_salary(),
            categories = budget.categories().len(),
            dropped_entries = dropped,
            chart_generation = self.chart.generation(),
            chart_state = ?self.chart.state(),
            "budget built"
        );
        self.budget = Some(budget);
    }

    pub(crate) fn record_spending(
        &mut self,
        date: NaiveDate,
        reason: &str,
        category_id: CategoryId,
        amount: Decimal,
    ) -> Result<SpendingEntry, AllocationError> {
        let budget = self.budget.as_mut().ok_or(AllocationError::NoBudget)?;
        let entry = match self.ledger.record(budget, date, reason, category_id, amount) {
            Ok(entry) => entry.clone(),
            Err(e) => {
                tracing::warn!(category = %category_id, %amount, error = %e, "spending rejected");
                return Err(e);
            }
        };
        tracing::info!(
            entry = %entry.id,
            category = %entry.category_name,
            %amount,
            running_salary = %budget.running_salary(),
            "spending recorded"
        );
        self.refresh_chart()?;
        Ok(entry)
    }

    pub(crate) fn delete_entry(&mut self, id: EntryId) -> Result<SpendingEntry, AllocationError> {
        let budget = self.budget.as_mut().ok_or(AllocationError::NoBudget)?;
        let entry = self.ledger.remove(budget, id)?;
        tracing::info!(
            entry = %entry.id,
            category = %entry.category_name,
            amount = %entry.amount,
            running_salary = %budget.running_salary(),
            "spending entry deleted"
        );
        self.refresh_chart()?;
        Ok(entry)
    }

    /// Undo every recorded entry so each category is back at its built allocation.
    pub(crate) fn clear_spending(&mut self) -> Result<usize, AllocationError> {
        let budget = self.budget.as_mut().ok_or(AllocationError::NoBudget)?;
        let count = self.ledger.reverse_all(budget)?;
        tracing::info!(entries = count, "spending cleared");
        self.refresh_chart()?;
        Ok(count)
    }

    /// Drop the budget and its ledger, and tear the chart down.
    pub(crate) fn clear_chart(&mut self) {
        self.budget = None;
        self.ledger.clear();
        self.chart.destroy();
        tracing::info!("budget chart cleared");
    }

    fn refresh_chart(&mut self) -> Result<(), AllocationError> {
        if let Some(budget) = &self.budget {
            self.chart
                .update_values(ChartData::from_budget(budget).values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
