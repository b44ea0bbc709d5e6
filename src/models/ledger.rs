use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{AllocationError, Budget, CategoryId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub u64);

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpendingEntry {
    pub id: EntryId,
    pub date: NaiveDate,
    pub reason: String,
    pub amount: Decimal,
    pub category_id: CategoryId,
    /// Category label at the time the entry was recorded.
    pub category_name: String,
}

/// Ordered record of spending applied to the live budget.
///
/// Every entry in the ledger has been applied to the budget exactly once;
/// removing it applies the reversal exactly once.
#[derive(Debug, Default)]
pub struct Ledger {
    entries: Vec<SpendingEntry>,
    next_id: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[SpendingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: EntryId) -> Option<&SpendingEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn total_spent(&self) -> Decimal {
        self.entries
            .iter()
            .fold(Decimal::ZERO, |total, e| total.saturating_add(e.amount))
    }

    pub fn record(
        &mut self,
        budget: &mut Budget,
        date: NaiveDate,
        reason: &str,
        category_id: CategoryId,
        amount: Decimal,
    ) -> Result<&SpendingEntry, AllocationError> {
        budget.record_spending(category_id, amount)?;
        let category_name = budget
            .category(category_id)
            .map(|c| c.name.clone())
            .unwrap_or_default();

        self.next_id += 1;
        self.entries.push(SpendingEntry {
            id: EntryId(self.next_id),
            date,
            reason: reason.trim().to_string(),
            amount,
            category_id,
            category_name,
        });
        self.entries
            .last()
            .ok_or(AllocationError::UnknownEntry(self.next_id))
    }

    pub fn remove(
        &mut self,
        budget: &mut Budget,
        id: EntryId,
    ) -> Result<SpendingEntry, AllocationError> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(AllocationError::UnknownEntry(id.0))?;
        let entry = &self.entries[pos];
        budget.reverse_spending(entry.category_id, entry.amount)?;
        Ok(self.entries.remove(pos))
    }

    /// Reverse every entry, newest first, and empty the ledger.
    pub fn reverse_all(&mut self, budget: &mut Budget) -> Result<usize, AllocationError> {
        let count = self.entries.len();
        while let Some(entry) = self.entries.last() {
            budget.reverse_spending(entry.category_id, entry.amount)?;
            self.entries.pop();
        }
        Ok(count)
    }

    /// Drop entries without touching any budget. Used when the budget they
    /// were applied to is discarded.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
