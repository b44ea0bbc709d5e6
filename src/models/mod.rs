mod budget;
mod category;
mod error;
mod ledger;

pub use budget::{
    parse_amount, parse_percentage, parse_salary, AllocationMode, Budget, MAX_SALARY,
};
pub use category::{Category, CategoryId, CategoryInput, PresetCategory};
pub use error::AllocationError;
pub use ledger::{EntryId, Ledger, SpendingEntry};

#[cfg(test)]
mod tests;
