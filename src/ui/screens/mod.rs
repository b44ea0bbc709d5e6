pub(crate) mod chart;
pub(crate) mod ledger;
pub(crate) mod setup;
