pub mod analysis;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod report;
#[cfg(test)]
pub mod test_helpers;
