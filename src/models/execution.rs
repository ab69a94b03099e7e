use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::TradeSide;

/// One fill from the broker ledger. Time-of-day is irrelevant to the
/// analysis; the ledger is aggregated per calendar day before any position
/// reconstruction happens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Execution {
    pub symbol: String,
    pub date: NaiveDate,
    pub side: TradeSide,
    pub quantity: u32,
    pub price: f64,
}

impl Execution {
    pub fn new(symbol: &str, date: NaiveDate, side: TradeSide, quantity: u32, price: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            date,
            side,
            quantity,
            price,
        }
    }

    pub fn notional(&self) -> f64 {
        self.quantity as f64 * self.price
    }
}

/// Same shape as [`Execution`], but quantity and price are already merged
/// across all same-day fills of one side for one instrument.
///
/// Invariant: at most one Buy and one Sell per (symbol, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedExecution {
    pub symbol: String,
    pub date: NaiveDate,
    pub side: TradeSide,
    pub quantity: u32,
    pub price: f64,
}

impl AggregatedExecution {
    pub fn notional(&self) -> f64 {
        self.quantity as f64 * self.price
    }
}
