use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Direction;

/// One reconstructed round-trip position on a single instrument:
/// open, accumulate, flat. Built incrementally by the position
/// reconstructor and finalized the moment buy and sell quantities match,
/// or emitted unclosed (`executed = false`) when the instrument's
/// execution stream ends with an open position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundTripTrade {
    pub symbol: String,
    /// Fixed by whichever side executed first; `None` only before the
    /// first execution reaches the accumulator.
    pub direction: Option<Direction>,

    pub buy_quantity: u32,
    pub avg_buy_price: f64,
    pub total_buy_notional: f64,
    pub first_buy_date: Option<NaiveDate>,
    pub last_buy_date: Option<NaiveDate>,
    pub buy_dates: Vec<NaiveDate>,

    pub sell_quantity: u32,
    pub avg_sell_price: f64,
    pub total_sell_notional: f64,
    pub first_sell_date: Option<NaiveDate>,
    pub last_sell_date: Option<NaiveDate>,
    pub sell_dates: Vec<NaiveDate>,

    /// True iff the position went flat (buy quantity == sell quantity).
    pub executed: bool,
    /// Anomaly flag: an unclosed Long position whose recorded sells exceed
    /// its recorded buys. Data inconsistency, not a valid short-within-long.
    pub quantity_mismatch: bool,

    /// Total sell notional minus total buy notional.
    pub gain: f64,
    /// `gain * 100 / total_buy_notional`; `None` when the trade has no buy
    /// notional (unclosed short that was never covered).
    pub gain_pct: Option<f64>,
}

impl RoundTripTrade {
    pub fn open(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            direction: None,
            buy_quantity: 0,
            avg_buy_price: 0.0,
            total_buy_notional: 0.0,
            first_buy_date: None,
            last_buy_date: None,
            buy_dates: Vec::new(),
            sell_quantity: 0,
            avg_sell_price: 0.0,
            total_sell_notional: 0.0,
            first_sell_date: None,
            last_sell_date: None,
            sell_dates: Vec::new(),
            executed: false,
            quantity_mismatch: false,
            gain: 0.0,
            gain_pct: None,
        }
    }

    pub fn is_flat(&self) -> bool {
        self.buy_quantity == self.sell_quantity
    }

    pub fn has_activity(&self) -> bool {
        self.buy_quantity > 0 || self.sell_quantity > 0
    }

    /// Date the position was opened: the earliest recorded activity on
    /// either side. Used as the stable sort key for the journal.
    pub fn opened_on(&self) -> Option<NaiveDate> {
        match (self.first_buy_date, self.first_sell_date) {
            (Some(b), Some(s)) => Some(b.min(s)),
            (Some(b), None) => Some(b),
            (None, Some(s)) => Some(s),
            (None, None) => None,
        }
    }

    /// Compute the derived gain figures from the exact running notionals.
    pub fn finalize(&mut self) {
        self.gain = self.total_sell_notional - self.total_buy_notional;
        self.gain_pct = if self.total_buy_notional > 0.0 {
            Some(self.gain * 100.0 / self.total_buy_notional)
        } else {
            None
        };
    }
}
