use tracing::warn;

use crate::models::{AggregatedExecution, Direction, RoundTripTrade, TradeSide};

/// State machine that folds one instrument's chronologically ordered,
/// aggregated execution stream into round-trip trades.
///
/// A position opens on the first execution (fixing its direction: Long if
/// a buy opened it, Short if a sell did), accumulates partial fills with
/// exact running notionals, and closes the instant buy quantity equals
/// sell quantity. A stream that ends with an open position still emits
/// that trade, flagged `executed = false`.
pub struct PositionReconstructor {
    symbol: String,
    current: RoundTripTrade,
    trades: Vec<RoundTripTrade>,
}

impl PositionReconstructor {
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            current: RoundTripTrade::open(symbol),
            trades: Vec::new(),
        }
    }

    /// Run the full reconstruction for one instrument.
    pub fn reconstruct(symbol: &str, executions: &[AggregatedExecution]) -> Vec<RoundTripTrade> {
        let mut rec = Self::new(symbol);
        for ex in executions {
            rec.apply(ex);
        }
        rec.finish()
    }

    /// Fold one aggregated execution into the open position, closing and
    /// resetting the accumulator if the position goes flat.
    pub fn apply(&mut self, ex: &AggregatedExecution) {
        debug_assert_eq!(ex.symbol, self.symbol);

        if self.current.direction.is_none() {
            self.current.direction = Some(Direction::from(ex.side));
        }

        match ex.side {
            TradeSide::Buy => {
                self.current.total_buy_notional += ex.notional();
                self.current.buy_quantity += ex.quantity;
                self.current.avg_buy_price =
                    self.current.total_buy_notional / self.current.buy_quantity as f64;
                if self.current.first_buy_date.is_none() {
                    self.current.first_buy_date = Some(ex.date);
                }
                self.current.last_buy_date = Some(ex.date);
                self.current.buy_dates.push(ex.date);
            }
            TradeSide::Sell => {
                self.current.total_sell_notional += ex.notional();
                self.current.sell_quantity += ex.quantity;
                self.current.avg_sell_price =
                    self.current.total_sell_notional / self.current.sell_quantity as f64;
                if self.current.first_sell_date.is_none() {
                    self.current.first_sell_date = Some(ex.date);
                }
                self.current.last_sell_date = Some(ex.date);
                self.current.sell_dates.push(ex.date);
            }
        }

        if self.current.is_flat() {
            let mut closed = std::mem::replace(
                &mut self.current,
                RoundTripTrade::open(&self.symbol),
            );
            closed.executed = true;
            closed.finalize();
            self.trades.push(closed);
        }
    }

    /// End of the instrument's stream. A trailing open position is emitted
    /// as its own unclosed record, whether or not earlier trades closed.
    pub fn finish(mut self) -> Vec<RoundTripTrade> {
        if self.current.has_activity() {
            let mut open = self.current;
            if open.direction == Some(Direction::Long)
                && open.sell_quantity > open.buy_quantity
            {
                // More sold than bought on a Long position: ledger anomaly.
                open.quantity_mismatch = true;
                warn!(
                    "{}: sold {} against {} bought on a long position",
                    open.symbol, open.sell_quantity, open.buy_quantity
                );
            }
            open.finalize();
            self.trades.push(open);
        }
        self.trades
    }
}
