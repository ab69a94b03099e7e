use std::path::PathBuf;

use chrono::NaiveDate;

use crate::models::{Execution, RoundTripTrade, TradeSide};

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn exec(symbol: &str, date: &str, side: TradeSide, quantity: u32, price: f64) -> Execution {
    Execution::new(symbol, d(date), side, quantity, price)
}

/// A flat 10-share round trip with the given buy/sell notionals, opened on
/// `first_buy_date`.
pub fn closed_trade(
    symbol: &str,
    first_buy_date: &str,
    buy_notional: f64,
    sell_notional: f64,
) -> RoundTripTrade {
    let open = d(first_buy_date);
    let mut t = RoundTripTrade::open(symbol);
    t.direction = Some(crate::models::Direction::Long);
    t.buy_quantity = 10;
    t.total_buy_notional = buy_notional;
    t.avg_buy_price = buy_notional / 10.0;
    t.first_buy_date = Some(open);
    t.last_buy_date = Some(open);
    t.buy_dates = vec![open];
    t.sell_quantity = 10;
    t.total_sell_notional = sell_notional;
    t.avg_sell_price = sell_notional / 10.0;
    t.first_sell_date = Some(open);
    t.last_sell_date = Some(open);
    t.sell_dates = vec![open];
    t.executed = true;
    t.finalize();
    t
}

/// Write test input under a process-scoped temp directory and return the
/// path.
pub fn write_temp_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tradebook_analyzer_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
