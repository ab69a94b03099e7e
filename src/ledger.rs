use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::error::AnalysisError;
use crate::models::{Execution, TradeSide};

/// One row of the broker tradebook CSV. Zerodha exports carry extra
/// columns (isin, exchange, segment, order ids, ...); only these five are
/// read, the rest are ignored.
#[derive(Debug, Deserialize)]
struct LedgerRow {
    symbol: String,
    trade_date: String,
    trade_type: String,
    quantity: f64,
    price: f64,
}

/// Read the tradebook CSV into execution records. Any malformed row fails
/// the read with its file line number (header line is 1).
pub fn read_tradebook(path: &Path) -> Result<Vec<Execution>, AnalysisError> {
    let file = std::fs::File::open(path).map_err(|source| AnalysisError::LedgerRead {
        path: path.display().to_string(),
        source,
    })?;

    let mut reader = csv::Reader::from_reader(file);
    let mut executions = Vec::new();

    for (i, result) in reader.deserialize::<LedgerRow>().enumerate() {
        let row = i + 2;
        let record = result.map_err(|source| AnalysisError::LedgerParse {
            path: path.display().to_string(),
            row,
            source,
        })?;
        executions.push(to_execution(record, row)?);
    }

    info!("read {} executions from {}", executions.len(), path.display());
    Ok(executions)
}

fn to_execution(record: LedgerRow, row: usize) -> Result<Execution, AnalysisError> {
    let invalid = |reason: String| AnalysisError::InvalidInput {
        symbol: record.symbol.clone(),
        date: record.trade_date.clone(),
        row: Some(row),
        reason,
    };

    let date = NaiveDate::parse_from_str(&record.trade_date, "%Y-%m-%d")
        .map_err(|e| invalid(format!("unparseable trade_date: {e}")))?;

    let side = match record.trade_type.to_lowercase().as_str() {
        "buy" => TradeSide::Buy,
        "sell" => TradeSide::Sell,
        other => return Err(invalid(format!("unknown trade_type '{other}'"))),
    };

    if !(record.quantity > 0.0) || record.quantity.fract() != 0.0 {
        return Err(invalid(format!(
            "quantity must be a positive whole number, got {}",
            record.quantity
        )));
    }
    if !(record.price > 0.0) || !record.price.is_finite() {
        return Err(invalid(format!("price must be positive, got {}", record.price)));
    }

    Ok(Execution {
        symbol: record.symbol,
        date,
        side,
        quantity: record.quantity as u32,
        price: record.price,
    })
}
