use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::AnalysisError;
use crate::models::{AggregatedExecution, Execution, TradeSide};

/// Collapse same-day, same-side fills per instrument into one synthetic
/// execution: summed quantity, quantity-weighted average price.
///
/// Output is sorted by (symbol, date, side) with Buy before Sell within a
/// day, which is the order the position reconstructor consumes. Pure
/// transform; running it on already-aggregated input is a no-op.
pub fn aggregate(executions: &[Execution]) -> Result<Vec<AggregatedExecution>, AnalysisError> {
    let mut groups: BTreeMap<(String, NaiveDate, TradeSide), (u32, f64)> = BTreeMap::new();

    for ex in executions {
        validate(ex)?;
        let entry = groups
            .entry((ex.symbol.clone(), ex.date, ex.side))
            .or_insert((0, 0.0));
        entry.0 += ex.quantity;
        entry.1 += ex.notional();
    }

    Ok(groups
        .into_iter()
        .map(|((symbol, date, side), (quantity, notional))| AggregatedExecution {
            symbol,
            date,
            side,
            quantity,
            price: notional / quantity as f64,
        })
        .collect())
}

fn validate(ex: &Execution) -> Result<(), AnalysisError> {
    if ex.quantity == 0 {
        return Err(AnalysisError::InvalidInput {
            symbol: ex.symbol.clone(),
            date: ex.date.to_string(),
            row: None,
            reason: "quantity must be positive".to_string(),
        });
    }
    if !(ex.price > 0.0) || !ex.price.is_finite() {
        return Err(AnalysisError::InvalidInput {
            symbol: ex.symbol.clone(),
            date: ex.date.to_string(),
            row: None,
            reason: format!("price must be positive, got {}", ex.price),
        });
    }
    Ok(())
}
