use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::models::RoundTripTrade;

/// Aggregate statistics over the executed trades opened before one session
/// boundary. Recomputed fresh per boundary, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetrics {
    pub session_end: NaiveDate,
    pub trades: usize,
    pub win_rate: f64,
    pub lose_rate: f64,
    /// Mean gain over winning trades, in currency.
    pub avg_gain: f64,
    /// Mean gain over losing trades, in currency. Signed, negative.
    pub avg_loss: f64,
    pub avg_gain_pct: f64,
    pub avg_loss_pct: f64,
    pub reward_risk_ratio: f64,
    pub reward_risk_ratio_pct: f64,
    /// win_rate * reward_risk_ratio / lose_rate
    pub expectancy: f64,
    pub expectancy_pct: f64,
}

/// Compute the session statistics over all executed trades whose first buy
/// date precedes `session_end`.
///
/// Classification asymmetry is deliberate and matches the reference
/// behavior: currency win/loss splits on gain >= 0 vs < 0, while the
/// percentage averages use strict > 0 vs < 0 (a zero-gain trade counts as
/// a win but joins neither percentage average).
pub fn session_metrics(
    trades: &[RoundTripTrade],
    session_end: NaiveDate,
) -> Result<SessionMetrics, AnalysisError> {
    let qualified: Vec<&RoundTripTrade> = trades
        .iter()
        .filter(|t| t.executed)
        .filter(|t| t.first_buy_date.map_or(false, |d| d < session_end))
        .collect();

    if qualified.is_empty() {
        return Err(AnalysisError::InsufficientData { session_end });
    }

    let n = qualified.len() as f64;
    let gains: Vec<f64> = qualified.iter().map(|t| t.gain).collect();
    let winners: Vec<f64> = gains.iter().copied().filter(|g| *g >= 0.0).collect();
    let losers: Vec<f64> = gains.iter().copied().filter(|g| *g < 0.0).collect();

    let win_rate = winners.len() as f64 / n;
    let lose_rate = losers.len() as f64 / n;

    if winners.is_empty() {
        return Err(AnalysisError::DivisionUndefined {
            session_end,
            reason: "no winning trades, average gain is undefined".to_string(),
        });
    }
    if losers.is_empty() {
        return Err(AnalysisError::DivisionUndefined {
            session_end,
            reason: "no losing trades, lose rate is zero".to_string(),
        });
    }

    let pcts: Vec<f64> = qualified.iter().filter_map(|t| t.gain_pct).collect();
    let pct_winners: Vec<f64> = pcts.iter().copied().filter(|p| *p > 0.0).collect();
    let pct_losers: Vec<f64> = pcts.iter().copied().filter(|p| *p < 0.0).collect();

    if pct_winners.is_empty() || pct_losers.is_empty() {
        return Err(AnalysisError::DivisionUndefined {
            session_end,
            reason: "percentage gain classification left an empty side".to_string(),
        });
    }

    let avg_gain = mean(&winners);
    let avg_loss = mean(&losers);
    let avg_gain_pct = mean(&pct_winners);
    let avg_loss_pct = mean(&pct_losers);

    let reward_risk_ratio = avg_gain / -avg_loss;
    let reward_risk_ratio_pct = avg_gain_pct / avg_loss_pct * -1.0;

    Ok(SessionMetrics {
        session_end,
        trades: qualified.len(),
        win_rate,
        lose_rate,
        avg_gain,
        avg_loss,
        avg_gain_pct,
        avg_loss_pct,
        reward_risk_ratio,
        reward_risk_ratio_pct,
        expectancy: win_rate * reward_risk_ratio / lose_rate,
        expectancy_pct: win_rate * reward_risk_ratio_pct / lose_rate,
    })
}

fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / xs.len() as f64
}
