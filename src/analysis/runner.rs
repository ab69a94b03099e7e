use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::analysis::aggregator;
use crate::analysis::performance::{self, SessionMetrics};
use crate::analysis::reconstructor::PositionReconstructor;
use crate::error::AnalysisError;
use crate::models::{Execution, RoundTripTrade};

/// One instrument whose batch failed validation. Other instruments are
/// unaffected.
#[derive(Debug)]
pub struct InstrumentFailure {
    pub symbol: String,
    pub error: AnalysisError,
}

/// Metrics outcome for one session boundary. A degenerate window is
/// recorded here instead of aborting the other boundaries.
#[derive(Debug)]
pub struct SessionOutcome {
    pub session_end: NaiveDate,
    pub metrics: Result<SessionMetrics, AnalysisError>,
}

/// Everything the pipeline produces: the journal, one metrics row per
/// requested session boundary, and the per-instrument failure manifest.
#[derive(Debug)]
pub struct AnalysisReport {
    pub tradebook: Vec<RoundTripTrade>,
    pub sessions: Vec<SessionOutcome>,
    pub failures: Vec<InstrumentFailure>,
}

/// Run the whole batch: aggregate and reconstruct each instrument in
/// isolation, merge the trades under a stable order, then compute the
/// statistics once per session boundary.
pub fn run(executions: &[Execution], session_ends: &[NaiveDate]) -> AnalysisReport {
    let mut by_symbol: BTreeMap<String, Vec<Execution>> = BTreeMap::new();
    for ex in executions {
        by_symbol.entry(ex.symbol.clone()).or_default().push(ex.clone());
    }
    info!(
        "analyzing {} executions across {} instruments",
        executions.len(),
        by_symbol.len()
    );

    let mut tradebook: Vec<RoundTripTrade> = Vec::new();
    let mut failures: Vec<InstrumentFailure> = Vec::new();

    for (symbol, execs) in by_symbol {
        match aggregator::aggregate(&execs) {
            Ok(agg) => {
                tradebook.extend(PositionReconstructor::reconstruct(&symbol, &agg));
            }
            Err(error) => {
                warn!("{}: skipped, {}", symbol, error);
                failures.push(InstrumentFailure { symbol, error });
            }
        }
    }

    // The per-instrument results form a set; impose a stable order for
    // reporting.
    tradebook.sort_by(|a, b| {
        a.opened_on()
            .cmp(&b.opened_on())
            .then_with(|| a.symbol.cmp(&b.symbol))
    });

    let sessions = session_ends
        .iter()
        .map(|&session_end| {
            let metrics = performance::session_metrics(&tradebook, session_end);
            if let Err(e) = &metrics {
                warn!("session {}: {}", session_end, e);
            }
            SessionOutcome {
                session_end,
                metrics,
            }
        })
        .collect();

    AnalysisReport {
        tradebook,
        sessions,
        failures,
    }
}
