use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by the ledger parser and the analysis pipeline.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A malformed ledger record: non-positive quantity/price, a missing
    /// required field, or an unparseable value. `row` is the line in the
    /// source file (header line is 1) when known.
    #[error("invalid input for {symbol} on {date}{}: {reason}", fmt_row(.row))]
    InvalidInput {
        symbol: String,
        date: String,
        row: Option<usize>,
        reason: String,
    },

    /// No qualifying trades for a metrics computation.
    #[error("no executed trades opened before session boundary {session_end}")]
    InsufficientData { session_end: NaiveDate },

    /// A rate or ratio denominator is degenerate (e.g. no losing trades),
    /// surfaced explicitly instead of propagating NaN/infinity.
    #[error("metrics undefined for session boundary {session_end}: {reason}")]
    DivisionUndefined {
        session_end: NaiveDate,
        reason: String,
    },

    #[error("failed to read ledger {path}: {source}")]
    LedgerRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse ledger {path} at row {row}: {source}")]
    LedgerParse {
        path: String,
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write report {path}: {source}")]
    ReportWrite {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("failed to serialize journal: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write report {path}: {source}")]
    ReportIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

fn fmt_row(row: &Option<usize>) -> String {
    match row {
        Some(n) => format!(" (row {n})"),
        None => String::new(),
    }
}
