use std::path::Path;

use chrono::NaiveDate;
use tracing::info;

use crate::analysis::runner::AnalysisReport;
use crate::error::AnalysisError;
use crate::models::RoundTripTrade;

/// Write the journal, one row per reconstructed position. Date lists are
/// joined with `;` so the file stays one row per trade.
pub fn write_tradebook_csv(path: &Path, trades: &[RoundTripTrade]) -> Result<(), AnalysisError> {
    let wrap = |source: csv::Error| AnalysisError::ReportWrite {
        path: path.display().to_string(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(wrap)?;
    writer
        .write_record([
            "symbol",
            "direction",
            "buy_quantity",
            "avg_buy_price",
            "total_buy_notional",
            "first_buy_date",
            "last_buy_date",
            "buy_dates",
            "sell_quantity",
            "avg_sell_price",
            "total_sell_notional",
            "first_sell_date",
            "last_sell_date",
            "sell_dates",
            "executed",
            "quantity_mismatch",
            "gain",
            "gain_pct",
        ])
        .map_err(wrap)?;

    for t in trades {
        writer
            .write_record([
                t.symbol.clone(),
                t.direction.map(|d| d.to_string()).unwrap_or_default(),
                t.buy_quantity.to_string(),
                format!("{:.4}", t.avg_buy_price),
                format!("{:.4}", t.total_buy_notional),
                fmt_date(t.first_buy_date),
                fmt_date(t.last_buy_date),
                fmt_dates(&t.buy_dates),
                t.sell_quantity.to_string(),
                format!("{:.4}", t.avg_sell_price),
                format!("{:.4}", t.total_sell_notional),
                fmt_date(t.first_sell_date),
                fmt_date(t.last_sell_date),
                fmt_dates(&t.sell_dates),
                t.executed.to_string(),
                t.quantity_mismatch.to_string(),
                format!("{:.4}", t.gain),
                t.gain_pct.map(|p| format!("{p:.4}")).unwrap_or_default(),
            ])
            .map_err(wrap)?;
    }

    writer.flush().map_err(|e| AnalysisError::ReportIo {
        path: path.display().to_string(),
        source: e,
    })?;
    info!("wrote {} trades to {}", trades.len(), path.display());
    Ok(())
}

/// Write one metrics row per session boundary. Boundaries whose window was
/// degenerate get their error in the status column and empty metric cells.
pub fn write_sessions_csv(path: &Path, report: &AnalysisReport) -> Result<(), AnalysisError> {
    let wrap = |source: csv::Error| AnalysisError::ReportWrite {
        path: path.display().to_string(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(wrap)?;
    writer
        .write_record([
            "session_end",
            "status",
            "trades",
            "win_rate",
            "lose_rate",
            "avg_gain",
            "avg_loss",
            "avg_gain_pct",
            "avg_loss_pct",
            "reward_risk_ratio",
            "reward_risk_ratio_pct",
            "expectancy",
            "expectancy_pct",
        ])
        .map_err(wrap)?;

    for session in &report.sessions {
        let row = match &session.metrics {
            Ok(m) => vec![
                session.session_end.to_string(),
                "ok".to_string(),
                m.trades.to_string(),
                format!("{:.4}", m.win_rate),
                format!("{:.4}", m.lose_rate),
                format!("{:.4}", m.avg_gain),
                format!("{:.4}", m.avg_loss),
                format!("{:.4}", m.avg_gain_pct),
                format!("{:.4}", m.avg_loss_pct),
                format!("{:.4}", m.reward_risk_ratio),
                format!("{:.4}", m.reward_risk_ratio_pct),
                format!("{:.4}", m.expectancy),
                format!("{:.4}", m.expectancy_pct),
            ],
            Err(e) => {
                let mut row = vec![session.session_end.to_string(), e.to_string()];
                row.extend(std::iter::repeat(String::new()).take(11));
                row
            }
        };
        writer.write_record(&row).map_err(wrap)?;
    }

    writer.flush().map_err(|e| AnalysisError::ReportIo {
        path: path.display().to_string(),
        source: e,
    })?;
    info!("wrote {} session rows to {}", report.sessions.len(), path.display());
    Ok(())
}

/// Full-fidelity journal dump for downstream tooling.
pub fn write_tradebook_json(path: &Path, trades: &[RoundTripTrade]) -> Result<(), AnalysisError> {
    let json = serde_json::to_string_pretty(trades)?;
    std::fs::write(path, json).map_err(|source| AnalysisError::ReportIo {
        path: path.display().to_string(),
        source,
    })?;
    info!("wrote journal JSON to {}", path.display());
    Ok(())
}

pub fn print_summary(report: &AnalysisReport) {
    let closed = report.tradebook.iter().filter(|t| t.executed).count();
    let open = report.tradebook.len() - closed;
    let mismatched = report
        .tradebook
        .iter()
        .filter(|t| t.quantity_mismatch)
        .count();

    println!("\n{}", "=".repeat(70));
    println!("  TRADEBOOK ANALYSIS");
    println!("{}", "=".repeat(70));
    println!("  TRADES");
    println!("  ───────────────────────────────────");
    println!("  Round trips:   {}", report.tradebook.len());
    println!("  Closed:        {}", closed);
    println!("  Still open:    {}", open);
    if mismatched > 0 {
        println!("  Qty mismatch:  {}", mismatched);
    }

    for session in &report.sessions {
        println!();
        println!("  SESSION ending {}", session.session_end);
        println!("  ───────────────────────────────────");
        match &session.metrics {
            Ok(m) => {
                println!("  Trades:        {}", m.trades);
                println!("  Win rate:      {:.1}%", m.win_rate * 100.0);
                println!("  Avg win:       {:+.2}", m.avg_gain);
                println!("  Avg loss:      {:+.2}", m.avg_loss);
                println!(
                    "  Avg win/loss:  {:+.2}% / {:+.2}%",
                    m.avg_gain_pct, m.avg_loss_pct
                );
                println!(
                    "  Reward:Risk:   {:.2} ({:.2} in %)",
                    m.reward_risk_ratio, m.reward_risk_ratio_pct
                );
                println!(
                    "  Expectancy:    {:.2} ({:.2} in %)",
                    m.expectancy, m.expectancy_pct
                );
            }
            Err(e) => println!("  Skipped: {}", e),
        }
    }

    if !report.failures.is_empty() {
        println!();
        println!("  FAILED INSTRUMENTS");
        println!("  ───────────────────────────────────");
        for f in &report.failures {
            println!("  {:>12}: {}", f.symbol, f.error);
        }
    }

    println!("{}", "=".repeat(70));
}

fn fmt_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}

fn fmt_dates(dates: &[NaiveDate]) -> String {
    dates
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(";")
}
