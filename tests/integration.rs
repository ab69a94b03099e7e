mod common;

use common::{d, temp_dir, write_ledger};

use tradebook_analyzer::analysis::runner;
use tradebook_analyzer::error::AnalysisError;
use tradebook_analyzer::models::Direction;
use tradebook_analyzer::{ledger, report};

/// A small Zerodha-style ledger covering the interesting shapes:
/// - INFY: two same-day partial buys, later one sell — closed winner;
/// - TCS: one round trip at a loss;
/// - WIPRO: short opened and partially covered — trailing open short;
/// - HDFC: closed trade followed by a fresh open remainder.
const LEDGER: &str = "\
symbol,isin,trade_date,exchange,segment,series,trade_type,auction,quantity,price,trade_id,order_id
INFY,INE009A01021,2024-01-02,NSE,EQ,EQ,buy,false,5,50,T1,O1
INFY,INE009A01021,2024-01-02,NSE,EQ,EQ,buy,false,5,60,T2,O2
INFY,INE009A01021,2024-01-04,NSE,EQ,EQ,sell,false,10,70,T3,O3
TCS,INE467B01029,2024-01-03,NSE,EQ,EQ,buy,false,10,200,T4,O4
TCS,INE467B01029,2024-01-10,NSE,EQ,EQ,sell,false,10,195,T5,O5
WIPRO,INE075A01022,2024-01-05,NSE,EQ,EQ,sell,false,10,100,T6,O6
WIPRO,INE075A01022,2024-01-08,NSE,EQ,EQ,buy,false,6,90,T7,O7
HDFC,INE001A01036,2024-01-02,NSE,EQ,EQ,buy,false,10,80,T8,O8
HDFC,INE001A01036,2024-01-09,NSE,EQ,EQ,sell,false,10,88,T9,O9
HDFC,INE001A01036,2024-02-12,NSE,EQ,EQ,buy,false,4,95,T10,O10
";

#[test]
fn full_pipeline_from_csv_to_reports() {
    let path = write_ledger("pipeline.csv", LEDGER);
    let executions = ledger::read_tradebook(&path).unwrap();
    assert_eq!(executions.len(), 10);

    let analysis = runner::run(&executions, &[d("2024-02-01")]);
    assert!(analysis.failures.is_empty());

    // 3 closed trades + 2 open remainders (WIPRO short, HDFC re-entry)
    assert_eq!(analysis.tradebook.len(), 5);
    assert_eq!(analysis.tradebook.iter().filter(|t| t.executed).count(), 3);

    // Sorted by open date: HDFC and INFY open 01-02, TCS 01-03, WIPRO 01-05,
    // HDFC remainder 02-12.
    let order: Vec<&str> = analysis
        .tradebook
        .iter()
        .map(|t| t.symbol.as_str())
        .collect();
    assert_eq!(order, vec!["HDFC", "INFY", "TCS", "WIPRO", "HDFC"]);

    let infy = &analysis.tradebook[1];
    assert_eq!(infy.direction, Some(Direction::Long));
    assert!((infy.avg_buy_price - 55.0).abs() < 1e-9);
    assert!((infy.gain - 150.0).abs() < 1e-9);
    // Same-day partial buys were aggregated into one execution
    assert_eq!(infy.buy_dates, vec![d("2024-01-02")]);

    let wipro = &analysis.tradebook[3];
    assert_eq!(wipro.direction, Some(Direction::Short));
    assert!(!wipro.executed);
    assert!(!wipro.quantity_mismatch);

    let remainder = &analysis.tradebook[4];
    assert_eq!(remainder.symbol, "HDFC");
    assert!(!remainder.executed);
    assert_eq!(remainder.buy_quantity, 4);

    // Session metrics over the three closed trades opened before Feb:
    // gains +150 (INFY), -50 (TCS), +80 (HDFC).
    let session = &analysis.sessions[0];
    let m = session.metrics.as_ref().unwrap();
    assert_eq!(m.trades, 3);
    assert!((m.win_rate - 2.0 / 3.0).abs() < 1e-9);
    assert!((m.avg_gain - 115.0).abs() < 1e-9);
    assert!((m.avg_loss + 50.0).abs() < 1e-9);
    assert!((m.reward_risk_ratio - 2.3).abs() < 1e-9);
    assert!((m.expectancy - 4.6).abs() < 1e-9);

    // Write all three artifacts and sanity-check their shape
    let out = temp_dir();
    let tradebook_csv = out.join("tradebook.csv");
    let sessions_csv = out.join("sessions.csv");
    let tradebook_json = out.join("tradebook.json");
    report::write_tradebook_csv(&tradebook_csv, &analysis.tradebook).unwrap();
    report::write_sessions_csv(&sessions_csv, &analysis).unwrap();
    report::write_tradebook_json(&tradebook_json, &analysis.tradebook).unwrap();

    let journal = std::fs::read_to_string(&tradebook_csv).unwrap();
    assert_eq!(journal.lines().count(), 6);

    let sessions = std::fs::read_to_string(&sessions_csv).unwrap();
    assert!(sessions.contains("2024-02-01,ok,3"));

    let parsed: Vec<tradebook_analyzer::models::RoundTripTrade> =
        serde_json::from_str(&std::fs::read_to_string(&tradebook_json).unwrap()).unwrap();
    assert_eq!(parsed.len(), 5);
}

#[test]
fn malformed_row_fails_with_location() {
    let path = write_ledger(
        "malformed.csv",
        "symbol,trade_date,trade_type,quantity,price\n\
         INFY,2024-01-02,buy,10,50\n\
         INFY,2024-01-03,sell,-10,55\n",
    );
    let err = ledger::read_tradebook(&path).unwrap_err();
    match err {
        AnalysisError::InvalidInput { symbol, row, .. } => {
            assert_eq!(symbol, "INFY");
            assert_eq!(row, Some(3));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn session_before_all_trades_is_insufficient_data() {
    let path = write_ledger(
        "early_session.csv",
        "symbol,trade_date,trade_type,quantity,price\n\
         INFY,2024-01-02,buy,10,50\n\
         INFY,2024-01-04,sell,10,45\n\
         TCS,2024-01-03,buy,10,100\n\
         TCS,2024-01-05,sell,10,110\n",
    );
    let executions = ledger::read_tradebook(&path).unwrap();
    let analysis = runner::run(&executions, &[d("2023-12-01"), d("2024-06-01")]);

    assert!(matches!(
        analysis.sessions[0].metrics,
        Err(AnalysisError::InsufficientData { .. })
    ));
    let m = analysis.sessions[1].metrics.as_ref().unwrap();
    assert_eq!(m.trades, 2);
    assert!((m.win_rate - 0.5).abs() < 1e-9);
    assert!((m.win_rate + m.lose_rate - 1.0).abs() < 1e-9);
}
