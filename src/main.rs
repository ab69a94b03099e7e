use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use tracing_subscriber::{fmt, EnvFilter};

use tradebook_analyzer::analysis::runner;
use tradebook_analyzer::config::Config;
use tradebook_analyzer::{ledger, report};

fn main() -> Result<()> {
    let mut cfg = Config::from_env();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    // Positional overrides: ledger path, then session-boundary dates
    let args: Vec<String> = std::env::args().collect();
    if let Some(path) = args.get(1) {
        cfg.tradebook_file = path.clone();
    }
    if args.len() > 2 {
        cfg.trading_sessions = args[2..]
            .iter()
            .map(|s| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map_err(|e| anyhow::anyhow!("invalid session date '{s}': {e}"))
            })
            .collect::<Result<Vec<_>>>()?;
    }

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║              TRADEBOOK ANALYZER                          ║");
    println!("╠══════════════════════════════════════════════════════════╣");
    println!("║  Ledger:     {:<44}║", cfg.tradebook_file);
    println!("║  Sessions:   {:<44}║", cfg.trading_sessions.len());
    println!("║  Output:     {:<44}║", cfg.output_dir);
    println!("╚══════════════════════════════════════════════════════════╝");

    let executions = ledger::read_tradebook(Path::new(&cfg.tradebook_file))?;
    let analysis = runner::run(&executions, &cfg.trading_sessions);

    std::fs::create_dir_all(&cfg.output_dir)?;
    let out = Path::new(&cfg.output_dir);
    report::write_tradebook_csv(&out.join("tradebook.csv"), &analysis.tradebook)?;
    report::write_sessions_csv(&out.join("sessions.csv"), &analysis)?;
    report::write_tradebook_json(&out.join("tradebook.json"), &analysis.tradebook)?;

    report::print_summary(&analysis);

    Ok(())
}
