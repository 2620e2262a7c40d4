use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use journal_analytics::analytics::Calendar;
use journal_analytics::config::AnalyticsConfig;
use journal_analytics::models::{Account, ChartWindow};
use journal_analytics::report::DashboardReport;

fn main() -> Result<()> {
    let mut cfg = AnalyticsConfig::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    // Usage: journal-analytics <accounts.json> [week|month|year] [--json]
    let args: Vec<String> = std::env::args().skip(1).collect();
    let as_json = args.iter().any(|a| a == "--json");
    let positional: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();

    let Some(path) = positional.first() else {
        bail!("usage: journal-analytics <accounts.json> [week|month|year] [--json]");
    };

    if let Some(window) = positional.get(1) {
        cfg.chart_window = ChartWindow::from_str_loose(window)
            .with_context(|| format!("unknown chart window: {}", window))?;
    }

    let raw = std::fs::read_to_string(path.as_str())
        .with_context(|| format!("reading {}", path))?;
    let accounts: Vec<Account> =
        serde_json::from_str(&raw).with_context(|| format!("parsing accounts from {}", path))?;

    info!(
        "Loaded {} account(s), {} trade(s) from {}",
        accounts.len(),
        accounts.iter().map(|a| a.trades.len()).sum::<usize>(),
        path
    );

    let calendar = Calendar::from_config(&cfg);
    let report = DashboardReport::build(&accounts, &cfg, &calendar);

    if as_json {
        println!("{}", report.to_json()?);
    } else {
        report.print_summary();
    }

    Ok(())
}
