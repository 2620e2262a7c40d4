use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::{
    aggregate_monthly, compute_portfolio_stats, compute_stats, downsample, max_drawdown,
    BalanceHistoryReconstructor, Calendar, DerivedStats, Drawdown, ProfitFactor,
};
use crate::config::AnalyticsConfig;
use crate::models::{Account, AccountCategory, ChartPoint, ChartWindow, MonthlyBucket};

const MONTHLY_COLUMNS: [AccountCategory; 3] = [
    AccountCategory::Real,
    AccountCategory::Demo,
    AccountCategory::PropFirm,
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountReport {
    pub id: String,
    pub name: String,
    pub category: AccountCategory,
    pub initial_balance: f64,
    pub current_balance: f64,
    pub stats: DerivedStats,
    pub balance_curve: Vec<ChartPoint>,
    pub max_drawdown: Drawdown,
}

/// Everything a dashboard shows, computed in one pass over loaded accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub timezone: String,
    pub window: ChartWindow,
    pub accounts: Vec<AccountReport>,
    pub portfolio: DerivedStats,
    pub monthly: Vec<MonthlyBucket>,
}

impl DashboardReport {
    pub fn build(accounts: &[Account], cfg: &AnalyticsConfig, calendar: &Calendar) -> Self {
        let reconstructor = BalanceHistoryReconstructor::from_config(cfg);

        let account_reports = accounts
            .iter()
            .map(|account| {
                let curve = reconstructor.reconstruct(
                    account,
                    cfg.chart_window,
                    cfg.chart_max_points,
                    calendar,
                );
                AccountReport {
                    id: account.id.clone(),
                    name: account.display_name().to_string(),
                    category: account.category,
                    initial_balance: account.initial_balance,
                    current_balance: account.current_balance,
                    stats: compute_stats(&account.trades, calendar),
                    max_drawdown: max_drawdown(&curve),
                    balance_curve: downsample(&curve, cfg.chart_max_points),
                }
            })
            .collect();

        DashboardReport {
            generated_at: calendar.now(),
            timezone: calendar.timezone().name().to_string(),
            window: cfg.chart_window,
            accounts: account_reports,
            portfolio: compute_portfolio_stats(accounts, calendar),
            monthly: aggregate_monthly(accounts, cfg.month_count, calendar),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn print_summary(&self) {
        println!("\n{}", "=".repeat(70));
        println!("  TRADING JOURNAL DASHBOARD");
        println!("{}", "=".repeat(70));
        println!(
            "  Generated:   {} ({})",
            self.generated_at.format("%Y-%m-%d %H:%M UTC"),
            self.timezone
        );
        println!("  Window:      {}", self.window);
        println!();
        println!("  PORTFOLIO");
        println!("  ───────────────────────────────────");
        print_stats(&self.portfolio);

        for acct in &self.accounts {
            println!();
            println!("  {} [{}]", acct.name.to_uppercase(), acct.category);
            println!("  ───────────────────────────────────");
            println!("  Initial:     ${:.2}", acct.initial_balance);
            println!("  Current:     ${:.2}", acct.current_balance);
            println!(
                "  Max DD:      ${:.2} ({:.1}%)",
                acct.max_drawdown.amount, acct.max_drawdown.pct
            );
            print_stats(&acct.stats);
            if let (Some(first), Some(last)) =
                (acct.balance_curve.first(), acct.balance_curve.last())
            {
                println!(
                    "  Curve:       {} ${:.2} -> {} ${:.2} ({} pts)",
                    first.label,
                    first.value,
                    last.label,
                    last.value,
                    acct.balance_curve.len()
                );
            }
        }

        if !self.monthly.is_empty() {
            println!();
            println!("  BY MONTH");
            println!("  ───────────────────────────────────");
            println!("{}", monthly_header());
            for b in &self.monthly {
                println!("{}", monthly_row(b));
            }
        }

        println!("{}", "=".repeat(70));
    }
}

fn monthly_header() -> String {
    let columns: Vec<String> = MONTHLY_COLUMNS
        .iter()
        .map(|c| format!("{:>12}", c.to_string()))
        .collect();
    format!("  {:>8} {}", "Month", columns.join(" "))
}

fn monthly_row(bucket: &MonthlyBucket) -> String {
    let columns: Vec<String> = MONTHLY_COLUMNS
        .iter()
        .map(|c| format!("{:>+12.2}", bucket.get(*c)))
        .collect();
    format!("  {:>8} {}", bucket.month_label, columns.join(" "))
}

fn print_stats(stats: &DerivedStats) {
    println!("  Trades:      {}", stats.total_trades);
    println!(
        "  Win/Loss:    {} / {}",
        stats.winning_trades, stats.losing_trades
    );
    println!("  Win Rate:    {:.1}%", stats.win_rate);
    match stats.profit_factor {
        ProfitFactor::Ratio(r) => println!("  Profit Factor: {:.2}", r),
        ProfitFactor::Infinite => println!("  Profit Factor: ∞"),
    }
    println!("  Net PnL:     ${:+.2}", stats.net_pnl);
    println!("  Today:       ${:+.2}", stats.today_pnl);
    if stats.skipped_trades > 0 {
        println!("  Skipped:     {} malformed", stats.skipped_trades);
    }
}
