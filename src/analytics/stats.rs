use serde::{Deserialize, Serialize};

use crate::analytics::calendar::Calendar;
use crate::models::{settle_all, Account, Trade};

/// Gross wins over gross losses.
///
/// A journal with winners and no losers has no finite profit factor. That case
/// is its own variant rather than `f64::INFINITY`, which JSON cannot carry.
/// On the wire it is a plain number or the string `"Infinity"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "ProfitFactorRepr", try_from = "ProfitFactorRepr")]
pub enum ProfitFactor {
    Ratio(f64),
    Infinite,
}

impl ProfitFactor {
    pub fn from_gross(gross_wins: f64, gross_losses: f64) -> Self {
        if gross_losses > 0.0 {
            ProfitFactor::Ratio(gross_wins / gross_losses)
        } else if gross_wins > 0.0 {
            ProfitFactor::Infinite
        } else {
            ProfitFactor::Ratio(0.0)
        }
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, ProfitFactor::Infinite)
    }

    /// Numeric value for charting; `Infinite` maps to `f64::INFINITY`.
    pub fn as_f64(&self) -> f64 {
        match self {
            ProfitFactor::Ratio(r) => *r,
            ProfitFactor::Infinite => f64::INFINITY,
        }
    }
}

impl Default for ProfitFactor {
    fn default() -> Self {
        ProfitFactor::Ratio(0.0)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ProfitFactorRepr {
    Ratio(f64),
    Label(String),
}

impl From<ProfitFactor> for ProfitFactorRepr {
    fn from(pf: ProfitFactor) -> Self {
        match pf {
            ProfitFactor::Ratio(r) => ProfitFactorRepr::Ratio(r),
            ProfitFactor::Infinite => ProfitFactorRepr::Label("Infinity".to_string()),
        }
    }
}

impl TryFrom<ProfitFactorRepr> for ProfitFactor {
    type Error = String;

    fn try_from(repr: ProfitFactorRepr) -> Result<Self, Self::Error> {
        match repr {
            ProfitFactorRepr::Ratio(r) => Ok(ProfitFactor::Ratio(r)),
            ProfitFactorRepr::Label(s) if s.eq_ignore_ascii_case("infinity") => {
                Ok(ProfitFactor::Infinite)
            }
            ProfitFactorRepr::Label(s) => Err(format!("invalid profit factor: {}", s)),
        }
    }
}

/// Summary statistics over a trade collection. Recomputed on every call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DerivedStats {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub win_rate: f64,
    pub profit_factor: ProfitFactor,
    pub gross_wins: f64,
    pub gross_losses: f64,
    pub net_pnl: f64,
    pub today_pnl: f64,
    pub average_win: f64,
    pub average_loss: f64,
    pub best_trade: f64,
    pub worst_trade: f64,
    pub skipped_trades: usize,
}

/// Win rate, profit factor, net and today's P/L for `trades`.
///
/// Malformed trades are logged and left out. Accumulation runs in
/// (timestamp, id) order so any permutation of the input yields identical
/// floating-point results.
pub fn compute_stats(trades: &[Trade], calendar: &Calendar) -> DerivedStats {
    aggregate(trades.iter(), calendar)
}

/// [`compute_stats`] over every trade of every account.
pub fn compute_portfolio_stats(accounts: &[Account], calendar: &Calendar) -> DerivedStats {
    aggregate(accounts.iter().flat_map(|a| a.trades.iter()), calendar)
}

fn aggregate<'a, I>(trades: I, calendar: &Calendar) -> DerivedStats
where
    I: Iterator<Item = &'a Trade>,
{
    let (settled, skipped_trades) = settle_all(trades);
    let total_trades = settled.len();
    if total_trades == 0 {
        return DerivedStats {
            skipped_trades,
            ..DerivedStats::default()
        };
    }

    let today = calendar.today();
    let mut winning_trades = 0;
    let mut gross_wins = 0.0;
    let mut gross_losses = 0.0;
    let mut net_pnl = 0.0;
    let mut today_pnl = 0.0;
    let mut best_trade = f64::NEG_INFINITY;
    let mut worst_trade = f64::INFINITY;

    for t in &settled {
        let pnl = t.profit_and_loss;
        if t.is_win() {
            winning_trades += 1;
            gross_wins += pnl;
        } else {
            gross_losses += pnl.abs();
        }
        net_pnl += pnl;
        if calendar.local_date(t.timestamp_seconds) == Some(today) {
            today_pnl += pnl;
        }
        best_trade = best_trade.max(pnl);
        worst_trade = worst_trade.min(pnl);
    }

    let losing_trades = total_trades - winning_trades;

    DerivedStats {
        total_trades,
        winning_trades,
        losing_trades,
        win_rate: winning_trades as f64 / total_trades as f64 * 100.0,
        profit_factor: ProfitFactor::from_gross(gross_wins, gross_losses),
        gross_wins,
        gross_losses,
        net_pnl,
        today_pnl,
        average_win: if winning_trades > 0 {
            gross_wins / winning_trades as f64
        } else {
            0.0
        },
        average_loss: if losing_trades > 0 {
            gross_losses / losing_trades as f64
        } else {
            0.0
        },
        best_trade,
        worst_trade,
        skipped_trades,
    }
}
