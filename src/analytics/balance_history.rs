use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::analytics::calendar::{day_label, days_inclusive, Calendar};
use crate::config::{AnalyticsConfig, DEFAULT_RECONCILE_EPSILON};
use crate::models::{settle_all, Account, ChartPoint, ChartWindow};

/// Rebuilds a daily balance curve from an account's trades and pins its end
/// to the account's known current balance.
///
/// There is no ledger to replay, only a starting balance, a present balance and
/// a possibly incomplete trade list. The curve is a best-effort picture: the
/// running sum of daily P/L from `initial_balance`, with the final point forced
/// to `current_balance` whenever the two drift apart by more than `epsilon`.
#[derive(Debug, Clone)]
pub struct BalanceHistoryReconstructor {
    pub epsilon: f64,
}

impl Default for BalanceHistoryReconstructor {
    fn default() -> Self {
        Self::new(DEFAULT_RECONCILE_EPSILON)
    }
}

impl BalanceHistoryReconstructor {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    pub fn from_config(cfg: &AnalyticsConfig) -> Self {
        Self::new(cfg.reconcile_epsilon)
    }

    /// One point per local calendar day from the start of the window (or the
    /// oldest trade, whichever is earlier) through today.
    ///
    /// `max_points` is advisory and does not shorten the series; renderers
    /// that need fewer points can pass the result through [`downsample`].
    pub fn reconstruct(
        &self,
        account: &Account,
        window: ChartWindow,
        max_points: usize,
        calendar: &Calendar,
    ) -> Vec<ChartPoint> {
        let (trades, _) = settle_all(&account.trades);
        if trades.is_empty() {
            return degenerate(account);
        }

        let today = calendar.today();
        let window_start = calendar.days_before_today(window.days() as u64);
        let oldest = trades
            .iter()
            .filter_map(|t| calendar.local_date(t.timestamp_seconds))
            .min();
        let start_date = match oldest {
            Some(d) if d < window_start => d,
            _ => window_start,
        };
        if start_date > today {
            return degenerate(account);
        }

        let start_ts = calendar.start_of_day(start_date).timestamp();
        let now_ts = calendar.now_timestamp();

        let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for t in trades
            .iter()
            .filter(|t| t.timestamp_seconds >= start_ts && t.timestamp_seconds <= now_ts)
        {
            if let Some(date) = calendar.local_date(t.timestamp_seconds) {
                *daily.entry(date).or_insert(0.0) += t.profit_and_loss;
            }
        }

        let mut balance = account.initial_balance;
        let mut points: Vec<ChartPoint> = days_inclusive(start_date, today)
            .map(|date| {
                balance += daily.get(&date).copied().unwrap_or(0.0);
                ChartPoint::new(day_label(date), balance)
            })
            .collect();

        if let Some(last) = points.last_mut() {
            let drift = account.current_balance - last.value;
            if drift.abs() > self.epsilon {
                debug!(
                    "Account {}: reconciling balance curve {:.2} -> {:.2} (drift {:+.2})",
                    account.id, last.value, account.current_balance, drift
                );
                last.value = account.current_balance;
            }
        }

        if max_points > 0 && points.len() > max_points {
            debug!(
                "Account {}: {} daily points exceed advisory cap of {}",
                account.id,
                points.len(),
                max_points
            );
        }

        points
    }
}

fn degenerate(account: &Account) -> Vec<ChartPoint> {
    vec![
        ChartPoint::new("Start", account.initial_balance),
        ChartPoint::new("Current", account.current_balance),
    ]
}

/// Evenly thins `points` to at most `max_points`, always keeping the first
/// and the last. `max_points == 0` means no cap.
pub fn downsample(points: &[ChartPoint], max_points: usize) -> Vec<ChartPoint> {
    let len = points.len();
    if max_points == 0 || len <= max_points {
        return points.to_vec();
    }
    if max_points == 1 {
        return points[len - 1..].to_vec();
    }
    (0..max_points)
        .map(|i| points[i * (len - 1) / (max_points - 1)].clone())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Drawdown {
    pub amount: f64,
    pub pct: f64,
}

/// Largest peak-to-trough decline along a balance series.
pub fn max_drawdown(points: &[ChartPoint]) -> Drawdown {
    let mut worst = Drawdown::default();
    let Some(first) = points.first() else {
        return worst;
    };

    let mut peak = first.value;
    for p in points {
        if p.value > peak {
            peak = p.value;
        }
        let dd = peak - p.value;
        if dd > worst.amount {
            worst = Drawdown {
                amount: dd,
                pct: if peak > 0.0 { dd / peak * 100.0 } else { 0.0 },
            };
        }
    }
    worst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountCategory;
    use crate::test_helpers::{fixed_calendar, pnl_trade, utc};

    fn account(initial: f64, current: f64, trades: Vec<crate::models::Trade>) -> Account {
        Account::new("acct", AccountCategory::Real, initial)
            .with_current_balance(current)
            .with_trades(trades)
    }

    fn value_at(points: &[ChartPoint], label: &str) -> f64 {
        points
            .iter()
            .find(|p| p.label == label)
            .unwrap_or_else(|| panic!("no point labelled {}", label))
            .value
    }

    #[test]
    fn no_trades_gives_start_and_current() {
        let cal = fixed_calendar(utc(2024, 1, 6, 18, 0));
        let acct = account(10_000.0, 10_250.0, vec![]);
        let points = BalanceHistoryReconstructor::default().reconstruct(
            &acct,
            ChartWindow::Month,
            30,
            &cal,
        );
        assert_eq!(
            points,
            vec![
                ChartPoint::new("Start", 10_000.0),
                ChartPoint::new("Current", 10_250.0),
            ]
        );
    }

    #[test]
    fn only_malformed_trades_is_degenerate() {
        let cal = fixed_calendar(utc(2024, 1, 6, 18, 0));
        let mut bad = pnl_trade("bad", utc(2024, 1, 5, 0, 0).timestamp(), 1.0);
        bad.profit_and_loss = None;
        let acct = account(100.0, 120.0, vec![bad]);
        let points = BalanceHistoryReconstructor::default().reconstruct(
            &acct,
            ChartWindow::Week,
            0,
            &cal,
        );
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].label, "Start");
    }

    #[test]
    fn ancient_timestamp_does_not_stretch_the_series() {
        let cal = fixed_calendar(utc(2024, 1, 6, 18, 0));
        let acct = account(
            100.0,
            130.0,
            vec![
                pnl_trade("ancient", -125_000_000_000, 5.0),
                pnl_trade("recent", utc(2024, 1, 5, 8, 0).timestamp(), 30.0),
            ],
        );
        let points = BalanceHistoryReconstructor::default().reconstruct(
            &acct,
            ChartWindow::Week,
            0,
            &cal,
        );
        assert_eq!(points.len(), 8);
        assert_eq!(value_at(&points, "Jan 5"), 130.0);
    }

    #[test]
    fn week_scenario_flat_days_and_reconciliation() {
        let cal = fixed_calendar(utc(2024, 1, 6, 18, 0));
        let acct = account(
            10_000.0,
            10_500.0,
            vec![
                pnl_trade("t3", utc(2024, 1, 6, 11, 0).timestamp(), 200.0),
                pnl_trade("t1", utc(2024, 1, 4, 10, 0).timestamp(), 300.0),
                pnl_trade("t2", utc(2024, 1, 6, 9, 0).timestamp(), -100.0),
            ],
        );
        let points = BalanceHistoryReconstructor::default().reconstruct(
            &acct,
            ChartWindow::Week,
            30,
            &cal,
        );

        // Dec 30 through Jan 6.
        assert_eq!(points.len(), 8);
        assert_eq!(points[0].label, "Dec 30");
        assert_eq!(value_at(&points, "Jan 3"), 10_000.0);
        assert_eq!(value_at(&points, "Jan 4"), 10_300.0);
        assert_eq!(value_at(&points, "Jan 5"), 10_300.0);
        let last = points.last().unwrap();
        assert_eq!(last.label, "Jan 6");
        assert_eq!(last.value, 10_500.0);
    }

    #[test]
    fn small_drift_is_left_alone() {
        let cal = fixed_calendar(utc(2024, 1, 6, 18, 0));
        let acct = account(
            1_000.0,
            1_050.004,
            vec![pnl_trade("t", utc(2024, 1, 5, 8, 0).timestamp(), 50.0)],
        );
        let points = BalanceHistoryReconstructor::default().reconstruct(
            &acct,
            ChartWindow::Week,
            0,
            &cal,
        );
        assert_eq!(points.last().unwrap().value, 1_050.0);
    }

    #[test]
    fn old_trades_extend_the_window() {
        let cal = fixed_calendar(utc(2024, 1, 10, 12, 0));
        let acct = account(
            500.0,
            540.0,
            vec![
                pnl_trade("old", utc(2023, 12, 1, 14, 0).timestamp(), 25.0),
                pnl_trade("new", utc(2024, 1, 9, 14, 0).timestamp(), 15.0),
            ],
        );
        let points = BalanceHistoryReconstructor::default().reconstruct(
            &acct,
            ChartWindow::Week,
            0,
            &cal,
        );
        assert_eq!(points[0].label, "Dec 1");
        assert_eq!(points[0].value, 525.0);
        assert_eq!(points.len(), 41);
        assert_eq!(value_at(&points, "Jan 8"), 525.0);
        assert_eq!(value_at(&points, "Jan 9"), 540.0);
    }

    #[test]
    fn trades_after_now_are_ignored() {
        let cal = fixed_calendar(utc(2024, 1, 10, 12, 0));
        let acct = account(
            1_000.0,
            1_000.0,
            vec![
                pnl_trade("past", utc(2024, 1, 8, 9, 0).timestamp(), 100.0),
                pnl_trade("later_today", utc(2024, 1, 10, 20, 0).timestamp(), 500.0),
            ],
        );
        let points = BalanceHistoryReconstructor::new(1_000_000.0).reconstruct(
            &acct,
            ChartWindow::Week,
            0,
            &cal,
        );
        assert_eq!(points.last().unwrap().value, 1_100.0);
    }

    #[test]
    fn final_point_always_matches_current_balance() {
        let cal = fixed_calendar(utc(2024, 6, 30, 23, 0));
        let trades: Vec<_> = (0..40)
            .map(|i| {
                pnl_trade(
                    &format!("t{}", i),
                    utc(2024, 6, 1, 12, 0).timestamp() + i * 86_400 / 2,
                    if i % 3 == 0 { -37.5 } else { 21.25 },
                )
            })
            .collect();
        for current in [0.0, 9_999.99, 12_345.67, -50.0] {
            let acct = account(10_000.0, current, trades.clone());
            for window in [ChartWindow::Week, ChartWindow::Month, ChartWindow::Year] {
                let points =
                    BalanceHistoryReconstructor::default().reconstruct(&acct, window, 0, &cal);
                let last = points.last().unwrap().value;
                assert!((last - current).abs() <= 0.01, "{} vs {}", last, current);
            }
        }
    }

    #[test]
    fn walks_local_days_across_dst() {
        // New York springs forward on 2024-03-10.
        let cal = crate::analytics::Calendar::new(
            chrono_tz::America::New_York,
            Some(utc(2024, 3, 12, 16, 0)),
        );
        let acct = account(
            100.0,
            110.0,
            vec![pnl_trade("t", utc(2024, 3, 10, 3, 30).timestamp(), 10.0)],
        );
        let points = BalanceHistoryReconstructor::default().reconstruct(
            &acct,
            ChartWindow::Week,
            0,
            &cal,
        );
        // Mar 5 through Mar 12, trade lands on Mar 9 local.
        assert_eq!(points.len(), 8);
        assert_eq!(value_at(&points, "Mar 8"), 100.0);
        assert_eq!(value_at(&points, "Mar 9"), 110.0);
    }

    #[test]
    fn downsample_keeps_endpoints() {
        let points: Vec<ChartPoint> = (0..10)
            .map(|i| ChartPoint::new(format!("p{}", i), i as f64))
            .collect();
        let thin = downsample(&points, 4);
        let labels: Vec<&str> = thin.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["p0", "p3", "p6", "p9"]);
        assert_eq!(downsample(&points, 0).len(), 10);
        assert_eq!(downsample(&points, 1)[0].label, "p9");
        assert_eq!(downsample(&points, 50).len(), 10);
    }

    #[test]
    fn drawdown_from_peak() {
        let points: Vec<ChartPoint> = [100.0, 120.0, 90.0, 130.0, 117.0]
            .iter()
            .map(|v| ChartPoint::new("x", *v))
            .collect();
        let dd = max_drawdown(&points);
        assert!((dd.amount - 30.0).abs() < 1e-9);
        assert!((dd.pct - 25.0).abs() < 1e-9);
        assert_eq!(max_drawdown(&[]), Drawdown::default());
    }
}
