use crate::analytics::calendar::{month_label, Calendar};
use crate::models::{settle_all, Account, AccountCategory, MonthlyBucket, SettledTrade};

/// Signed P/L per calendar month for the last `month_count` months (current
/// month included), split into real, demo and prop-firm columns.
///
/// Buckets come back oldest first. Trades outside the window, including ones
/// dated in a future month, are ignored. No balance reconciliation happens
/// here: each bucket is a plain sum.
pub fn aggregate_monthly(
    accounts: &[Account],
    month_count: usize,
    calendar: &Calendar,
) -> Vec<MonthlyBucket> {
    let mut buckets: Vec<MonthlyBucket> = (0..month_count)
        .rev()
        .map(|n| {
            let (year, month) = calendar.month_back(n as u32);
            MonthlyBucket::empty(month_label(year, month))
        })
        .collect();

    if buckets.is_empty() {
        return buckets;
    }

    // One global (timestamp, id) order across accounts keeps the float sums
    // independent of the order accounts are passed in.
    let mut trades: Vec<(AccountCategory, SettledTrade)> = accounts
        .iter()
        .flat_map(|account| {
            let (settled, _) = settle_all(&account.trades);
            settled.into_iter().map(move |t| (account.category, t))
        })
        .collect();
    trades.sort_by(|(ca, a), (cb, b)| {
        a.timestamp_seconds
            .cmp(&b.timestamp_seconds)
            .then_with(|| a.id.cmp(&b.id))
            .then_with(|| a.profit_and_loss.total_cmp(&b.profit_and_loss))
            .then_with(|| ca.as_str().cmp(cb.as_str()))
    });

    for (category, t) in &trades {
        let Some(date) = calendar.local_date(t.timestamp_seconds) else {
            continue;
        };
        let months_ago = calendar.months_ago(date);
        if months_ago < 0 || months_ago >= month_count as i64 {
            continue;
        }
        // Oldest bucket sits at index 0.
        let index = month_count - 1 - months_ago as usize;
        buckets[index].add(*category, t.profit_and_loss);
    }

    buckets
}
