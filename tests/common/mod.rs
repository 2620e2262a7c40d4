use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use journal_analytics::analytics::Calendar;
use journal_analytics::models::{Account, AccountCategory, Direction, Trade};

pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap();
    Utc.from_utc_datetime(&naive)
}

pub fn calendar_at(now: DateTime<Utc>) -> Calendar {
    Calendar::new(chrono_tz::Tz::UTC, Some(now))
}

pub fn trade(id: &str, at: DateTime<Utc>, pnl: f64) -> Trade {
    Trade::new(id, at.timestamp(), Direction::Long, 50.0, 50.0 + pnl, 1.0, pnl)
}

/// Deterministic pseudo-random trades spread over the `days` before `end`.
pub fn scattered_trades(
    prefix: &str,
    end: DateTime<Utc>,
    days: i64,
    count: usize,
) -> Vec<Trade> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15 ^ prefix.len() as u64;
    (0..count)
        .map(|i| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let offset = (state >> 33) as i64 % (days * 86_400);
            let pnl = ((state >> 11) % 40_000) as f64 / 100.0 - 180.0;
            let ts = end.timestamp() - offset;
            Trade::new(
                format!("{}-{}", prefix, i),
                ts,
                Direction::Short,
                10.0,
                10.0,
                1.0,
                pnl,
            )
        })
        .collect()
}

pub fn account(
    id: &str,
    category: AccountCategory,
    initial: f64,
    current: f64,
    trades: Vec<Trade>,
) -> Account {
    Account::new(id, category, initial)
        .with_current_balance(current)
        .with_trades(trades)
}
