use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::analytics::Calendar;
use crate::config::AnalyticsConfig;
use crate::models::{Direction, Trade};

pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap();
    Utc.from_utc_datetime(&naive)
}

/// A UTC calendar frozen at `now`.
pub fn fixed_calendar(now: DateTime<Utc>) -> Calendar {
    Calendar::new(chrono_tz::Tz::UTC, Some(now))
}

/// A trade where only timestamp and P/L matter.
pub fn pnl_trade(id: &str, timestamp_seconds: i64, pnl: f64) -> Trade {
    let direction = if pnl >= 0.0 { Direction::Long } else { Direction::Short };
    Trade::new(id, timestamp_seconds, direction, 100.0, 100.0 + pnl, 1.0, pnl)
}

pub fn default_test_config() -> AnalyticsConfig {
    AnalyticsConfig {
        log_level: "error".to_string(),
        ..AnalyticsConfig::default()
    }
}
