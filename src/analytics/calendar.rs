use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::config::AnalyticsConfig;

/// Wall-clock calendar used for every day and month boundary.
///
/// "Today", day buckets and month buckets are all taken in `tz`, never as fixed
/// 24h windows on the raw timestamps. `now` is captured once so that a single
/// dashboard render sees one consistent present.
#[derive(Debug, Clone, Copy)]
pub struct Calendar {
    tz: Tz,
    now: DateTime<Utc>,
}

impl Calendar {
    pub fn new(tz: Tz, now: Option<DateTime<Utc>>) -> Self {
        Self {
            tz,
            now: now.unwrap_or_else(Utc::now),
        }
    }

    pub fn from_config(cfg: &AnalyticsConfig) -> Self {
        Self::new(cfg.timezone, None)
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn now_timestamp(&self) -> i64 {
        self.now.timestamp()
    }

    pub fn today(&self) -> NaiveDate {
        self.now.with_timezone(&self.tz).date_naive()
    }

    /// Local calendar date of an epoch-seconds timestamp.
    pub fn local_date(&self, timestamp_seconds: i64) -> Option<NaiveDate> {
        DateTime::from_timestamp(timestamp_seconds, 0)
            .map(|utc| utc.with_timezone(&self.tz).date_naive())
    }

    /// First instant of `date` in local time.
    ///
    /// Zones that jump the clock at midnight have no 00:00 on that day; the
    /// day then starts at the end of the gap.
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        let midnight = date.and_time(NaiveTime::MIN);
        if let Some(dt) = self.tz.from_local_datetime(&midnight).earliest() {
            return dt.with_timezone(&Utc);
        }
        (1..=96)
            .find_map(|q| {
                self.tz
                    .from_local_datetime(&(midnight + Duration::minutes(15 * q)))
                    .earliest()
            })
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
    }

    /// Today minus `days` calendar days.
    pub fn days_before_today(&self, days: u64) -> NaiveDate {
        let today = self.today();
        today.checked_sub_days(Days::new(days)).unwrap_or(today)
    }

    /// Whole calendar months between `date` and the current month. Negative for
    /// dates in a future month.
    pub fn months_ago(&self, date: NaiveDate) -> i64 {
        let today = self.today();
        (today.year() as i64 - date.year() as i64) * 12
            + (today.month() as i64 - date.month() as i64)
    }

    /// (year, month) of the month `n` months before the current one.
    pub fn month_back(&self, n: u32) -> (i32, u32) {
        let today = self.today();
        let index = today.year() as i64 * 12 + today.month0() as i64 - n as i64;
        (index.div_euclid(12) as i32, index.rem_euclid(12) as u32 + 1)
    }
}

/// Every date from `start` through `end`, both included.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

/// "Jan 5"
pub fn day_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// "Jan 24"
pub fn month_label(year: i32, month: u32) -> String {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d.format("%b %y").to_string(),
        None => format!("{:02}/{:02}", month, year.rem_euclid(100)),
    }
}
