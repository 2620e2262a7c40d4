use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::models::ChartWindow;

/// Below this drift the reconstructed curve is left untouched.
pub const DEFAULT_RECONCILE_EPSILON: f64 = 0.01;
pub const DEFAULT_MONTH_COUNT: usize = 6;
pub const DEFAULT_CHART_MAX_POINTS: usize = 90;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    // Calendar
    pub timezone: Tz,

    // Balance history
    pub reconcile_epsilon: f64,
    pub chart_window: ChartWindow,
    pub chart_max_points: usize,

    // Monthly breakdown
    pub month_count: usize,

    // Logging
    pub log_level: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            reconcile_epsilon: DEFAULT_RECONCILE_EPSILON,
            chart_window: ChartWindow::Month,
            chart_max_points: DEFAULT_CHART_MAX_POINTS,
            month_count: DEFAULT_MONTH_COUNT,
            log_level: "info".to_string(),
        }
    }
}

impl AnalyticsConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Unparseable values fall
    /// back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let timezone = match lookup("JOURNAL_TIMEZONE") {
            Some(name) => name.parse::<Tz>().unwrap_or_else(|e| {
                tracing::warn!("Ignoring JOURNAL_TIMEZONE={}: {}", name, e);
                defaults.timezone
            }),
            None => defaults.timezone,
        };

        let reconcile_epsilon = lookup("JOURNAL_RECONCILE_EPSILON")
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|e| e.is_finite() && *e >= 0.0)
            .unwrap_or(defaults.reconcile_epsilon);

        let chart_window = lookup("JOURNAL_CHART_WINDOW")
            .and_then(|s| ChartWindow::from_str_loose(&s))
            .unwrap_or(defaults.chart_window);

        Self {
            timezone,
            reconcile_epsilon,
            chart_window,
            chart_max_points: lookup("JOURNAL_CHART_MAX_POINTS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.chart_max_points),
            month_count: lookup("JOURNAL_MONTH_COUNT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.month_count),
            log_level: lookup("JOURNAL_LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }
}
