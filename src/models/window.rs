use serde::{Deserialize, Serialize};
use std::fmt;

/// Look-back window for the balance chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartWindow {
    Week,
    Month,
    Year,
}

impl ChartWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartWindow::Week => "week",
            ChartWindow::Month => "month",
            ChartWindow::Year => "year",
        }
    }

    /// Nominal length in calendar days.
    pub fn days(&self) -> i64 {
        match self {
            ChartWindow::Week => 7,
            ChartWindow::Month => 30,
            ChartWindow::Year => 365,
        }
    }

    pub fn from_str_loose(s: &str) -> Option<ChartWindow> {
        match s.trim().to_lowercase().as_str() {
            "week" | "1w" | "7d" => Some(ChartWindow::Week),
            "month" | "1m" | "30d" => Some(ChartWindow::Month),
            "year" | "1y" | "365d" => Some(ChartWindow::Year),
            _ => None,
        }
    }
}

impl fmt::Display for ChartWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
