use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[serde(alias = "Long", alias = "buy")]
    Long,
    #[serde(alias = "Short", alias = "sell")]
    Short,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "long",
            Direction::Short => "short",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Direction> {
        match s.trim().to_lowercase().as_str() {
            "long" | "buy" => Some(Direction::Long),
            "short" | "sell" => Some(Direction::Short),
            _ => None,
        }
    }
}

/// Kind of trading account. Monthly breakdowns split P/L along this axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountCategory {
    #[serde(alias = "Real", alias = "live")]
    Real,
    #[serde(alias = "Demo")]
    Demo,
    #[serde(alias = "Prop Firm", alias = "prop", alias = "propfirm", alias = "PropFirm")]
    PropFirm,
}

impl fmt::Display for AccountCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountCategory::Real => write!(f, "Real"),
            AccountCategory::Demo => write!(f, "Demo"),
            AccountCategory::PropFirm => write!(f, "Prop Firm"),
        }
    }
}

impl AccountCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountCategory::Real => "real",
            AccountCategory::Demo => "demo",
            AccountCategory::PropFirm => "prop_firm",
        }
    }
}
