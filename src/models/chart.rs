use serde::{Deserialize, Serialize};

use crate::models::AccountCategory;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Signed P/L for one calendar month, split by account category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBucket {
    pub month_label: String,
    pub real: f64,
    pub demo: f64,
    pub prop: f64,
}

impl MonthlyBucket {
    pub fn empty(month_label: impl Into<String>) -> Self {
        Self {
            month_label: month_label.into(),
            real: 0.0,
            demo: 0.0,
            prop: 0.0,
        }
    }

    pub fn add(&mut self, category: AccountCategory, pnl: f64) {
        match category {
            AccountCategory::Real => self.real += pnl,
            AccountCategory::Demo => self.demo += pnl,
            AccountCategory::PropFirm => self.prop += pnl,
        }
    }

    pub fn get(&self, category: AccountCategory) -> f64 {
        match category {
            AccountCategory::Real => self.real,
            AccountCategory::Demo => self.demo,
            AccountCategory::PropFirm => self.prop,
        }
    }

    pub fn total(&self) -> f64 {
        self.real + self.demo + self.prop
    }
}
