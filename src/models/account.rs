use serde::{Deserialize, Serialize};

use crate::models::trade::settle_all;
use crate::models::{AccountCategory, SettledTrade, Trade};

/// A trading account and the trades journaled against it.
///
/// `current_balance` is authoritative and maintained independently of the
/// trade list (deposits, withdrawals, manual edits), so it is generally not
/// equal to `initial_balance` plus the sum of trade P/L.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub category: AccountCategory,
    pub initial_balance: f64,
    pub current_balance: f64,
    #[serde(default)]
    pub trades: Vec<Trade>,
}

impl Account {
    pub fn new(id: impl Into<String>, category: AccountCategory, initial_balance: f64) -> Self {
        Self {
            id: id.into(),
            name: None,
            category,
            initial_balance,
            current_balance: initial_balance,
            trades: Vec::new(),
        }
    }

    pub fn with_trades(mut self, trades: Vec<Trade>) -> Self {
        self.trades = trades;
        self
    }

    pub fn with_current_balance(mut self, current_balance: f64) -> Self {
        self.current_balance = current_balance;
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Valid trades in (timestamp, id) order. Malformed ones are logged and dropped.
    pub fn settled_trades(&self) -> Vec<SettledTrade> {
        settle_all(&self.trades).0
    }
}
