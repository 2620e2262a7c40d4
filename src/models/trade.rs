use chrono::DateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::TradeError;
use crate::models::Direction;

/// Earliest accepted trade time. Older stamps are data-entry garbage and would
/// stretch a balance curve across millennia of empty days.
pub const MIN_TIMESTAMP_SECONDS: i64 = 0;

/// A journaled trade as it comes out of the document store.
///
/// Only `timestamp_seconds` and `profit_and_loss` matter to the analytics, and
/// both may be absent on hand-edited or legacy documents. Call [`Trade::settle`]
/// to get the validated view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    #[serde(
        default,
        alias = "timestamp",
        deserialize_with = "deserialize_timestamp"
    )]
    pub timestamp_seconds: Option<i64>,
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub entry_price: Option<f64>,
    #[serde(default)]
    pub exit_price: Option<f64>,
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub profit_and_loss: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// The two fields every aggregation needs, both known to be usable.
#[derive(Debug, Clone, PartialEq)]
pub struct SettledTrade {
    pub id: String,
    pub timestamp_seconds: i64,
    pub profit_and_loss: f64,
}

impl SettledTrade {
    pub fn is_win(&self) -> bool {
        self.profit_and_loss > 0.0
    }
}

impl Trade {
    pub fn new(
        id: impl Into<String>,
        timestamp_seconds: i64,
        direction: Direction,
        entry_price: f64,
        exit_price: f64,
        size: f64,
        profit_and_loss: f64,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp_seconds: Some(timestamp_seconds),
            direction: Some(direction),
            entry_price: Some(entry_price),
            exit_price: Some(exit_price),
            size: Some(size),
            profit_and_loss: Some(profit_and_loss),
            notes: None,
        }
    }

    pub fn settle(&self) -> Result<SettledTrade, TradeError> {
        let profit_and_loss = self
            .profit_and_loss
            .ok_or_else(|| TradeError::MissingProfitAndLoss { id: self.id.clone() })?;
        if !profit_and_loss.is_finite() {
            return Err(TradeError::NonFiniteProfitAndLoss {
                id: self.id.clone(),
                value: profit_and_loss,
            });
        }

        let timestamp_seconds = self
            .timestamp_seconds
            .ok_or_else(|| TradeError::MissingTimestamp { id: self.id.clone() })?;
        if timestamp_seconds < MIN_TIMESTAMP_SECONDS {
            return Err(TradeError::TimestampBeforeEpoch {
                id: self.id.clone(),
                seconds: timestamp_seconds,
            });
        }
        if DateTime::from_timestamp(timestamp_seconds, 0).is_none() {
            return Err(TradeError::TimestampOutOfRange {
                id: self.id.clone(),
                seconds: timestamp_seconds,
            });
        }

        Ok(SettledTrade {
            id: self.id.clone(),
            timestamp_seconds,
            profit_and_loss,
        })
    }
}

/// Settles every trade, logging and dropping the malformed ones, and returns
/// the survivors in (timestamp, id) order.
pub fn settle_all<'a, I>(trades: I) -> (Vec<SettledTrade>, usize)
where
    I: IntoIterator<Item = &'a Trade>,
{
    let mut settled = Vec::new();
    let mut skipped = 0;
    for trade in trades {
        match trade.settle() {
            Ok(t) => settled.push(t),
            Err(e) => {
                tracing::warn!("Skipping malformed trade: {}", e);
                skipped += 1;
            }
        }
    }
    settled.sort_by(|a, b| {
        a.timestamp_seconds
            .cmp(&b.timestamp_seconds)
            .then_with(|| a.id.cmp(&b.id))
            .then_with(|| a.profit_and_loss.total_cmp(&b.profit_and_loss))
    });
    (settled, skipped)
}

/// Document-store timestamps arrive either as bare epoch seconds or as a
/// `{ seconds, nanoseconds }` object.
#[derive(Deserialize)]
#[serde(untagged)]
enum TimestampRepr {
    Seconds(i64),
    Document {
        seconds: i64,
        #[serde(default, alias = "nanos")]
        #[allow(dead_code)]
        nanoseconds: u32,
    },
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let repr = Option::<TimestampRepr>::deserialize(deserializer)?;
    Ok(repr.map(|r| match r {
        TimestampRepr::Seconds(s) => s,
        TimestampRepr::Document { seconds, .. } => seconds,
    }))
}
