use thiserror::Error;

/// Why a stored trade could not take part in an aggregation.
///
/// The document store enforces no schema, so these are expected in practice.
/// Aggregators log and skip the offending trade; they never abort on one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TradeError {
    #[error("trade {id} has no profit and loss")]
    MissingProfitAndLoss { id: String },

    #[error("trade {id} has no timestamp")]
    MissingTimestamp { id: String },

    #[error("trade {id} has a non-finite profit and loss ({value})")]
    NonFiniteProfitAndLoss { id: String, value: f64 },

    #[error("trade {id} is dated before the Unix epoch ({seconds}s)")]
    TimestampBeforeEpoch { id: String, seconds: i64 },

    #[error("trade {id} has an unrepresentable timestamp ({seconds}s)")]
    TimestampOutOfRange { id: String, seconds: i64 },
}
