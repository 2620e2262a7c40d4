pub mod balance_history;
pub mod calendar;
pub mod monthly;
pub mod stats;

pub use balance_history::{downsample, max_drawdown, BalanceHistoryReconstructor, Drawdown};
pub use calendar::Calendar;
pub use monthly::aggregate_monthly;
pub use stats::{compute_portfolio_stats, compute_stats, DerivedStats, ProfitFactor};
