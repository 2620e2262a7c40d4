pub mod account;
pub mod chart;
pub mod direction;
pub mod trade;
pub mod window;

pub use account::Account;
pub use chart::{ChartPoint, MonthlyBucket};
pub use direction::*;
pub use trade::{settle_all, SettledTrade, Trade};
pub use window::ChartWindow;
