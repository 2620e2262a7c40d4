pub mod analytics;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
#[cfg(test)]
pub mod test_helpers;
