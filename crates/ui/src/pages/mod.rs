pub mod admin;
pub mod backtest;
pub mod dashboard;
pub mod home;

pub const DEFAULT_SYMBOL: &str = "BTCUSDT";
pub const DEFAULT_INTERVAL: &str = "1h";
pub const INTERVALS: [&str; 6] = ["1m", "5m", "15m", "1h", "4h", "1d"];
