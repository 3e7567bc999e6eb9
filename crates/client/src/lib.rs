mod api;
mod error;
pub mod requests;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use api::{
    validate_base_url, ApiClient, DEFAULT_ANALYZE_LIMIT, DEFAULT_BACKTEST_LIMIT,
    DEFAULT_TRAIN_LIMIT,
};
pub use error::ClientError;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

pub fn module_ready() -> bool {
    true
}
