pub mod layout;
pub mod pages;
pub mod status;

pub use pages::{
    admin::AdminPage, backtest::BacktestPage, dashboard::DashboardPage, DEFAULT_INTERVAL,
    DEFAULT_SYMBOL, INTERVALS,
};
pub use status::ActionStatus;

pub fn module_ready() -> bool {
    true
}

pub fn styles_css() -> &'static str {
    include_str!("../static/styles.css")
}

pub fn app_js() -> &'static str {
    include_str!("../static/app.js")
}
