use client::ApiClient;
use ui::BacktestPage;

use super::log_outcome;

pub async fn run_backtest(client: &ApiClient, page: &mut BacktestPage) {
    page.result.begin();
    let result = client.backtest(&page.symbol, &page.interval).await;
    log_outcome("backtest", &result);
    page.result.settle(result);
}
