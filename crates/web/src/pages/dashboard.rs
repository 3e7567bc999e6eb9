use client::ApiClient;
use ui::{ActionStatus, DashboardPage};

use super::log_outcome;

/// Awaits the analysis, stores it, and only then asks for a prediction.
/// A failed analysis leaves the prediction idle.
pub async fn run_analysis(client: &ApiClient, page: &mut DashboardPage) {
    page.prediction = ActionStatus::Idle;

    page.analysis.begin();
    let analysis = client.analyze(&page.symbol, &page.interval).await;
    log_outcome("analyze", &analysis);
    page.analysis.settle(analysis);
    if !page.analysis.is_succeeded() {
        return;
    }

    page.prediction.begin();
    let prediction = client.predict(&page.symbol, &page.interval).await;
    log_outcome("predict", &prediction);
    page.prediction.settle(prediction);
}

pub async fn search_symbols(client: &ApiClient, page: &mut DashboardPage) {
    page.symbols.begin();
    let symbols = client.fetch_symbols(&page.symbol_query).await;
    log_outcome("fetch_symbols", &symbols);
    page.symbols.settle(symbols);
}
