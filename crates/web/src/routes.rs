use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use ui::{AdminPage, BacktestPage, DashboardPage, DEFAULT_INTERVAL, DEFAULT_SYMBOL};

use crate::{pages, state::AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/dashboard", get(dashboard))
        .route("/dashboard/analysis", post(dashboard_analysis))
        .route("/dashboard/symbols", get(dashboard_symbols))
        .route("/backtest", get(backtest))
        .route("/backtest/run", post(backtest_run))
        .route("/admin", get(admin))
        .route("/admin/config", post(admin_update_config))
        .route("/admin/reset", post(admin_reset_config))
        .route("/admin/load", post(admin_load_config))
        .route("/admin/login", post(admin_sign_in))
        .route("/admin/train", post(admin_train))
        .route("/static/styles.css", get(styles))
        .route("/static/app.js", get(script))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
struct SelectionForm {
    symbol: Option<String>,
    interval: Option<String>,
}

impl SelectionForm {
    fn into_parts(self) -> (String, String) {
        (
            self.symbol.unwrap_or_else(|| DEFAULT_SYMBOL.to_owned()),
            self.interval.unwrap_or_else(|| DEFAULT_INTERVAL.to_owned()),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
struct SymbolSearchQuery {
    #[serde(default)]
    query: String,
    symbol: Option<String>,
    interval: Option<String>,
}

/// Fields shared by every admin form. Not `Debug`: it carries credentials.
#[derive(Default, Deserialize)]
struct AdminForm {
    #[serde(default)]
    token: String,
    config_text: Option<String>,
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
    symbol: Option<String>,
    interval: Option<String>,
}

impl AdminForm {
    fn into_page(self) -> (AdminPage, String) {
        let defaults = AdminPage::default();
        let page = AdminPage {
            token: self.token,
            config_text: self.config_text.unwrap_or(defaults.config_text),
            username: self.username,
            symbol: self.symbol.unwrap_or(defaults.symbol),
            interval: self.interval.unwrap_or(defaults.interval),
            ..AdminPage::default()
        };
        (page, self.password)
    }
}

async fn home() -> Html<String> {
    Html(ui::pages::home::render())
}

async fn dashboard(Query(selection): Query<SelectionForm>) -> Html<String> {
    let (symbol, interval) = selection.into_parts();
    Html(DashboardPage::new(symbol, interval).render())
}

async fn dashboard_analysis(
    State(state): State<AppState>,
    Form(selection): Form<SelectionForm>,
) -> Html<String> {
    let (symbol, interval) = selection.into_parts();
    let mut page = DashboardPage::new(symbol, interval);
    pages::dashboard::run_analysis(state.client(), &mut page).await;
    Html(page.render())
}

async fn dashboard_symbols(
    State(state): State<AppState>,
    Query(search): Query<SymbolSearchQuery>,
) -> Html<String> {
    let selection = SelectionForm {
        symbol: search.symbol,
        interval: search.interval,
    };
    let (symbol, interval) = selection.into_parts();
    let mut page = DashboardPage::new(symbol, interval);
    page.symbol_query = search.query;
    pages::dashboard::search_symbols(state.client(), &mut page).await;
    Html(page.render())
}

async fn backtest() -> Html<String> {
    Html(BacktestPage::default().render())
}

async fn backtest_run(
    State(state): State<AppState>,
    Form(selection): Form<SelectionForm>,
) -> Html<String> {
    let (symbol, interval) = selection.into_parts();
    let mut page = BacktestPage::new(symbol, interval);
    pages::backtest::run_backtest(state.client(), &mut page).await;
    Html(page.render())
}

async fn admin() -> Html<String> {
    Html(AdminPage::default().render())
}

async fn admin_update_config(
    State(state): State<AppState>,
    Form(form): Form<AdminForm>,
) -> Html<String> {
    let (mut page, _) = form.into_page();
    pages::admin::update_config(state.client(), &mut page).await;
    Html(page.render())
}

async fn admin_reset_config(
    State(state): State<AppState>,
    Form(form): Form<AdminForm>,
) -> Html<String> {
    let (mut page, _) = form.into_page();
    pages::admin::reset_config(state.client(), &mut page).await;
    Html(page.render())
}

async fn admin_load_config(
    State(state): State<AppState>,
    Form(form): Form<AdminForm>,
) -> Html<String> {
    let (mut page, _) = form.into_page();
    pages::admin::load_config(state.client(), &mut page).await;
    Html(page.render())
}

async fn admin_sign_in(
    State(state): State<AppState>,
    Form(form): Form<AdminForm>,
) -> Html<String> {
    let (mut page, password) = form.into_page();
    pages::admin::sign_in(state.client(), &mut page, &password).await;
    Html(page.render())
}

async fn admin_train(State(state): State<AppState>, Form(form): Form<AdminForm>) -> Html<String> {
    let (mut page, _) = form.into_page();
    pages::admin::train_model(state.client(), &mut page).await;
    Html(page.render())
}

async fn styles() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        ui::styles_css(),
    )
}

async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        ui::app_js(),
    )
}
