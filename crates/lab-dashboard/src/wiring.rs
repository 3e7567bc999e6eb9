use axum::{routing::get, Router};
use client::ApiClient;
use tower_http::trace::TraceLayer;

pub fn build_app(client: ApiClient) -> Router {
    debug_assert!(client::module_ready());
    debug_assert!(web::module_ready());
    debug_assert!(ui::module_ready());

    web::app(client)
        .route("/health", get(healthcheck))
        .layer(TraceLayer::new_for_http())
}

async fn healthcheck() -> &'static str {
    "ok"
}
