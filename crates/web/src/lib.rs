pub mod pages;
pub mod routes;
pub mod state;

use axum::Router;
use client::ApiClient;

pub fn module_ready() -> bool {
    true
}

pub fn app(client: ApiClient) -> Router {
    routes::router(state::AppState::new(client))
}
