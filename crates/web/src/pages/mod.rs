//! Page actions: each one drives a page's `ActionStatus` through a backend
//! call and leaves the outcome on the page for rendering.

pub mod admin;
pub mod backtest;
pub mod dashboard;

use client::ClientError;
use serde_json::Value;

fn log_outcome(action: &'static str, outcome: &Result<Value, ClientError>) {
    match outcome {
        Ok(_) => tracing::debug!(action, "backend call settled"),
        Err(err) => {
            tracing::warn!(action, status = err.status(), error = %err, "backend call failed")
        }
    }
}
