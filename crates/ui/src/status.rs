use std::fmt;

use serde_json::Value;

use crate::layout::escape_html;

/// Lifecycle of one page action.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ActionStatus {
    #[default]
    Idle,
    Pending,
    Succeeded(Value),
    Failed(String),
}

impl ActionStatus {
    /// Set before each backend call. A server-rendered page never shows this
    /// state; the browser marks the form pending from `static/app.js` instead.
    pub fn begin(&mut self) {
        *self = Self::Pending;
    }

    pub fn settle<E: fmt::Display>(&mut self, outcome: Result<Value, E>) {
        *self = match outcome {
            Ok(value) => Self::Succeeded(value),
            Err(err) => Self::Failed(err.to_string()),
        };
    }

    pub fn fail(&mut self, reason: impl Into<String>) {
        *self = Self::Failed(reason.into());
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Succeeded(_) => "succeeded",
            Self::Failed(_) => "failed",
        }
    }

    /// Status line for an action. `what` names the action, e.g. "analysis".
    pub fn render_indicator(&self, what: &str) -> String {
        let what = escape_html(what);
        let text = match self {
            Self::Idle => String::new(),
            Self::Pending => format!("{what}: request in flight"),
            Self::Succeeded(_) => format!("{what}: done"),
            Self::Failed(reason) => format!("{what} failed: {}", escape_html(reason)),
        };
        format!(
            r#"<p class="status" data-status="{}" data-pending-text="{what}: request in flight">{text}</p>"#,
            self.label()
        )
    }
}
