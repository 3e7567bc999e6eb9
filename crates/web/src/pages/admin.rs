use client::{ApiClient, ClientError};
use serde_json::Value;
use ui::{layout::pretty_json, AdminPage};

use super::log_outcome;

/// Sends the editor contents as the new config. Text that is not JSON is
/// rejected here and never reaches the backend.
pub async fn update_config(client: &ApiClient, page: &mut AdminPage) {
    let payload = match serde_json::from_str::<Value>(&page.config_text) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::info!(error = %err, "config text is not json; nothing sent");
            page.action.fail(format!("config is not valid JSON: {err}"));
            return;
        }
    };

    page.action.begin();
    let outcome = client.update_config(&page.token, &payload).await;
    settle_with_message(page, "update_config", outcome);
}

pub async fn reset_config(client: &ApiClient, page: &mut AdminPage) {
    page.action.begin();
    let outcome = client.reset_config(&page.token).await;
    settle_with_message(page, "reset_config", outcome);
}

/// Replaces the editor contents with the backend's current config.
pub async fn load_config(client: &ApiClient, page: &mut AdminPage) {
    page.action.begin();
    let outcome = client.get_config(&page.token).await;
    log_outcome("get_config", &outcome);
    if let Ok(config) = &outcome {
        page.config_text = pretty_json(config);
    }
    page.action.settle(outcome);
}

pub async fn sign_in(client: &ApiClient, page: &mut AdminPage, password: &str) {
    page.action.begin();
    let outcome = client.login(&page.username, password).await;
    if let Some(token) = outcome
        .as_ref()
        .ok()
        .and_then(|body| body.get("access_token"))
        .and_then(Value::as_str)
    {
        page.token = token.to_owned();
    }
    settle_with_message(page, "login", outcome);
}

pub async fn train_model(client: &ApiClient, page: &mut AdminPage) {
    page.action.begin();
    let outcome = client.train(&page.token, &page.symbol, &page.interval).await;
    settle_with_message(page, "train", outcome);
}

/// On success the message becomes the compact response JSON. The form does not
/// carry the message, so a failed action leaves it empty.
fn settle_with_message(
    page: &mut AdminPage,
    action: &'static str,
    outcome: Result<Value, ClientError>,
) {
    log_outcome(action, &outcome);
    if let Ok(body) = &outcome {
        page.message = body.to_string();
    }
    page.action.settle(outcome);
}

#[cfg(test)]
mod tests {
    use client::{
        testing::{MockBackend, ADMIN_PASSWORD, ADMIN_TOKEN, ADMIN_USERNAME},
        ApiClient,
    };
    use serde_json::json;
    use ui::{ActionStatus, AdminPage};

    use super::*;

    fn admin_page(token: &str, config_text: &str) -> AdminPage {
        AdminPage {
            token: token.to_owned(),
            config_text: config_text.to_owned(),
            ..AdminPage::default()
        }
    }

    #[tokio::test]
    async fn empty_object_config_is_put_with_token() {
        let backend = MockBackend::start().await;
        let client = ApiClient::new(backend.base_url()).unwrap();
        let mut page = admin_page(ADMIN_TOKEN, "{}");

        update_config(&client, &mut page).await;

        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "PUT");
        assert_eq!(calls[0].body, Some(json!({})));
        assert_eq!(
            calls[0].authorization.as_deref(),
            Some(format!("Bearer {ADMIN_TOKEN}").as_str())
        );
        assert_eq!(page.message, r#"{"status":"updated"}"#);
    }

    #[tokio::test]
    async fn invalid_json_issues_no_request() {
        let backend = MockBackend::start().await;
        let client = ApiClient::new(backend.base_url()).unwrap();
        let mut page = admin_page(ADMIN_TOKEN, "not json");

        update_config(&client, &mut page).await;

        assert!(backend.calls().is_empty());
        assert!(
            matches!(&page.action, ActionStatus::Failed(reason) if reason.starts_with("config is not valid JSON"))
        );
        assert_eq!(page.message, "");
    }

    #[tokio::test]
    async fn rejected_token_response_is_shown_as_message() {
        let backend = MockBackend::start().await;
        let client = ApiClient::new(backend.base_url()).unwrap();
        let mut page = admin_page("wrong", r#"{"weights":{"sentiment":0.5}}"#);

        update_config(&client, &mut page).await;

        assert_eq!(page.message, r#"{"detail":"Invalid token"}"#);
        assert!(page.action.is_succeeded());
    }

    #[tokio::test]
    async fn reset_posts_with_token_and_reports_status() {
        let backend = MockBackend::start().await;
        let client = ApiClient::new(backend.base_url()).unwrap();
        let mut page = admin_page(ADMIN_TOKEN, "{}");

        reset_config(&client, &mut page).await;

        assert_eq!(backend.calls()[0].path, "/config/reset");
        assert_eq!(page.message, r#"{"status":"reset"}"#);
    }

    #[tokio::test]
    async fn load_config_fills_editor_with_pretty_json() {
        let backend = MockBackend::start().await;
        let client = ApiClient::new(backend.base_url()).unwrap();
        let mut page = admin_page(ADMIN_TOKEN, "{}");

        load_config(&client, &mut page).await;

        let loaded: serde_json::Value = serde_json::from_str(&page.config_text).unwrap();
        assert_eq!(loaded["market"]["default_interval"], "1h");
        assert!(page.config_text.contains("\n  \"market\""));
    }

    #[tokio::test]
    async fn loaded_config_is_sent_back_in_backend_key_order() {
        let backend = MockBackend::start().await;
        let client = ApiClient::new(backend.base_url()).unwrap();
        let mut page = admin_page(ADMIN_TOKEN, "{}");

        load_config(&client, &mut page).await;
        update_config(&client, &mut page).await;

        let weights = page.config_text.find("\"weights\"").unwrap();
        let market = page.config_text.find("\"market\"").unwrap();
        assert!(weights < market);
        let sent = backend.calls()[1].body.clone().unwrap();
        assert!(sent.to_string().starts_with(r#"{"weights":{"price":0.4,"technical":0.3"#));
    }

    #[tokio::test]
    async fn sign_in_stores_returned_token() {
        let backend = MockBackend::start().await;
        let client = ApiClient::new(backend.base_url()).unwrap();
        let mut page = AdminPage {
            username: ADMIN_USERNAME.to_owned(),
            ..AdminPage::default()
        };

        sign_in(&client, &mut page, ADMIN_PASSWORD).await;

        assert_eq!(page.token, ADMIN_TOKEN);
        assert!(!page.render().contains(ADMIN_PASSWORD));
    }

    #[tokio::test]
    async fn bad_credentials_leave_token_untouched() {
        let backend = MockBackend::start().await;
        let client = ApiClient::new(backend.base_url()).unwrap();
        let mut page = AdminPage {
            username: ADMIN_USERNAME.to_owned(),
            token: "previous".to_owned(),
            ..AdminPage::default()
        };

        sign_in(&client, &mut page, "wrong").await;

        assert_eq!(page.token, "previous");
        assert_eq!(page.message, r#"{"detail":"Bad credentials"}"#);
    }

    #[tokio::test]
    async fn train_sends_symbol_and_interval() {
        let backend = MockBackend::start().await;
        let client = ApiClient::new(backend.base_url()).unwrap();
        let mut page = AdminPage {
            token: ADMIN_TOKEN.to_owned(),
            symbol: "ETHUSDT".to_owned(),
            interval: "4h".to_owned(),
            ..AdminPage::default()
        };

        train_model(&client, &mut page).await;

        assert_eq!(
            backend.calls()[0].body,
            Some(json!({ "symbol": "ETHUSDT", "interval": "4h", "limit": 500 }))
        );
        assert!(page.message.contains(r#""status":"trained""#));
    }
}
