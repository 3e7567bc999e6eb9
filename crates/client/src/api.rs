use reqwest::{Method, RequestBuilder, Url};
use serde_json::Value;

use crate::{
    requests::{LoginRequest, RunRequest},
    ClientError,
};

pub const DEFAULT_ANALYZE_LIMIT: u32 = 200;
pub const DEFAULT_BACKTEST_LIMIT: u32 = 300;
pub const DEFAULT_TRAIN_LIMIT: u32 = 500;

/// HTTP client for the analysis backend.
///
/// Every call returns the parsed response body, whatever the status code.
/// There are no retries, no caching and no request timeout.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = validate_base_url(base_url)?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("lab-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<Value, ClientError> {
        self.send("/health", self.request(Method::GET, "/health"))
            .await
    }

    pub async fn fetch_symbols(&self, query: &str) -> Result<Value, ClientError> {
        let request = self
            .request(Method::GET, "/symbols")
            .query(&[("query", query)]);
        self.send("/symbols", request).await
    }

    pub async fn analyze(&self, symbol: &str, interval: &str) -> Result<Value, ClientError> {
        self.analyze_with_limit(symbol, interval, DEFAULT_ANALYZE_LIMIT)
            .await
    }

    pub async fn analyze_with_limit(
        &self,
        symbol: &str,
        interval: &str,
        limit: u32,
    ) -> Result<Value, ClientError> {
        let limit = limit.to_string();
        let request = self.request(Method::GET, "/analyze").query(&[
            ("symbol", symbol),
            ("interval", interval),
            ("limit", limit.as_str()),
        ]);
        self.send("/analyze", request).await
    }

    pub async fn predict(&self, symbol: &str, interval: &str) -> Result<Value, ClientError> {
        let request = self
            .request(Method::GET, "/predict")
            .query(&[("symbol", symbol), ("interval", interval)]);
        self.send("/predict", request).await
    }

    pub async fn backtest(&self, symbol: &str, interval: &str) -> Result<Value, ClientError> {
        self.backtest_with_limit(symbol, interval, DEFAULT_BACKTEST_LIMIT)
            .await
    }

    pub async fn backtest_with_limit(
        &self,
        symbol: &str,
        interval: &str,
        limit: u32,
    ) -> Result<Value, ClientError> {
        let request = self
            .request(Method::POST, "/backtest")
            .json(&RunRequest::new(symbol, interval, limit));
        self.send("/backtest", request).await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Value, ClientError> {
        let request = self
            .request(Method::POST, "/auth/token")
            .json(&LoginRequest { username, password });
        self.send("/auth/token", request).await
    }

    pub async fn get_config(&self, token: &str) -> Result<Value, ClientError> {
        let request = self.request(Method::GET, "/config").bearer_auth(token);
        self.send("/config", request).await
    }

    pub async fn update_config(&self, token: &str, payload: &Value) -> Result<Value, ClientError> {
        let request = self
            .request(Method::PUT, "/config")
            .bearer_auth(token)
            .json(payload);
        self.send("/config", request).await
    }

    pub async fn reset_config(&self, token: &str) -> Result<Value, ClientError> {
        let request = self
            .request(Method::POST, "/config/reset")
            .bearer_auth(token);
        self.send("/config/reset", request).await
    }

    pub async fn train(
        &self,
        token: &str,
        symbol: &str,
        interval: &str,
    ) -> Result<Value, ClientError> {
        self.train_with_limit(token, symbol, interval, DEFAULT_TRAIN_LIMIT)
            .await
    }

    pub async fn train_with_limit(
        &self,
        token: &str,
        symbol: &str,
        interval: &str,
        limit: u32,
    ) -> Result<Value, ClientError> {
        let request = self
            .request(Method::POST, "/train")
            .bearer_auth(token)
            .json(&RunRequest::new(symbol, interval, limit));
        self.send("/train", request).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{path}", self.base_url))
    }

    async fn send(&self, path: &'static str, request: RequestBuilder) -> Result<Value, ClientError> {
        let response = request.send().await.map_err(ClientError::Transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(ClientError::Transport)?;
        tracing::debug!(
            path,
            status = status.as_u16(),
            bytes = body.len(),
            "backend responded"
        );

        serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
            status: status.as_u16(),
            source,
        })
    }
}

/// Checks that `raw` is an absolute http(s) url and strips trailing slashes.
pub fn validate_base_url(raw: &str) -> Result<String, ClientError> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|err| ClientError::InvalidBaseUrl {
        url: trimmed.to_owned(),
        reason: err.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::UnsupportedScheme(url.scheme().to_owned()));
    }

    Ok(trimmed.trim_end_matches('/').to_owned())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{validate_base_url, ApiClient};
    use crate::{
        testing::{unreachable_base_url, MockBackend, ADMIN_PASSWORD, ADMIN_TOKEN, ADMIN_USERNAME},
        ClientError,
    };

    #[test]
    fn base_url_trailing_slashes_are_stripped() {
        assert_eq!(
            validate_base_url(" http://backend:8000/api/ ").unwrap(),
            "http://backend:8000/api"
        );
    }

    #[test]
    fn base_url_must_use_http_or_https() {
        let err = validate_base_url("ftp://backend").unwrap_err();

        assert!(matches!(err, ClientError::UnsupportedScheme(scheme) if scheme == "ftp"));
    }

    #[test]
    fn base_url_must_be_absolute() {
        let err = validate_base_url("localhost:8000/").unwrap_err();

        assert!(matches!(
            err,
            ClientError::InvalidBaseUrl { .. } | ClientError::UnsupportedScheme(_)
        ));
        assert!(validate_base_url("not a url").is_err());
    }

    #[tokio::test]
    async fn analyze_issues_one_get_with_default_limit() {
        let backend = MockBackend::start().await;
        let client = ApiClient::new(backend.base_url()).unwrap();

        let analysis = client.analyze("BTCUSDT", "1h").await.unwrap();

        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "GET");
        assert_eq!(calls[0].path, "/analyze");
        assert_eq!(
            calls[0].query.as_deref(),
            Some("symbol=BTCUSDT&interval=1h&limit=200")
        );
        assert_eq!(analysis["signals"], json!({ "trend": "up" }));
    }

    #[tokio::test]
    async fn analyze_with_limit_forwards_explicit_limit() {
        let backend = MockBackend::start().await;
        let client = ApiClient::new(backend.base_url()).unwrap();

        client.analyze_with_limit("ETHUSDT", "4h", 50).await.unwrap();

        assert_eq!(
            backend.calls()[0].query.as_deref(),
            Some("symbol=ETHUSDT&interval=4h&limit=50")
        );
    }

    #[tokio::test]
    async fn predict_sends_symbol_and_interval_only() {
        let backend = MockBackend::start().await;
        let client = ApiClient::new(backend.base_url()).unwrap();

        let prediction = client.predict("BTCUSDT", "15m").await.unwrap();

        let calls = backend.calls();
        assert_eq!(calls[0].path, "/predict");
        assert_eq!(calls[0].query.as_deref(), Some("symbol=BTCUSDT&interval=15m"));
        assert_eq!(prediction["symbol"], "BTCUSDT");
    }

    #[tokio::test]
    async fn fetch_symbols_percent_encodes_query() {
        let backend = MockBackend::start().await;
        let client = ApiClient::new(backend.base_url()).unwrap();

        client.fetch_symbols("btc usd&x").await.unwrap();

        let calls = backend.calls();
        assert_eq!(calls[0].path, "/symbols");
        assert_eq!(calls[0].query.as_deref(), Some("query=btc+usd%26x"));
    }

    #[tokio::test]
    async fn backtest_posts_json_body_with_default_limit() {
        let backend = MockBackend::start().await;
        let client = ApiClient::new(backend.base_url()).unwrap();

        client.backtest("BTCUSDT", "1h").await.unwrap();

        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "POST");
        assert_eq!(calls[0].path, "/backtest");
        assert_eq!(calls[0].content_type.as_deref(), Some("application/json"));
        assert_eq!(
            calls[0].body,
            Some(json!({ "symbol": "BTCUSDT", "interval": "1h", "limit": 300 }))
        );
    }

    #[tokio::test]
    async fn update_config_puts_payload_with_bearer_token() {
        let backend = MockBackend::start().await;
        let client = ApiClient::new(backend.base_url()).unwrap();

        let response = client.update_config(ADMIN_TOKEN, &json!({})).await.unwrap();

        let calls = backend.calls();
        assert_eq!(calls[0].method, "PUT");
        assert_eq!(calls[0].path, "/config");
        assert_eq!(
            calls[0].authorization.as_deref(),
            Some(format!("Bearer {ADMIN_TOKEN}").as_str())
        );
        assert_eq!(calls[0].body, Some(json!({})));
        assert_eq!(response, json!({ "status": "updated" }));
    }

    #[tokio::test]
    async fn reset_config_posts_without_body() {
        let backend = MockBackend::start().await;
        let client = ApiClient::new(backend.base_url()).unwrap();

        let response = client.reset_config(ADMIN_TOKEN).await.unwrap();

        let calls = backend.calls();
        assert_eq!(calls[0].method, "POST");
        assert_eq!(calls[0].path, "/config/reset");
        assert_eq!(calls[0].body, None);
        assert_eq!(response, json!({ "status": "reset" }));
    }

    #[tokio::test]
    async fn error_status_body_is_returned_as_json() {
        let backend = MockBackend::start().await;
        let client = ApiClient::new(backend.base_url()).unwrap();

        let response = client.update_config("wrong", &json!({ "weights": {} })).await.unwrap();

        assert_eq!(response, json!({ "detail": "Invalid token" }));
    }

    #[tokio::test]
    async fn non_json_body_is_a_decode_error_with_status() {
        let backend = MockBackend::start().await;
        let client = ApiClient::new(backend.base_url()).unwrap();

        let err = client.analyze("BROKEN", "1h").await.unwrap_err();

        assert!(matches!(err, ClientError::Decode { status: 500, .. }));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        let client = ApiClient::new(&unreachable_base_url().await).unwrap();

        let err = client.predict("BTCUSDT", "1h").await.unwrap_err();

        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[tokio::test]
    async fn login_posts_credentials_and_returns_token() {
        let backend = MockBackend::start().await;
        let client = ApiClient::new(backend.base_url()).unwrap();

        let response = client.login(ADMIN_USERNAME, ADMIN_PASSWORD).await.unwrap();

        let calls = backend.calls();
        assert_eq!(calls[0].path, "/auth/token");
        assert_eq!(
            calls[0].body,
            Some(json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }))
        );
        assert_eq!(response["access_token"], ADMIN_TOKEN);
    }

    #[tokio::test]
    async fn get_config_sends_bearer_token() {
        let backend = MockBackend::start().await;
        let client = ApiClient::new(backend.base_url()).unwrap();

        let config = client.get_config(ADMIN_TOKEN).await.unwrap();

        let calls = backend.calls();
        assert_eq!(calls[0].method, "GET");
        assert_eq!(calls[0].path, "/config");
        assert_eq!(
            calls[0].authorization.as_deref(),
            Some(format!("Bearer {ADMIN_TOKEN}").as_str())
        );
        assert!(config.get("weights").is_some());
    }

    #[tokio::test]
    async fn train_posts_run_request_with_default_limit() {
        let backend = MockBackend::start().await;
        let client = ApiClient::new(backend.base_url()).unwrap();

        let response = client.train(ADMIN_TOKEN, "BTCUSDT", "1h").await.unwrap();

        let calls = backend.calls();
        assert_eq!(calls[0].path, "/train");
        assert_eq!(
            calls[0].body,
            Some(json!({ "symbol": "BTCUSDT", "interval": "1h", "limit": 500 }))
        );
        assert_eq!(response["status"], "trained");
    }

    #[tokio::test]
    async fn health_hits_health_endpoint() {
        let backend = MockBackend::start().await;
        let client = ApiClient::new(&format!("{}/", backend.base_url())).unwrap();

        let response = client.health().await.unwrap();

        assert_eq!(backend.calls()[0].path, "/health");
        assert_eq!(response, json!({ "status": "ok" }));
    }
}
