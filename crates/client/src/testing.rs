//! In-process stand-in for the analysis backend.
//!
//! Serves canned responses on `127.0.0.1:<ephemeral>` and records every
//! request it receives, so tests can assert on exactly what went over the
//! wire and in which order.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, task::JoinHandle};

pub const ADMIN_TOKEN: &str = "secret-token";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-password";

/// Symbol for which `/analyze` and `/predict` answer with a plain-text 500.
pub const BROKEN_SYMBOL: &str = "BROKEN";

const KNOWN_SYMBOLS: [&str; 4] = ["BTCUSDT", "BTCBUSD", "ETHUSDT", "SOLUSDT"];
const SLOW_CALL_DELAY: Duration = Duration::from_millis(25);

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallEvent {
    Started(String),
    Finished(String),
}

#[derive(Debug, Clone, Default)]
struct Recorder {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    events: Arc<Mutex<Vec<CallEvent>>>,
}

impl Recorder {
    fn record(&self, call: RecordedCall) {
        self.push_event(CallEvent::Started(call.path.clone()));
        self.calls
            .lock()
            .expect("recorder lock poisoned")
            .push(call);
    }

    fn push_event(&self, event: CallEvent) {
        self.events
            .lock()
            .expect("recorder lock poisoned")
            .push(event);
    }
}

pub fn analysis_fixture() -> Value {
    json!({
        "signals": { "trend": "up" },
        "indicators": [
            { "open_time": 1, "close": 100, "composite_score": 0.5 }
        ]
    })
}

pub struct MockBackend {
    base_url: String,
    recorder: Recorder,
    server: JoinHandle<()>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("mock backend should bind");
        let addr = listener
            .local_addr()
            .expect("mock backend should have a local addr");
        let recorder = Recorder::default();
        let app = Router::new()
            .fallback(respond)
            .with_state(recorder.clone());
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{addr}"),
            recorder,
            server,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.recorder
            .calls
            .lock()
            .expect("recorder lock poisoned")
            .clone()
    }

    pub fn events(&self) -> Vec<CallEvent> {
        self.recorder
            .events
            .lock()
            .expect("recorder lock poisoned")
            .clone()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// A base url nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("probe listener should bind");
    let addr = listener
        .local_addr()
        .expect("probe listener should have a local addr");
    drop(listener);
    format!("http://{addr}")
}

async fn respond(
    State(recorder): State<Recorder>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_owned();
    let params = Query::<HashMap<String, String>>::try_from_uri(&uri)
        .map(|Query(params)| params)
        .unwrap_or_default();
    let authorization = header_value(&headers, header::AUTHORIZATION);
    let body = if body.is_empty() {
        None
    } else {
        serde_json::from_slice::<Value>(&body).ok()
    };

    recorder.record(RecordedCall {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_owned),
        authorization: authorization.clone(),
        content_type: header_value(&headers, header::CONTENT_TYPE),
        body: body.clone(),
    });

    let response = route(&method, &path, &params, authorization.as_deref(), body).await;
    recorder.push_event(CallEvent::Finished(path));
    response
}

async fn route(
    method: &Method,
    path: &str,
    params: &HashMap<String, String>,
    authorization: Option<&str>,
    body: Option<Value>,
) -> Response {
    let param = |key: &str| params.get(key).cloned().unwrap_or_default();
    let admin = authorization == Some(format!("Bearer {ADMIN_TOKEN}").as_str());

    match (method.as_str(), path) {
        ("GET", "/health") => Json(json!({ "status": "ok" })).into_response(),
        ("GET", "/symbols") => {
            let query = param("query").to_uppercase();
            let found: Vec<&str> = KNOWN_SYMBOLS
                .into_iter()
                .filter(|symbol| symbol.contains(query.as_str()))
                .collect();
            Json(json!(found)).into_response()
        }
        ("GET", "/analyze" | "/predict") if param("symbol") == BROKEN_SYMBOL => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
        ("GET", "/analyze") => {
            tokio::time::sleep(SLOW_CALL_DELAY).await;
            Json(analysis_fixture()).into_response()
        }
        ("GET", "/predict") => {
            tokio::time::sleep(SLOW_CALL_DELAY).await;
            Json(json!({
                "symbol": param("symbol"),
                "interval": param("interval"),
                "direction": "up",
                "probability": 0.61,
            }))
            .into_response()
        }
        ("POST", "/backtest") => Json(json!({
            "total_return": 0.12,
            "trades": 4,
            "request": body,
        }))
        .into_response(),
        ("POST", "/auth/token") => {
            let body = body.unwrap_or(Value::Null);
            if body["username"] == ADMIN_USERNAME && body["password"] == ADMIN_PASSWORD {
                Json(json!({ "access_token": ADMIN_TOKEN, "token_type": "bearer" }))
                    .into_response()
            } else {
                detail(StatusCode::UNAUTHORIZED, "Bad credentials")
            }
        }
        ("GET" | "PUT", "/config") | ("POST", "/config/reset" | "/train") if !admin => {
            detail(StatusCode::UNAUTHORIZED, "Invalid token")
        }
        ("GET", "/config") => Json(json!({
            "weights": { "price": 0.4, "technical": 0.3, "sentiment": 0.3 },
            "market": { "default_interval": "1h" },
        }))
        .into_response(),
        ("PUT", "/config") => Json(json!({ "status": "updated" })).into_response(),
        ("POST", "/config/reset") => Json(json!({ "status": "reset" })).into_response(),
        ("POST", "/train") => {
            let body = body.unwrap_or(Value::Null);
            Json(json!({
                "status": "trained",
                "symbol": body["symbol"],
                "interval": body["interval"],
            }))
            .into_response()
        }
        _ => detail(StatusCode::NOT_FOUND, "Not Found"),
    }
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}
