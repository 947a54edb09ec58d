use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use beacon_client::config_manager::Config;
use beacon_client::context::HostEnvironment;
use beacon_client::ErrorReporter;
use beacon_common::constants::{ERROR_REPORT_PATH, WAITLIST_PATH};

pub const TAKEN_EMAIL: &str = "taken@example.com";

/// Everything the capture server has received, grouped by route.
#[derive(Clone, Default)]
pub struct Recorded {
    reports: Arc<Mutex<Vec<Value>>>,
    waitlist_requests: Arc<Mutex<Vec<Value>>>,
}

impl Recorded {
    pub async fn reports(&self) -> Vec<Value> {
        self.reports.lock().await.clone()
    }

    pub async fn report_count(&self) -> usize {
        self.reports.lock().await.len()
    }

    pub async fn waitlist_request_count(&self) -> usize {
        self.waitlist_requests.lock().await.len()
    }
}

/// Binds a local endpoint speaking the reporting and waitlist wire
/// contracts, plus two plain routes to drive the instrumented client
/// against. Returns the base URL and the recorded traffic.
pub async fn spawn_capture_server() -> (String, Recorded) {
    let recorded = Recorded::default();

    let app = Router::new()
        .route(ERROR_REPORT_PATH, post(record_report))
        .route(WAITLIST_PATH, post(waitlist))
        .route("/ok", get(ok))
        .route("/missing", get(missing))
        .with_state(recorded.clone());

    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("failed to bind capture server");
    let addr = listener.local_addr().expect("failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("capture server died");
    });

    (format!("http://{}", addr), recorded)
}

/// A base URL nothing listens on, for driving transport failures.
pub async fn refused_base_url() -> String {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("failed to bind throwaway listener");
    let addr = listener.local_addr().expect("failed to read local addr");
    drop(listener);
    format!("http://{}", addr)
}

pub fn test_config(base_url: &str) -> Config {
    Config {
        endpoint: base_url.to_string(),
        waitlist_endpoint: base_url.to_string(),
        request_timeout_ms: 2_000,
        config_sources: vec![],
    }
}

pub fn test_reporter(base_url: &str) -> ErrorReporter {
    let env = Arc::new(
        HostEnvironment::builder()
            .page_url("https://app.example.com/checkout")
            .user_agent("beacon/integration-tests")
            .language("en-US".to_string())
            .platform("Linux x86_64".to_string())
            .screen_size((1920, 1080))
            .viewport_size((1280, 720))
            .build(),
    );
    ErrorReporter::new(&test_config(base_url), env)
}

async fn record_report(State(recorded): State<Recorded>, Json(body): Json<Value>) -> StatusCode {
    recorded.reports.lock().await.push(body);
    StatusCode::OK
}

async fn waitlist(
    State(recorded): State<Recorded>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    recorded.waitlist_requests.lock().await.push(body.clone());

    match body.get("email").and_then(Value::as_str) {
        Some(TAKEN_EMAIL) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Email already on the waitlist" })),
        ),
        Some(_) => (StatusCode::OK, Json(json!({ "message": "You're on the list!" }))),
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "email is required" })),
        ),
    }
}

async fn ok() -> &'static str {
    "ok"
}

async fn missing() -> StatusCode {
    StatusCode::NOT_FOUND
}
