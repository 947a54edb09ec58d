use std::sync::Arc;

use reqwest::{Client, Request, Response};
use serde::Serialize;
use serde_json::{json, Map};

use super::ErrorReporter;
use beacon_common::types::event::ErrorType;

/// Decorator over [`reqwest::Client`] that reports failed requests.
/// Callers opt in by routing requests through it; what they observe is
/// exactly what the inner client produced.
pub struct InstrumentedClient {
    inner: Client,
    reporter: Arc<ErrorReporter>,
}

impl InstrumentedClient {
    pub fn new(reporter: Arc<ErrorReporter>) -> Self {
        Self::with_client(Client::new(), reporter)
    }

    pub fn with_client(inner: Client, reporter: Arc<ErrorReporter>) -> Self {
        InstrumentedClient { inner, reporter }
    }

    /// Forwards the request to the inner client. A non-2xx response emits a
    /// `fetch_error` report and is still returned unmodified; a transport
    /// error emits a `fetch_exception` report and is returned unchanged so
    /// the caller's error handling sees the failure it would have seen
    /// without instrumentation.
    pub async fn execute(&self, request: Request) -> reqwest::Result<Response> {
        let request_url = request.url().to_string();

        match self.inner.execute(request).await {
            Ok(response) => {
                if !response.status().is_success() {
                    let status = response.status();
                    let message = format!(
                        "HTTP {}: {}",
                        status.as_u16(),
                        status.canonical_reason().unwrap_or_default()
                    );

                    let mut extra = Map::new();
                    extra.insert("request_url".to_string(), json!(request_url));
                    extra.insert("response_status".to_string(), json!(status.as_u16()));

                    let report = self
                        .reporter
                        .build_report(ErrorType::FetchError, &message, "")
                        .with_extra(extra);
                    self.reporter.report(report).await;
                }
                Ok(response)
            }
            Err(err) => {
                let mut extra = Map::new();
                extra.insert("request_url".to_string(), json!(request_url));

                let report = self
                    .reporter
                    .build_report(ErrorType::FetchException, &err.to_string(), "")
                    .with_extra(extra);
                self.reporter.report(report).await;

                Err(err)
            }
        }
    }

    pub async fn get(&self, url: &str) -> reqwest::Result<Response> {
        let request = self.inner.get(url).build()?;
        self.execute(request).await
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> reqwest::Result<Response> {
        let request = self.inner.post(url).json(body).build()?;
        self.execute(request).await
    }
}
