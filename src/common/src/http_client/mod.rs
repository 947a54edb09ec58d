use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;

pub async fn send_http_body(
    client: &Client,
    url: &str,
    request_body: &Value,
    timeout_duration: Option<Duration>,
) -> Result<(u16, String)> {
    let mut request = client
        .post(url)
        .header("Content-Type", "application/json")
        .json(request_body);

    if let Some(timeout_duration) = timeout_duration {
        request = request.timeout(timeout_duration)
    }

    let response = request.send().await.context("Failed to send request body")?;

    let status = response.status();
    let response_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    Ok((status.as_u16(), response_text))
}
