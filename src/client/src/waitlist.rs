use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use beacon_common::constants::WAITLIST_PATH;
use beacon_common::http_client::send_http_body;

pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";
const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit to waitlist";
const SUBMIT_RETRY_MESSAGE: &str = "Failed to submit to waitlist. Please try again.";

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WaitlistResponse {
    pub message: Option<String>,
    pub error: Option<String>,
}

/// Checks the shape of an email address before it goes anywhere near the
/// network. Placeholder addresses containing "noemail" are rejected
/// outright.
pub fn validate_email(email: &str) -> bool {
    if email.trim().is_empty() {
        return false;
    }
    if !email.contains('@') {
        return false;
    }
    if !email.contains('.') {
        return false;
    }
    if email.to_lowercase().contains("noemail") {
        return false;
    }
    EMAIL_PATTERN.is_match(email)
}

pub struct WaitlistClient {
    endpoint: String,
    client: Client,
}

impl WaitlistClient {
    pub fn new(base_url: &str) -> Self {
        WaitlistClient {
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), WAITLIST_PATH),
            client: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submits an email to the waitlist. A non-success status fails with
    /// the server-supplied error message when one is present; network and
    /// parse failures are logged and propagated.
    pub async fn submit(&self, email: &str) -> Result<WaitlistResponse> {
        let body = json!({ "email": email });

        let (status, text) = send_http_body(&self.client, &self.endpoint, &body, None)
            .await
            .inspect_err(|err| error!("error submitting to waitlist: {:#}", err))?;

        let response: WaitlistResponse = serde_json::from_str(&text)
            .context("failed to parse waitlist response")
            .inspect_err(|err| error!("error submitting to waitlist: {:#}", err))?;

        if !(200..300).contains(&status) {
            return Err(anyhow!(response
                .error
                .unwrap_or_else(|| SUBMIT_FAILED_MESSAGE.to_string())));
        }

        Ok(response)
    }

    /// Validates first, then submits. Outcomes only ever reach the caller
    /// through the callbacks; an invalid address performs no network call.
    pub async fn handle_submission(
        &self,
        email: &str,
        on_success: impl FnOnce(&str),
        on_error: impl FnOnce(&str),
    ) {
        if !validate_email(email) {
            on_error(INVALID_EMAIL_MESSAGE);
            return;
        }

        match self.submit(email).await {
            Ok(response) => on_success(response.message.as_deref().unwrap_or_default()),
            Err(err) => {
                let message = err.to_string();
                if message.is_empty() {
                    on_error(SUBMIT_RETRY_MESSAGE);
                } else {
                    on_error(&message);
                }
            }
        }
    }
}
