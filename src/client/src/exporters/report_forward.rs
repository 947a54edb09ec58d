use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use tracing::{debug, error};

use crate::exporters::report_writer::ReportWriter;
use beacon_common::constants::ERROR_REPORT_PATH;
use beacon_common::http_client::send_http_body;
use beacon_common::types::event::ErrorReport;

/// Best-effort POST of one report to the reporting endpoint. No retry, no
/// queueing; a report is dropped after its single attempt.
pub struct ReportForward {
    endpoint: String,
    timeout: Duration,
    client: Client,
}

impl ReportForward {
    pub fn new(base_url: &str, timeout_ms: u64) -> Self {
        ReportForward {
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), ERROR_REPORT_PATH),
            timeout: Duration::from_millis(timeout_ms),
            client: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ReportWriter for ReportForward {
    async fn submit(&self, report: &ErrorReport) -> Result<()> {
        let payload = report.payload()?;
        let (status, body) =
            send_http_body(&self.client, &self.endpoint, &payload, Some(self.timeout)).await?;

        if (200..300).contains(&status) {
            debug!("error report delivered to {}", self.endpoint);
        } else {
            error!(
                "error report endpoint {} returned {}: {}",
                self.endpoint, status, body
            );
        }

        Ok(())
    }
}
