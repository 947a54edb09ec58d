use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::context::{BrowserInfo, NetworkInfo};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    #[serde(rename = "javascript_error")]
    UncaughtError,
    UnhandledPromiseRejection,
    FetchError,
    FetchException,
    #[serde(untagged)]
    Custom(String),
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorType::UncaughtError => write!(f, "javascript_error"),
            ErrorType::UnhandledPromiseRejection => write!(f, "unhandled_promise_rejection"),
            ErrorType::FetchError => write!(f, "fetch_error"),
            ErrorType::FetchException => write!(f, "fetch_exception"),
            ErrorType::Custom(tag) => write!(f, "{}", tag),
        }
    }
}

/// One diagnostic record per captured failure. Built fresh per event,
/// dropped right after the transmission attempt.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorReport {
    pub error_type: ErrorType,
    pub error_message: String,
    /// Empty string when no stack is available, never omitted.
    pub error_stack: String,
    pub page_url: String,
    pub browser_info: BrowserInfo,
    pub network_info: NetworkInfo,
    /// Caller-supplied fields merged into the wire body by [`Self::payload`].
    #[serde(skip)]
    pub extra: Map<String, Value>,
}

impl ErrorReport {
    pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra.extend(extra);
        self
    }

    /// The flat wire body: standard fields first, extra fields merged on
    /// top. A same-named extra field wins.
    pub fn payload(&self) -> Result<Value> {
        let mut body =
            serde_json::to_value(self).context("failed to serialize error report")?;
        let fields = body
            .as_object_mut()
            .ok_or_else(|| anyhow!("error report did not serialize to an object"))?;
        for (key, value) in &self.extra {
            fields.insert(key.clone(), value.clone());
        }
        Ok(body)
    }
}
