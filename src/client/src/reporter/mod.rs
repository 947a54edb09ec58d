pub mod fetch;

use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::runtime::Handle;
use tracing::error;

use crate::config_manager::Config;
use crate::context::{browser_snapshot, network_snapshot, Environment};
use crate::exporters::report_forward::ReportForward;
use crate::exporters::report_writer::{ReportWriter, ReportWriterEnum};
use beacon_common::types::event::{ErrorReport, ErrorType};

/// An uncaught failure surfaced by the host: a panic, an aborted task, or
/// anything else with a message and maybe a stack.
#[derive(Debug, Clone)]
pub struct UncaughtEvent {
    pub message: String,
    pub stack: Option<String>,
}

/// The reason attached to an unhandled async rejection.
#[derive(Debug, Clone)]
pub enum RejectionReason {
    Error {
        message: String,
        stack: Option<String>,
    },
    Value(Value),
}

impl RejectionReason {
    fn message(&self) -> String {
        match self {
            RejectionReason::Error { message, .. } => message.clone(),
            RejectionReason::Value(Value::String(text)) => text.clone(),
            RejectionReason::Value(value) => value.to_string(),
        }
    }

    fn stack(&self) -> String {
        match self {
            RejectionReason::Error { stack, .. } => stack.clone().unwrap_or_default(),
            RejectionReason::Value(_) => String::new(),
        }
    }
}

/// Capture client. One instance per host application, constructed at start
/// and passed around by handle; reporting is fire-and-forget and never
/// disturbs the code path that triggered it.
pub struct ErrorReporter {
    env: Arc<dyn Environment>,
    writer: ReportWriterEnum,
}

impl ErrorReporter {
    pub fn new(config: &Config, env: Arc<dyn Environment>) -> Self {
        let writer = ReportWriterEnum::Forward(ReportForward::new(
            &config.endpoint,
            config.request_timeout_ms,
        ));
        Self::with_writer(env, writer)
    }

    pub fn with_writer(env: Arc<dyn Environment>, writer: ReportWriterEnum) -> Self {
        ErrorReporter { env, writer }
    }

    pub fn writer(&self) -> &ReportWriterEnum {
        &self.writer
    }

    /// Reports an uncaught failure as a `javascript_error` event.
    pub async fn capture_uncaught(&self, event: &UncaughtEvent) {
        let report = self.build_report(
            ErrorType::UncaughtError,
            &event.message,
            event.stack.as_deref().unwrap_or_default(),
        );
        self.report(report).await;
    }

    /// Reports an unhandled rejection. Error-shaped reasons contribute
    /// their message and stack; anything else is reported by its string
    /// representation.
    pub async fn capture_rejection(&self, reason: &RejectionReason) {
        let report = self.build_report(
            ErrorType::UnhandledPromiseRejection,
            &reason.message(),
            &reason.stack(),
        );
        self.report(report).await;
    }

    /// Manual reporting with a caller-chosen tag. Extra fields are merged
    /// into the wire body, overriding same-named standard fields.
    pub async fn report_custom(
        &self,
        error_type: impl Into<String>,
        message: &str,
        extra: Map<String, Value>,
    ) {
        let report = self
            .build_report(ErrorType::Custom(error_type.into()), message, "")
            .with_extra(extra);
        self.report(report).await;
    }

    pub(crate) fn build_report(
        &self,
        error_type: ErrorType,
        message: &str,
        stack: &str,
    ) -> ErrorReport {
        ErrorReport {
            error_type,
            error_message: message.to_string(),
            error_stack: stack.to_string(),
            page_url: self.env.page_url(),
            browser_info: browser_snapshot(self.env.as_ref()),
            network_info: network_snapshot(self.env.as_ref()),
            extra: Map::new(),
        }
    }

    /// Single transmission attempt. Transport failure ends here: logged,
    /// swallowed, never surfaced to the triggering path.
    pub(crate) async fn report(&self, report: ErrorReport) {
        if let Err(err) = self.writer.submit(&report).await {
            error!("failed to report {} event: {:#}", report.error_type, err);
        }
    }
}

/// Wraps the current panic hook so panics are captured as uncaught events
/// before the previous hook runs. Install once per process; installing
/// twice reports every panic twice.
pub fn install_panic_hook(reporter: Arc<ErrorReporter>, handle: Handle) {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let event = UncaughtEvent {
            message: panic_message(info),
            stack: Some(std::backtrace::Backtrace::force_capture().to_string()),
        };
        let reporter = reporter.clone();
        handle.spawn(async move {
            reporter.capture_uncaught(&event).await;
        });
        previous(info);
    }));
}

fn panic_message(info: &std::panic::PanicHookInfo<'_>) -> String {
    if let Some(text) = info.payload().downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = info.payload().downcast_ref::<String>() {
        text.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}
