use anyhow::Result;
use tokio::sync::Mutex;

use crate::exporters::report_forward::ReportForward;
use beacon_common::types::event::ErrorReport;

pub enum ReportWriterEnum {
    Forward(ReportForward),
    Memory(MemoryWriter),
}

#[allow(async_fn_in_trait)]
pub trait ReportWriter {
    async fn submit(&self, report: &ErrorReport) -> Result<()>;
}

impl ReportWriter for ReportWriterEnum {
    async fn submit(&self, report: &ErrorReport) -> Result<()> {
        match self {
            ReportWriterEnum::Forward(writer) => writer.submit(report).await,
            ReportWriterEnum::Memory(writer) => writer.submit(report).await,
        }
    }
}

impl ReportWriterEnum {
    pub fn variant_name(&self) -> &'static str {
        match self {
            ReportWriterEnum::Forward(_) => "ReportForward",
            ReportWriterEnum::Memory(_) => "MemoryWriter",
        }
    }
}

/// In-process sink. Keeps every submitted report for inspection instead of
/// sending it anywhere.
#[derive(Default)]
pub struct MemoryWriter {
    reports: Mutex<Vec<ErrorReport>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn drain(&self) -> Vec<ErrorReport> {
        std::mem::take(&mut *self.reports.lock().await)
    }

    pub async fn len(&self) -> usize {
        self.reports.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.reports.lock().await.is_empty()
    }
}

impl ReportWriter for MemoryWriter {
    async fn submit(&self, report: &ErrorReport) -> Result<()> {
        self.reports.lock().await.push(report.clone());
        Ok(())
    }
}
