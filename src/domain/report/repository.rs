use async_trait::async_trait;

use super::{NewReport, Report};
use crate::domain::DomainResult;

#[async_trait]
pub trait ReportRepositoryInterface: Send + Sync {
    /// All reports in insertion (id) order.
    async fn list_reports(&self) -> DomainResult<Vec<Report>>;
    async fn create_report(&self, report: NewReport) -> DomainResult<Report>;
}
