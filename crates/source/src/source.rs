//! The upstream collaborator every report view is fed from.

use async_trait::async_trait;
use tally_core::reports::{ReportInput, ReportKind};
use tally_shared::types::ReportPeriod;

use crate::error::SourceError;
use crate::mapping::to_input;
use crate::payload::ReportPayload;

/// Something that can hand out report payloads for a period.
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Fetches the raw payload for `kind` over `period`.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be fetched or decoded.
    async fn fetch(
        &self,
        kind: ReportKind,
        period: ReportPeriod,
    ) -> Result<ReportPayload, SourceError>;

    /// Fetches the payload and maps it into engine input.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be fetched or decoded.
    async fn fetch_input(
        &self,
        kind: ReportKind,
        period: ReportPeriod,
    ) -> Result<ReportInput, SourceError> {
        let payload = self.fetch(kind, period).await?;
        Ok(to_input(kind, payload))
    }
}
