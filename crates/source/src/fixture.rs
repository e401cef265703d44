//! Fixture report source: one JSON payload per report kind in a directory.
//!
//! The period is ignored; every request for a kind returns `{dir}/{kind}.json`.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tally_core::reports::ReportKind;
use tally_shared::types::ReportPeriod;
use tracing::debug;

use crate::error::SourceError;
use crate::payload::ReportPayload;
use crate::source::ReportSource;

/// Reads payloads from a fixture directory.
#[derive(Debug, Clone)]
pub struct FixtureReportSource {
    dir: PathBuf,
}

impl FixtureReportSource {
    /// Creates a source over `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the fixture for `kind`.
    #[must_use]
    pub fn path_for(&self, kind: ReportKind) -> PathBuf {
        self.dir.join(format!("{}.json", kind.slug()))
    }
}

#[async_trait]
impl ReportSource for FixtureReportSource {
    fn name(&self) -> &'static str {
        "fixtures"
    }

    async fn fetch(
        &self,
        kind: ReportKind,
        period: ReportPeriod,
    ) -> Result<ReportPayload, SourceError> {
        let path = self.path_for(kind);
        debug!(path = %path.display(), ?period, "Reading report fixture");

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(SourceError::NotFound(path.display().to_string()));
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }
}
