//! HTTP report source backed by the upstream REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tally_core::reports::ReportKind;
use tally_shared::config::HttpSourceConfig;
use tally_shared::types::ReportPeriod;
use tracing::{debug, warn};

use crate::error::SourceError;
use crate::payload::ReportPayload;
use crate::source::ReportSource;

/// Fetches `GET {base_url}/reports/{kind}?from_date=..&to_date=..`.
#[derive(Debug, Clone)]
pub struct HttpReportSource {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpReportSource {
    /// Creates a source from its configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &HttpSourceConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|t| !t.trim().is_empty()),
        })
    }

    /// URL of the report endpoint for `kind`.
    #[must_use]
    pub fn endpoint(&self, kind: ReportKind) -> String {
        format!("{}/reports/{}", self.base_url, kind.slug())
    }
}

#[async_trait]
impl ReportSource for HttpReportSource {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(
        &self,
        kind: ReportKind,
        period: ReportPeriod,
    ) -> Result<ReportPayload, SourceError> {
        let url = self.endpoint(kind);
        debug!(%url, ?period, "Fetching report payload");

        let mut request = self.client.get(&url).query(&period.query_pairs());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Upstream rejected report request");
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let payload: ReportPayload = serde_json::from_slice(&body)?;
        debug!(
            %url,
            rows = payload.rows.len(),
            groups = payload.groups.len(),
            "Received report payload"
        );
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str, token: Option<&str>) -> HttpSourceConfig {
        HttpSourceConfig {
            base_url: base_url.to_string(),
            token: token.map(str::to_string),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let source = HttpReportSource::new(&config("https://erp.example.edu/api/", None)).unwrap();
        assert_eq!(
            source.endpoint(ReportKind::TrialBalance),
            "https://erp.example.edu/api/reports/trial-balance"
        );
    }

    #[test]
    fn test_blank_token_is_not_sent() {
        let source = HttpReportSource::new(&config("http://localhost", Some("  "))).unwrap();
        assert!(source.token.is_none());
        assert_eq!(source.name(), "http");
    }
}
