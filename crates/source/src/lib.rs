//! Upstream report sources.
//!
//! This crate provides:
//! - The upstream payload shape and its mapping into engine records
//! - The `ReportSource` abstraction the API layer fetches through
//! - HTTP and fixture-directory implementations

pub mod error;
pub mod fixture;
pub mod http;
pub mod mapping;
pub mod payload;
pub mod source;

use std::sync::Arc;

pub use error::SourceError;
pub use fixture::FixtureReportSource;
pub use http::HttpReportSource;
pub use mapping::to_input;
pub use payload::ReportPayload;
pub use source::ReportSource;

use tally_shared::config::SourceConfig;

/// Builds the source described by `config`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn from_config(config: &SourceConfig) -> Result<Arc<dyn ReportSource>, SourceError> {
    let source: Arc<dyn ReportSource> = match config {
        SourceConfig::Http(http) => Arc::new(HttpReportSource::new(http)?),
        SourceConfig::Fixtures(fixtures) => Arc::new(FixtureReportSource::new(&fixtures.dir)),
    };
    Ok(source)
}
