//! Per-screen report session.
//!
//! `Idle -> Loading -> Ready <-> Filtered`, with `NoData` when the upstream
//! fetch fails. Every transition that produces a view re-derives it from the
//! stored input snapshot.

use serde::{Deserialize, Serialize};
use tally_shared::types::ReportPeriod;
use tracing::{debug, info};

use super::input::ReportInput;
use super::kind::ReportKind;
use super::service::ReportService;
use super::types::{ReportView, ViewParams};

/// Lifecycle state of a report screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No period requested yet.
    Idle,
    /// Waiting for the upstream payload of the current period.
    Loading,
    /// View derived with no text query.
    Ready,
    /// View derived under a text query.
    Filtered,
    /// Upstream fetch failed; nothing to show.
    NoData,
}

/// Serializable picture of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Report kind.
    pub kind: ReportKind,
    /// Current state.
    pub state: SessionState,
    /// Requested period.
    pub period: Option<ReportPeriod>,
    /// Why there is no data, when `state` is `NoData`.
    pub reason: Option<String>,
    /// Current view, when `state` is `Ready` or `Filtered`.
    pub view: Option<ReportView>,
}

/// State for one report screen.
#[derive(Debug, Clone)]
pub struct ReportSession {
    kind: ReportKind,
    state: SessionState,
    period: Option<ReportPeriod>,
    params: ViewParams,
    input: Option<ReportInput>,
    view: Option<ReportView>,
    reason: Option<String>,
}

impl ReportSession {
    /// Creates an idle session.
    #[must_use]
    pub fn new(kind: ReportKind, params: ViewParams) -> Self {
        Self {
            kind,
            state: SessionState::Idle,
            period: None,
            params,
            input: None,
            view: None,
            reason: None,
        }
    }

    /// Report kind.
    #[must_use]
    pub const fn kind(&self) -> ReportKind {
        self.kind
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Requested period.
    #[must_use]
    pub const fn period(&self) -> Option<ReportPeriod> {
        self.period
    }

    /// Current view parameters.
    #[must_use]
    pub fn params(&self) -> &ViewParams {
        &self.params
    }

    /// Current view, if one has been derived.
    #[must_use]
    pub fn view(&self) -> Option<&ReportView> {
        self.view.as_ref()
    }

    /// Requests a new period. Drops the previous snapshot and view.
    pub fn request(&mut self, period: ReportPeriod) {
        debug!(report = %self.kind, ?period, "Requesting report");
        self.period = Some(period);
        self.input = None;
        self.view = None;
        self.reason = None;
        self.state = SessionState::Loading;
    }

    /// Accepts the payload for `period`. Returns false, changing nothing,
    /// if `period` is not the one currently requested.
    pub fn receive(&mut self, period: ReportPeriod, input: ReportInput) -> bool {
        if self.period != Some(period) {
            info!(report = %self.kind, ?period, "Discarding stale report payload");
            return false;
        }
        self.input = Some(input);
        self.reason = None;
        self.rederive();
        true
    }

    /// Marks the fetch for `period` as failed. Stale failures are ignored.
    pub fn fail(&mut self, period: ReportPeriod, reason: impl Into<String>) -> bool {
        if self.period != Some(period) {
            return false;
        }
        self.input = None;
        self.view = None;
        self.reason = Some(reason.into());
        self.state = SessionState::NoData;
        true
    }

    /// Sets the free-text query and re-derives.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.params.query = query.into();
        self.rederive();
    }

    /// Toggles zero-row visibility and re-derives.
    pub fn set_include_zero(&mut self, include_zero: bool) {
        self.params.include_zero = include_zero;
        self.rederive();
    }

    /// Serializable snapshot of the session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            kind: self.kind,
            state: self.state,
            period: self.period,
            reason: self.reason.clone(),
            view: self.view.clone(),
        }
    }

    fn rederive(&mut self) {
        let Some(input) = self.input.as_ref() else {
            return;
        };
        let view = ReportService::generate(self.kind, input, &self.params);
        self.state = if self.params.filter().has_query() {
            SessionState::Filtered
        } else {
            SessionState::Ready
        };
        self.view = Some(view);
    }
}
