//! Orchestrates one analysis request per user trigger and keeps the UI in
//! step with it.
//!
//! State machine:
//! - `Idle -> Busy` on trigger: clear results, show the busy indicator,
//!   disable the trigger control, snapshot the viewport, dispatch.
//! - `Busy -> Idle` when the request settles: render exactly one message,
//!   then hide the indicator and re-enable the control.
//!
//! The disabled control is the user-visible concurrency guard. While `Busy`,
//! further triggers are ignored, so at most one request is in flight. Leaving
//! `Busy` is tied to a drop guard and happens on every exit path, even when
//! rendering fails or the request future is dropped.

use std::cell::Cell;

use geoview::{BoundingBox, MapWidget, ViewportSelector};
use tracing::{debug, error, info};

use crate::error::TransportError;
use crate::outcome::{AnalysisResult, GENERIC_FAILURE_MESSAGE, OutcomeKind};
use crate::service::AnalysisService;
use crate::ui::{BusyIndicator, ResultsPanel, TriggerControl, UiHandles, UiState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Shown for transport failures in place of the underlying error.
    pub failure_message: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            failure_message: GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A request ran to completion and its outcome was rendered.
    Completed(OutcomeKind),
    /// Rejected because a request was already in flight or the control was
    /// disabled.
    Ignored,
}

pub struct AnalysisRequestController<W, S, T, R, B> {
    selector: ViewportSelector<W>,
    service: S,
    ui: UiHandles<T, R, B>,
    state: Cell<UiState>,
    config: ControllerConfig,
}

impl<W, S, T, R, B> AnalysisRequestController<W, S, T, R, B>
where
    W: MapWidget,
    S: AnalysisService,
    T: TriggerControl,
    R: ResultsPanel,
    B: BusyIndicator,
{
    /// Takes ownership of the widget, service and UI handles and puts the UI
    /// into `Idle`. The results panel is left untouched.
    pub fn new(
        selector: ViewportSelector<W>,
        service: S,
        ui: UiHandles<T, R, B>,
        config: ControllerConfig,
    ) -> Self {
        ui.busy.hide();
        ui.trigger.set_enabled(true);
        Self {
            selector,
            service,
            ui,
            state: Cell::new(UiState::Idle),
            config,
        }
    }

    pub fn state(&self) -> UiState {
        self.state.get()
    }

    pub fn ui(&self) -> &UiHandles<T, R, B> {
        &self.ui
    }

    /// Runs one request for the current viewport.
    pub async fn trigger(&self) -> TriggerOutcome {
        let Some(_busy) = self.enter_busy() else {
            debug!("trigger ignored while a request is in flight");
            return TriggerOutcome::Ignored;
        };

        let result = match self.selector.current_bounding_box() {
            Ok(bbox) => self.request(&bbox).await,
            Err(err) => {
                let err = TransportError::from(err);
                error!(error = %err, "could not read the map viewport");
                self.transport_failure()
            }
        };

        let kind = result.kind();
        if let Err(err) = self.ui.results.render(&result.display_text()) {
            error!(error = %err, "failed to render analysis outcome");
        }
        TriggerOutcome::Completed(kind)
    }

    async fn request(&self, bbox: &BoundingBox) -> AnalysisResult {
        debug!(
            north = bbox.north(),
            south = bbox.south(),
            east = bbox.east(),
            west = bbox.west(),
            "dispatching analysis request"
        );
        let result = self.service.describe(bbox).await.unwrap_or_else(|err| {
            error!(error = %err, "analysis request failed");
            self.transport_failure()
        });
        info!(
            north = bbox.north(),
            south = bbox.south(),
            east = bbox.east(),
            west = bbox.west(),
            outcome = ?result.kind(),
            "analysis request settled"
        );
        result
    }

    fn transport_failure(&self) -> AnalysisResult {
        AnalysisResult::transport_error(self.config.failure_message.clone())
    }

    fn enter_busy(&self) -> Option<BusyGuard<'_, T, B>> {
        if self.state.get() == UiState::Busy || !self.ui.trigger.is_enabled() {
            return None;
        }
        self.state.set(UiState::Busy);
        self.ui.results.clear();
        self.ui.busy.show();
        self.ui.trigger.set_enabled(false);
        Some(BusyGuard {
            trigger: &self.ui.trigger,
            busy: &self.ui.busy,
            state: &self.state,
        })
    }
}

/// Returns the UI to `Idle` when dropped.
struct BusyGuard<'a, T: TriggerControl, B: BusyIndicator> {
    trigger: &'a T,
    busy: &'a B,
    state: &'a Cell<UiState>,
}

impl<T: TriggerControl, B: BusyIndicator> Drop for BusyGuard<'_, T, B> {
    fn drop(&mut self) {
        self.busy.hide();
        self.trigger.set_enabled(true);
        self.state.set(UiState::Idle);
    }
}
