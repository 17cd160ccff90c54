//! Region analysis requests: wire protocol, outcomes, UI ports and the
//! controller that ties a map viewport to the describe service.

pub mod controller;
pub mod error;
pub mod outcome;
pub mod protocol;
pub mod service;
pub mod ui;

#[cfg(not(target_arch = "wasm32"))]
pub mod http;

pub use controller::{AnalysisRequestController, ControllerConfig, TriggerOutcome};
pub use error::{InitError, RenderError, TransportError};
pub use outcome::{AnalysisResult, GENERIC_FAILURE_MESSAGE, OutcomeKind};
pub use protocol::{DESCRIBE_PATH, DescribeRequest, DescribeResponse, decode_response};
pub use service::AnalysisService;
pub use ui::{BusyIndicator, ResultsPanel, TriggerControl, UiHandles, UiState};

#[cfg(not(target_arch = "wasm32"))]
pub use http::HttpAnalysisClient;
