/// Message shown for any failure the user cannot act on beyond retrying.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred. Please try again.";

/// Settled outcome of one analysis request. Built once per attempt and
/// consumed by rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisResult {
    Description { text: String },
    ApplicationError { message: String },
    TransportError { message: String },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Description,
    ApplicationError,
    TransportError,
}

impl AnalysisResult {
    pub fn description(text: impl Into<String>) -> Self {
        Self::Description { text: text.into() }
    }

    pub fn application_error(message: impl Into<String>) -> Self {
        Self::ApplicationError {
            message: message.into(),
        }
    }

    pub fn transport_error(message: impl Into<String>) -> Self {
        Self::TransportError {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Description { .. } => OutcomeKind::Description,
            Self::ApplicationError { .. } => OutcomeKind::ApplicationError,
            Self::TransportError { .. } => OutcomeKind::TransportError,
        }
    }

    /// The single line written into the results area.
    pub fn display_text(&self) -> String {
        match self {
            Self::Description { text } => text.clone(),
            Self::ApplicationError { message } => format!("Error: {message}"),
            Self::TransportError { message } => message.clone(),
        }
    }
}
