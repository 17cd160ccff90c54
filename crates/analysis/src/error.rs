//! Error types for the analysis request flow.

use geoview::BoundsError;
use thiserror::Error;

/// Anything that stops a request from producing a usable response.
///
/// The detail is meant for diagnostics only; users see a generic message.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("viewport unavailable: {0}")]
    Viewport(#[from] BoundsError),

    #[error("request failed: {0}")]
    Request(String),

    #[error("service answered with status {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("response body is not valid JSON: {0}")]
    Decode(String),

    #[error("response carries neither `error` nor `description`")]
    MalformedPayload,
}

/// Fatal problems while wiring the controller to its page.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("required UI element `#{id}` is missing")]
    MissingElement { id: String },

    #[error("UI element `#{id}` is not a {expected}")]
    WrongElementType { id: String, expected: &'static str },

    #[error("map widget could not be created: {0}")]
    Map(String),

    #[error("host environment unavailable: {0}")]
    Environment(String),
}

/// Writing into the results area failed.
#[derive(Debug, Error)]
#[error("results could not be rendered: {0}")]
pub struct RenderError(pub String);
