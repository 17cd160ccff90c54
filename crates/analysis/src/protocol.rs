//! Wire format of the describe endpoint.
//!
//! - Request: `POST /vision/describe` with a JSON bounding box
//!   (`north`, `south`, `east`, `west`).
//! - Response: JSON object carrying either `error` or `description`.

use geoview::BoundingBox;
use serde::{Deserialize, Serialize};

use crate::error::TransportError;
use crate::outcome::AnalysisResult;

pub const DESCRIBE_PATH: &str = "/vision/describe";

/// Request body. The bounding box serializes to exactly the four edge fields.
pub type DescribeRequest = BoundingBox;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribeResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DescribeResponse {
    pub fn description(text: impl Into<String>) -> Self {
        Self {
            description: Some(text.into()),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            description: None,
            error: Some(message.into()),
        }
    }

    /// A non-empty `error` wins over `description`; a body with neither is
    /// not a usable response.
    pub fn into_result(self) -> Result<AnalysisResult, TransportError> {
        match (self.error, self.description) {
            (Some(message), _) if !message.is_empty() => {
                Ok(AnalysisResult::ApplicationError { message })
            }
            (_, Some(text)) => Ok(AnalysisResult::Description { text }),
            _ => Err(TransportError::MalformedPayload),
        }
    }
}

impl From<&AnalysisResult> for DescribeResponse {
    fn from(result: &AnalysisResult) -> Self {
        match result {
            AnalysisResult::Description { text } => Self::description(text.clone()),
            AnalysisResult::ApplicationError { message }
            | AnalysisResult::TransportError { message } => Self::error(message.clone()),
        }
    }
}

/// Only a JSON object is a response; arrays and scalars are malformed even
/// when their elements line up with the response fields.
pub fn decode_response(body: &[u8]) -> Result<AnalysisResult, TransportError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| TransportError::Decode(e.to_string()))?;
    if !value.is_object() {
        return Err(TransportError::MalformedPayload);
    }
    serde_json::from_value::<DescribeResponse>(value)
        .map_err(|e| TransportError::Decode(e.to_string()))?
        .into_result()
}

/// Decodes a response regardless of its status code. Services report handled
/// errors in the body, so the status only shapes the diagnostic when the body
/// turns out to be unusable.
pub fn decode_response_with_status(
    status: u16,
    body: &[u8],
) -> Result<AnalysisResult, TransportError> {
    decode_response(body).map_err(|err| {
        if (200..300).contains(&status) {
            err
        } else {
            TransportError::Status {
                status,
                detail: err.to_string(),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn description_body() {
        let r = decode_response(br#"{"description":"A river delta."}"#).unwrap();
        assert_eq!(r, AnalysisResult::description("A river delta."));
    }

    #[test]
    fn error_body_wins_over_description() {
        let r = decode_response(br#"{"error":"Region too large.","description":"ignored"}"#)
            .unwrap();
        assert_eq!(r, AnalysisResult::application_error("Region too large."));
    }

    #[test]
    fn empty_or_null_error_falls_back_to_description() {
        let r = decode_response(br#"{"error":"","description":"Fields."}"#).unwrap();
        assert_eq!(r, AnalysisResult::description("Fields."));
        let r = decode_response(br#"{"error":null,"description":"Fields."}"#).unwrap();
        assert_eq!(r, AnalysisResult::description("Fields."));
    }

    #[test]
    fn neither_field_is_malformed() {
        let err = decode_response(br#"{"detail":"validation"}"#).unwrap_err();
        assert!(matches!(err, TransportError::MalformedPayload));
    }

    #[test]
    fn non_object_json_is_malformed() {
        for body in [
            &br#"["A river delta."]"#[..],
            br#"[null,"Region too large."]"#,
            br#""A river delta.""#,
            b"null",
            b"42",
        ] {
            let err = decode_response(body).unwrap_err();
            assert!(
                matches!(err, TransportError::MalformedPayload),
                "{}: {err:?}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn wrongly_typed_field_is_decode_error() {
        let err = decode_response(br#"{"description":7}"#).unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[test]
    fn non_json_is_decode_error() {
        let err = decode_response(b"<html>502</html>").unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[test]
    fn status_only_matters_when_body_is_unusable() {
        let r = decode_response_with_status(500, br#"{"error":"boom"}"#).unwrap();
        assert_eq!(r, AnalysisResult::application_error("boom"));

        let err = decode_response_with_status(502, b"bad gateway").unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 502, .. }));
    }

    #[test]
    fn response_serialization_omits_absent_fields() {
        let json = serde_json::to_string(&DescribeResponse::error("nope")).unwrap();
        assert_eq!(json, r#"{"error":"nope"}"#);
    }
}
