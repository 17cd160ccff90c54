use analysis::protocol::decode_response_with_status;
use analysis::{AnalysisResult, AnalysisService, TransportError};
use geoview::BoundingBox;
use gloo_net::http::Request;

/// Posts the bounding box with the browser's fetch.
#[derive(Debug, Clone)]
pub struct GlooAnalysisClient {
    endpoint: String,
}

impl GlooAnalysisClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl AnalysisService for GlooAnalysisClient {
    async fn describe(&self, bbox: &BoundingBox) -> Result<AnalysisResult, TransportError> {
        let response = Request::post(&self.endpoint)
            .json(bbox)
            .map_err(|e| TransportError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        let status = response.status();
        let body = response
            .binary()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        decode_response_with_status(status, &body)
    }
}
