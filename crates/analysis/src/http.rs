//! Native HTTP client for the describe endpoint.

use geoview::BoundingBox;

use crate::error::TransportError;
use crate::outcome::AnalysisResult;
use crate::protocol::{DESCRIBE_PATH, decode_response_with_status};
use crate::service::AnalysisService;

#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    /// Service origin, e.g. `http://127.0.0.1:8000`.
    base_url: String,
    client: reqwest::Client,
}

impl HttpAnalysisClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            DESCRIBE_PATH.trim_start_matches('/')
        )
    }
}

impl AnalysisService for HttpAnalysisClient {
    async fn describe(&self, bbox: &BoundingBox) -> Result<AnalysisResult, TransportError> {
        let response = self
            .client
            .post(self.endpoint_url())
            .json(bbox)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        decode_response_with_status(status.as_u16(), &body)
    }
}
