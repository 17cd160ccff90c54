use std::path::Path;

use analysis::{AnalysisService, DESCRIBE_PATH, DescribeResponse, HttpAnalysisClient};
use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use geoview::BoundingBox;
use serde_json::json;
use tower_http::services::{ServeDir, ServeFile};
use tracing::{error, warn};

pub const SERVICE_NAME: &str = "region-describe-gateway";

#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// `None` when no analysis service is configured.
    pub upstream: Option<HttpAnalysisClient>,
}

/// `/` and `/static` are served from `static_root`.
pub fn router(state: AppState, static_root: &Path) -> Router {
    Router::new()
        .route_service("/", ServeFile::new(static_root.join("index.html")))
        .route("/health", get(health))
        .route(DESCRIBE_PATH, post(describe))
        .nest_service("/static", ServeDir::new(static_root))
        .with_state(state)
}

async fn health() -> Response {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
    .into_response()
}

async fn describe(State(state): State<AppState>, body: Bytes) -> Response {
    let bbox: BoundingBox = match serde_json::from_slice(&body) {
        Ok(bbox) => bbox,
        Err(err) => {
            warn!(error = %err, "rejected bounding box");
            // Handled errors travel in the body with a success status.
            return Json(DescribeResponse::error(format!("invalid bounding box: {err}")))
                .into_response();
        }
    };

    let Some(upstream) = state.upstream.as_ref() else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(DescribeResponse::error("analysis service is not configured")),
        )
            .into_response();
    };

    match upstream.describe(&bbox).await {
        Ok(result) => Json(DescribeResponse::from(&result)).into_response(),
        Err(err) => {
            error!(error = %err, upstream = %upstream.endpoint_url(), "upstream analysis failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(DescribeResponse::error("analysis service unavailable")),
            )
                .into_response()
        }
    }
}
