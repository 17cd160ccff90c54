use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use analysis::HttpAnalysisClient;
use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod routes;

use routes::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let addr: SocketAddr = env::var("GATEWAY_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:8000".to_string())
        .parse()?;
    let static_root = env::var("GATEWAY_STATIC_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("static"));
    let timeout = Duration::from_secs(env_var_u64("GATEWAY_UPSTREAM_TIMEOUT_SECS", 120));

    let upstream = match env::var("ANALYSIS_UPSTREAM_URL") {
        Ok(url) if !url.trim().is_empty() => {
            let client = reqwest::Client::builder().timeout(timeout).build()?;
            let upstream = HttpAnalysisClient::with_client(url, client);
            info!(upstream = %upstream.endpoint_url(), "forwarding analysis requests");
            Some(upstream)
        }
        _ => {
            warn!("ANALYSIS_UPSTREAM_URL not set; describe requests will answer 503");
            None
        }
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS]);

    let app = routes::router(AppState { upstream }, &static_root)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    info!(static_root = %static_root.display(), "gateway listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn env_var_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
