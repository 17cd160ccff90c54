//! Page-level configuration.
//!
//! The host page may define `window.__regionDescribeConfig` before loading the
//! module; any field it leaves out falls back to the defaults below.

use analysis::{ControllerConfig, DESCRIBE_PATH, GENERIC_FAILURE_MESSAGE};
use geoview::MapConfig;
use serde::{Deserialize, Serialize};
use tracing::Level;
use wasm_bindgen::JsValue;

use crate::error::WebError;

/// Ids of the elements the controller binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub map: String,
    pub trigger: String,
    pub results: String,
    pub busy: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            map: "map".to_string(),
            trigger: "analyze-button".to_string(),
            results: "results".to_string(),
            busy: "spinner".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub map: MapConfig,
    pub elements: ElementIds,
    pub endpoint: String,
    pub failure_message: String,
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            elements: ElementIds::default(),
            endpoint: DESCRIBE_PATH.to_string(),
            failure_message: GENERIC_FAILURE_MESSAGE.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl WebConfig {
    pub const WINDOW_KEY: &'static str = "__regionDescribeConfig";

    pub fn from_json(raw: &str) -> Result<Self, WebError> {
        serde_json::from_str(raw).map_err(|e| WebError::Config(e.to_string()))
    }

    /// Reads the page override, if any.
    pub fn from_window() -> Result<Self, WebError> {
        let window = web_sys::window().ok_or_else(|| WebError::Js("no window".to_string()))?;
        let value = js_sys::Reflect::get(&window, &JsValue::from_str(Self::WINDOW_KEY))
            .map_err(WebError::js)?;
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        let raw = js_sys::JSON::stringify(&value).map_err(WebError::js)?;
        Self::from_json(&String::from(raw))
    }

    pub fn max_level(&self) -> Level {
        self.log_level.trim().parse().unwrap_or(Level::INFO)
    }

    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            failure_message: self.failure_message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(WebConfig::from_json("{}").unwrap(), WebConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = WebConfig::from_json(
            r#"{"elements": {"trigger": "go"}, "map": {"center": [-6.2, 106.8]}, "log_level": "debug"}"#,
        )
        .unwrap();
        assert_eq!(cfg.elements.trigger, "go");
        assert_eq!(cfg.elements.results, "results");
        assert_eq!(cfg.map.center, [-6.2, 106.8]);
        assert_eq!(cfg.map.zoom, 13.0);
        assert_eq!(cfg.endpoint, "/vision/describe");
        assert_eq!(cfg.max_level(), Level::DEBUG);
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let cfg = WebConfig::from_json(r#"{"log_level": "chatty"}"#).unwrap();
        assert_eq!(cfg.max_level(), Level::INFO);
    }

    #[test]
    fn wrong_shape_is_config_error() {
        let err = WebConfig::from_json(r#"{"endpoint": 5}"#).unwrap_err();
        assert!(matches!(err, WebError::Config(_)));
    }

    #[test]
    fn controller_config_carries_failure_message() {
        let cfg = WebConfig::default();
        assert_eq!(cfg.controller_config().failure_message, GENERIC_FAILURE_MESSAGE);

        let cfg = WebConfig::from_json(r#"{"failure_message": "Try again later."}"#).unwrap();
        assert_eq!(cfg.controller_config().failure_message, "Try again later.");
    }
}
