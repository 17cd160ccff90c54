use analysis::InitError;
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum WebError {
    #[error(transparent)]
    Init(#[from] InitError),

    #[error("invalid page configuration: {0}")]
    Config(String),

    #[error("javascript error: {0}")]
    Js(String),
}

impl WebError {
    pub fn js(value: JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
