//! Crate error type.
//!
//! The simulation core never fails; only configuration parsing and browser host
//! setup return errors. Exported entry points convert into `JsValue` via `?`.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration JSON: {0}")]
    ConfigJson(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("element '{0}' not found")]
    MissingElement(String),
    #[error("2d drawing surface unavailable")]
    SurfaceUnavailable,
    #[error("javascript error: {0}")]
    Js(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<JsValue> for Error {
    fn from(value: JsValue) -> Self {
        Error::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
