//! Structured error types for gridview.
//!
//! The engine favors silent normalization over thrown errors; the variants
//! here cover the few places a failure is worth surfacing (DOM construction
//! and the JS configuration boundary).

/// All errors that can occur while building or driving the grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// DOM node creation or lookup failure.
    #[error("DOM error: {0}")]
    Dom(String),

    /// Column configuration rejected at the JS boundary.
    #[error("Invalid column config: {0}")]
    Config(String),

    /// Serialization failure crossing the JS boundary.
    #[error("Serialization error: {0}")]
    Serde(String),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for GridError {
    fn from(v: wasm_bindgen::JsValue) -> Self {
        Self::Dom(v.as_string().unwrap_or_else(|| format!("{v:?}")))
    }
}
