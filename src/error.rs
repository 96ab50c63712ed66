//! Error taxonomy for renderer initialization.
//!
//! All variants are fatal for the renderer instance that produced them: the
//! caller should fall back to a static background rather than retry.
//! Per-frame failures (for example a lost context mid-session) are not part
//! of the contract; a renderer that hits one simply stops producing frames.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RendererError {
    /// The drawing surface cannot provide the requested graphics context.
    ContextUnsupported,
    /// A shader stage failed to compile; carries the driver's info log.
    ShaderCompile(String),
    /// The shader program failed to link; carries the driver's info log.
    ShaderLink(String),
    /// DOM plumbing failed (no window, listener registration rejected, ...).
    Dom(String),
}

impl fmt::Display for RendererError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RendererError::ContextUnsupported => {
                write!(f, "graphics context unavailable on this surface")
            }
            RendererError::ShaderCompile(log) => write!(f, "shader compile failed: {log}"),
            RendererError::ShaderLink(log) => write!(f, "shader link failed: {log}"),
            RendererError::Dom(msg) => write!(f, "dom error: {msg}"),
        }
    }
}

impl std::error::Error for RendererError {}

#[cfg(target_arch = "wasm32")]
impl From<RendererError> for wasm_bindgen::JsValue {
    fn from(err: RendererError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
