//! Procedural visual core for the portfolio hero: a shader-driven metaball
//! background ("liquid") and an immediate-mode 2D skill cloud ("galaxy").
//!
//! The math lives in target-independent modules so it can be tested on the
//! host with plain `cargo test`; everything that touches the DOM or WebGL
//! sits behind `cfg(target_arch = "wasm32")` and is exercised with
//! `wasm-bindgen-test` in a browser.

pub mod config;
pub mod error;
pub mod field;
pub mod galaxy;
pub mod pointer;
pub mod surface;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod dom;
    pub mod frame;
    pub mod galaxy;
    pub mod liquid;

    /// Module init: hook panics and logging into the browser console. The
    /// host constructs `Liquid` / `Galaxy` handles explicitly afterwards.
    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
        tracing::info!("liquid-viz module loaded");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{frame::FrameLoop, galaxy::Galaxy, liquid::Liquid};
