//! Small DOM lookups shared by both renderers.

use web_sys::{HtmlCanvasElement, MediaQueryList, Window};

use crate::error::RendererError;
use crate::surface::Viewport;

pub fn window() -> Result<Window, RendererError> {
    web_sys::window().ok_or_else(|| RendererError::Dom("no window".into()))
}

/// Seconds since the time origin.
pub fn now_seconds(window: &Window) -> f64 {
    window
        .performance()
        .map(|p| p.now() / 1000.0)
        .unwrap_or(0.0)
}

pub fn reduced_motion_query(window: &Window) -> Option<MediaQueryList> {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
}

/// Resize the canvas backing store to its parent's client box. Returns the
/// new dimensions only when they changed; a no-op resize must not touch the
/// backing store (setting width clears the canvas even for equal values).
pub fn fit_canvas_to_parent(
    canvas: &HtmlCanvasElement,
    viewport: &mut Viewport,
) -> Option<(u32, u32)> {
    let parent = canvas.parent_element()?;
    let width = parent.client_width().max(0) as u32;
    let height = parent.client_height().max(0) as u32;
    if !viewport.apply(width, height) {
        return None;
    }
    canvas.set_width(width);
    canvas.set_height(height);
    Some((width, height))
}
