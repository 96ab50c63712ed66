//! Immediate-mode 2D renderer for the rotating skill galaxy.
//!
//! Layout and animation math comes from `crate::galaxy`; this module owns
//! the canvas, the frame loop, and the hover highlight driven by the host's
//! pointer-enter/leave events over the skill chips.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::{dom, frame::FrameLoop};
use crate::error::RendererError;
use crate::galaxy::{
    background_position, build_background, build_stars, hovered_index, star_position,
    BackgroundStar, RandomSource, Star, BASE_ALPHA, HOVER_SIZE, TIME_STEP,
};
use crate::surface::Viewport;

const HOVER_FILL: &str = "#fbbf24";
const HOVER_RING: &str = "rgba(251, 191, 36, 0.2)";
const CLEAR_FILL: &str = "#0a0a0a";

/// `Math.random`-backed source for the once-at-construction star attributes.
struct JsRandom;

impl RandomSource for JsRandom {
    fn next(&mut self) -> f32 {
        js_sys::Math::random() as f32
    }
}

/// Rotating particle cloud with one star per skill label.
#[wasm_bindgen]
pub struct Galaxy {
    inner: Option<GalaxyRenderer>,
}

#[wasm_bindgen]
impl Galaxy {
    /// Attach to a canvas and start animating the given labels.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, labels: Vec<String>) -> Result<Galaxy, JsValue> {
        let renderer = GalaxyRenderer::attach(canvas, labels).map_err(|e| {
            error!(%e, "galaxy renderer init failed");
            JsValue::from(e)
        })?;
        Ok(Galaxy {
            inner: Some(renderer),
        })
    }

    /// Update the hovered label; `None` clears the highlight. Takes effect
    /// on the next frame.
    pub fn set_hovered(&mut self, label: Option<String>) {
        if let Some(r) = &self.inner {
            *r.hovered.borrow_mut() = label;
        }
    }

    /// Cancel the frame loop and remove the resize listener. Idempotent.
    pub fn dispose(&mut self) {
        self.inner.take();
    }
}

struct GalaxyRenderer {
    window: Window,
    hovered: Rc<RefCell<Option<String>>>,
    frame_loop: FrameLoop,
    resize: Closure<dyn FnMut()>,
}

impl GalaxyRenderer {
    fn attach(canvas: HtmlCanvasElement, labels: Vec<String>) -> Result<Self, RendererError> {
        let window = dom::window()?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|_| RendererError::ContextUnsupported)?
            .ok_or(RendererError::ContextUnsupported)?
            .dyn_into()
            .map_err(|_| RendererError::ContextUnsupported)?;

        // Randomized attributes are assigned exactly once here; the layout
        // itself is deterministic in (index, count).
        let mut rng = JsRandom;
        let stars = build_stars(&labels, &mut rng);
        let background = build_background(&mut rng);

        let hovered: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
        let viewport = Rc::new(RefCell::new(Viewport::default()));

        let resize = {
            let canvas = canvas.clone();
            let viewport = Rc::clone(&viewport);
            Closure::wrap(Box::new(move || {
                dom::fit_canvas_to_parent(&canvas, &mut viewport.borrow_mut());
            }) as Box<dyn FnMut()>)
        };
        window
            .add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
            .map_err(|_| RendererError::Dom("resize listener rejected".into()))?;
        dom::fit_canvas_to_parent(&canvas, &mut viewport.borrow_mut());

        let frame_loop = FrameLoop::new(window.clone());
        {
            let hovered = Rc::clone(&hovered);
            let mut time = 0.0f32;
            frame_loop.set_callback(move || {
                time += TIME_STEP;
                let label = hovered.borrow();
                draw_frame(&ctx, &canvas, &stars, &background, label.as_deref(), time);
                true
            });
        }
        frame_loop.start();

        info!(stars = labels.len(), "galaxy renderer attached");
        Ok(Self {
            window,
            hovered,
            frame_loop,
            resize,
        })
    }
}

impl Drop for GalaxyRenderer {
    fn drop(&mut self) {
        self.frame_loop.dispose();
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.resize.as_ref().unchecked_ref());
        info!("galaxy renderer disposed");
    }
}

fn draw_frame(
    ctx: &CanvasRenderingContext2d,
    canvas: &HtmlCanvasElement,
    stars: &[Star],
    background: &[BackgroundStar],
    hovered: Option<&str>,
    time: f32,
) {
    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let cx = width / 2.0;
    let cy = height / 2.0;
    let half_min = width.min(height) / 2.0;

    ctx.set_global_alpha(1.0);
    ctx.set_fill_style_str(CLEAR_FILL);
    ctx.fill_rect(0.0, 0.0, width, height);

    // Static backdrop first.
    ctx.set_fill_style_str("white");
    for star in background {
        let (x, y) = background_position(
            star,
            cx as f32,
            cy as f32,
            width as f32,
            height as f32,
        );
        ctx.set_global_alpha(star.alpha as f64);
        ctx.begin_path();
        let _ = ctx.arc(x as f64, y as f64, star.size as f64, 0.0, std::f64::consts::TAU);
        ctx.fill();
    }

    let highlight = hovered_index(stars, hovered);
    for (i, star) in stars.iter().enumerate() {
        let (x, y) = star_position(star, time, cx as f32, cy as f32, half_min as f32);
        let (x, y) = (x as f64, y as f64);
        let is_hovered = highlight == Some(i);

        ctx.set_global_alpha(if is_hovered { 1.0 } else { BASE_ALPHA as f64 });
        if is_hovered {
            ctx.set_fill_style_str(HOVER_FILL);
        } else {
            ctx.set_fill_style_str(&format!("hsl({}, 80%, 70%)", star.hue));
        }
        let size = if is_hovered {
            (star.size * HOVER_SIZE) as f64
        } else {
            star.size as f64
        };

        ctx.begin_path();
        let _ = ctx.arc(x, y, size, 0.0, std::f64::consts::TAU);
        ctx.fill();

        if is_hovered {
            ctx.set_stroke_style_str(HOVER_RING);
            ctx.begin_path();
            let _ = ctx.arc(x, y, size * 4.0, 0.0, std::f64::consts::TAU);
            ctx.stroke();

            ctx.set_fill_style_str("white");
            ctx.set_font("12px sans-serif");
            let _ = ctx.fill_text(&star.label, x + 15.0, y + 4.0);
        }
    }
}
