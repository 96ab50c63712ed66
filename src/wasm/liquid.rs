//! WebGL renderer for the metaball "liquid" background.
//!
//! Owns its canvas and GL context exclusively. The field math itself lives
//! in the fragment shader (`crate::field::FRAGMENT_SHADER`); this module is
//! the plumbing around it: context acquisition, shader compilation, input
//! sampling, resize handling, and the frame loop with its reduced-motion
//! contract.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, MediaQueryList, MouseEvent, TouchEvent, WebGl2RenderingContext as GL,
    WebGlBuffer, WebGlProgram, WebGlShader, WebGlUniformLocation, Window,
};

use super::{dom, frame::FrameLoop};
use crate::config::RenderConfig;
use crate::error::RendererError;
use crate::field;
use crate::pointer::PointerState;
use crate::surface::Viewport;

/// Shader-driven liquid background. One instance per canvas; constructing it
/// starts the frame loop immediately.
#[wasm_bindgen]
pub struct Liquid {
    inner: Option<LiquidRenderer>,
}

#[wasm_bindgen]
impl Liquid {
    /// Attach to a canvas. Fails if WebGL2 is unavailable or the shaders do
    /// not build; the caller should then fall back to a static background
    /// and not retry.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<Liquid, JsValue> {
        let renderer = LiquidRenderer::attach(canvas).map_err(|e| {
            error!(%e, "liquid renderer init failed");
            JsValue::from(e)
        })?;
        Ok(Liquid {
            inner: Some(renderer),
        })
    }

    /// Number of emitters, clamped to 1..=16.
    pub fn set_count(&mut self, count: u32) {
        if let Some(r) = &self.inner {
            r.shared.config.borrow_mut().set_count(count);
        }
    }

    /// Time multiplier, clamped to 0.2..=2.0.
    pub fn set_speed(&mut self, speed: f32) {
        if let Some(r) = &self.inner {
            r.shared.config.borrow_mut().set_speed(speed);
        }
    }

    /// Palette phase shift, clamped to -1..=1.
    pub fn set_color_bias(&mut self, bias: f32) {
        if let Some(r) = &self.inner {
            r.shared.config.borrow_mut().set_color_bias(bias);
        }
    }

    /// Pointer attraction, clamped to 0..=2.
    pub fn set_follow(&mut self, follow: f32) {
        if let Some(r) = &self.inner {
            r.shared.config.borrow_mut().set_follow(follow);
        }
    }

    /// Manual reduced-motion override. Turning it on lets the loop halt
    /// after the next frame; turning it off resumes scheduling immediately
    /// (unless the system preference still asks for reduced motion).
    pub fn set_reduce_motion(&mut self, on: bool) {
        if let Some(r) = &self.inner {
            r.shared.config.borrow_mut().set_reduce_motion(on);
            if !on {
                r.resume_if_allowed();
            }
        }
    }

    /// Cancel the frame loop, remove listeners, and release GL resources.
    /// Idempotent, and a no-op for a handle whose construction failed.
    pub fn dispose(&mut self) {
        self.inner.take();
    }
}

/// State read fresh by the frame callback each tick.
struct Shared {
    config: RefCell<RenderConfig>,
    pointer: RefCell<PointerState>,
    viewport: RefCell<Viewport>,
    prefers_reduced: Cell<bool>,
}

struct Listeners {
    mousemove: Closure<dyn FnMut(MouseEvent)>,
    touchmove: Closure<dyn FnMut(TouchEvent)>,
    resize: Closure<dyn FnMut()>,
    media: Option<(MediaQueryList, Closure<dyn FnMut()>)>,
}

struct LiquidRenderer {
    window: Window,
    shared: Rc<Shared>,
    gl: Rc<GlState>,
    frame_loop: FrameLoop,
    listeners: Listeners,
}

impl LiquidRenderer {
    fn attach(canvas: HtmlCanvasElement) -> Result<Self, RendererError> {
        let window = dom::window()?;

        let gl: GL = canvas
            .get_context("webgl2")
            .map_err(|_| RendererError::ContextUnsupported)?
            .ok_or(RendererError::ContextUnsupported)?
            .dyn_into()
            .map_err(|_| RendererError::ContextUnsupported)?;
        let gl = Rc::new(GlState::build(gl)?);

        let shared = Rc::new(Shared {
            config: RefCell::new(RenderConfig::default()),
            pointer: RefCell::new(PointerState::default()),
            viewport: RefCell::new(Viewport::default()),
            prefers_reduced: Cell::new(false),
        });

        let frame_loop = FrameLoop::new(window.clone());

        // Raw pointer targets in GL-oriented pixels (Y flipped); the frame
        // callback eases the smoothed position toward them.
        let mousemove = {
            let shared = Rc::clone(&shared);
            let canvas = canvas.clone();
            Closure::wrap(Box::new(move |e: MouseEvent| {
                let y = canvas.height() as f32 - e.client_y() as f32;
                shared
                    .pointer
                    .borrow_mut()
                    .set_target(e.client_x() as f32, y);
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        let touchmove = {
            let shared = Rc::clone(&shared);
            let canvas = canvas.clone();
            Closure::wrap(Box::new(move |e: TouchEvent| {
                if let Some(touch) = e.touches().get(0) {
                    let y = canvas.height() as f32 - touch.client_y() as f32;
                    shared
                        .pointer
                        .borrow_mut()
                        .set_target(touch.client_x() as f32, y);
                }
            }) as Box<dyn FnMut(TouchEvent)>)
        };

        // The viewport update must land before the next frame draws, so the
        // listener adjusts the GL viewport itself rather than deferring.
        let resize = {
            let shared = Rc::clone(&shared);
            let canvas = canvas.clone();
            let gl = Rc::clone(&gl);
            Closure::wrap(Box::new(move || {
                let mut viewport = shared.viewport.borrow_mut();
                if let Some((w, h)) = dom::fit_canvas_to_parent(&canvas, &mut viewport) {
                    gl.gl.viewport(0, 0, w as i32, h as i32);
                }
            }) as Box<dyn FnMut()>)
        };

        let mut listeners = Listeners {
            mousemove,
            touchmove,
            resize,
            media: None,
        };
        if let Err(e) = register_listeners(&window, &listeners) {
            remove_listeners(&window, &listeners);
            return Err(e);
        }

        // System reduced-motion preference; a change both ways is handled
        // without host involvement.
        if let Some(mq) = dom::reduced_motion_query(&window) {
            shared.prefers_reduced.set(mq.matches());
            let on_change = {
                let mq = mq.clone();
                let shared = Rc::clone(&shared);
                let frame_loop = frame_loop.clone();
                Closure::wrap(Box::new(move || {
                    shared.prefers_reduced.set(mq.matches());
                    if shared.config.borrow().animating(mq.matches()) {
                        frame_loop.start();
                    }
                }) as Box<dyn FnMut()>)
            };
            if mq
                .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
                .is_ok()
            {
                listeners.media = Some((mq, on_change));
            }
        }

        // Initial sizing, before the first frame.
        {
            let mut viewport = shared.viewport.borrow_mut();
            if let Some((w, h)) = dom::fit_canvas_to_parent(&canvas, &mut viewport) {
                gl.gl.viewport(0, 0, w as i32, h as i32);
            }
        }

        {
            let gl = Rc::clone(&gl);
            let shared = Rc::clone(&shared);
            let canvas = canvas.clone();
            let window = window.clone();
            let start = dom::now_seconds(&window);
            frame_loop.set_callback(move || {
                // Config is a consistent snapshot for this frame; live host
                // mutations are picked up next tick.
                let config = *shared.config.borrow();
                let time = (dom::now_seconds(&window) - start) as f32 * config.speed();
                let mouse = {
                    let mut pointer = shared.pointer.borrow_mut();
                    pointer.step();
                    pointer.position()
                };
                gl.draw(&canvas, time, mouse, &config);
                config.animating(shared.prefers_reduced.get())
            });
        }
        frame_loop.start();

        info!("liquid renderer attached");
        Ok(Self {
            window,
            shared,
            gl,
            frame_loop,
            listeners,
        })
    }

    fn resume_if_allowed(&self) {
        let config = *self.shared.config.borrow();
        if !self.frame_loop.is_running() && config.animating(self.shared.prefers_reduced.get()) {
            self.frame_loop.start();
        }
    }
}

// Cleanup lives in Drop so both an explicit `dispose` and a handle simply
// going out of scope cancel the pending frame and remove the listeners. GL
// resources are released by `GlState`'s own Drop once the frame closure and
// listeners let go of their references.
impl Drop for LiquidRenderer {
    fn drop(&mut self) {
        self.frame_loop.dispose();
        remove_listeners(&self.window, &self.listeners);
        info!("liquid renderer disposed");
    }
}

fn register_listeners(window: &Window, listeners: &Listeners) -> Result<(), RendererError> {
    window
        .add_event_listener_with_callback(
            "mousemove",
            listeners.mousemove.as_ref().unchecked_ref(),
        )
        .map_err(|_| RendererError::Dom("mousemove listener rejected".into()))?;
    window
        .add_event_listener_with_callback(
            "touchmove",
            listeners.touchmove.as_ref().unchecked_ref(),
        )
        .map_err(|_| RendererError::Dom("touchmove listener rejected".into()))?;
    window
        .add_event_listener_with_callback("resize", listeners.resize.as_ref().unchecked_ref())
        .map_err(|_| RendererError::Dom("resize listener rejected".into()))?;
    Ok(())
}

fn remove_listeners(window: &Window, listeners: &Listeners) {
    let _ = window.remove_event_listener_with_callback(
        "mousemove",
        listeners.mousemove.as_ref().unchecked_ref(),
    );
    let _ = window.remove_event_listener_with_callback(
        "touchmove",
        listeners.touchmove.as_ref().unchecked_ref(),
    );
    let _ = window
        .remove_event_listener_with_callback("resize", listeners.resize.as_ref().unchecked_ref());
    if let Some((mq, on_change)) = &listeners.media {
        let _ = mq
            .remove_event_listener_with_callback("change", on_change.as_ref().unchecked_ref());
    }
}

struct GlState {
    gl: GL,
    program: WebGlProgram,
    buffer: WebGlBuffer,
    position: u32,
    u_time: Option<WebGlUniformLocation>,
    u_resolution: Option<WebGlUniformLocation>,
    u_mouse: Option<WebGlUniformLocation>,
    u_count: Option<WebGlUniformLocation>,
    u_bias: Option<WebGlUniformLocation>,
    u_follow: Option<WebGlUniformLocation>,
}

impl GlState {
    fn build(gl: GL) -> Result<Self, RendererError> {
        let vs = compile_shader(&gl, GL::VERTEX_SHADER, field::VERTEX_SHADER)?;
        let fs = match compile_shader(&gl, GL::FRAGMENT_SHADER, field::FRAGMENT_SHADER) {
            Ok(fs) => fs,
            Err(e) => {
                gl.delete_shader(Some(&vs));
                return Err(e);
            }
        };
        let program = link_program(&gl, &vs, &fs)?;

        let position = gl.get_attrib_location(&program, "a_position");
        if position < 0 {
            gl.delete_program(Some(&program));
            return Err(RendererError::ShaderLink("a_position attribute missing".into()));
        }

        // Two triangles covering the surface.
        let buffer = match gl.create_buffer() {
            Some(b) => b,
            None => {
                gl.delete_program(Some(&program));
                return Err(RendererError::ContextUnsupported);
            }
        };
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
        let verts: [f32; 12] = [
            -1.0, -1.0, 1.0, -1.0, -1.0, 1.0, //
            -1.0, 1.0, 1.0, -1.0, 1.0, 1.0,
        ];
        let view = js_sys::Float32Array::from(verts.as_slice());
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &view, GL::STATIC_DRAW);

        let u_time = gl.get_uniform_location(&program, "u_time");
        let u_resolution = gl.get_uniform_location(&program, "u_resolution");
        let u_mouse = gl.get_uniform_location(&program, "u_mouse");
        let u_count = gl.get_uniform_location(&program, "u_count");
        let u_bias = gl.get_uniform_location(&program, "u_bias");
        let u_follow = gl.get_uniform_location(&program, "u_follow");

        Ok(Self {
            gl,
            program,
            buffer,
            position: position as u32,
            u_time,
            u_resolution,
            u_mouse,
            u_count,
            u_bias,
            u_follow,
        })
    }

    fn draw(&self, canvas: &HtmlCanvasElement, time: f32, mouse: (f32, f32), config: &RenderConfig) {
        let gl = &self.gl;
        gl.use_program(Some(&self.program));
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&self.buffer));
        gl.enable_vertex_attrib_array(self.position);
        gl.vertex_attrib_pointer_with_i32(self.position, 2, GL::FLOAT, false, 0, 0);

        gl.uniform1f(self.u_time.as_ref(), time);
        gl.uniform2f(
            self.u_resolution.as_ref(),
            canvas.width() as f32,
            canvas.height() as f32,
        );
        gl.uniform2f(self.u_mouse.as_ref(), mouse.0, mouse.1);
        gl.uniform1f(self.u_count.as_ref(), config.count() as f32);
        gl.uniform1f(self.u_bias.as_ref(), config.color_bias());
        gl.uniform1f(self.u_follow.as_ref(), config.follow());

        gl.draw_arrays(GL::TRIANGLES, 0, 6);
    }
}

// Tied to the struct rather than the renderer so every path that builds a
// `GlState` and then bails out still releases the program and buffer.
impl Drop for GlState {
    fn drop(&mut self) {
        self.gl.delete_buffer(Some(&self.buffer));
        self.gl.delete_program(Some(&self.program));
    }
}

fn compile_shader(gl: &GL, stage: u32, source: &str) -> Result<WebGlShader, RendererError> {
    let shader = gl
        .create_shader(stage)
        .ok_or(RendererError::ContextUnsupported)?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(RendererError::ShaderCompile(log))
    }
}

fn link_program(gl: &GL, vs: &WebGlShader, fs: &WebGlShader) -> Result<WebGlProgram, RendererError> {
    let program = gl
        .create_program()
        .ok_or(RendererError::ContextUnsupported)?;
    gl.attach_shader(&program, vs);
    gl.attach_shader(&program, fs);
    gl.link_program(&program);
    // Shaders can go once the program holds them.
    gl.delete_shader(Some(vs));
    gl.delete_shader(Some(fs));
    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(RendererError::ShaderLink(log))
    }
}
