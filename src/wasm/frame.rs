//! Animation-frame scheduling with explicit start/stop.
//!
//! One `FrameLoop` per renderer instance. Frames are strictly sequential:
//! the next frame is only requested after the callback returns, and only if
//! it asked to stay scheduled. `stop` cancels the pending request
//! synchronously, so no frame runs after disposal returns.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};

/// Drives a callback once per animation frame. The callback returns `true`
/// to keep the loop scheduled; after a halt, `start` resumes it with the
/// same callback.
#[derive(Clone)]
pub struct FrameLoop {
    inner: Rc<Inner>,
}

struct Inner {
    window: web_sys::Window,
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
    pending: Cell<Option<i32>>,
}

impl FrameLoop {
    pub fn new(window: web_sys::Window) -> Self {
        Self {
            inner: Rc::new(Inner {
                window,
                callback: RefCell::new(None),
                pending: Cell::new(None),
            }),
        }
    }

    /// Install the per-frame callback. Call once, before `start`.
    pub fn set_callback(&self, mut frame: impl FnMut() -> bool + 'static) {
        let inner = Rc::clone(&self.inner);
        let closure = Closure::wrap(Box::new(move || {
            inner.pending.set(None);
            if frame() {
                Inner::schedule(&inner);
            }
        }) as Box<dyn FnMut()>);
        *self.inner.callback.borrow_mut() = Some(closure);
    }

    /// Request the next frame, unless one is already pending or the loop was
    /// disposed.
    pub fn start(&self) {
        Inner::schedule(&self.inner);
    }

    /// Cancel the pending frame, if any. Idempotent.
    pub fn stop(&self) {
        if let Some(id) = self.inner.pending.take() {
            let _ = self.inner.window.cancel_animation_frame(id);
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner.pending.get().is_some()
    }

    /// Stop and drop the callback; the loop cannot be restarted afterwards.
    /// Safe to call more than once.
    pub fn dispose(&self) {
        self.stop();
        self.inner.callback.borrow_mut().take();
    }
}

impl Inner {
    fn schedule(inner: &Rc<Inner>) {
        if inner.pending.get().is_some() {
            return;
        }
        let callback = inner.callback.borrow();
        let Some(closure) = callback.as_ref() else {
            return;
        };
        match inner
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            Ok(id) => inner.pending.set(Some(id)),
            Err(err) => tracing::warn!(?err, "requestAnimationFrame rejected"),
        }
    }
}
