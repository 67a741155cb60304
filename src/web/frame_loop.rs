//! Cancellable `requestAnimationFrame` loop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::error::{Error, Result};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Handle to a running frame loop. Cancelling (or dropping) it stops future
/// frames and releases the callback. Must not be cancelled from inside the
/// callback itself.
pub struct FrameLoop {
    active: Rc<Cell<bool>>,
    pending: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl FrameLoop {
    /// Call `on_frame` with the rAF timestamp every animation frame.
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Result<Self> {
        let win = window().ok_or(Error::NoWindow)?;
        let active = Rc::new(Cell::new(true));
        let pending = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let (live, next, me) = (active.clone(), pending.clone(), callback.clone());
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
            next.set(None);
            if !live.get() {
                return;
            }
            on_frame(ts);
            if !live.get() {
                return;
            }
            let (Some(w), Some(cb)) = (window(), me.borrow().as_ref().map(|c| c.as_ref().clone())) else {
                return;
            };
            match w.request_animation_frame(cb.unchecked_ref()) {
                Ok(id) => next.set(Some(id)),
                Err(e) => log::error!("requestAnimationFrame failed: {e:?}"),
            }
        }) as Box<dyn FnMut(f64)>));

        let first = match callback.borrow().as_ref() {
            Some(cb) => Some(win.request_animation_frame(cb.as_ref().unchecked_ref())?),
            None => None,
        };
        pending.set(first);
        Ok(Self {
            active,
            pending,
            callback,
        })
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn cancel(&mut self) {
        if !self.active.replace(false) {
            return;
        }
        if let (Some(w), Some(id)) = (window(), self.pending.take()) {
            w.cancel_animation_frame(id).ok();
        }
        // Breaks the callback -> slot reference cycle.
        self.callback.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
