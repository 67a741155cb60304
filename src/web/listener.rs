//! DOM event listener that detaches itself when dropped.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};

use crate::error::Result;

pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// Listen for `event` on `target`; events that are not an `E` are skipped.
    pub fn new<E, F>(target: &EventTarget, event: &'static str, mut handler: F) -> Result<Self>
    where
        E: JsCast,
        F: FnMut(E) + 'static,
    {
        let callback = Closure::wrap(Box::new(move |evt: Event| {
            if let Ok(evt) = evt.dyn_into::<E>() {
                handler(evt);
            }
        }) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
            .ok();
    }
}
