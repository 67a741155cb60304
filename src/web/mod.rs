//! Browser host: canvases, listeners, the frame loop and the JS-facing state.

pub mod canvas;
pub mod frame_loop;
pub mod game_view;
pub mod listener;
pub mod overlay;
pub mod sound;
pub mod storage;

use web_sys::{Document, Window};

use crate::error::{Error, Result};

pub(crate) fn window() -> Result<Window> {
    web_sys::window().ok_or(Error::NoWindow)
}

pub(crate) fn document() -> Result<Document> {
    window()?.document().ok_or(Error::NoDocument)
}

/// `performance.now()` in ms, the same clock `requestAnimationFrame` stamps frames with.
pub(crate) fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Viewport size in CSS pixels.
pub(crate) fn viewport() -> Result<(f64, f64)> {
    let win = window()?;
    let w = win.inner_width()?.as_f64().unwrap_or(0.0);
    let h = win.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((w, h))
}
