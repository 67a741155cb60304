//! Full-screen festive overlay canvas.
//!
//! The canvas ignores pointer events so the page stays usable; clicks are
//! picked up on the window instead.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MouseEvent};

use super::canvas::CanvasSurface;
use super::frame_loop::FrameLoop;
use super::listener::Listener;
use super::sound::WebAudio;
use super::{document, now_ms, viewport, window};
use crate::celebration::{AppView, CelebrationEngine};
use crate::config::CelebrationConfig;
use crate::error::{Error, Result};
use crate::random::entropy_rng;

const CANVAS_ID: &str = "melkam-genna-overlay";
const CANVAS_STYLE: &str = "position:fixed; inset:0; width:100vw; height:100vh; pointer-events:none; z-index:50;";
const SPEECH: &str = "Merry Christmas!";

struct Overlay {
    engine: CelebrationEngine<WebAudio>,
    surface: CanvasSurface,
    _listeners: Vec<Listener>,
    frames: Option<FrameLoop>,
}

thread_local! {
    static OVERLAY: RefCell<Option<Overlay>> = const { RefCell::new(None) };
}

fn with_overlay<R>(f: impl FnOnce(&mut Overlay) -> R) -> Option<R> {
    OVERLAY.with(|cell| cell.borrow_mut().as_mut().map(f))
}

pub fn is_running() -> bool {
    OVERLAY.with(|cell| cell.borrow().is_some())
}

/// Mount the overlay and schedule the opening celebration. Restarts a running overlay.
pub fn start(cfg: CelebrationConfig) -> Result<()> {
    cfg.validate()?;
    stop();

    let doc = document()?;
    let canvas: HtmlCanvasElement = doc
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| Error::SurfaceUnavailable)?;
    canvas.set_id(CANVAS_ID);
    canvas.set_attribute("style", CANVAS_STYLE)?;
    let surface = CanvasSurface::new(canvas.clone())?;
    let (w, h) = viewport()?;
    surface.set_size(w as u32, h as u32);
    doc.body()
        .ok_or_else(|| Error::MissingElement("body".to_string()))?
        .append_child(&canvas)?;

    let mut engine = CelebrationEngine::new(cfg, WebAudio::new(SPEECH), entropy_rng(), (w, h));
    engine.schedule_intro(now_ms());

    let win = window()?;
    let listeners = vec![
        Listener::new(&win, "resize", |_: web_sys::Event| {
            let Ok((w, h)) = viewport() else { return };
            with_overlay(|o| {
                o.surface.set_size(w as u32, h as u32);
                o.engine.resize(w, h);
            });
        })?,
        Listener::new(&win, "mousedown", |evt: MouseEvent| {
            let (x, y) = (evt.client_x() as f64, evt.client_y() as f64);
            with_overlay(|o| o.engine.on_pointer_down(x, y));
        })?,
    ];

    OVERLAY.with(|cell| {
        *cell.borrow_mut() = Some(Overlay {
            engine,
            surface,
            _listeners: listeners,
            frames: None,
        })
    });
    let frames = match FrameLoop::start(|ts| {
        with_overlay(|o| o.engine.frame(&mut o.surface, ts));
    }) {
        Ok(frames) => frames,
        Err(e) => {
            stop();
            return Err(e);
        }
    };
    with_overlay(|o| o.frames = Some(frames));
    log::info!("festive overlay started ({w}x{h})");
    Ok(())
}

/// Cancel the loop, detach listeners, drop every particle and remove the canvas.
pub fn stop() {
    let Some(mut overlay) = OVERLAY.with(|cell| cell.borrow_mut().take()) else {
        return;
    };
    if let Some(mut frames) = overlay.frames.take() {
        frames.cancel();
    }
    overlay.engine.dispose();
    overlay.surface.canvas().remove();
    drop(overlay);
    log::info!("festive overlay stopped");
}

pub fn view_changed(view: AppView) {
    with_overlay(|o| o.engine.on_view_change(view, now_ms()));
}

pub fn replay() {
    with_overlay(|o| o.engine.replay(now_ms()));
}

/// Gift game ownership of the pointer.
pub fn set_pointer_suppressed(suppressed: bool) {
    with_overlay(|o| o.engine.set_pointer_suppressed(suppressed));
}

/// Burst at viewport coordinates, bypassing pointer suppression.
pub fn celebrate_at(x: f64, y: f64, intensity: u32, play_sound: bool) {
    with_overlay(|o| o.engine.spawn_burst(x, y, intensity, play_sound));
}
