//! Gift game canvas mounted inside a host element.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlCanvasElement, PointerEvent};

use super::canvas::CanvasSurface;
use super::frame_loop::FrameLoop;
use super::listener::Listener;
use super::sound::WebAudio;
use super::storage::LocalScoreStore;
use super::{document, now_ms, overlay, window};
use crate::config::GiftGameConfig;
use crate::error::{Error, Result};
use crate::gift_game::{Control, GameEvent, GiftGame, control_at, render};
use crate::gift_game::session::play_cues;
use crate::random::entropy_rng;

const CANVAS_STYLE: &str = "display:block; width:100%; height:100%; touch-action:none; border-radius:16px;";
const FALLBACK_SIZE: (u32, u32) = (480, 640);
const BEST_CATCH_INTENSITY: u32 = 40;

struct GameView {
    game: GiftGame<LocalScoreStore>,
    surface: CanvasSurface,
    audio: WebAudio,
    container: Element,
    _listeners: Vec<Listener>,
    frames: Option<FrameLoop>,
}

impl GameView {
    /// Canvas pixel -> viewport coordinates.
    fn to_viewport(&self, x: f64, y: f64) -> (f64, f64) {
        let canvas = self.surface.canvas();
        let rect = canvas.get_bounding_client_rect();
        let sx = rect.width() / canvas.width().max(1) as f64;
        let sy = rect.height() / canvas.height().max(1) as f64;
        (rect.left() + x * sx, rect.top() + y * sy)
    }

    /// Pointer offset (CSS px) -> canvas pixel coordinates.
    fn to_canvas(&self, evt: &PointerEvent) -> (f64, f64) {
        let canvas = self.surface.canvas();
        let sx = canvas.width() as f64 / canvas.client_width().max(1) as f64;
        let sy = canvas.height() as f64 / canvas.client_height().max(1) as f64;
        (evt.offset_x() as f64 * sx, evt.offset_y() as f64 * sy)
    }

    fn fit_to_container(&mut self) {
        let (w, h) = container_size(&self.container);
        self.surface.set_size(w, h);
        self.game.resize(w as f64, h as f64);
    }

    fn on_pointer(&mut self, evt: &PointerEvent) {
        let (x, y) = self.to_canvas(evt);
        let now = now_ms();
        match control_at(&self.game, x, y) {
            Some(Control::Start) => self.game.start_session(now),
            Some(Control::Pause) => self.game.toggle_pause(),
            Some(Control::RewardBox) => {
                self.game.open_reward(now);
            }
            None => {
                self.game.catch_at(x, y);
            }
        }
        evt.prevent_default();
    }

    fn frame(&mut self, ts: f64) {
        self.game.advance(ts);
        let events = self.game.drain_events();
        play_cues(&events, &mut self.audio);
        for event in &events {
            if let GameEvent::NewBestCatch { x, y, .. } = event {
                let (vx, vy) = self.to_viewport(*x, *y);
                overlay::celebrate_at(vx, vy, BEST_CATCH_INTENSITY, false);
            }
        }
        overlay::set_pointer_suppressed(self.game.is_active());
        render(&self.game, &mut self.surface);
    }
}

thread_local! {
    static GAME: RefCell<Option<GameView>> = const { RefCell::new(None) };
}

fn with_view<R>(f: impl FnOnce(&mut GameView) -> R) -> Option<R> {
    GAME.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn container_size(container: &Element) -> (u32, u32) {
    let (w, h) = (container.client_width(), container.client_height());
    if w > 0 && h > 0 {
        (w as u32, h as u32)
    } else {
        FALLBACK_SIZE
    }
}

pub fn is_running() -> bool {
    GAME.with(|cell| cell.borrow().is_some())
}

/// Mount the game canvas in the element with id `container_id`. Restarts a running game.
pub fn start(container_id: &str, cfg: GiftGameConfig) -> Result<()> {
    stop();
    let doc = document()?;
    let container = doc
        .get_element_by_id(container_id)
        .ok_or_else(|| Error::MissingElement(container_id.to_string()))?;
    let canvas: HtmlCanvasElement = doc
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| Error::SurfaceUnavailable)?;
    canvas.set_attribute("style", CANVAS_STYLE)?;
    let surface = CanvasSurface::new(canvas.clone())?;
    container.append_child(&canvas)?;
    let (w, h) = container_size(&container);
    surface.set_size(w, h);
    let store = LocalScoreStore::new(cfg.high_score_key.clone());
    let game = match GiftGame::new(cfg, store, entropy_rng(), (w as f64, h as f64)) {
        Ok(game) => game,
        Err(e) => {
            canvas.remove();
            return Err(e);
        }
    };

    let win = window()?;
    let listeners = vec![
        Listener::new(&canvas, "pointerdown", |evt: PointerEvent| {
            with_view(|v| v.on_pointer(&evt));
        })?,
        Listener::new(&win, "resize", |_: web_sys::Event| {
            with_view(GameView::fit_to_container);
        })?,
    ];

    GAME.with(|cell| {
        *cell.borrow_mut() = Some(GameView {
            game,
            surface,
            audio: WebAudio::new("Merry Christmas!"),
            container,
            _listeners: listeners,
            frames: None,
        })
    });
    match FrameLoop::start(|ts| {
        with_view(|v| v.frame(ts));
    }) {
        Ok(frames) => {
            with_view(|v| v.frames = Some(frames));
        }
        Err(e) => {
            stop();
            return Err(e);
        }
    }
    log::info!("gift game mounted in #{container_id} ({w}x{h})");
    Ok(())
}

/// Tear the game down and hand the pointer back to the overlay.
pub fn stop() {
    let Some(mut view) = GAME.with(|cell| cell.borrow_mut().take()) else {
        return;
    };
    if let Some(mut frames) = view.frames.take() {
        frames.cancel();
    }
    view.game.dispose();
    view.surface.canvas().remove();
    drop(view);
    overlay::set_pointer_suppressed(false);
    log::info!("gift game stopped");
}

pub fn toggle_pause() {
    with_view(|v| v.game.toggle_pause());
}
