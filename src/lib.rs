//! Melkam Genna core crate.
//!
//! Two canvas engines for the Ethiopian Christmas page: the festive particle
//! overlay (`celebration`) and the gift-catch mini-game (`gift_game`). Both are
//! plain state machines driven by a frame timestamp and drawn through the
//! [`surface::Surface`] trait; `web` mounts them on real canvases and exposes the
//! JS entry points below.

use wasm_bindgen::prelude::*;

pub mod audio;
pub mod celebration;
pub mod config;
pub mod error;
pub mod gift_game;
pub mod logging;
pub mod random;
pub mod schedule;
pub mod surface;
pub mod web;

pub use error::{Error, Result};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(log::Level::Info);
}

/// A missing drawing surface leaves the engine off without failing the page.
fn host_result(what: &str, result: Result<()>) -> std::result::Result<(), JsValue> {
    match result {
        Ok(()) => Ok(()),
        Err(Error::SurfaceUnavailable) => {
            log::warn!("{what} disabled: no 2D drawing surface");
            Ok(())
        }
        Err(e) => {
            log::error!("{what} failed to start: {e}");
            Err(e.into())
        }
    }
}

// -----------------------------------------------------------------------------
// Festive overlay
// -----------------------------------------------------------------------------

/// Mount the full-screen overlay. `config_json` overrides any subset of the defaults.
#[wasm_bindgen]
pub fn start_festive_overlay(config_json: Option<String>) -> std::result::Result<(), JsValue> {
    let cfg = match config_json.as_deref() {
        Some(json) => config::CelebrationConfig::from_json(json)?,
        None => config::CelebrationConfig::default(),
    };
    host_result("festive overlay", web::overlay::start(cfg))
}

#[wasm_bindgen]
pub fn stop_festive_overlay() {
    web::overlay::stop();
}

/// Notify the overlay that the app switched views (`"chat"`, `"genna"`, ...).
#[wasm_bindgen]
pub fn festive_view_changed(view: &str) {
    match view.parse::<celebration::AppView>() {
        Ok(view) => web::overlay::view_changed(view),
        Err(e) => log::warn!("{e}"),
    }
}

#[wasm_bindgen]
pub fn replay_celebration() {
    web::overlay::replay();
}

// -----------------------------------------------------------------------------
// Gift game
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_gift_game(container_id: &str, config_json: Option<String>) -> std::result::Result<(), JsValue> {
    let cfg = match config_json.as_deref() {
        Some(json) => config::GiftGameConfig::from_json(json)?,
        None => config::GiftGameConfig::default(),
    };
    host_result("gift game", web::game_view::start(container_id, cfg))
}

#[wasm_bindgen]
pub fn stop_gift_game() {
    web::game_view::stop();
}

#[wasm_bindgen]
pub fn toggle_gift_game_pause() {
    web::game_view::toggle_pause();
}

/// `"error"`, `"warn"`, `"info"`, `"debug"` or `"trace"`.
#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    logging::set_level(logging::parse_level(level));
}
