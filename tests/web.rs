// Browser tests: run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use melkam_genna::config::{CelebrationConfig, GiftGameConfig};
use melkam_genna::web::{game_view, overlay};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

#[wasm_bindgen_test]
fn overlay_mounts_and_unmounts_its_canvas() {
    overlay::start(CelebrationConfig::default()).unwrap();
    assert!(overlay::is_running());
    assert!(document().get_element_by_id("melkam-genna-overlay").is_some());

    overlay::replay();
    overlay::stop();
    assert!(!overlay::is_running());
    assert!(document().get_element_by_id("melkam-genna-overlay").is_none());
}

#[wasm_bindgen_test]
fn gift_game_needs_its_container() {
    assert!(game_view::start("no-such-container", GiftGameConfig::default()).is_err());
    assert!(!game_view::is_running());
}

#[wasm_bindgen_test]
fn gift_game_mounts_in_container() {
    let doc = document();
    let host = doc.create_element("div").unwrap();
    host.set_id("gift-host");
    doc.body().unwrap().append_child(&host).unwrap();

    game_view::start("gift-host", GiftGameConfig::default()).unwrap();
    assert!(game_view::is_running());
    assert_eq!(host.child_element_count(), 1);

    game_view::stop();
    assert!(!game_view::is_running());
    assert_eq!(host.child_element_count(), 0);
    host.remove();
}
