// Host-side tests for the page contract constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use monsoon_core::constants::{LIGHTNING_BOLT_VARIANTS, TRACK_COUNT};
use monsoon_core::TrackId;

#[test]
fn one_audio_path_per_track_in_track_order() {
    assert_eq!(AUDIO_PATHS.len(), TRACK_COUNT);
    let expect = ["wind", "thunder", "rain", "birds"];
    for (id, word) in TrackId::ALL.into_iter().zip(expect) {
        let path = AUDIO_PATHS[id.index()];
        assert!(path.starts_with("/audio/") && path.ends_with(".mp3"));
        assert!(path.contains(word), "{path} is not the {} track", id.name());
    }
}

#[test]
fn one_outline_per_bolt_variant() {
    assert_eq!(BOLT_PATHS.len(), LIGHTNING_BOLT_VARIANTS);
    assert!(BOLT_PATHS.iter().all(|d| d.starts_with('M')));
}

#[test]
fn selectors_are_class_selectors() {
    for sel in [
        SCENE_SELECTOR,
        SCENE_BG_SELECTOR,
        SCENE_CONTENT_SELECTOR,
        PARALLAX_SELECTOR,
        MOUSE_PARALLAX_SELECTOR,
        LIGHTNING_FLASH_SELECTOR,
        LIGHTNING_BOLT_SELECTOR,
        CURSOR_GLOW_SELECTOR,
        PROGRESS_FILL_SELECTOR,
        PROGRESS_TEXT_SELECTOR,
        AUDIO_TOGGLE_SELECTOR,
        AUDIO_LABEL_SELECTOR,
    ] {
        assert!(sel.starts_with('.') && !sel.contains(' '), "bad selector {sel}");
    }
    assert!(!RAIN_CANVAS_ID.starts_with('#'));
    assert!(PARALLAX_SPEED_ATTR.starts_with("data-"));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn timings_are_positive() {
    assert!(CURSOR_FOLLOW_TAU_SEC > 0.0);
    assert!(MOUSE_PARALLAX_TAU_SEC > CURSOR_FOLLOW_TAU_SEC);
    assert!(MOUSE_PARALLAX_RANGE_PX > 0.0);
    assert!(MAX_FRAME_DT_SEC > 0.0 && MAX_FRAME_DT_SEC < 1.0);
}
