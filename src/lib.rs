mod api;
mod app;
mod categories;
mod components;
mod filter;
mod models;
mod pages;
mod state;
mod storage;

use crate::app::App;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use crate::models::{FontFamily, Settings};
    use crate::storage::{load_settings, save_settings, SETTINGS_KEY};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn clear() {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.remove_item(SETTINGS_KEY);
        }
    }

    #[wasm_bindgen_test]
    fn test_settings_storage_roundtrip() {
        clear();

        assert_eq!(load_settings(), Settings::default());

        let custom = Settings {
            dark_mode: true,
            font_size: 20,
            font_family: FontFamily::Serif,
        };
        save_settings(&custom);
        assert_eq!(load_settings(), custom);

        clear();
        assert_eq!(load_settings(), Settings::default());
    }

    #[wasm_bindgen_test]
    fn test_corrupt_settings_fall_back_to_defaults() {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(SETTINGS_KEY, "not json");
        }
        assert_eq!(load_settings(), Settings::default());
        clear();
    }
}

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
