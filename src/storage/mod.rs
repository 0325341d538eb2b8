use crate::models::Settings;
use serde::{Deserialize, Serialize};

/// Single key holding the whole settings object as JSON.
/// Key kept from earlier deployments so existing browsers keep their settings.
pub(crate) const SETTINGS_KEY: &str = "cc-booklist-settings";

pub(crate) fn load_json_from_storage<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
    let json = storage.get_item(key).ok().flatten()?;
    serde_json::from_str(&json).ok()
}

pub(crate) fn save_json_to_storage<T: Serialize>(key: &str, value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(key, &json);
        }
    }
}

/// Read persisted settings, falling back to defaults on first run or when the
/// stored JSON does not parse. Out-of-range font sizes are clamped.
pub(crate) fn load_settings() -> Settings {
    load_json_from_storage::<Settings>(SETTINGS_KEY)
        .unwrap_or_default()
        .clamped()
}

/// Rewrite the whole settings value; called on every settings change.
pub(crate) fn save_settings(settings: &Settings) {
    save_json_to_storage(SETTINGS_KEY, settings);
}
