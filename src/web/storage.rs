use crate::config::{SETTINGS_KEY, Settings};

/// Stored settings with the page's `?server=` override applied.
pub fn load_settings() -> Settings {
    let Some(win) = web_sys::window() else {
        return Settings::default();
    };
    let stored = match win.local_storage() {
        Ok(Some(store)) => match store.get_item(SETTINGS_KEY) {
            Ok(Some(raw)) => Settings::from_json(&raw),
            _ => Settings::default(),
        },
        _ => Settings::default(),
    };
    let query = win.location().search().unwrap_or_default();
    stored.with_query_overrides(&query)
}

/// Persists settings. The server URL keeps its stored value so a `?server=`
/// override only lasts for the page load.
pub fn save_settings(settings: &Settings) {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            let mut to_store = settings.clone();
            to_store.server_url = match store.get_item(SETTINGS_KEY) {
                Ok(Some(raw)) => Settings::from_json(&raw).server_url,
                _ => Settings::default().server_url,
            };
            if let Some(raw) = to_store.to_json() {
                let _ = store.set_item(SETTINGS_KEY, &raw);
            }
        }
    }
}
