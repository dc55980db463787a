// Client tunables, persisted as JSON in localStorage.
use serde::{Deserialize, Serialize};

use crate::state::PanPolicy;
use crate::state::drag::DEFAULT_DRAG_THRESHOLD;
use crate::state::negotiator::DEFAULT_PREFETCH_MARGIN;

pub const SETTINGS_KEY: &str = "wu_settings";
pub const DEFAULT_SERVER_URL: &str = "ws://localhost:3000/ws";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server_url: String,
    /// Tiles requested beyond the visible area on each side.
    pub prefetch_margin: i32,
    /// Pointer travel in pixels that turns a press into a drag.
    pub drag_threshold: f64,
    pub initial_zoom: i32,
    pub min_zoom: i32,
    pub max_zoom: i32,
    /// Zoom units per wheel delta unit.
    pub wheel_sensitivity: f64,
    pub pan_policy: PanPolicy,
    /// Pixels moved by one pan button press or arrow key.
    pub pan_step: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            prefetch_margin: DEFAULT_PREFETCH_MARGIN,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            initial_zoom: 20,
            min_zoom: 1,
            max_zoom: 80,
            wheel_sensitivity: 0.01,
            pan_policy: PanPolicy::Unbounded,
            pan_step: 64,
        }
    }
}

impl Settings {
    /// Parses stored settings, falling back to defaults on any error.
    pub fn from_json(raw: &str) -> Self {
        serde_json::from_str::<Settings>(raw)
            .map(Settings::sanitized)
            .unwrap_or_default()
    }

    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }

    /// Repairs values that would break viewport invariants.
    pub fn sanitized(mut self) -> Self {
        self.min_zoom = self.min_zoom.max(1);
        self.max_zoom = self.max_zoom.max(self.min_zoom);
        self.initial_zoom = self.initial_zoom.clamp(self.min_zoom, self.max_zoom);
        self.prefetch_margin = self.prefetch_margin.max(0);
        if !self.drag_threshold.is_finite() || self.drag_threshold < 0.0 {
            self.drag_threshold = DEFAULT_DRAG_THRESHOLD;
        }
        if !self.wheel_sensitivity.is_finite() || self.wheel_sensitivity <= 0.0 {
            self.wheel_sensitivity = 0.01;
        }
        self
    }

    /// Applies a `server=` entry from a URL query string such as `?server=ws://host/ws`.
    pub fn with_query_overrides(mut self, query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&') {
            if let Some(url) = pair.strip_prefix("server=") {
                if !url.is_empty() {
                    self.server_url = decode_component(url);
                }
            }
        }
        self
    }
}

#[cfg(target_arch = "wasm32")]
fn decode_component(raw: &str) -> String {
    js_sys::decode_uri_component(raw)
        .ok()
        .and_then(|s| s.as_string())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn decode_component(raw: &str) -> String {
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let s = Settings::from_json(r#"{"prefetch_margin":9}"#);
        assert_eq!(s.prefetch_margin, 9);
        assert_eq!(s.server_url, DEFAULT_SERVER_URL);
        assert_eq!(s.pan_policy, PanPolicy::Unbounded);
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        assert_eq!(Settings::from_json("{nope"), Settings::default());
    }

    #[test]
    fn clamp_policy_round_trips_by_name() {
        let s = Settings {
            pan_policy: PanPolicy::ClampNonNegative,
            ..Default::default()
        };
        let raw = s.to_json().unwrap();
        assert!(raw.contains(r#""pan_policy":"ClampNonNegative""#));
        assert_eq!(Settings::from_json(&raw), s);
    }

    #[test]
    fn sanitize_repairs_zoom_range() {
        let s = Settings {
            min_zoom: 0,
            max_zoom: -3,
            initial_zoom: 50,
            prefetch_margin: -1,
            drag_threshold: f64::NAN,
            ..Default::default()
        }
        .sanitized();
        assert_eq!((s.min_zoom, s.max_zoom, s.initial_zoom), (1, 1, 1));
        assert_eq!(s.prefetch_margin, 0);
        assert_eq!(s.drag_threshold, DEFAULT_DRAG_THRESHOLD);
    }

    #[test]
    fn query_server_overrides_url() {
        let s = Settings::default().with_query_overrides("?zoom=3&server=ws://example.org:9000/ws");
        assert_eq!(s.server_url, "ws://example.org:9000/ws");
    }

    #[test]
    fn query_without_server_keeps_url() {
        let s = Settings::default().with_query_overrides("?zoom=3");
        assert_eq!(s.server_url, DEFAULT_SERVER_URL);
    }
}
