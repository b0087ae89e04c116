//! Application settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_ORDER_ENDPOINT: &str = "https://api.example.com/orders";

/// Upper bound for `background.line_count` read from disk
pub const MAX_LINE_COUNT: usize = 5000;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// UI language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Russian,
}

impl Language {
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Russian => "Русский",
        }
    }

    pub fn all() -> &'static [Language] {
        &[Language::English, Language::Russian]
    }
}

/// Product preview viewport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewSettings {
    /// Fixed viewport edge length in points
    pub size: f32,
    /// Block rotation per frame around Y (radians)
    pub rotation_speed: f32,
    /// Orbit control damping factor (0..1)
    pub damping_factor: f32,
    /// Background color RGB
    pub background_color: [u8; 3],
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            size: 300.0,
            rotation_speed: 0.01,
            damping_factor: 0.25,
            background_color: [0xe0, 0xde, 0xde],
        }
    }
}

/// Hyperspace background settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundSettings {
    /// Show the animated background
    pub visible: bool,
    /// Number of line segments
    pub line_count: usize,
    /// Edge length of the cube the segments are spawned in
    pub spread: f32,
    /// Segment length along the depth axis
    pub segment_length: f32,
    /// Depth advance per frame
    pub speed: f32,
    /// Far endpoint depth past which a segment wraps back
    pub wrap_depth: f32,
    /// Line opacity (0.0 - 1.0)
    pub opacity: f32,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            visible: true,
            line_count: 150,
            spread: 2500.0,
            segment_length: 150.0,
            speed: 10.0,
            wrap_depth: 1000.0,
            opacity: 0.55,
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
    #[serde(default)]
    pub language: Language,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            language: Language::English,
        }
    }
}

/// All application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Order submission URL
    pub order_endpoint: String,
    /// Request timeout for order submission
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub preview: PreviewSettings,
    #[serde(default)]
    pub background: BackgroundSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            order_endpoint: DEFAULT_ORDER_ENDPOINT.to_string(),
            request_timeout_secs: 30,
            preview: PreviewSettings::default(),
            background: BackgroundSettings::default(),
            ui: UiSettings::default(),
        }
    }
}

impl AppSettings {
    /// Platform config path (`<config_dir>/settings.json`)
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "noxmetals", "nox-configurator")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from the platform config dir, or return default if not found
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring settings at {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Read and sanitize a settings file. Out-of-range values are reset to
    /// their defaults with a warning; only I/O and JSON errors fail.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let mut settings: Self = serde_json::from_str(&json)?;
        for field in settings.sanitize() {
            tracing::warn!("Setting {field} in {} is out of range, using default", path.display());
        }
        Ok(settings)
    }

    /// Reset every out-of-range value to its default and return the names of
    /// the fields that were reset
    pub fn sanitize(&mut self) -> Vec<&'static str> {
        let mut reset = Vec::new();
        let defaults = AppSettings::default();

        if !(1..=600).contains(&self.request_timeout_secs) {
            self.request_timeout_secs = defaults.request_timeout_secs;
            reset.push("request_timeout_secs");
        }

        let p = &mut self.preview;
        let dp = &defaults.preview;
        check(&mut p.size, dp.size, |v| (50.0..=2000.0).contains(&v), "preview.size", &mut reset);
        check(&mut p.rotation_speed, dp.rotation_speed, |v| v.abs() <= 1.0, "preview.rotation_speed", &mut reset);
        check(&mut p.damping_factor, dp.damping_factor, |v| (0.0..=1.0).contains(&v), "preview.damping_factor", &mut reset);

        let b = &mut self.background;
        let db = &defaults.background;
        if b.line_count > MAX_LINE_COUNT {
            b.line_count = db.line_count;
            reset.push("background.line_count");
        }
        check(&mut b.spread, db.spread, |v| v > 0.0, "background.spread", &mut reset);
        check(&mut b.segment_length, db.segment_length, |v| v >= 0.0, "background.segment_length", &mut reset);
        check(&mut b.speed, db.speed, |v| v >= 0.0, "background.speed", &mut reset);
        check(&mut b.wrap_depth, db.wrap_depth, |_| true, "background.wrap_depth", &mut reset);
        check(&mut b.opacity, db.opacity, |v| (0.0..=1.0).contains(&v), "background.opacity", &mut reset);

        check(&mut self.ui.font_size, defaults.ui.font_size, |v| (8.0..=32.0).contains(&v), "ui.font_size", &mut reset);

        reset
    }

    /// Save settings to the platform config dir
    pub fn save(&self) {
        if let Some(path) = Self::default_path() {
            if let Err(e) = self.save_to(&path) {
                tracing::warn!("Failed to save settings to {}: {e}", path.display());
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Non-finite values and values failing `in_range` fall back to `default`
fn check(
    value: &mut f32,
    default: f32,
    in_range: impl Fn(f32) -> bool,
    name: &'static str,
    reset: &mut Vec<&'static str>,
) {
    if !value.is_finite() || !in_range(*value) {
        *value = default;
        reset.push(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page() {
        let s = AppSettings::default();
        assert_eq!(s.order_endpoint, DEFAULT_ORDER_ENDPOINT);
        assert_eq!(s.preview.size, 300.0);
        assert_eq!(s.background.line_count, 150);
        assert_eq!(s.background.wrap_depth, 1000.0);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut s = AppSettings::default();
        s.order_endpoint = "http://localhost:9000/orders".into();
        s.ui.language = Language::Russian;
        s.save_to(&path).unwrap();

        let loaded = AppSettings::load_from(&path).unwrap();
        assert_eq!(loaded.order_endpoint, "http://localhost:9000/orders");
        assert_eq!(loaded.ui.language, Language::Russian);
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{ "order_endpoint": "http://x/orders", "request_timeout_secs": 5 }"#,
        )
        .unwrap();

        let loaded = AppSettings::load_from(&path).unwrap();
        assert_eq!(loaded.request_timeout_secs, 5);
        assert_eq!(loaded.preview.rotation_speed, 0.01);
    }

    #[test]
    fn test_out_of_range_values_are_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut s = AppSettings::default();
        s.background.spread = -2500.0;
        s.background.line_count = 10_000_000;
        s.background.opacity = 0.3;
        s.preview.size = 0.0;
        s.request_timeout_secs = 0;
        s.save_to(&path).unwrap();

        let loaded = AppSettings::load_from(&path).unwrap();
        assert_eq!(loaded.background.spread, 2500.0);
        assert_eq!(loaded.background.line_count, 150);
        assert_eq!(loaded.preview.size, 300.0);
        assert_eq!(loaded.request_timeout_secs, 30);
        // In-range values survive
        assert_eq!(loaded.background.opacity, 0.3);
    }

    #[test]
    fn test_sanitize_reports_reset_fields() {
        let mut s = AppSettings::default();
        assert!(s.sanitize().is_empty());

        s.ui.font_size = f32::INFINITY;
        s.preview.damping_factor = 1.5;
        assert_eq!(s.sanitize(), vec!["preview.damping_factor", "ui.font_size"]);
        assert_eq!(s.ui.font_size, 14.0);
        assert_eq!(s.preview.damping_factor, 0.25);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(AppSettings::load_from(&path), Err(SettingsError::Json(_))));
    }
}
