//! Lab settings and preferences
//!
//! Quality preset plus the control values each simulator starts with.
//! Persisted in LocalStorage on the web; read from the JSON file named by
//! `PHYSICS_LAB_SETTINGS` on native.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::{ForceControls, ParamError, ProjectileControls};

/// Settings could not be loaded
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid control value: {0}")]
    Invalid(#[from] ParamError),
}

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Triangles per full circle
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 16,
            QualityPreset::Medium => 32,
            QualityPreset::High => 64,
        }
    }

    /// Whether trails fade toward their oldest sample
    pub fn trail_fade(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Lab settings/preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Initial controls of the force/mass simulator
    pub force: ForceControls,
    /// Initial controls of the projectile simulator
    pub projectile: ProjectileControls,
}

impl Settings {
    /// Parse settings, rejecting control values outside their slider ranges
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.force.validate()?;
        settings.projectile.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "physics_lab_settings";

    /// Environment variable naming a settings file (native only)
    pub const ENV_VAR: &'static str = "PHYSICS_LAB_SETTINGS";

    /// Read settings from a JSON file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Settings not saved: {}", e),
            }
        }
    }

    /// Load settings from the file named by [`Settings::ENV_VAR`], if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(Self::ENV_VAR) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_file(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.to_string_lossy());
                settings
            }
            Err(e) => {
                log::warn!(
                    "Ignoring settings file {}: {}",
                    path.to_string_lossy(),
                    e
                );
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_parse() {
        assert_eq!(QualityPreset::parse("HIGH"), Some(QualityPreset::High));
        assert_eq!(QualityPreset::parse("med"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::parse("ultra"), None);
        assert_eq!(QualityPreset::Low.as_str(), "Low");
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.quality = QualityPreset::High;
        settings.force.set_force(25.0);
        settings.projectile.set_angle(60.0);
        settings.projectile.show_grid = false;

        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "quality": "Low" }"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::Low);
        assert_eq!(settings.force, ForceControls::default());
        assert_eq!(settings.projectile, ProjectileControls::default());
    }

    #[test]
    fn test_rejects_out_of_range_controls() {
        let json = r#"{ "force": { "force": 500.0, "mass": 10.0 } }"#;
        assert!(matches!(
            Settings::from_json(json),
            Err(SettingsError::Invalid(ParamError::OutOfRange { name: "force", .. }))
        ));
    }

    #[test]
    fn test_rejects_controls_between_slider_steps() {
        let json = r#"{ "force": { "force": 52.0, "mass": 10.0 } }"#;
        assert!(matches!(
            Settings::from_json(json),
            Err(SettingsError::Invalid(ParamError::OffStep { name: "force", .. }))
        ));

        let json = r#"{ "projectile": { "angle_deg": 45.37, "gravity": 9.8123 } }"#;
        assert!(matches!(
            Settings::from_json(json),
            Err(SettingsError::Invalid(ParamError::OffStep { name: "angle", .. }))
        ));
    }

    #[test]
    fn test_rejects_zero_mass() {
        let json = r#"{ "force": { "force": 10.0, "mass": 0.0 } }"#;
        assert!(matches!(Settings::from_json(json), Err(SettingsError::Json(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Settings::from_file("/nonexistent/physics-lab/settings.json");
        assert!(matches!(result, Err(SettingsError::Io(_))));
    }
}
