//! Editor configuration.

use crate::error::{EditorError, EditorResult};
use crate::routing::RoutingTolerances;
use crate::shapes::ShapeStyle;
use crate::snap::Grid;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User-tunable editor settings. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub grid: Grid,
    pub routing: RoutingTolerances,
    /// Style applied to newly committed wires.
    pub wire_style: ShapeStyle,
    /// A commit click that lands on a pin finishes the wire.
    pub finish_on_pin: bool,
    /// Selection click tolerance in screen pixels.
    pub hit_tolerance_px: f64,
    pub via_diameter: f64,
    pub via_drill: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            grid: Grid::default(),
            routing: RoutingTolerances::default(),
            wire_style: ShapeStyle::wire(),
            finish_on_pin: true,
            hit_tolerance_px: 5.0,
            via_diameter: 0.6,
            via_drill: 0.3,
        }
    }
}

impl EditorSettings {
    /// Parse and validate settings JSON.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> EditorResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> EditorResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::debug!("saved settings to {}", path.display());
        Ok(())
    }

    /// Check every numeric field for a usable value.
    pub fn validate(&self) -> EditorResult<()> {
        if !self.grid.size.is_finite() || self.grid.size <= 0.0 {
            return Err(EditorError::InvalidGridSize(self.grid.size));
        }

        let r = &self.routing;
        let non_negative = [
            ("axis_deadzone", r.axis_deadzone),
            ("orthogonal_clamp", r.orthogonal_clamp),
            ("pin_snap", r.pin_snap),
            ("waypoint_nudge", r.waypoint_nudge),
            ("corner_epsilon", r.corner_epsilon),
            ("hit_tolerance_px", self.hit_tolerance_px),
            ("wire_style.line_width", self.wire_style.line_width),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(EditorError::InvalidSetting(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if !r.pin_detection_radius.is_finite() || r.pin_detection_radius <= 0.0 {
            return Err(EditorError::InvalidSetting(format!(
                "pin_detection_radius must be positive, got {}",
                r.pin_detection_radius
            )));
        }
        let drill_fits = self.via_drill > 0.0 && self.via_drill < self.via_diameter;
        if !drill_fits || !self.via_diameter.is_finite() {
            return Err(EditorError::InvalidSetting(format!(
                "via drill {} must be positive and smaller than diameter {}",
                self.via_drill, self.via_diameter
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = EditorSettings::default();
        assert!(settings.validate().is_ok());
        assert!(settings.finish_on_pin);
        assert!((settings.grid.size - 1.27).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = EditorSettings::from_json(r#"{"finish_on_pin": false}"#).unwrap();
        assert!(!settings.finish_on_pin);
        assert_eq!(settings.routing, RoutingTolerances::default());
    }

    #[test]
    fn test_rejects_bad_grid() {
        let json = r#"{"grid": {"size": 0.0, "enabled": true}}"#;
        assert!(matches!(
            EditorSettings::from_json(json),
            Err(EditorError::InvalidGridSize(_))
        ));
    }

    #[test]
    fn test_rejects_negative_tolerance() {
        let json = r#"{"routing": {"pin_snap": -1.0}}"#;
        assert!(matches!(
            EditorSettings::from_json(json),
            Err(EditorError::InvalidSetting(_))
        ));
    }

    #[test]
    fn test_rejects_drill_larger_than_via() {
        let settings = EditorSettings {
            via_drill: 1.0,
            ..EditorSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            EditorSettings::from_json("{not json"),
            Err(EditorError::Serialization(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = EditorSettings::default();
        settings.grid = Grid::new(2.54);
        settings.routing.pin_snap = 0.5;
        settings.save(&path).unwrap();

        let loaded = EditorSettings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            EditorSettings::load(dir.path().join("missing.json")),
            Err(EditorError::Io(_))
        ));
    }
}
