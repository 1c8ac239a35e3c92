use serde::{Deserialize, Serialize};
use spincube_common::Color;
use std::path::Path;

/// Errors from loading or validating a [`SceneConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Tunables for the demo scene. Every field has a default, so an empty
/// document is a valid config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Distance of the camera from the origin along +Z.
    pub camera_distance: f32,
    /// Packed `0xRRGGBB`.
    pub cube_color: u32,
    /// Radians added to the x and y rotation every frame.
    pub rotation_step: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_distance: 5.0,
            cube_color: 0x00ff00,
            rotation_step: 0.01,
        }
    }
}

impl SceneConfig {
    /// Read, parse and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        // serde_yaml rejects an empty document for a struct; treat it as all defaults.
        let config: Self = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(text)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason: &str| ConfigError::Invalid {
            field,
            reason: reason.to_string(),
        };
        if self.fov_degrees.is_nan() || self.fov_degrees <= 0.0 || self.fov_degrees >= 180.0 {
            return Err(invalid("fov_degrees", "must be in (0, 180)"));
        }
        if self.near.is_nan() || self.near <= 0.0 {
            return Err(invalid("near", "must be positive"));
        }
        if self.far.is_nan() || self.far <= self.near {
            return Err(invalid("far", "must be greater than near"));
        }
        if !self.camera_distance.is_finite() || self.camera_distance <= 0.0 {
            return Err(invalid("camera_distance", "must be finite and positive"));
        }
        if self.cube_color > 0xff_ffff {
            return Err(invalid("cube_color", "must fit in 0xRRGGBB"));
        }
        if !self.rotation_step.is_finite() || self.rotation_step < 0.0 {
            return Err(invalid("rotation_step", "must be finite and non-negative"));
        }
        Ok(())
    }

    pub fn color(&self) -> Color {
        Color::from_hex(self.cube_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_scene() {
        let c = SceneConfig::default();
        assert_eq!(c.fov_degrees, 75.0);
        assert_eq!(c.near, 0.1);
        assert_eq!(c.far, 1000.0);
        assert_eq!(c.camera_distance, 5.0);
        assert_eq!(c.rotation_step, 0.01);
        assert_eq!(c.color(), Color::GREEN);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(SceneConfig::from_yaml_str("").unwrap(), SceneConfig::default());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let c = SceneConfig::from_yaml_str("fov_degrees: 60\ncube_color: 16711680\n").unwrap();
        assert_eq!(c.fov_degrees, 60.0);
        assert_eq!(c.cube_color, 0xff0000);
        assert_eq!(c.near, 0.1);
    }

    #[test]
    fn unknown_field_rejected() {
        let err = SceneConfig::from_yaml_str("spin: 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn far_must_exceed_near() {
        let err = SceneConfig::from_yaml_str("near: 10\nfar: 5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "far", .. }));
    }

    #[test]
    fn negative_step_rejected() {
        let err = SceneConfig::from_yaml_str("rotation_step: -0.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "rotation_step", .. }));
    }

    #[test]
    fn camera_at_origin_rejected() {
        for text in ["camera_distance: 0\n", "camera_distance: -2\n"] {
            let err = SceneConfig::from_yaml_str(text).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { field: "camera_distance", .. }));
        }
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = SceneConfig::load("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
