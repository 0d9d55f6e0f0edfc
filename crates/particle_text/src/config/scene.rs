//! Scene-level configuration: camera, pointer plane and the titles to build

use serde::{Deserialize, Serialize};

use super::particle::ParticleTextConfig;
use super::presets::ConfigPresets;
use super::{Config, ConfigError};
use crate::foundation::math::Vec3;
use crate::render::Camera;

/// Perspective camera description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera position in world space
    pub position: [f32; 3],
    /// Look-at target in world space
    pub target: [f32; 3],
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Viewport width / height
    pub aspect: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 120.0],
            target: [0.0, 0.0, 0.0],
            fov_degrees: 60.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 2000.0,
        }
    }
}

impl CameraConfig {
    /// Build the camera this configuration describes
    pub fn to_camera(&self) -> Camera {
        let mut camera = Camera::perspective(
            Vec3::from(self.position),
            self.fov_degrees,
            self.aspect,
            self.near,
            self.far,
        );
        camera.set_target(Vec3::from(self.target));
        camera
    }
}

/// A whole scene's worth of particle text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Camera the pointer is projected through
    pub camera: CameraConfig,
    /// Distance in front of the camera of the pointer plane
    pub pointer_plane_distance: f32,
    /// Point sets to create
    pub titles: Vec<ParticleTextConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            pointer_plane_distance: 120.0,
            titles: vec![
                ConfigPresets::main_title("PORTFOLIO"),
                ConfigPresets::subtitle("Creative Developer"),
                ConfigPresets::skills_title("SKILLS"),
            ],
        }
    }
}

impl Config for SceneConfig {}

impl SceneConfig {
    /// Validate the camera, the pointer plane and every title
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.pointer_plane_distance > 0.0) {
            return Err(ConfigError::invalid("pointer_plane_distance", "distance must be positive"));
        }
        if !(self.camera.near > 0.0 && self.camera.far > self.camera.near) {
            return Err(ConfigError::invalid("camera", "require 0 < near < far"));
        }
        if !(self.camera.aspect > 0.0) {
            return Err(ConfigError::invalid("camera.aspect", "aspect must be positive"));
        }
        self.titles.iter().try_for_each(ParticleTextConfig::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scene_is_valid() {
        assert!(SceneConfig::default().validate().is_ok());
    }

    #[test]
    fn test_scene_ron_round_trip() {
        let scene = SceneConfig::default();
        let text = ron::ser::to_string_pretty(&scene, ron::ser::PrettyConfig::default()).unwrap();
        let parsed = SceneConfig::from_str_with_format(&text, "scene.ron").unwrap();
        assert_eq!(parsed, scene);
    }

    #[test]
    fn test_bad_title_fails_scene_validation() {
        let mut scene = SceneConfig::default();
        scene.titles[0].physics.damping = 1.0;
        assert!(scene.validate().is_err());
    }
}
