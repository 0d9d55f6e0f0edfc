//! Per-instance configuration for one particle text point set

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::cloud::{Orientation, ScatterCenter};
use crate::foundation::math::Vec3;

/// Off-screen raster parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterConfig {
    /// Requested font size in pixels (shrunk to fit long strings)
    pub font_size_px: f32,
    /// Canvas width in pixels
    pub canvas_width: u32,
    /// Canvas height in pixels
    pub canvas_height: u32,
    /// Sample every Nth pixel in each axis
    pub sample_stride: u32,
    /// Alpha a pixel must exceed to count as ink
    pub alpha_threshold: u8,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            font_size_px: 120.0,
            canvas_width: 1024,
            canvas_height: 256,
            sample_stride: 3,
            alpha_threshold: 128,
        }
    }
}

/// Spring, damping and repulsion constants for the integrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Steady-state spring constant
    pub base_spring: f32,
    /// Extra spring applied at formation start, decaying to zero
    pub extra_spring: f32,
    /// Velocity multiplier per step, in (0, 1)
    pub damping: f32,
    /// Pointer influence radius in world units
    pub repulse_radius: f32,
    /// Peak repulsion impulse per step
    pub repulse_strength: f32,
    /// Formation progress after which repulsion is allowed
    pub repulse_after_progress: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            base_spring: 0.025,
            extra_spring: 0.05,
            damping: 0.45,
            repulse_radius: 60.0,
            repulse_strength: 10.0,
            repulse_after_progress: 0.7,
        }
    }
}

/// Settings for the point-by-point reveal used by the skills title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequentialConfig {
    /// Seconds between two spawned points
    pub point_spawn_interval: f32,
    /// Random jitter radius applied around home on spawn
    pub spawn_jitter: f32,
    /// Upward offset applied on spawn
    pub spawn_rise: f32,
    /// Relative size swing of the settled pulse
    pub pulse_amplitude: f32,
    /// Pulse angular speed in radians per second
    pub pulse_speed: f32,
}

impl Default for SequentialConfig {
    fn default() -> Self {
        Self {
            point_spawn_interval: 0.0008,
            spawn_jitter: 1.5,
            spawn_rise: 4.0,
            pulse_amplitude: 0.25,
            pulse_speed: 3.0,
        }
    }
}

/// Full configuration of one particle text instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleTextConfig {
    /// Text to form
    pub text: String,
    /// Rasterization parameters
    pub raster: RasterConfig,
    /// World units per raster pixel
    pub scale: f32,
    /// World offset added to every home position
    pub offset: [f32; 3],
    /// Fixed depth of the text plane before the offset
    pub depth: f32,
    /// Whether the text stands upright or lies on the ground plane
    pub orientation: Orientation,
    /// Integrator constants
    pub physics: PhysicsConfig,
    /// Radius of the initial scatter sphere
    pub scatter_radius: f32,
    /// What the scatter sphere is centred on
    pub scatter_center: ScatterCenter,
    /// Duration of the spring boost, in milliseconds
    pub formation_duration_ms: f32,
    /// Rendered point size once visible
    pub point_size: f32,
    /// Point-by-point reveal; `None` forms all points at once
    pub sequential: Option<SequentialConfig>,
    /// RNG seed for scatter and jitter; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for ParticleTextConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            raster: RasterConfig::default(),
            scale: 0.1,
            offset: [0.0, 0.0, 0.0],
            depth: 0.0,
            orientation: Orientation::Billboard,
            physics: PhysicsConfig::default(),
            scatter_radius: 60.0,
            scatter_center: ScatterCenter::ConfigOffset,
            formation_duration_ms: 2000.0,
            point_size: 0.6,
            sequential: None,
            seed: None,
        }
    }
}

impl Config for ParticleTextConfig {}

impl ParticleTextConfig {
    /// Create a default configuration for `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Replace the text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the world offset
    pub fn with_offset(mut self, x: f32, y: f32, z: f32) -> Self {
        self.offset = [x, y, z];
        self
    }

    /// Set the world scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Fix the RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable the point-by-point reveal
    pub fn with_sequential(mut self, sequential: SequentialConfig) -> Self {
        self.sequential = Some(sequential);
        self
    }

    /// Offset as a vector
    pub fn offset_vec(&self) -> Vec3 {
        Vec3::from(self.offset)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let raster = &self.raster;
        if raster.canvas_width == 0 || raster.canvas_height == 0 {
            return Err(ConfigError::invalid("raster.canvas", "canvas must be at least 1x1"));
        }
        if raster.sample_stride == 0 {
            return Err(ConfigError::invalid("raster.sample_stride", "stride must be at least 1"));
        }
        if !(raster.font_size_px > 0.0) {
            return Err(ConfigError::invalid("raster.font_size_px", "font size must be positive"));
        }
        if !self.scale.is_finite() {
            return Err(ConfigError::invalid("scale", "scale must be finite"));
        }

        let physics = &self.physics;
        if !(physics.damping > 0.0 && physics.damping < 1.0) {
            return Err(ConfigError::invalid("physics.damping", format!("{} is outside (0, 1)", physics.damping)));
        }
        if !(physics.repulse_radius > 0.0) {
            return Err(ConfigError::invalid("physics.repulse_radius", "radius must be positive"));
        }
        if physics.base_spring < 0.0 || physics.extra_spring < 0.0 {
            return Err(ConfigError::invalid("physics.spring", "spring terms must not be negative"));
        }
        if !(0.0..=1.0).contains(&physics.repulse_after_progress) {
            return Err(ConfigError::invalid("physics.repulse_after_progress", "must lie in [0, 1]"));
        }

        if self.scatter_radius < 0.0 {
            return Err(ConfigError::invalid("scatter_radius", "radius must not be negative"));
        }
        if self.formation_duration_ms < 0.0 {
            return Err(ConfigError::invalid("formation_duration_ms", "duration must not be negative"));
        }
        if let Some(sequential) = &self.sequential {
            if !(sequential.point_spawn_interval > 0.0) {
                return Err(ConfigError::invalid("sequential.point_spawn_interval", "interval must be positive"));
            }
        }

        Ok(())
    }
}
