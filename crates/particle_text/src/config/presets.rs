//! Ready-made configurations for the portfolio scene's text elements
//!
//! The constants differ between elements on purpose; each element keeps its
//! own tuning rather than sharing one rule.

use super::particle::{ParticleTextConfig, PhysicsConfig, RasterConfig, SequentialConfig};
use crate::cloud::{Orientation, ScatterCenter};

/// Factory for the scene's particle text configurations
pub struct ConfigPresets;

impl ConfigPresets {
    /// Large name title at the top of the landing view
    pub fn main_title(text: impl Into<String>) -> ParticleTextConfig {
        ParticleTextConfig {
            text: text.into(),
            raster: RasterConfig {
                font_size_px: 160.0,
                canvas_width: 1024,
                canvas_height: 256,
                sample_stride: 3,
                alpha_threshold: 128,
            },
            scale: 0.12,
            offset: [0.0, 14.0, 0.0],
            physics: PhysicsConfig {
                base_spring: 0.025,
                extra_spring: 0.06,
                damping: 0.88,
                repulse_radius: 60.0,
                repulse_strength: 10.0,
                repulse_after_progress: 0.7,
            },
            scatter_radius: 60.0,
            formation_duration_ms: 2500.0,
            point_size: 0.7,
            ..Default::default()
        }
    }

    /// Smaller line under the main title
    pub fn subtitle(text: impl Into<String>) -> ParticleTextConfig {
        ParticleTextConfig {
            text: text.into(),
            raster: RasterConfig {
                font_size_px: 72.0,
                canvas_width: 1024,
                canvas_height: 128,
                sample_stride: 2,
                alpha_threshold: 128,
            },
            scale: 0.08,
            offset: [0.0, -2.0, 0.0],
            physics: PhysicsConfig {
                base_spring: 0.03,
                extra_spring: 0.04,
                damping: 0.85,
                repulse_radius: 40.0,
                repulse_strength: 6.0,
                repulse_after_progress: 0.7,
            },
            scatter_radius: 65.0,
            formation_duration_ms: 3000.0,
            point_size: 0.45,
            ..Default::default()
        }
    }

    /// Skills heading revealed point by point
    pub fn skills_title(text: impl Into<String>) -> ParticleTextConfig {
        ParticleTextConfig {
            text: text.into(),
            raster: RasterConfig {
                font_size_px: 120.0,
                canvas_width: 768,
                canvas_height: 192,
                sample_stride: 3,
                alpha_threshold: 128,
            },
            scale: 0.1,
            offset: [0.0, 0.0, -150.0],
            physics: PhysicsConfig {
                base_spring: 0.04,
                extra_spring: 0.0,
                damping: 0.82,
                repulse_radius: 65.0,
                repulse_strength: 35.0,
                repulse_after_progress: 0.7,
            },
            scatter_radius: 0.0,
            scatter_center: ScatterCenter::Home,
            formation_duration_ms: 0.0,
            point_size: 0.6,
            sequential: Some(SequentialConfig {
                point_spawn_interval: 0.0008,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    /// One letter dropping onto the floor of the experience section
    pub fn falling_letter(letter: char) -> ParticleTextConfig {
        ParticleTextConfig {
            text: letter.to_string(),
            raster: RasterConfig {
                font_size_px: 120.0,
                canvas_width: 160,
                canvas_height: 160,
                sample_stride: 3,
                alpha_threshold: 128,
            },
            scale: 0.08,
            orientation: Orientation::GroundPlane,
            depth: -30.0,
            physics: PhysicsConfig {
                base_spring: 0.02,
                extra_spring: 0.03,
                damping: 0.92,
                repulse_radius: 30.0,
                repulse_strength: 8.0,
                repulse_after_progress: 0.7,
            },
            scatter_radius: 20.0,
            scatter_center: ScatterCenter::Home,
            formation_duration_ms: 1500.0,
            point_size: 0.5,
            ..Default::default()
        }
    }

    /// Label shown while hovering an experience timeline entry
    pub fn hover_label(text: impl Into<String>) -> ParticleTextConfig {
        ParticleTextConfig {
            text: text.into(),
            raster: RasterConfig {
                font_size_px: 48.0,
                canvas_width: 512,
                canvas_height: 64,
                sample_stride: 2,
                alpha_threshold: 128,
            },
            scale: 0.06,
            physics: PhysicsConfig {
                base_spring: 0.05,
                extra_spring: 0.0,
                damping: 0.8,
                repulse_radius: 25.0,
                repulse_strength: 4.0,
                repulse_after_progress: 0.7,
            },
            scatter_radius: 0.0,
            scatter_center: ScatterCenter::Home,
            formation_duration_ms: 0.0,
            point_size: 0.35,
            sequential: Some(SequentialConfig {
                point_spawn_interval: 0.0003,
                spawn_jitter: 0.5,
                spawn_rise: 1.5,
                pulse_amplitude: 0.1,
                pulse_speed: 5.0,
            }),
            ..Default::default()
        }
    }
}
