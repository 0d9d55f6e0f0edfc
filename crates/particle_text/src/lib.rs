//! # Particle Text
//!
//! Turns strings into clouds of 3D points that fly in from a scattered
//! start, spring into the shape of the text and shy away from the pointer.
//!
//! ## Features
//!
//! - **Rasterization**: text is drawn off-screen and its ink pixels sampled
//! - **Formation**: spring-damper integration with a decaying spring boost
//! - **Pointer repulsion**: the pointer ray is projected onto a world plane
//! - **Sequential reveal**: points can appear one at a time in glyph order
//! - **Renderer agnostic**: live buffers go to any [`render::PointCloudScene`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use particle_text::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut scene = HeadlessScene::new();
//!     let mut system = ParticleTextSystem::new();
//!     let title = system.create(ConfigPresets::main_title("HELLO"), &mut scene)?;
//!
//!     let camera = Camera::default();
//!     let projector = PointerProjector::new(120.0);
//!     let mut pointer = PointerState::new();
//!     pointer.move_to(0.1, 0.0);
//!
//!     let context = projector.context(&pointer, &camera);
//!     system.update(title, &context, 1.0 / 60.0, &mut scene)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod text;
pub mod cloud;
pub mod physics;
pub mod input;
pub mod render;

mod system;

pub use system::{ParticleError, ParticleResult, ParticleTextHandle, ParticleTextSystem};

#[cfg(test)]
mod tests;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        ParticleError, ParticleResult, ParticleTextHandle, ParticleTextSystem,
        cloud::{Orientation, PointSet, ScatterCenter},
        config::{Config, ConfigError, ConfigPresets, ParticleTextConfig, SceneConfig},
        foundation::{
            math::Vec3,
            time::FrameTimer,
        },
        input::{PointerProjector, PointerState, RepulsionContext},
        physics::{FormationPhase, StepStats},
        render::{Camera, HeadlessScene, PointCloudScene, SceneObjectId},
        text::{load_font_or_fallback, GlyphRenderer, TextRasterizer},
    };
}
