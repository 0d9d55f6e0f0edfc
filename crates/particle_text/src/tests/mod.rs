//! End-to-end scenarios driving whole particle text instances
//!
//! Unit tests live next to their modules; these exercise the pieces together
//! through [`crate::ParticleTextSystem`] and a headless scene.

mod formation_scenarios;
mod pointer_scenarios;
