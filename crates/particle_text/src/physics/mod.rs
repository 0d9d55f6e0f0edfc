//! Particle physics
//!
//! - [`FormationState`] tracks how far a point set is through its formation
//! - [`SpringRepulsionIntegrator`] advances every point by one frame
//! - [`SequentialScheduler`] reveals points one at a time for the sequential variant

pub mod formation;
pub mod integrator;
pub mod scheduler;

pub use formation::{FormationPhase, FormationState};
pub use integrator::{repulsion_impulse, SpringRepulsionIntegrator, StepStats};
pub use scheduler::SequentialScheduler;
