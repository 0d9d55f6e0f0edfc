//! Pointer input and its projection into the world

pub mod pointer;

pub use pointer::{PointerProjector, PointerState, RepulsionContext};
