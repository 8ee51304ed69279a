//! Controller state machine (pure).
//!
//! All state transitions are pure functions testable without a runtime.

pub mod controller;
pub mod transition;

// Re-export for convenience
pub use controller::{Controller, ControllerConfig, Effect, Input};
pub use transition::{Direction, InvalidTransition, Phase, TransitionEvent, TransitionState};
