//! Internal test modules - whitebox tests with crate access
//!
//! Scenario tests drive a real [`crate::runtime::ControllerRuntime`] over a
//! scripted transport under tokio's paused clock, so response latencies and
//! cue timers are deterministic.
