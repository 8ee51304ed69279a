//! Render targets (impure shell).
//!
//! The controller never touches a UI toolkit. It hands [`ViewFrame`]s and
//! leave/enter cues to a [`RenderTarget`]:
//! - [`RecordingTarget`]: in-memory, for headless use and tests
//! - [`TerminalTarget`]: draws frames with ratatui on any backend

pub mod constants;
pub mod recording;
pub mod terminal;

pub use recording::{RecordingTarget, RenderEvent};
pub use terminal::TerminalTarget;

use crate::state::Direction;
use crate::view_state::ViewFrame;
use std::io;
use thiserror::Error;

/// Errors raised by a render target.
#[derive(Debug, Error)]
pub enum RenderError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Destination for controller output.
///
/// Calls arrive in cycle order: `leave`, then `draw`, then `enter`. With
/// animations disabled only `draw` is called.
pub trait RenderTarget: Send {
    /// Hide the current content, sliding in `direction`.
    fn leave(&mut self, direction: Direction) -> Result<(), RenderError>;

    /// Replace the content with `frame`.
    fn draw(&mut self, frame: &ViewFrame) -> Result<(), RenderError>;

    /// Reveal the content drawn last, sliding in `direction`.
    fn enter(&mut self, direction: Direction) -> Result<(), RenderError>;
}
