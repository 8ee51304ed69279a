//! In-memory render target.

use super::{RenderError, RenderTarget};
use crate::state::Direction;
use crate::view_state::ViewFrame;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One call received by a [`RecordingTarget`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    /// `leave` was called.
    Leave(Direction),
    /// `draw` was called with this frame.
    Draw(ViewFrame),
    /// `enter` was called.
    Enter(Direction),
}

/// Render target that records every call.
///
/// Clones share the same log, so a caller can keep one clone for inspection
/// while the runtime owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingTarget {
    events: Arc<Mutex<Vec<RenderEvent>>>,
}

impl RecordingTarget {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self) -> MutexGuard<'_, Vec<RenderEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All calls so far, in order.
    pub fn events(&self) -> Vec<RenderEvent> {
        self.log().clone()
    }

    /// Every drawn frame, in order.
    pub fn frames(&self) -> Vec<ViewFrame> {
        self.log()
            .iter()
            .filter_map(|event| match event {
                RenderEvent::Draw(frame) => Some(frame.clone()),
                _ => None,
            })
            .collect()
    }

    /// The most recently drawn frame.
    pub fn last_frame(&self) -> Option<ViewFrame> {
        self.frames().pop()
    }
}

impl RenderTarget for RecordingTarget {
    fn leave(&mut self, direction: Direction) -> Result<(), RenderError> {
        self.log().push(RenderEvent::Leave(direction));
        Ok(())
    }

    fn draw(&mut self, frame: &ViewFrame) -> Result<(), RenderError> {
        self.log().push(RenderEvent::Draw(frame.clone()));
        Ok(())
    }

    fn enter(&mut self, direction: Direction) -> Result<(), RenderError> {
        self.log().push(RenderEvent::Enter(direction));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Columns, QueryState, ViewMode};
    use crate::view_state::{build, render};

    fn frame() -> ViewFrame {
        ViewFrame {
            query: QueryState::default(),
            page: render(&[], ViewMode::Grid, Columns::default()),
            pagination: build(0, 1, 9),
        }
    }

    #[test]
    fn clones_share_the_log() {
        let reader = RecordingTarget::new();
        let mut writer = reader.clone();

        writer.leave(Direction::Forward).unwrap();
        writer.draw(&frame()).unwrap();
        writer.enter(Direction::Forward).unwrap();

        assert_eq!(
            reader.events(),
            vec![
                RenderEvent::Leave(Direction::Forward),
                RenderEvent::Draw(frame()),
                RenderEvent::Enter(Direction::Forward),
            ]
        );
        assert_eq!(reader.last_frame(), Some(frame()));
    }

    #[test]
    fn empty_recorder_has_no_frames() {
        let target = RecordingTarget::new();

        assert!(target.events().is_empty());
        assert_eq!(target.last_frame(), None);
    }
}
