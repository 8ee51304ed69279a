//! Transition state machine.
//!
//! TransitionState is a sum type over the four phases of a view update:
//! - Idle: nothing in progress
//! - Leaving: old content is being hidden
//! - Fetching: waiting for the current query's result
//! - Entering: new content is being revealed
//!
//! Transitions are pure: [`TransitionState::step`] returns the next state or
//! an error for an event that does not apply in the current phase.

use crate::model::ViewMode;
use std::fmt;
use thiserror::Error;

// ===== Direction =====

/// Which way the slide animation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Toward higher pages or the default view mode.
    #[default]
    Forward,
    /// Toward lower pages or away from the default view mode.
    Backward,
}

impl Direction {
    /// Direction of a page change. Staying on the same page counts as forward.
    pub fn for_page(current: u32, target: u32) -> Self {
        if target < current {
            Direction::Backward
        } else {
            Direction::Forward
        }
    }

    /// Direction of a view-mode toggle: forward into the default (grid),
    /// backward into list.
    pub fn for_view_mode(target: ViewMode) -> Self {
        if target == ViewMode::default() {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }
}

// ===== Phase =====

/// Phase of a transition, without its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Accepting input, nothing in flight.
    Idle,
    /// Leave cue issued, waiting for it to finish.
    Leaving,
    /// Request in flight.
    Fetching,
    /// New content drawn, enter cue running.
    Entering,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Leaving => "leaving",
            Phase::Fetching => "fetching",
            Phase::Entering => "entering",
        };
        f.write_str(name)
    }
}

// ===== Events =====

/// Something that moves the machine forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEvent {
    /// A query-affecting action arrived while idle.
    Begin(Direction),
    /// The leave cue has been issued and finished.
    LeaveDone,
    /// A current (non-discarded) result arrived and was drawn.
    Settled,
    /// The enter cue finished.
    EnterDone,
}

/// An event that does not apply to the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot apply {event:?} while {phase}")]
pub struct InvalidTransition {
    /// Phase the machine was in.
    pub phase: Phase,
    /// Rejected event.
    pub event: TransitionEvent,
}

// ===== TransitionState =====

/// Transition state machine. Sum type enforces exactly one phase at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransitionState {
    /// Nothing in progress.
    #[default]
    Idle,
    /// Hiding old content.
    Leaving {
        /// Slide direction for this cycle.
        direction: Direction,
    },
    /// Waiting for the result.
    Fetching {
        /// Slide direction for this cycle.
        direction: Direction,
    },
    /// Revealing new content.
    Entering {
        /// Slide direction for this cycle.
        direction: Direction,
    },
}

impl TransitionState {
    /// Current phase.
    pub fn phase(&self) -> Phase {
        match self {
            TransitionState::Idle => Phase::Idle,
            TransitionState::Leaving { .. } => Phase::Leaving,
            TransitionState::Fetching { .. } => Phase::Fetching,
            TransitionState::Entering { .. } => Phase::Entering,
        }
    }

    /// Direction of the running cycle, `None` when idle.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            TransitionState::Idle => None,
            TransitionState::Leaving { direction }
            | TransitionState::Fetching { direction }
            | TransitionState::Entering { direction } => Some(*direction),
        }
    }

    /// Whether the machine is idle.
    pub fn is_idle(&self) -> bool {
        matches!(self, TransitionState::Idle)
    }

    /// Apply an event.
    ///
    /// Idle → Leaving → Fetching → Entering → Idle; anything else is an
    /// [`InvalidTransition`].
    pub fn step(self, event: TransitionEvent) -> Result<TransitionState, InvalidTransition> {
        match (self, event) {
            (TransitionState::Idle, TransitionEvent::Begin(direction)) => {
                Ok(TransitionState::Leaving { direction })
            }
            (TransitionState::Leaving { direction }, TransitionEvent::LeaveDone) => {
                Ok(TransitionState::Fetching { direction })
            }
            (TransitionState::Fetching { direction }, TransitionEvent::Settled) => {
                Ok(TransitionState::Entering { direction })
            }
            (TransitionState::Entering { .. }, TransitionEvent::EnterDone) => {
                Ok(TransitionState::Idle)
            }
            (state, event) => Err(InvalidTransition {
                phase: state.phase(),
                event,
            }),
        }
    }

    /// Same phase, new direction. Used when input arrives mid-cycle.
    pub fn redirect(self, direction: Direction) -> TransitionState {
        match self {
            TransitionState::Idle => TransitionState::Idle,
            TransitionState::Leaving { .. } => TransitionState::Leaving { direction },
            TransitionState::Fetching { .. } => TransitionState::Fetching { direction },
            TransitionState::Entering { .. } => TransitionState::Entering { direction },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_cycle_returns_to_idle() {
        let state = TransitionState::Idle
            .step(TransitionEvent::Begin(Direction::Backward))
            .and_then(|s| s.step(TransitionEvent::LeaveDone))
            .and_then(|s| s.step(TransitionEvent::Settled))
            .and_then(|s| s.step(TransitionEvent::EnterDone))
            .expect("valid cycle");

        assert!(state.is_idle());
    }

    #[test]
    fn direction_is_carried_through_the_cycle() {
        let leaving = TransitionState::Idle
            .step(TransitionEvent::Begin(Direction::Backward))
            .unwrap();
        let fetching = leaving.step(TransitionEvent::LeaveDone).unwrap();
        let entering = fetching.step(TransitionEvent::Settled).unwrap();

        assert_eq!(leaving.direction(), Some(Direction::Backward));
        assert_eq!(fetching.direction(), Some(Direction::Backward));
        assert_eq!(entering.direction(), Some(Direction::Backward));
        assert_eq!(TransitionState::Idle.direction(), None);
    }

    #[test]
    fn begin_outside_idle_is_rejected() {
        let fetching = TransitionState::Fetching {
            direction: Direction::Forward,
        };

        let err = fetching
            .step(TransitionEvent::Begin(Direction::Forward))
            .unwrap_err();

        assert_eq!(err.phase, Phase::Fetching);
    }

    #[test]
    fn settled_while_idle_is_rejected() {
        assert!(TransitionState::Idle
            .step(TransitionEvent::Settled)
            .is_err());
    }

    #[test]
    fn redirect_keeps_phase() {
        let fetching = TransitionState::Fetching {
            direction: Direction::Forward,
        };

        let redirected = fetching.redirect(Direction::Backward);

        assert_eq!(redirected.phase(), Phase::Fetching);
        assert_eq!(redirected.direction(), Some(Direction::Backward));
        assert_eq!(TransitionState::Idle.redirect(Direction::Backward), TransitionState::Idle);
    }

    #[test]
    fn page_direction_compares_target_with_current() {
        assert_eq!(Direction::for_page(2, 3), Direction::Forward);
        assert_eq!(Direction::for_page(3, 2), Direction::Backward);
        assert_eq!(Direction::for_page(2, 2), Direction::Forward);
    }

    #[test]
    fn view_mode_direction_is_forward_into_grid() {
        assert_eq!(Direction::for_view_mode(ViewMode::Grid), Direction::Forward);
        assert_eq!(Direction::for_view_mode(ViewMode::List), Direction::Backward);
    }

    #[test]
    fn invalid_transition_message_names_phase() {
        let err = TransitionState::Idle
            .step(TransitionEvent::EnterDone)
            .unwrap_err();

        assert!(err.to_string().contains("idle"));
    }
}
