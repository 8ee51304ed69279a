//! Event loop (impure shell).
//!
//! [`ControllerRuntime::run`] is a single tokio task that waits on three
//! sources at once: commands from [`ControllerHandle`]s, in-flight fetches,
//! and the running leave/enter cue timer. Each wakeup is fed to the pure
//! [`Controller`], and the returned effects are carried out against the
//! [`RenderTarget`] before the loop waits again.

use crate::fetch::{FetchOrchestrator, FetchOutcome, SharedTransport};
use crate::model::{Columns, ControllerError, Filter, PerPage, ViewMode};
use crate::state::{Controller, ControllerConfig, Direction, Effect, Input};
use crate::view::{RenderError, RenderTarget};
use std::future::pending;
use std::pin::Pin;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tokio::time::{sleep, Sleep};
use tracing::{debug, info, warn};

/// Default leave cue duration.
pub const DEFAULT_LEAVE: Duration = Duration::from_millis(200);

/// Default enter cue duration.
pub const DEFAULT_ENTER: Duration = Duration::from_millis(300);

/// Default delay between successive node reveals.
pub const DEFAULT_STAGGER: Duration = Duration::from_millis(50);

/// Cue durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// How long the leave cue runs before the fetch is issued.
    pub leave: Duration,
    /// Base duration of the enter cue.
    pub enter: Duration,
    /// Extra enter time per node after the first.
    pub stagger_step: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            leave: DEFAULT_LEAVE,
            enter: DEFAULT_ENTER,
            stagger_step: DEFAULT_STAGGER,
        }
    }
}

impl Timing {
    /// Enter cue length for a page of `nodes` nodes: the base duration plus
    /// one stagger step for every node revealed after the first.
    pub fn enter_for(&self, nodes: usize) -> Duration {
        let extra = u32::try_from(nodes.saturating_sub(1)).unwrap_or(u32::MAX);
        self.enter + self.stagger_step.saturating_mul(extra)
    }
}

/// Message from a handle to the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Input(Input),
    Shutdown,
}

/// Input entry points.
///
/// Cheap to clone. Every setter validates its argument before anything is
/// sent, so a rejected input never reaches the controller.
#[derive(Debug, Clone)]
pub struct ControllerHandle {
    commands: mpsc::UnboundedSender<Command>,
    tag_filter_enabled: bool,
}

impl ControllerHandle {
    fn send(&self, command: Command) -> Result<(), ControllerError> {
        self.commands
            .send(command)
            .map_err(|_| ControllerError::Closed)
    }

    fn input(&self, input: Input) -> Result<(), ControllerError> {
        self.send(Command::Input(input))
    }

    /// Replace the search text.
    pub fn set_search(&self, text: impl Into<String>) -> Result<(), ControllerError> {
        self.input(Input::Search(text.into()))
    }

    /// Empty the search text.
    pub fn clear_search(&self) -> Result<(), ControllerError> {
        self.set_search("")
    }

    /// Select a category; `"all"` clears the filter.
    pub fn set_category(&self, selector: &str) -> Result<(), ControllerError> {
        self.input(Input::Category(Filter::from_selector(selector)))
    }

    /// Select a tag; `"all"` clears the filter.
    ///
    /// # Errors
    ///
    /// [`ControllerError::TagFilterDisabled`] when the controller was
    /// configured without tag filtering.
    pub fn set_tag(&self, selector: &str) -> Result<(), ControllerError> {
        if !self.tag_filter_enabled {
            warn!(selector, "tag input rejected: tag filtering disabled");
            return Err(ControllerError::TagFilterDisabled);
        }
        self.input(Input::Tag(Filter::from_selector(selector)))
    }

    /// Jump to a page. Page 0 is treated as page 1.
    pub fn set_page(&self, page: u32) -> Result<(), ControllerError> {
        self.input(Input::Page(page))
    }

    /// Change the page size.
    ///
    /// # Errors
    ///
    /// [`ControllerError::InvalidPerPage`] for sizes the selector does not offer.
    pub fn set_per_page(&self, per_page: u32) -> Result<(), ControllerError> {
        let per_page =
            PerPage::new(per_page).inspect_err(|err| warn!(error = %err, "rejected input"))?;
        self.input(Input::PerPage(per_page))
    }

    /// Switch between grid and list.
    pub fn set_view_mode(&self, view_mode: ViewMode) -> Result<(), ControllerError> {
        self.input(Input::ViewMode(view_mode))
    }

    /// Change the grid column count.
    ///
    /// # Errors
    ///
    /// [`ControllerError::InvalidColumns`] below the minimum column count.
    pub fn set_columns(&self, columns: u8) -> Result<(), ControllerError> {
        let columns =
            Columns::new(columns).inspect_err(|err| warn!(error = %err, "rejected input"))?;
        self.input(Input::Columns(columns))
    }

    /// Ask the runtime to stop. In-flight fetches are abandoned.
    pub fn shutdown(&self) -> Result<(), ControllerError> {
        self.send(Command::Shutdown)
    }
}

/// Which cue the timer is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cue {
    Leave,
    Enter,
}

/// One wakeup of the event loop.
enum Wakeup {
    Command(Option<Command>),
    Fetched(Result<FetchOutcome, JoinError>),
    CueDone,
}

/// Owns the controller, the orchestrator and the render target.
pub struct ControllerRuntime<R>
where
    R: RenderTarget,
{
    controller: Controller,
    orchestrator: FetchOrchestrator,
    target: R,
    timing: Timing,
    commands: mpsc::UnboundedReceiver<Command>,
    in_flight: JoinSet<FetchOutcome>,
    timer: Option<Pin<Box<Sleep>>>,
    cue: Option<Cue>,
}

impl<R> ControllerRuntime<R>
where
    R: RenderTarget,
{
    /// Build a runtime and the handle that feeds it.
    ///
    /// Nothing happens until [`ControllerRuntime::run`] is awaited.
    pub fn new(
        config: ControllerConfig,
        transport: SharedTransport,
        target: R,
        timing: Timing,
    ) -> (ControllerHandle, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = ControllerHandle {
            commands: tx,
            tag_filter_enabled: config.tag_filter_enabled,
        };
        let runtime = Self {
            controller: Controller::new(config),
            orchestrator: FetchOrchestrator::new(transport),
            target,
            timing,
            commands: rx,
            in_flight: JoinSet::new(),
            timer: None,
            cue: None,
        };
        (handle, runtime)
    }

    /// Load the initial page, then process inputs until shut down.
    ///
    /// Returns when [`ControllerHandle::shutdown`] is called or every handle
    /// has been dropped.
    ///
    /// # Errors
    ///
    /// Stops at the first [`RenderError`] raised by the render target.
    pub async fn run(mut self) -> Result<(), RenderError> {
        info!(query = ?self.controller.query(), "controller started");
        let effects = self.controller.start();
        self.execute(effects)?;

        loop {
            let wakeup = tokio::select! {
                command = self.commands.recv() => Wakeup::Command(command),
                Some(joined) = self.in_flight.join_next(), if !self.in_flight.is_empty() => {
                    Wakeup::Fetched(joined)
                }
                () = wait(&mut self.timer) => Wakeup::CueDone,
            };

            let effects = match wakeup {
                Wakeup::Command(Some(Command::Input(input))) => {
                    match self.controller.apply(input) {
                        Ok(effects) => effects,
                        Err(err) => {
                            warn!(error = %err, "rejected input");
                            Vec::new()
                        }
                    }
                }
                Wakeup::Command(Some(Command::Shutdown)) | Wakeup::Command(None) => break,
                Wakeup::Fetched(Ok(FetchOutcome::Delivered { query, result })) => {
                    self.controller.fetch_settled(query, result)
                }
                Wakeup::Fetched(Ok(FetchOutcome::Superseded)) => Vec::new(),
                Wakeup::Fetched(Err(err)) => {
                    warn!(error = %err, "fetch task did not complete");
                    Vec::new()
                }
                Wakeup::CueDone => {
                    self.timer = None;
                    match self.cue.take() {
                        Some(Cue::Leave) => self.controller.leave_finished(),
                        Some(Cue::Enter) => self.controller.enter_finished(),
                        None => Vec::new(),
                    }
                }
            };
            self.execute(effects)?;
        }

        info!("controller stopped");
        Ok(())
    }

    fn execute(&mut self, effects: Vec<Effect>) -> Result<(), RenderError> {
        for effect in effects {
            match effect {
                Effect::Leave(direction) => {
                    self.target.leave(direction)?;
                    self.start_cue(Cue::Leave, self.timing.leave, direction);
                }
                Effect::Fetch(query) => {
                    let pending = self.orchestrator.issue(query);
                    self.in_flight.spawn(pending);
                }
                Effect::Draw(frame) => self.target.draw(&frame)?,
                Effect::Enter(direction) => {
                    self.target.enter(direction)?;
                    let nodes = self
                        .controller
                        .shown()
                        .map_or(0, |frame| frame.page.nodes.len());
                    self.start_cue(Cue::Enter, self.timing.enter_for(nodes), direction);
                }
            }
        }
        Ok(())
    }

    fn start_cue(&mut self, cue: Cue, duration: Duration, direction: Direction) {
        debug!(?cue, ?direction, ?duration, "cue started");
        self.cue = Some(cue);
        self.timer = Some(Box::pin(sleep(duration)));
    }
}

/// Resolve when the timer fires; never resolve without one.
async fn wait(timer: &mut Option<Pin<Box<Sleep>>>) {
    match timer {
        Some(sleep) => sleep.as_mut().await,
        None => pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_grows_one_step_per_extra_node() {
        let timing = Timing::default();

        assert_eq!(timing.enter_for(0), DEFAULT_ENTER);
        assert_eq!(timing.enter_for(1), DEFAULT_ENTER);
        assert_eq!(timing.enter_for(4), DEFAULT_ENTER + DEFAULT_STAGGER * 3);
    }

    #[test]
    fn zero_stagger_keeps_enter_flat() {
        let timing = Timing {
            stagger_step: Duration::ZERO,
            ..Timing::default()
        };

        assert_eq!(timing.enter_for(24), timing.enter);
    }
}
