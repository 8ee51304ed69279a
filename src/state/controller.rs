//! Controller core (pure).
//!
//! Owns the desired [`QueryState`] and the [`TransitionState`], and turns
//! inputs and notifications into [`Effect`]s for the runtime to carry out.
//! Nothing here awaits or performs I/O, so every sequencing rule is testable
//! by feeding events and inspecting the returned effects.
//!
//! Input is never blocked. While a cycle is running, a new input replaces the
//! desired query and:
//! - Leaving: the upcoming fetch uses the newest query
//! - Fetching: a new fetch is issued at once and supersedes the old one
//! - Entering: a restart is queued and runs when entry completes

use super::transition::{Direction, Phase, TransitionEvent, TransitionState};
use crate::model::{
    Columns, ControllerError, FetchError, Filter, PageResult, PerPage, QueryPatch, QueryState,
    ViewMode,
};
use crate::view_state::{build, Renderer, ViewFrame};
use tracing::{debug, info, warn};

// ===== Input =====

/// A validated user action, one per input entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// New search text.
    Search(String),
    /// New category selection.
    Category(Filter),
    /// New tag selection.
    Tag(Filter),
    /// Jump to a page.
    Page(u32),
    /// New page size.
    PerPage(PerPage),
    /// Grid or list.
    ViewMode(ViewMode),
    /// New grid column count.
    Columns(Columns),
}

// ===== Effect =====

/// Work the runtime must perform, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue the leave cue, then report [`Controller::leave_finished`].
    Leave(Direction),
    /// Issue a fetch for this snapshot, then report the delivered result via
    /// [`Controller::fetch_settled`].
    Fetch(QueryState),
    /// Draw this frame.
    Draw(ViewFrame),
    /// Issue the enter cue, then report [`Controller::enter_finished`].
    Enter(Direction),
}

// ===== ControllerConfig =====

/// Capability flags and starting values for one controller instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Run leave/enter cues. When false both are skipped.
    pub animations: bool,
    /// Whether the tag filter exists.
    pub tag_filter_enabled: bool,
    /// Starting page size.
    pub per_page: PerPage,
    /// Starting view mode.
    pub view_mode: ViewMode,
    /// Starting column count.
    pub columns: Columns,
    /// Node builder with asset references.
    pub renderer: Renderer,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            animations: true,
            tag_filter_enabled: false,
            per_page: PerPage::default(),
            view_mode: ViewMode::default(),
            columns: Columns::default(),
            renderer: Renderer::default(),
        }
    }
}

impl ControllerConfig {
    /// Snapshot a new controller starts from.
    pub fn initial_query(&self) -> QueryState {
        QueryState::initial(
            self.tag_filter_enabled,
            self.per_page,
            self.view_mode,
            self.columns,
        )
    }
}

// ===== Controller =====

/// Single owner of the view parameters and the transition sequence.
#[derive(Debug, Clone)]
pub struct Controller {
    animations: bool,
    tag_filter_enabled: bool,
    renderer: Renderer,
    desired: QueryState,
    transition: TransitionState,
    restart: Option<Direction>,
    shown: Option<ViewFrame>,
}

impl Controller {
    /// Create an idle controller holding the configured initial query.
    pub fn new(config: ControllerConfig) -> Self {
        let desired = config.initial_query();
        Self {
            animations: config.animations,
            tag_filter_enabled: config.tag_filter_enabled,
            renderer: config.renderer,
            desired,
            transition: TransitionState::Idle,
            restart: None,
            shown: None,
        }
    }

    /// The most recently requested snapshot.
    pub fn query(&self) -> &QueryState {
        &self.desired
    }

    /// Current transition phase.
    pub fn phase(&self) -> Phase {
        self.transition.phase()
    }

    /// Full transition state, including direction.
    pub fn transition(&self) -> TransitionState {
        self.transition
    }

    /// Last frame handed to the render target.
    pub fn shown(&self) -> Option<&ViewFrame> {
        self.shown.as_ref()
    }

    /// Initial load for the starting query.
    pub fn start(&mut self) -> Vec<Effect> {
        match self.transition {
            TransitionState::Idle => self.begin_cycle(Direction::Forward),
            _ => Vec::new(),
        }
    }

    /// Apply a user action.
    ///
    /// # Errors
    ///
    /// [`ControllerError::TagFilterDisabled`] for a tag input on a controller
    /// configured without tag filtering. Nothing changes in that case.
    pub fn apply(&mut self, input: Input) -> Result<Vec<Effect>, ControllerError> {
        let (patch, direction) = self.resolve(input)?;
        let next = self.desired.update(patch);

        if next == self.desired {
            debug!(phase = %self.phase(), "input left query unchanged");
            return Ok(Vec::new());
        }
        self.desired = next;

        let effects = match self.transition {
            TransitionState::Idle => self.begin_cycle(direction),
            TransitionState::Leaving { .. } => {
                self.transition = self.transition.redirect(direction);
                Vec::new()
            }
            TransitionState::Fetching { .. } => {
                self.transition = self.transition.redirect(direction);
                vec![Effect::Fetch(self.desired.clone())]
            }
            TransitionState::Entering { .. } => {
                self.restart = Some(direction);
                Vec::new()
            }
        };
        Ok(effects)
    }

    /// The leave cue finished; fetch the newest query.
    pub fn leave_finished(&mut self) -> Vec<Effect> {
        if !self.advance(TransitionEvent::LeaveDone) {
            return Vec::new();
        }
        vec![Effect::Fetch(self.desired.clone())]
    }

    /// A request was delivered (not superseded).
    ///
    /// Draws the result (or a failure placeholder with an empty page selector)
    /// and starts the enter cue. Results for anything other than the current
    /// desired query are ignored.
    pub fn fetch_settled(
        &mut self,
        query: QueryState,
        result: Result<PageResult, FetchError>,
    ) -> Vec<Effect> {
        if query != self.desired {
            debug!(search = query.search(), "ignored result for outdated query");
            return Vec::new();
        }
        let Some(direction) = self.transition.direction() else {
            debug!("ignored result while idle");
            return Vec::new();
        };
        if !self.advance(TransitionEvent::Settled) {
            return Vec::new();
        }

        let frame = self.frame_for(query, result);
        self.shown = Some(frame.clone());

        let mut effects = vec![Effect::Draw(frame)];
        if self.animations {
            effects.push(Effect::Enter(direction));
        } else {
            effects.extend(self.enter_finished());
        }
        effects
    }

    /// The enter cue finished; go idle or run a queued restart.
    pub fn enter_finished(&mut self) -> Vec<Effect> {
        if !self.advance(TransitionEvent::EnterDone) {
            return Vec::new();
        }
        match self.restart.take() {
            Some(direction) => self.begin_cycle(direction),
            None => Vec::new(),
        }
    }

    fn begin_cycle(&mut self, direction: Direction) -> Vec<Effect> {
        if !self.advance(TransitionEvent::Begin(direction)) {
            return Vec::new();
        }
        if self.animations {
            vec![Effect::Leave(direction)]
        } else {
            self.leave_finished()
        }
    }

    fn advance(&mut self, event: TransitionEvent) -> bool {
        match self.transition.step(event) {
            Ok(next) => {
                self.transition = next;
                true
            }
            Err(err) => {
                debug!(error = %err, "ignored transition event");
                false
            }
        }
    }

    fn resolve(&self, input: Input) -> Result<(QueryPatch, Direction), ControllerError> {
        let resolved = match input {
            Input::Search(text) => (QueryPatch::search(text), Direction::Forward),
            Input::Category(filter) => (QueryPatch::category(filter), Direction::Forward),
            Input::Tag(filter) => {
                if !self.tag_filter_enabled {
                    warn!("tag input rejected: tag filtering disabled");
                    return Err(ControllerError::TagFilterDisabled);
                }
                (QueryPatch::tag(filter), Direction::Forward)
            }
            Input::Page(page) => {
                let direction = Direction::for_page(self.desired.page(), page);
                (QueryPatch::page(page), direction)
            }
            Input::PerPage(per_page) => (QueryPatch::per_page(per_page), Direction::Forward),
            Input::ViewMode(mode) => {
                (QueryPatch::view_mode(mode), Direction::for_view_mode(mode))
            }
            Input::Columns(columns) => (QueryPatch::columns(columns), Direction::Forward),
        };
        Ok(resolved)
    }

    fn frame_for(&self, query: QueryState, result: Result<PageResult, FetchError>) -> ViewFrame {
        let view_mode = query.view_mode();
        let columns = query.columns();
        match result {
            Ok(page) => {
                info!(
                    total = page.total,
                    page = page.page,
                    items = page.items.len(),
                    "rendering page"
                );
                ViewFrame {
                    page: self.renderer.render(&page.items, view_mode, columns),
                    pagination: build(page.total, page.page, page.per_page),
                    query,
                }
            }
            Err(err) => ViewFrame {
                page: self.renderer.render_failure(&err, view_mode, columns),
                pagination: build(0, 1, query.per_page().get()),
                query,
            },
        }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
