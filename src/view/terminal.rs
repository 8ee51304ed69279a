//! ratatui render target.
//!
//! Screen layout, top to bottom: a one-line query summary, the item area
//! (cards in grid mode, one line per item in list mode, or a centered
//! placeholder), and a one-line page selector. While leaving, the item area
//! is blanked and the summary shows a loading marker pointing in the slide
//! direction.

use super::constants::{CARD_HEIGHT, HEADER_HEIGHT, PAGINATION_HEIGHT, TAG_SEPARATOR};
use super::{RenderError, RenderTarget};
use crate::model::Filter;
use crate::state::Direction;
use crate::view_state::{ItemView, Layout, NodeContent, Pagination, ViewFrame, ViewNode};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Layout as TuiLayout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame, Terminal,
};

/// What the item area currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visibility {
    Shown,
    Hidden(Direction),
}

/// Render target drawing onto a ratatui terminal.
pub struct TerminalTarget<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    frame: Option<ViewFrame>,
    visibility: Visibility,
}

impl<B> TerminalTarget<B>
where
    B: Backend,
{
    /// Wrap a terminal.
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            frame: None,
            visibility: Visibility::Shown,
        }
    }

    /// The wrapped terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    fn redraw(&mut self) -> Result<(), RenderError> {
        let frame = self.frame.as_ref();
        let visibility = self.visibility;
        self.terminal
            .draw(|f| render_screen(f, frame, visibility))?;
        Ok(())
    }
}

impl<B> RenderTarget for TerminalTarget<B>
where
    B: Backend + Send,
{
    fn leave(&mut self, direction: Direction) -> Result<(), RenderError> {
        self.visibility = Visibility::Hidden(direction);
        self.redraw()
    }

    fn draw(&mut self, frame: &ViewFrame) -> Result<(), RenderError> {
        self.frame = Some(frame.clone());
        self.visibility = Visibility::Shown;
        self.redraw()
    }

    fn enter(&mut self, _direction: Direction) -> Result<(), RenderError> {
        self.visibility = Visibility::Shown;
        self.redraw()
    }
}

fn render_screen(f: &mut Frame, frame: Option<&ViewFrame>, visibility: Visibility) {
    let areas = TuiLayout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(PAGINATION_HEIGHT),
    ])
    .split(f.area());

    f.render_widget(Paragraph::new(header_line(frame, visibility)), areas[0]);

    let Some(frame) = frame else {
        return;
    };
    if visibility == Visibility::Shown {
        render_body(f, areas[1], frame);
    }
    f.render_widget(Paragraph::new(pagination_line(&frame.pagination)), areas[2]);
}

fn header_line(frame: Option<&ViewFrame>, visibility: Visibility) -> Line<'static> {
    let mut spans = Vec::new();
    if let Some(frame) = frame {
        let query = &frame.query;
        let filter_text = |filter: &Filter| match filter {
            Filter::All => "all".to_string(),
            Filter::Only(value) => value.clone(),
        };
        spans.push(Span::raw(format!("search: {}", query.search())));
        spans.push(Span::raw(format!(
            " | category: {}",
            filter_text(query.category())
        )));
        if let Some(tag) = query.tag() {
            spans.push(Span::raw(format!(" | tag: {}", filter_text(tag))));
        }
        spans.push(Span::raw(format!(" | {} per page", query.per_page().get())));
    }
    if let Visibility::Hidden(direction) = visibility {
        let marker = match direction {
            Direction::Forward => " loading >",
            Direction::Backward => " < loading",
        };
        spans.push(Span::styled(
            marker,
            Style::default().fg(Color::Yellow),
        ));
    }
    Line::from(spans)
}

fn pagination_line(pagination: &Pagination) -> Line<'static> {
    if pagination.is_empty() {
        return Line::from(Span::styled(
            "no pages",
            Style::default().fg(Color::DarkGray),
        ));
    }
    let spans: Vec<Span<'static>> = pagination
        .actions
        .iter()
        .map(|action| {
            if action.is_current {
                Span::styled(
                    format!("[{}] ", action.label),
                    Style::default().add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw(format!(" {}  ", action.label))
            }
        })
        .collect();
    Line::from(spans)
}

fn render_body(f: &mut Frame, area: Rect, frame: &ViewFrame) {
    if let Some(node) = frame.page.nodes.iter().find(|n| n.is_placeholder()) {
        render_placeholder(f, area, node);
        return;
    }
    match frame.page.layout {
        Layout::Grid { columns } => render_grid(f, area, &frame.page.nodes, columns),
        Layout::List => render_list(f, area, &frame.page.nodes),
    }
}

fn render_placeholder(f: &mut Frame, area: Rect, node: &ViewNode) {
    let NodeContent::Placeholder(placeholder) = &node.content else {
        return;
    };
    let paragraph = Paragraph::new(placeholder.text())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_grid(f: &mut Frame, area: Rect, nodes: &[ViewNode], columns: u8) {
    let columns = usize::from(columns.max(1));
    let constraints = vec![Constraint::Ratio(1, columns as u32); columns];

    for (row_index, row) in nodes.chunks(columns).enumerate() {
        let offset = CARD_HEIGHT.saturating_mul(row_index as u16);
        if offset >= area.height {
            break;
        }
        let row_area = Rect::new(
            area.x,
            area.y + offset,
            area.width,
            CARD_HEIGHT.min(area.height - offset),
        );
        let cells = TuiLayout::horizontal(constraints.clone()).split(row_area);
        for (node, cell) in row.iter().zip(cells.iter()) {
            if let Some(view) = node.item() {
                f.render_widget(card(view), *cell);
            }
        }
    }
}

fn card(view: &ItemView) -> Paragraph<'static> {
    let lines = vec![
        Line::from(Span::styled(
            view.subtitle.clone(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(view.size.clone()),
        Line::from(Span::styled(
            view.tags.join(TAG_SEPARATOR),
            Style::default().fg(Color::Cyan),
        )),
    ];
    Paragraph::new(lines).block(Block::bordered().title(view.name.clone()))
}

fn render_list(f: &mut Frame, area: Rect, nodes: &[ViewNode]) {
    let lines: Vec<Line<'static>> = nodes
        .iter()
        .filter_map(ViewNode::item)
        .map(|view| {
            let mut spans = vec![
                Span::styled(
                    view.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(view.subtitle.clone(), Style::default().fg(Color::Gray)),
            ];
            if !view.size.is_empty() {
                spans.push(Span::raw(format!("  {}", view.size)));
            }
            if !view.tags.is_empty() {
                spans.push(Span::styled(
                    format!("  [{}]", view.tags.join(TAG_SEPARATOR)),
                    Style::default().fg(Color::Cyan),
                ));
            }
            Line::from(spans)
        })
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}
