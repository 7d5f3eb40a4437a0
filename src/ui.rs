//! TUI rendering module.
//!
//! This module handles all visual rendering using ratatui:
//! - The alignment panel: one row pair plus a position ruler per chunk
//! - The color legend panel
//! - Status bar with mode, chunk size and scroll position
//! - Help overlay

pub mod glyphs;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::colors::{Background, ResidueClass};
use crate::model::{AppMode, AppState};
use crate::render::{ChunkView, RenderedResidue};
use glyphs::Glyphs;

/// Width of the legend panel (including borders).
const LEGEND_WIDTH: u16 = 30;
/// Minimum width for the alignment panel.
const MIN_ALIGNMENT_PANEL_WIDTH: u16 = 10;
/// Height of the status bar.
const STATUS_BAR_HEIGHT: u16 = 1;

/// Style of one residue cell.
pub fn residue_style(residue: &RenderedResidue) -> Style {
    match residue.color.background {
        Background::Filled(rgb) => Style::default()
            .fg(residue.color.text.to_color())
            .bg(rgb.to_color()),
        // Unfilled cells keep the terminal's own foreground
        Background::Transparent => Style::default().add_modifier(Modifier::UNDERLINED),
    }
}

fn residue_row(row: &[RenderedResidue]) -> Line<'static> {
    Line::from(
        row.iter()
            .map(|r| Span::styled(r.symbol.to_string(), residue_style(r)))
            .collect::<Vec<_>>(),
    )
}

/// Builds the position ruler: start label, filler, end label.
pub fn ruler(start: usize, end: usize, width: usize, glyphs: &Glyphs) -> String {
    let start = start.to_string();
    let end = end.to_string();
    let used = start.len() + end.len();
    if width < used + 3 {
        return format!("{} {}", start, end);
    }
    let fill = width - used - 2;
    format!("{} {} {}", start, glyphs.ruler.repeat(fill), end)
}

/// Lines displayed for one chunk, rows wrapped at `width` columns.
///
/// A wrapped chunk alternates reference and comparison segments so each
/// residue stays directly above its counterpart.
pub fn chunk_lines(view: &ChunkView, glyphs: &Glyphs, width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let dim = Style::default().fg(Color::DarkGray);

    let mut lines: Vec<Line<'static>> = view
        .reference
        .chunks(width)
        .zip(view.comparison.chunks(width).map(Some).chain(std::iter::repeat(None)))
        .flat_map(|(reference, comparison)| {
            [residue_row(reference), residue_row(comparison.unwrap_or_default())]
        })
        .collect();

    let ruler_width = view.reference.len().min(width);
    lines.push(Line::from(Span::styled(
        ruler(view.positions.start, view.positions.end, ruler_width, glyphs),
        dim,
    )));
    lines.push(Line::from(Span::styled(glyphs.chunk_separator.to_string(), dim)));
    lines
}

/// Renders the complete UI.
pub fn render(frame: &mut Frame, state: &AppState, glyphs: &Glyphs) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(STATUS_BAR_HEIGHT)])
        .split(area);

    let content_area = main_layout[0];
    let status_area = main_layout[1];

    if state.show_legend {
        let content_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(MIN_ALIGNMENT_PANEL_WIDTH),
                Constraint::Length(LEGEND_WIDTH),
            ])
            .split(content_area);
        render_alignment_panel(frame, state, content_layout[0], glyphs);
        render_legend_panel(frame, content_layout[1], glyphs);
    } else {
        render_alignment_panel(frame, state, content_area, glyphs);
    }

    render_status_bar(frame, state, status_area);

    if state.show_help {
        render_help_overlay(frame, area);
    }
}

/// Renders the visible chunks.
fn render_alignment_panel(frame: &mut Frame, state: &AppState, area: Rect, glyphs: &Glyphs) {
    let views = state.session.views();
    let start = state.first_chunk.min(views.len());
    let end = (start + state.visible_chunks).min(views.len());

    let columns = area.width.saturating_sub(2) as usize;
    let lines: Vec<Line> = views[start..end]
        .iter()
        .flat_map(|view| chunk_lines(view, glyphs, columns))
        .collect();

    let pair = state.session.pair();
    let more_above = if start > 0 { glyphs.arrow_up } else { " " };
    let more_below = if end < views.len() { glyphs.arrow_down } else { " " };
    let title = format!(
        "{} / {} [chunks {}-{}/{}] {}{}",
        pair.first().id,
        pair.second().id,
        start + 1,
        end,
        views.len(),
        more_above,
        more_below,
    );
    let summary = format!(
        " Length: {} residues | Differences: {} ",
        state.session.total_length(),
        state.session.difference_count()
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_bottom(summary);

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Lines of the legend panel, wrapped to `width` columns.
pub fn legend_lines(width: usize, glyphs: &Glyphs) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let indent = " ".repeat(glyphs.swatch.chars().count() + 1);

    for class in ResidueClass::ALL {
        let color = class.background().to_color();
        lines.push(Line::from(vec![
            Span::styled(glyphs.swatch, Style::default().fg(color).bg(color)),
            Span::raw(" "),
            Span::styled(class.name(), Style::default().add_modifier(Modifier::BOLD)),
        ]));
        let members = class
            .members()
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let options = textwrap::Options::new(width.max(1))
            .initial_indent(&indent)
            .subsequent_indent(&indent);
        for wrapped in textwrap::wrap(&members, options) {
            lines.push(Line::from(wrapped.into_owned()));
        }
    }

    lines.push(Line::from(""));
    for text in [
        "Top row: every residue is colored by its class.",
        "Bottom row: only residues that differ from the one above are colored.",
    ] {
        for wrapped in textwrap::wrap(text, width.max(1)) {
            lines.push(Line::from(wrapped.into_owned()));
        }
    }
    lines
}

fn render_legend_panel(frame: &mut Frame, area: Rect, glyphs: &Glyphs) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let block = Block::default().borders(Borders::ALL).title("Legend");
    frame.render_widget(Paragraph::new(legend_lines(inner_width, glyphs)).block(block), area);
}

/// Renders the status bar at the bottom.
fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let (mode_str, command_str) = match &state.mode {
        AppMode::Normal => ("NORMAL", String::new()),
        AppMode::Command(cmd) => ("COMMAND", format!(":{}", cmd)),
        AppMode::Search(motif) => ("SEARCH", format!("/{}", motif)),
        AppMode::SearchBackward(motif) => ("SEARCH", format!("?{}", motif)),
    };

    let position_info = format!(
        "Chunk size {} | Chunk {}/{} ",
        state.session.chunk_size(),
        (state.first_chunk + 1).min(state.chunk_count()),
        state.chunk_count()
    );

    let message = state.status_message.as_deref().unwrap_or("");

    let left_content = if command_str.is_empty() {
        format!(" {} | {} ", mode_str, message)
    } else {
        format!(" {} | {} ", mode_str, command_str)
    };

    let bar = Style::default().fg(Color::Black).bg(Color::Cyan);
    let left_len = left_content.chars().count();
    let status_line = Line::from(vec![
        Span::styled(left_content, bar),
        Span::styled(
            " ".repeat((area.width as usize).saturating_sub(left_len + position_info.len())),
            bar,
        ),
        Span::styled(position_info, bar.add_modifier(Modifier::BOLD)),
    ]);

    frame.render_widget(Paragraph::new(status_line), area);
}

const HELP_TEXT: &[&str] = &[
    "j / Down        next chunk",
    "k / Up          previous chunk",
    "Ctrl+D / Ctrl+U half page down / up",
    "PgDn / PgUp     page down / up",
    "g / Home        first chunk",
    "G / End         last chunk",
    "L / :legend     toggle legend",
    "/<motif>        search forward",
    "?<motif>        search backward",
    "n / N           next / previous match",
    ":<n>            go to residue n",
    ":h              this help",
    ":q / Ctrl+C     quit",
    "",
    "Press any key to close",
];

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let width = 42.min(area.width);
    let height = (HELP_TEXT.len() as u16 + 2).min(area.height);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let lines: Vec<Line> = HELP_TEXT.iter().map(|l| Line::from(*l)).collect();
    let block = Block::default().borders(Borders::ALL).title("Help");
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// Calculates the inside of the alignment panel.
///
/// Returns `(content_rows, panel_columns)`.
pub fn calculate_visible_dimensions(
    terminal_width: u16,
    terminal_height: u16,
    show_legend: bool,
) -> (usize, u16) {
    let legend = if show_legend { LEGEND_WIDTH } else { 0 };
    let panel_columns = terminal_width.saturating_sub(legend + 2);
    let rows = terminal_height.saturating_sub(STATUS_BAR_HEIGHT + 2);
    (rows as usize, panel_columns)
}
