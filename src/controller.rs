//! Application controller.
//!
//! This module orchestrates the main application loop:
//! - Terminal initialization and cleanup
//! - Event polling and handling
//! - Re-planning the chunk size on startup and on every resize
//! - State updates and rendering

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::chunking::cells_to_px;
use crate::config::Config;
use crate::event::{apply_action, handle_event, poll_event, Action};
use crate::model::{AppState, SequencePair};
use crate::ui::{calculate_visible_dimensions, glyphs, glyphs::Glyphs, render};

/// Where the container width comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidthSource {
    /// Measure the alignment panel, at this many pixels per column.
    Terminal { cell_width_px: u16 },
    /// Use a fixed pixel width regardless of the terminal.
    Fixed(f64),
}

impl WidthSource {
    /// Picks the source from an explicit override or the configuration.
    pub fn from_config(config: &Config, override_px: Option<f64>) -> Self {
        match override_px.or(config.layout.width_px) {
            Some(px) => WidthSource::Fixed(px),
            None => WidthSource::Terminal {
                cell_width_px: config.layout.cell_width_px,
            },
        }
    }

    /// Container width in pixels for a panel `panel_columns` wide.
    pub fn container_width(self, panel_columns: u16) -> f64 {
        match self {
            WidthSource::Terminal { cell_width_px } => cells_to_px(panel_columns, cell_width_px),
            WidthSource::Fixed(px) => px,
        }
    }
}

/// The main application controller.
pub struct App {
    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state
    state: AppState,
    /// Display glyphs
    glyphs: Glyphs,
    /// Container width source
    width_source: WidthSource,
    /// Event poll timeout
    tick_rate: Duration,
}

impl App {
    /// Creates a new application with the given state.
    pub fn new(state: AppState, glyphs: Glyphs, width_source: WidthSource) -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            state,
            glyphs,
            width_source,
            tick_rate: Duration::from_millis(50),
        })
    }

    /// Runs the main application loop.
    pub fn run(&mut self) -> Result<()> {
        // Initial layout, the equivalent of the first mount
        self.relayout()?;

        loop {
            self.terminal.draw(|frame| {
                render(frame, &self.state, &self.glyphs);
            })?;

            if let Some(event) = poll_event(self.tick_rate) {
                let action = handle_event(event, &self.state.mode, self.state.show_help);
                let resized = matches!(action, Action::Resize(_, _));
                let show_legend = self.state.show_legend;

                apply_action(&mut self.state, action);

                // The legend takes columns from the alignment panel
                if resized || show_legend != self.state.show_legend {
                    self.relayout()?;
                }

                if self.state.should_quit {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Recomputes the chunk size and visible chunk count from the terminal size.
    fn relayout(&mut self) -> Result<()> {
        let size = self.terminal.size()?;
        let (content_rows, panel_columns) =
            calculate_visible_dimensions(size.width, size.height, self.state.show_legend);
        let width_px = self.width_source.container_width(panel_columns);
        log::debug!(
            "relayout: terminal {}x{}, panel {} columns, container {}px",
            size.width,
            size.height,
            panel_columns,
            width_px
        );
        self.state.resize(width_px, panel_columns as usize, content_rows);
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Runs the interactive viewer for a sequence pair.
pub fn run_app(pair: SequencePair, config: &Config, width_override: Option<f64>) -> Result<()> {
    let mut state = AppState::new(pair);
    state.show_legend = config.display.show_legend;

    let glyphs = glyphs::select(config.display.fancy_glyphs);
    let width_source = WidthSource::from_config(config, width_override);

    let mut app = App::new(state, glyphs, width_source)?;
    app.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_source_selection() {
        let mut config = Config::default();
        assert_eq!(
            WidthSource::from_config(&config, None),
            WidthSource::Terminal { cell_width_px: 8 }
        );
        assert_eq!(WidthSource::from_config(&config, Some(500.0)), WidthSource::Fixed(500.0));

        config.layout.width_px = Some(1200.0);
        assert_eq!(WidthSource::from_config(&config, None), WidthSource::Fixed(1200.0));
        assert_eq!(WidthSource::from_config(&config, Some(300.0)), WidthSource::Fixed(300.0));
    }

    #[test]
    fn test_container_width() {
        assert_eq!(WidthSource::Terminal { cell_width_px: 8 }.container_width(100), 800.0);
        assert_eq!(WidthSource::Fixed(640.0).container_width(100), 640.0);
    }
}
