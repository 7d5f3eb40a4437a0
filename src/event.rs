//! Keyboard event handling.
//!
//! Navigation moves through chunks rather than columns:
//! - `j` / `k` (or arrows): next / previous chunk
//! - `Ctrl+D` / `Ctrl+U`: half page down / up
//! - `PageDown` / `PageUp`: full page
//! - `g` / `Home`, `G` / `End`: first / last chunk
//! - `L`: toggle the color legend
//! - `/` / `?`: search forward / backward for a residue motif in either row
//! - `n` / `N`: repeat the last search / in the opposite direction
//! - `:`: enter command mode
//!   - `:q` or `:quit`: quit the application
//!   - `:h` or `:help`: show help
//!   - `:<number>`: go to the chunk holding that residue
//!
//! Terminal resizes become [`Action::Resize`]; the controller re-plans the
//! chunk size from the new width.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::model::{AppMode, AppState};

/// Actions that can be triggered by terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action (key not recognized)
    None,
    /// Quit the application
    Quit,
    /// Scroll to the next chunk
    ScrollDown,
    /// Scroll to the previous chunk
    ScrollUp,
    /// Move half page down (Ctrl+D)
    HalfPageDown,
    /// Move half page up (Ctrl+U)
    HalfPageUp,
    /// Move full page down (PageDown)
    PageDown,
    /// Move full page up (PageUp)
    PageUp,
    /// Go to the first chunk
    GotoTop,
    /// Go to the last chunk
    GotoBottom,
    /// Show or hide the legend panel
    ToggleLegend,
    /// Enter command mode
    EnterCommandMode,
    /// Add character to command buffer
    CommandChar(char),
    /// Execute current command
    ExecuteCommand,
    /// Cancel command mode
    CancelCommand,
    /// Backspace in command mode
    CommandBackspace,
    /// Enter search mode (forward with /)
    EnterSearchMode,
    /// Enter search mode (backward with ?)
    EnterSearchBackward,
    /// Add character to search buffer
    SearchChar(char),
    /// Execute search
    ExecuteSearch,
    /// Cancel search mode
    CancelSearch,
    /// Backspace in search mode
    SearchBackspace,
    /// Repeat the last search
    FindNext,
    /// Repeat the last search in the opposite direction
    FindPrevious,
    /// Dismiss the help overlay
    DismissHelp,
    /// Terminal resized
    Resize(u16, u16),
}

/// Polls for terminal events with a timeout.
///
/// Returns `None` if no event occurred within the timeout.
pub fn poll_event(timeout: Duration) -> Option<Event> {
    if event::poll(timeout).ok()? {
        event::read().ok()
    } else {
        None
    }
}

/// Converts a crossterm event to an Action based on current app mode.
pub fn handle_event(event: Event, mode: &AppMode, show_help: bool) -> Action {
    match event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            handle_key_event(key_event, mode, show_help)
        }
        Event::Resize(width, height) => Action::Resize(width, height),
        _ => Action::None,
    }
}

/// Handles a key event based on the current application mode.
fn handle_key_event(key: KeyEvent, mode: &AppMode, show_help: bool) -> Action {
    // If help is shown, any key dismisses it
    if show_help {
        return Action::DismissHelp;
    }

    match mode {
        AppMode::Normal => handle_normal_mode(key),
        AppMode::Command(_) => handle_command_mode(key),
        AppMode::Search(_) | AppMode::SearchBackward(_) => handle_search_mode(key),
    }
}

/// Handles key events in normal mode.
fn handle_normal_mode(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            KeyCode::Char('d') => Action::HalfPageDown,
            KeyCode::Char('u') => Action::HalfPageUp,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
        KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::Char('g') | KeyCode::Home => Action::GotoTop,
        KeyCode::Char('G') | KeyCode::End => Action::GotoBottom,
        KeyCode::Char('L') => Action::ToggleLegend,
        KeyCode::Char(':') => Action::EnterCommandMode,
        KeyCode::Char('/') => Action::EnterSearchMode,
        KeyCode::Char('?') => Action::EnterSearchBackward,
        KeyCode::Char('n') => Action::FindNext,
        KeyCode::Char('N') => Action::FindPrevious,
        _ => Action::None,
    }
}

/// Handles key events in command mode.
fn handle_command_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::ExecuteCommand,
        KeyCode::Esc => Action::CancelCommand,
        KeyCode::Backspace => Action::CommandBackspace,
        KeyCode::Char(c) => Action::CommandChar(c),
        _ => Action::None,
    }
}

/// Handles key events in search mode.
fn handle_search_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::ExecuteSearch,
        KeyCode::Esc => Action::CancelSearch,
        KeyCode::Backspace => Action::SearchBackspace,
        KeyCode::Char(c) => Action::SearchChar(c),
        _ => Action::None,
    }
}

/// Applies an action to the application state.
///
/// Resizes and legend toggles change the layout, so the controller re-plans
/// the chunk size after them; here they only flip state.
///
/// Returns `true` if the application should continue, `false` if it should quit.
pub fn apply_action(state: &mut AppState, action: Action) -> bool {
    match action {
        Action::None | Action::Resize(_, _) => {}
        Action::Quit => state.should_quit = true,
        Action::ScrollDown => state.scroll_down(1),
        Action::ScrollUp => state.scroll_up(1),
        Action::HalfPageDown => state.half_page_down(),
        Action::HalfPageUp => state.half_page_up(),
        Action::PageDown => state.page_down(),
        Action::PageUp => state.page_up(),
        Action::GotoTop => state.goto_top(),
        Action::GotoBottom => state.goto_bottom(),
        Action::ToggleLegend => state.toggle_legend(),
        Action::EnterCommandMode => state.enter_command_mode(),
        Action::CommandChar(c) => state.command_input(c),
        Action::ExecuteCommand => state.execute_command(),
        Action::CancelCommand => state.cancel_command(),
        Action::CommandBackspace => state.command_backspace(),
        Action::EnterSearchMode => state.enter_search_mode(false),
        Action::EnterSearchBackward => state.enter_search_mode(true),
        Action::SearchChar(c) => state.search_input(c),
        Action::ExecuteSearch => state.execute_search(),
        Action::CancelSearch => state.cancel_search(),
        Action::SearchBackspace => state.search_backspace(),
        Action::FindNext => state.find_next(),
        Action::FindPrevious => state.find_previous(),
        Action::DismissHelp => state.dismiss_help(),
    }

    !state.should_quit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SequencePair;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normal_mode_navigation() {
        let mode = AppMode::Normal;
        assert_eq!(handle_key_event(key(KeyCode::Char('j')), &mode, false), Action::ScrollDown);
        assert_eq!(handle_key_event(key(KeyCode::Char('k')), &mode, false), Action::ScrollUp);
        assert_eq!(handle_key_event(key(KeyCode::Down), &mode, false), Action::ScrollDown);
        assert_eq!(handle_key_event(key(KeyCode::Up), &mode, false), Action::ScrollUp);
        assert_eq!(handle_key_event(key(KeyCode::Home), &mode, false), Action::GotoTop);
        assert_eq!(handle_key_event(key(KeyCode::Char('G')), &mode, false), Action::GotoBottom);
        assert_eq!(handle_key_event(key(KeyCode::PageDown), &mode, false), Action::PageDown);
        assert_eq!(handle_key_event(key(KeyCode::Char('L')), &mode, false), Action::ToggleLegend);
    }

    #[test]
    fn test_control_keys() {
        let mode = AppMode::Normal;
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl('c'), &mode, false), Action::Quit);
        assert_eq!(handle_key_event(ctrl('d'), &mode, false), Action::HalfPageDown);
        assert_eq!(handle_key_event(ctrl('u'), &mode, false), Action::HalfPageUp);
        assert_eq!(handle_key_event(ctrl('x'), &mode, false), Action::None);
    }

    #[test]
    fn test_command_mode_input() {
        let mode = AppMode::Command(String::new());
        assert_eq!(
            handle_key_event(key(KeyCode::Char('q')), &mode, false),
            Action::CommandChar('q')
        );
        assert_eq!(handle_key_event(key(KeyCode::Enter), &mode, false), Action::ExecuteCommand);
        assert_eq!(handle_key_event(key(KeyCode::Esc), &mode, false), Action::CancelCommand);
        assert_eq!(
            handle_key_event(key(KeyCode::Backspace), &mode, false),
            Action::CommandBackspace
        );
    }

    #[test]
    fn test_dismiss_help() {
        let mode = AppMode::Normal;
        assert_eq!(handle_key_event(key(KeyCode::Char('x')), &mode, true), Action::DismissHelp);
        assert_eq!(handle_key_event(key(KeyCode::Esc), &mode, true), Action::DismissHelp);
    }

    #[test]
    fn test_resize_event() {
        let action = handle_event(Event::Resize(120, 40), &AppMode::Normal, false);
        assert_eq!(action, Action::Resize(120, 40));
    }

    #[test]
    fn test_apply_quit_command() {
        let pair = SequencePair::from_raw("ARND", "ARNE").unwrap();
        let mut state = AppState::new(pair);
        assert!(apply_action(&mut state, Action::EnterCommandMode));
        assert!(apply_action(&mut state, Action::CommandChar('q')));
        assert!(!apply_action(&mut state, Action::ExecuteCommand));
    }

    #[test]
    fn test_apply_toggle_legend() {
        let pair = SequencePair::from_raw("ARND", "ARNE").unwrap();
        let mut state = AppState::new(pair);
        assert!(state.show_legend);
        apply_action(&mut state, Action::ToggleLegend);
        assert!(!state.show_legend);
    }

    #[test]
    fn test_search_mode_keys() {
        let mode = AppMode::Normal;
        assert_eq!(
            handle_key_event(key(KeyCode::Char('/')), &mode, false),
            Action::EnterSearchMode
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('?')), &mode, false),
            Action::EnterSearchBackward
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('n')), &mode, false), Action::FindNext);
        assert_eq!(handle_key_event(key(KeyCode::Char('N')), &mode, false), Action::FindPrevious);
    }

    #[test]
    fn test_search_mode_input() {
        let mode = AppMode::Search(String::new());
        assert_eq!(
            handle_key_event(key(KeyCode::Char('j')), &mode, false),
            Action::SearchChar('j')
        );
        assert_eq!(handle_key_event(key(KeyCode::Enter), &mode, false), Action::ExecuteSearch);
        assert_eq!(handle_key_event(key(KeyCode::Esc), &mode, false), Action::CancelSearch);

        let mode = AppMode::SearchBackward("K".to_string());
        assert_eq!(
            handle_key_event(key(KeyCode::Backspace), &mode, false),
            Action::SearchBackspace
        );
    }

    #[test]
    fn test_apply_search_jumps_to_match() {
        let first = format!("{}KLM{}", "A".repeat(100), "A".repeat(20));
        let pair = SequencePair::from_raw(&first, &"A".repeat(123)).unwrap();
        let mut state = AppState::new(pair);
        state.resize(300.0, 200, 4); // 23 per chunk

        apply_action(&mut state, Action::EnterSearchMode);
        for c in "klm".chars() {
            apply_action(&mut state, Action::SearchChar(c));
        }
        apply_action(&mut state, Action::ExecuteSearch);
        assert_eq!(state.mode, AppMode::Normal);
        assert_eq!(state.first_chunk, 100 / 23);
        assert_eq!(state.status_message.as_deref(), Some("Match at residue 101"));

        apply_action(&mut state, Action::EnterSearchMode);
        apply_action(&mut state, Action::SearchChar('W'));
        apply_action(&mut state, Action::ExecuteSearch);
        assert_eq!(state.status_message.as_deref(), Some("Pattern not found: W"));
    }
}
