//! QueryBar component — the word input plus the lookup status lines.
//!
//! Rows: input, then (only when relevant) the "Searching…" status and the
//! error message. The bar itself never starts lookups; it reports input
//! changes as actions and the App feeds them to the debouncer.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_ERROR, C_LOADING},
    widgets::{
        pane_chrome::pane_chrome,
        query_input::{InputEvent, QueryInput},
    },
};

const SPINNER_FRAMES: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub struct QueryBar {
    input: QueryInput,
    spinner_frame: usize,
}

impl QueryBar {
    pub fn new() -> Self {
        Self {
            input: QueryInput::default(),
            spinner_frame: 0,
        }
    }

    /// Rows needed for the current state: borders + input + status + error.
    pub fn height(state: &AppState) -> u16 {
        let mut h = 3;
        if state.lookup.is_loading {
            h += 1;
        }
        if state.lookup.has_error() {
            h += 1;
        }
        h
    }
}

impl Component for QueryBar {
    fn id(&self) -> ComponentId {
        ComponentId::QueryBar
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        if key.code == KeyCode::Esc && self.input.is_empty() {
            return vec![Action::Quit];
        }
        match self.input.handle_key(key) {
            InputEvent::Changed(text) => vec![Action::QueryChanged(text)],
            InputEvent::Submitted(text) => vec![Action::QuerySubmitted(text)],
            InputEvent::Cleared => vec![Action::QueryCleared],
            InputEvent::Unchanged => vec![],
        }
    }

    fn tick(&mut self, state: &AppState) -> Vec<Action> {
        if state.lookup.is_loading {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        } else {
            self.spinner_frame = 0;
        }
        vec![]
    }

    fn on_action(&mut self, _action: &Action, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("wordbook", focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);
        self.input.draw(frame, rows[0], focused);

        let mut lines = Vec::new();
        if state.lookup.is_loading {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{} ", SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]),
                    Style::default().fg(C_LOADING),
                ),
                Span::styled(
                    state.lookup.status_message.as_str(),
                    Style::default().fg(C_LOADING),
                ),
            ]));
        }
        if state.lookup.has_error() {
            lines.push(Line::from(Span::styled(
                format!("✗ {}", state.lookup.error_message),
                Style::default().fg(C_ERROR),
            )));
        }
        if !lines.is_empty() {
            frame.render_widget(Paragraph::new(lines), rows[1]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;
    use std::path::PathBuf;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_keys_become_query_actions() {
        let state = AppState::new(PathBuf::from("wordbook.log"));
        let mut bar = QueryBar::new();

        let actions = bar.handle_key(key(KeyCode::Char('a')), &state);
        assert!(matches!(actions.as_slice(), [Action::QueryChanged(t)] if t == "a"));

        let actions = bar.handle_key(key(KeyCode::Enter), &state);
        assert!(matches!(actions.as_slice(), [Action::QuerySubmitted(t)] if t == "a"));

        assert!(bar.handle_key(key(KeyCode::Left), &state).is_empty());
        // Backspace at column 0 deletes nothing
        assert!(bar.handle_key(key(KeyCode::Backspace), &state).is_empty());
        assert!(bar.handle_key(key(KeyCode::End), &state).is_empty());

        let actions = bar.handle_key(key(KeyCode::Backspace), &state);
        assert!(matches!(actions.as_slice(), [Action::QueryCleared]));
        assert!(bar.handle_key(key(KeyCode::Enter), &state).is_empty());
    }

    #[test]
    fn test_esc_clears_then_quits() {
        let state = AppState::new(PathBuf::from("wordbook.log"));
        let mut bar = QueryBar::new();
        bar.handle_key(key(KeyCode::Char('x')), &state);

        let actions = bar.handle_key(key(KeyCode::Esc), &state);
        assert!(matches!(actions.as_slice(), [Action::QueryCleared]));
        let actions = bar.handle_key(key(KeyCode::Esc), &state);
        assert!(matches!(actions.as_slice(), [Action::Quit]));
    }

    #[test]
    fn test_height_grows_with_status_lines() {
        let mut state = AppState::new(PathBuf::from("wordbook.log"));
        assert_eq!(QueryBar::height(&state), 3);
        state.lookup.is_loading = true;
        assert_eq!(QueryBar::height(&state), 4);
        state.lookup.error_message = "An error happened, try again later".to_string();
        assert_eq!(QueryBar::height(&state), 5);
    }
}
