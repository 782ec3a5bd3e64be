//! QueryInput — wraps tui-input as the word entry line.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};
use unicode_width::UnicodeWidthChar;

use crate::theme::{C_INPUT_BG, C_INPUT_FG, C_MUTED};

pub const PLACEHOLDER: &str = "Type a word and press Enter";

/// What a key did to the input.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Text changed and is non-empty.
    Changed(String),
    /// Enter on non-empty text.
    Submitted(String),
    /// Text became empty.
    Cleared,
    /// Nothing observable changed (cursor move, Enter on empty input, ...).
    Unchanged,
}

pub struct QueryInput {
    input: Input,
    placeholder: String,
}

impl QueryInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            placeholder: placeholder.into(),
        }
    }

    pub fn text(&self) -> &str {
        self.input.value()
    }

    pub fn is_empty(&self) -> bool {
        self.input.value().is_empty()
    }

    /// Handle a key event. Returns what happened.
    ///
    /// Esc clears the text; Enter submits it when non-empty.
    pub fn handle_key(&mut self, key: KeyEvent) -> InputEvent {
        match key.code {
            KeyCode::Esc => {
                if self.is_empty() {
                    InputEvent::Unchanged
                } else {
                    self.input = Input::default();
                    InputEvent::Cleared
                }
            }
            KeyCode::Enter => {
                if self.is_empty() {
                    InputEvent::Unchanged
                } else {
                    InputEvent::Submitted(self.text().to_string())
                }
            }
            _ => {
                let before = self.text().to_string();
                self.input.handle_event(&Event::Key(key));
                if self.text() == before {
                    InputEvent::Unchanged
                } else if self.is_empty() {
                    InputEvent::Cleared
                } else {
                    InputEvent::Changed(self.text().to_string())
                }
            }
        }
    }

    /// Render the input line into `area`, with the cursor when `focused`.
    pub fn draw(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let scroll = self
            .input
            .visual_scroll(area.width.saturating_sub(3) as usize);
        let value = self.input.value();
        let display = if value.is_empty() {
            Span::styled(
                format!("› {}", self.placeholder),
                Style::default().fg(C_MUTED),
            )
        } else {
            let visible = skip_columns(value, scroll);
            Span::styled(format!("› {}", visible), Style::default().fg(C_INPUT_FG))
        };

        let paragraph =
            Paragraph::new(Line::from(vec![display])).style(Style::default().bg(C_INPUT_BG));
        frame.render_widget(paragraph, area);

        if focused && area.width > 0 {
            let cursor_x = area.x + 2 + (self.input.visual_cursor().saturating_sub(scroll)) as u16;
            frame.set_cursor_position((cursor_x.min(area.x + area.width - 1), area.y));
        }
    }
}

/// `text` without its first `cols` display columns (wide glyphs count 2).
fn skip_columns(text: &str, cols: usize) -> &str {
    let mut width = 0;
    for (i, c) in text.char_indices() {
        if width >= cols {
            return &text[i..];
        }
        width += c.width().unwrap_or(0);
    }
    ""
}

impl Default for QueryInput {
    fn default() -> Self {
        Self::new(PLACEHOLDER)
    }
}
