//! ResultPanel component — headword, first definition and pronunciation.
//!
//! The result block is drawn only once a lookup produced a title; the audio
//! line only when the entry carries a pronunciation URL.

use chrono::{DateTime, Local};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    lookup::LookupState,
    theme::{style_default, style_headword, style_muted, style_secondary, C_AUDIO},
    widgets::pane_chrome::{pane_chrome, Badge},
};

pub const AUDIO_MIME: &str = "audio/mp3";

pub struct ResultPanel {
    scroll: u16,
    /// Settlement time of the result last drawn; a new one resets scroll.
    shown_at: Option<DateTime<Local>>,
}

impl ResultPanel {
    pub fn new() -> Self {
        Self {
            scroll: 0,
            shown_at: None,
        }
    }

    #[cfg(test)]
    pub fn scroll(&self) -> u16 {
        self.scroll
    }
}

/// Lines of the result block, `None` when there is nothing to show.
pub fn result_lines(lookup: &LookupState) -> Option<Vec<Line<'static>>> {
    if !lookup.has_result() {
        return None;
    }
    let title = lookup.result_title.clone();
    let rule = "─".repeat(title.width().max(1));
    let mut lines = vec![
        Line::from(Span::styled(title, style_headword())),
        Line::from(Span::styled(rule, style_muted())),
        Line::from(""),
        Line::from(Span::styled(lookup.result_meaning.clone(), style_default())),
    ];
    if lookup.has_audio() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                "♪ ",
                Style::default().fg(C_AUDIO).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("pronunciation ({})  ^P to play", AUDIO_MIME),
                Style::default().fg(C_AUDIO),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {}", lookup.audio_url),
            style_muted(),
        )));
    }
    if let Some(at) = lookup.looked_up_at {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("looked up {}", at.format("%H:%M:%S")),
            style_muted(),
        )));
    }
    Some(lines)
}

/// Placeholder for the pane before the first result arrives.
fn empty_hint(state: &AppState) -> String {
    if state.lookup.is_loading {
        format!("  looking up \"{}\"…", state.lookup.query_text)
    } else if !state.input_text.trim().is_empty() {
        "  pause typing to look the word up".to_string()
    } else {
        "  definitions show up here as you type".to_string()
    }
}

impl Component for ResultPanel {
    fn id(&self) -> ComponentId {
        ComponentId::ResultPanel
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => vec![Action::ScrollUp(1)],
            KeyCode::Down | KeyCode::Char('j') => vec![Action::ScrollDown(1)],
            KeyCode::PageUp => vec![Action::ScrollUp(10)],
            KeyCode::PageDown => vec![Action::ScrollDown(10)],
            KeyCode::Char('p') | KeyCode::Enter => vec![Action::PlayPronunciation],
            KeyCode::Char('y') => vec![Action::CopyResult],
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::ScrollUp(n) => {
                self.scroll = self.scroll.saturating_sub(*n as u16);
            }
            Action::ScrollDown(n) => {
                self.scroll = self.scroll.saturating_add(*n as u16);
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let badge = state.lookup.has_audio().then_some(Badge {
            text: "♪",
            color: C_AUDIO,
        });
        let block = pane_chrome("meaning", focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if state.lookup.looked_up_at != self.shown_at {
            self.shown_at = state.lookup.looked_up_at;
            self.scroll = 0;
        }

        let Some(lines) = result_lines(&state.lookup) else {
            frame.render_widget(
                Paragraph::new(Span::styled(empty_hint(state), style_secondary())),
                inner,
            );
            return;
        };

        // Clamp so scrolling never runs past the last wrapped row
        let width = inner.width.max(1) as usize;
        let rows: usize = lines.iter().map(|l| l.width().max(1).div_ceil(width)).sum();
        let max_scroll = (rows as u16).saturating_sub(inner.height);
        self.scroll = self.scroll.min(max_scroll);

        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0)),
            inner,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_no_block_without_title() {
        let lookup = LookupState {
            error_message: "An error happened, try again later".to_string(),
            ..Default::default()
        };
        assert!(result_lines(&lookup).is_none());
    }

    #[test]
    fn test_empty_hint_follows_input() {
        let mut state = AppState::new(std::path::PathBuf::from("wordbook.log"));
        assert!(empty_hint(&state).contains("as you type"));
        state.input_text = "ca".to_string();
        assert!(empty_hint(&state).contains("pause typing"));
        state.lookup.is_loading = true;
        state.lookup.query_text = "cat".to_string();
        assert_eq!(empty_hint(&state), "  looking up \"cat\"…");
    }

    #[test]
    fn test_audio_line_only_with_url() {
        let mut lookup = LookupState {
            result_title: "asdkjh".to_string(),
            result_meaning: "N/A".to_string(),
            ..Default::default()
        };
        let text = text_of(&result_lines(&lookup).unwrap());
        assert_eq!(text[0], "asdkjh");
        assert_eq!(text[1], "──────");
        assert_eq!(text[3], "N/A");
        assert!(!text.iter().any(|l| l.contains(AUDIO_MIME)));

        lookup.audio_url = "https://x/cat.mp3".to_string();
        let text = text_of(&result_lines(&lookup).unwrap());
        assert!(text.iter().any(|l| l.contains(AUDIO_MIME)));
        assert!(text.iter().any(|l| l.contains("https://x/cat.mp3")));
    }

    #[test]
    fn test_keys_map_to_result_actions() {
        let state = AppState::new(std::path::PathBuf::from("wordbook.log"));
        let mut panel = ResultPanel::new();
        let key = |c| KeyEvent::new(KeyCode::Char(c), ratatui::crossterm::event::KeyModifiers::NONE);

        assert!(matches!(panel.handle_key(key('p'), &state).as_slice(), [Action::PlayPronunciation]));
        assert!(matches!(panel.handle_key(key('y'), &state).as_slice(), [Action::CopyResult]));

        panel.on_action(&Action::ScrollDown(3), &state);
        panel.on_action(&Action::ScrollUp(1), &state);
        assert_eq!(panel.scroll(), 2);
        panel.on_action(&Action::ScrollUp(10), &state);
        assert_eq!(panel.scroll(), 0);
    }
}
