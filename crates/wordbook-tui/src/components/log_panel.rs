//! LogPanel component — tail of wordbook.log.
//!
//! Closed, it is a single row showing the newest record. Opened with Ctrl+L it
//! lists records newest-at-bottom. Scroll is kept as a distance from the
//! bottom, so at distance 0 the pane follows the file as it grows. `w` narrows
//! the view to warnings and errors (where lookup failures end up).

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};
use tracing::Level;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_ERROR, C_LOADING, C_MUTED, C_SECONDARY},
    widgets::pane_chrome::{pane_chrome, Badge},
};

pub struct LogPanel {
    pub expanded: bool,
    /// Records between the bottom of the pane and the newest record.
    from_bottom: usize,
    warnings_only: bool,
}

impl LogPanel {
    pub fn new() -> Self {
        Self {
            expanded: false,
            from_bottom: 0,
            warnings_only: false,
        }
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
        self.from_bottom = 0;
    }

    fn visible<'a>(&self, lines: &'a [String]) -> Vec<LogRecord<'a>> {
        lines
            .iter()
            .map(|l| LogRecord::parse(l))
            .filter(|r| !self.warnings_only || r.level.is_some_and(|lv| lv <= Level::WARN))
            .collect()
    }
}

impl Component for LogPanel {
    fn id(&self) -> ComponentId {
        ComponentId::LogPanel
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.expanded {
            return vec![];
        }
        let step = match key.code {
            KeyCode::Up | KeyCode::Char('k') => 1isize,
            KeyCode::Down | KeyCode::Char('j') => -1,
            KeyCode::PageUp => 10,
            KeyCode::PageDown => -10,
            KeyCode::Home | KeyCode::Char('g') => isize::MAX,
            KeyCode::End | KeyCode::Char('G') => isize::MIN,
            KeyCode::Char('w') => {
                self.warnings_only = !self.warnings_only;
                self.from_bottom = 0;
                0
            }
            _ => 0,
        };
        self.from_bottom = self.from_bottom.saturating_add_signed(step);
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::ToggleLogs = action {
            self.toggle();
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        if area.height == 0 {
            return;
        }
        frame.render_widget(Clear, area);

        if !self.expanded || area.height < 3 {
            let newest = state.log_lines.last().map(|l| LogRecord::parse(l));
            let mut spans = vec![Span::styled(" log ", Style::default().fg(C_MUTED))];
            match newest {
                Some(rec) => spans.extend(rec.spans()),
                None => spans.push(Span::styled("(empty)", Style::default().fg(C_MUTED))),
            }
            frame.render_widget(Paragraph::new(Line::from(spans)), area);
            return;
        }

        let badge = self.warnings_only.then_some(Badge {
            text: "warn+",
            color: C_LOADING,
        });
        let block = pane_chrome("log", focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let records = self.visible(&state.log_lines);
        if records.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("  nothing logged yet", Style::default().fg(C_MUTED))),
                inner,
            );
            return;
        }

        let height = inner.height as usize;
        let max_from_bottom = records.len().saturating_sub(height);
        self.from_bottom = self.from_bottom.min(max_from_bottom);
        let end = records.len() - self.from_bottom;
        let start = end.saturating_sub(height);

        let rows: Vec<Line> = records[start..end]
            .iter()
            .map(|r| {
                let mut spans = vec![Span::raw(" ")];
                spans.extend(r.spans());
                Line::from(spans)
            })
            .collect();
        frame.render_widget(Paragraph::new(rows), inner);
    }
}

// ── Record parsing ────────────────────────────────────────────────────────────

/// One line of tracing-subscriber's fmt output, e.g.
/// `2026-10-19T09:14:03.120Z  INFO wordbook::lookup: lookup #3 dispatched for "cat"`.
#[derive(Debug, PartialEq)]
struct LogRecord<'a> {
    /// Local wall-clock time, `HH:MM:SS`.
    time: Option<String>,
    level: Option<Level>,
    message: &'a str,
}

impl<'a> LogRecord<'a> {
    fn parse(raw: &'a str) -> Self {
        let mut rest = raw.trim();

        let mut time = None;
        if let Some((tok, after)) = rest.split_once(char::is_whitespace) {
            if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(tok) {
                time = Some(ts.with_timezone(&chrono::Local).format("%H:%M:%S").to_string());
                rest = after.trim_start();
            }
        }

        let mut level = None;
        if let Some((tok, after)) = rest.split_once(char::is_whitespace) {
            if let Ok(lv) = tok.parse::<Level>() {
                level = Some(lv);
                rest = after.trim_start();
            }
        }

        // Target prefix, `wordbook::lookup: `
        if let Some((target, msg)) = rest.split_once(": ") {
            if !target.contains(char::is_whitespace) && target.contains("::") {
                rest = msg;
            }
        }

        Self {
            time,
            level,
            message: rest,
        }
    }

    fn color(&self) -> Color {
        match self.level {
            Some(Level::ERROR) => C_ERROR,
            Some(Level::WARN) => C_LOADING,
            Some(Level::INFO) => C_SECONDARY,
            _ => C_MUTED,
        }
    }

    fn spans(&self) -> Vec<Span<'a>> {
        let mut spans = Vec::with_capacity(3);
        if let Some(t) = &self.time {
            spans.push(Span::styled(format!("{} ", t), Style::default().fg(C_MUTED)));
        }
        if let Some(lv) = self.level {
            spans.push(Span::styled(format!("{:<5} ", lv), Style::default().fg(self.color())));
        }
        spans.push(Span::styled(self.message, Style::default().fg(self.color())));
        spans
    }
}
