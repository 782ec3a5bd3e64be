//! Toasts — short-lived notices for side actions (clipboard, pronunciation).
//!
//! Stacked bottom-up in the lower-right corner, newest nearest the bottom.
//! Lookup status never goes through here; it has its own lines in the
//! query bar.

use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::theme::{C_TOAST_ERROR, C_TOAST_INFO, C_TOAST_SUCCESS, C_TOAST_WARNING};

/// Toasts kept at once; older ones are pushed out.
const MAX_TOASTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    fn glyph(self) -> &'static str {
        match self {
            Self::Info => "♪",
            Self::Success => "✓",
            Self::Warning => "!",
            Self::Error => "✗",
        }
    }

    fn color(self) -> Color {
        match self {
            Self::Info => C_TOAST_INFO,
            Self::Success => C_TOAST_SUCCESS,
            Self::Warning => C_TOAST_WARNING,
            Self::Error => C_TOAST_ERROR,
        }
    }

    /// Errors linger longer so they can be read.
    fn lifetime(self) -> Duration {
        match self {
            Self::Info | Self::Success => Duration::from_secs(3),
            Self::Warning => Duration::from_secs(4),
            Self::Error => Duration::from_secs(6),
        }
    }
}

struct Toast {
    text: String,
    severity: Severity,
    until: Instant,
}

#[derive(Default)]
pub struct ToastManager {
    toasts: Vec<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `text` for `ttl`. Repeating a visible message restarts its timer.
    pub fn push(&mut self, text: impl Into<String>, severity: Severity, ttl: Duration) {
        let text = text.into();
        self.toasts.retain(|t| t.text != text);
        self.toasts.push(Toast {
            text,
            severity,
            until: Instant::now() + ttl,
        });
        let overflow = self.toasts.len().saturating_sub(MAX_TOASTS);
        self.toasts.drain(..overflow);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(text, Severity::Info, Severity::Info.lifetime());
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(text, Severity::Success, Severity::Success.lifetime());
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.push(text, Severity::Warning, Severity::Warning.lifetime());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(text, Severity::Error, Severity::Error.lifetime());
    }

    /// Drop expired toasts.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.toasts.retain(|t| t.until > now);
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    #[cfg(test)]
    fn texts(&self) -> Vec<&str> {
        self.toasts.iter().map(|t| t.text.as_str()).collect()
    }

    /// Draw above the bottom two rows of `area` (keys bar + log line).
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let max_w = area.width.saturating_sub(2).min(60);
        let mut y = area.bottom().saturating_sub(3);
        for toast in self.toasts.iter().rev() {
            if y <= area.y || max_w < 8 {
                break;
            }
            let label = format!(" {} {} ", toast.severity.glyph(), toast.text);
            let w = (label.chars().count() as u16).min(max_w);
            let chip = Rect {
                x: area.right().saturating_sub(w + 1),
                y,
                width: w,
                height: 1,
            };
            frame.render_widget(Clear, chip);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    label,
                    Style::default()
                        .fg(toast.severity.color())
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED),
                ))),
                chip,
            );
            y -= 1;
        }
    }
}
