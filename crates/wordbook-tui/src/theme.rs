//! Colours and styles for the wordbook TUI. Warm "ink on paper" palette on a
//! dark background.

use ratatui::style::{Color, Modifier, Style};

pub const C_BG: Color = Color::Rgb(22, 20, 18);

// Text
pub const C_PRIMARY: Color = Color::Rgb(228, 220, 204);
pub const C_SECONDARY: Color = Color::Rgb(150, 140, 124);
pub const C_MUTED: Color = Color::Rgb(92, 86, 78);
pub const C_HEADWORD: Color = Color::Rgb(240, 196, 96);

// Lookup status
pub const C_LOADING: Color = Color::Rgb(232, 170, 72);
pub const C_ERROR: Color = Color::Rgb(226, 96, 86);
pub const C_AUDIO: Color = Color::Rgb(120, 190, 140);

// Chrome
pub const C_PANEL_BORDER: Color = Color::Rgb(56, 52, 46);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(200, 150, 90);
pub const C_INPUT_BG: Color = Color::Rgb(30, 28, 25);
pub const C_INPUT_FG: Color = Color::Rgb(246, 236, 214);
pub const C_MODE_LABEL: Color = Color::Rgb(200, 150, 90);

// Toasts
pub const C_TOAST_INFO: Color = C_AUDIO;
pub const C_TOAST_SUCCESS: Color = Color::Rgb(150, 200, 110);
pub const C_TOAST_WARNING: Color = C_LOADING;
pub const C_TOAST_ERROR: Color = C_ERROR;

pub fn style_default() -> Style {
    Style::default().fg(C_PRIMARY)
}

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

pub fn style_headword() -> Style {
    Style::default()
        .fg(C_HEADWORD)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn style_border(focused: bool) -> Style {
    Style::default().fg(if focused {
        C_PANEL_BORDER_FOCUSED
    } else {
        C_PANEL_BORDER
    })
}
