//! Status bar — bottom line with the focused pane and its keybindings.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::ComponentId;
use crate::theme::{C_LOADING, C_MODE_LABEL, C_MUTED};

fn mode_label(focused: ComponentId) -> &'static str {
    match focused {
        ComponentId::ResultPanel => "RESULT",
        ComponentId::LogPanel => "LOGS",
        ComponentId::HelpOverlay => "HELP",
        ComponentId::QueryBar => "INPUT",
    }
}

fn keys_for(focused: ComponentId) -> &'static str {
    match focused {
        ComponentId::ResultPanel => {
            " ↑↓/jk scroll  p play  y copy  Tab input  ^L logs  F1 help  ^C quit"
        }
        ComponentId::LogPanel => " ↑↓/jk scroll  g/G top/bottom  w warn+  Tab next pane  ^L close  ^C quit",
        ComponentId::HelpOverlay => " Esc close",
        ComponentId::QueryBar => {
            " type to look up  Enter submit  Esc clear/quit  ^P play  ^Y copy  Tab result  ^L logs  F1 help  ^C quit"
        }
    }
}

/// Draw the keybindings footer bar (one row). `loading` lights the bulb.
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, focused: ComponentId, loading: bool) {
    let mut spans = vec![Span::styled(
        format!(" {} ", mode_label(focused)),
        Style::default().fg(C_MODE_LABEL).add_modifier(Modifier::BOLD),
    )];
    let bulb = if loading { C_LOADING } else { C_MUTED };
    spans.push(Span::styled(
        "●",
        Style::default().fg(bulb).add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::raw(" "));
    spans.push(Span::styled(keys_for(focused), Style::default().fg(C_MUTED)));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pane_has_keys() {
        for id in [
            ComponentId::QueryBar,
            ComponentId::ResultPanel,
            ComponentId::LogPanel,
            ComponentId::HelpOverlay,
        ] {
            assert!(!keys_for(id).trim().is_empty());
            assert!(!mode_label(id).is_empty());
        }
        assert!(keys_for(ComponentId::QueryBar).contains("Enter"));
    }
}
