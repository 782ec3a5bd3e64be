//! HelpOverlay component — F1 popup listing the key bindings.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Row, Table},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_INPUT_BG, C_MUTED, C_PANEL_BORDER_FOCUSED, C_PRIMARY, C_SECONDARY},
};

/// Binding groups as `(heading, [(keys, effect)])`.
const BINDINGS: &[(&str, &[(&str, &str)])] = &[
    (
        "lookup",
        &[
            ("typing", "look the word up after a short pause"),
            ("enter", "look the current word up again"),
            ("esc", "clear the input, quit when already empty"),
        ],
    ),
    (
        "result",
        &[
            ("ctrl+p · p", "play the pronunciation"),
            ("ctrl+y · y", "copy \"word: meaning\""),
            ("↑↓ · j k", "scroll the focused pane"),
        ],
    ),
    (
        "window",
        &[
            ("tab · shift+tab", "move focus between panes"),
            ("ctrl+l", "open / close the log"),
            ("w", "log: warnings and errors only"),
            ("ctrl+k", "show / hide the keys bar"),
            ("f1", "this help"),
            ("ctrl+c", "quit"),
        ],
    ),
];

const KEY_COL: u16 = 18;
const POPUP_W: u16 = 62;

pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }

    fn rows() -> Vec<Row<'static>> {
        let mut rows = Vec::new();
        for (i, (heading, keys)) in BINDINGS.iter().enumerate() {
            if i > 0 {
                rows.push(Row::new(vec![Cell::from("")]));
            }
            rows.push(Row::new(vec![Cell::from(Span::styled(
                *heading,
                Style::default().fg(C_MUTED).add_modifier(Modifier::BOLD),
            ))]));
            for (key, effect) in keys.iter() {
                rows.push(Row::new(vec![
                    Cell::from(Span::styled(
                        *key,
                        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
                    )),
                    Cell::from(Span::styled(*effect, Style::default().fg(C_SECONDARY))),
                ]));
            }
        }
        rows
    }
}

impl Component for HelpOverlay {
    fn id(&self) -> ComponentId {
        ComponentId::HelpOverlay
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.visible {
            return vec![];
        }
        match key.code {
            KeyCode::F(1) | KeyCode::Esc | KeyCode::Char('q') => vec![Action::ToggleHelp],
            // Swallow the rest while the popup is up
            _ => vec![Action::Noop],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::ToggleHelp = action {
            self.visible = !self.visible;
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, _state: &AppState) {
        if !self.visible {
            return;
        }
        let rows = Self::rows();
        // rows + borders + footer
        let h = (rows.len() as u16 + 3).min(area.height);
        let w = POPUP_W.min(area.width);
        let popup = Rect {
            x: area.x + (area.width - w) / 2,
            y: area.y + (area.height - h) / 2,
            width: w,
            height: h,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(C_PANEL_BORDER_FOCUSED))
            .style(Style::default().bg(C_INPUT_BG))
            .title(Line::from(Span::styled(
                " keys ",
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )))
            .title_bottom(Line::from(Span::styled(
                " f1 / esc to close ",
                Style::default().fg(C_MUTED),
            )));

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Table::new(rows, [Constraint::Length(KEY_COL), Constraint::Min(10)])
                .block(block)
                .column_spacing(1),
            popup,
        );
    }
}
