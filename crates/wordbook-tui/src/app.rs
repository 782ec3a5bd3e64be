//! App — component-based event loop.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background tasks
//!   (terminal input, finished lookups).
//! - A second channel carries words out of the debouncer; each one starts a lookup.
//! - The event loop draws each frame, then awaits the next message.
//! - Components return `Vec<Action>`; App dispatches each Action.

use std::io::{self, Read, Seek, SeekFrom};
use std::path::PathBuf;
use std::time::Duration;

use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use wordbook_proto::client::{DictionaryClient, LookupError};
use wordbook_proto::config::Config;
use wordbook_proto::protocol::DictionaryResponse;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::{
        help_overlay::HelpOverlay, log_panel::LogPanel, query_bar::QueryBar,
        result_panel::ResultPanel,
    },
    debounce::Debouncer,
    focus::FocusRing,
    lookup::{self, LookupController, LookupTicket},
    player::Player,
    widgets::{status_bar, toast::ToastManager},
};

/// Lines of the log file kept for the log panel.
const LOG_TAIL_LINES: usize = 500;
/// Bytes read from the end of the log file on each refresh.
const LOG_TAIL_BYTES: u64 = 64 * 1024;

pub enum AppMessage {
    Event(Event),
    LookupSettled(LookupTicket, Result<DictionaryResponse, LookupError>),
}

pub struct App {
    state: AppState,

    // ── Components ────────────────────────────────────────────────────────────
    query_bar: QueryBar,
    result_panel: ResultPanel,
    log_panel: LogPanel,
    help_overlay: HelpOverlay,
    toast: ToastManager,

    focus: FocusRing,
    show_keys_bar: bool,

    // ── Lookup pipeline ───────────────────────────────────────────────────────
    controller: LookupController,
    client: DictionaryClient,
    player: Player,
    debounce_delay: Duration,
    /// Built in `run()`; needs the runtime and the word channel.
    debouncer: Option<Debouncer<String>>,
    msg_tx: Option<mpsc::Sender<AppMessage>>,

    should_quit: bool,
}

impl App {
    pub fn new(config: &Config, client: DictionaryClient, log_path: PathBuf) -> Self {
        Self {
            state: AppState::new(log_path),
            query_bar: QueryBar::new(),
            result_panel: ResultPanel::new(),
            log_panel: LogPanel::new(),
            help_overlay: HelpOverlay::new(),
            toast: ToastManager::new(),
            focus: FocusRing::new(),
            show_keys_bar: true,
            controller: LookupController::new(),
            client,
            player: Player::new(&config.audio),
            debounce_delay: config.debounce_delay(),
            debouncer: None,
            msg_tx: None,
            should_quit: false,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);
        let (word_tx, mut word_rx) = mpsc::channel::<String>(16);
        self.connect(tx.clone(), word_tx);
        self.reload_log();

        // ── Background task: keyboard events ──────────────────────────────────
        // Polls so the thread notices the loop is gone and exits.
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            if event_tx.is_closed() {
                break;
            }
            match event::poll(Duration::from_millis(100)) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                },
                Ok(false) => {}
                Err(_) => break,
            }
        });
        drop(tx);

        // ── Periodic timers ───────────────────────────────────────────────────
        // Spinner animation + toast expiry.
        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut log_refresh = tokio::time::interval(Duration::from_secs(2));
        log_refresh.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    self.handle_message(msg);
                    needs_redraw = true;
                }

                Some(word) = word_rx.recv() => {
                    self.start_lookup(&word);
                    needs_redraw = true;
                }

                _ = ui_tick.tick() => {
                    needs_redraw = self.on_ui_tick();
                }

                _ = log_refresh.tick() => {
                    self.reload_log();
                    needs_redraw = true;
                }
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        if let Some(d) = self.debouncer.as_mut() {
            d.cancel();
        }
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    /// Attach the loop's channels: finished lookups come back on `msg_tx`,
    /// debounced words leave on `word_tx`.
    fn connect(&mut self, msg_tx: mpsc::Sender<AppMessage>, word_tx: mpsc::Sender<String>) {
        self.msg_tx = Some(msg_tx);
        let debouncer = Debouncer::new(self.debounce_delay, word_tx);
        debug!("input debounced by {:?}", debouncer.delay());
        self.debouncer = Some(debouncer);
    }

    fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Event(ev) => match ev {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        return;
                    }
                    for a in self.handle_key(key) {
                        self.dispatch(a);
                    }
                }
                Event::Resize(w, h) => self.dispatch(Action::Resize(w, h)),
                _ => {}
            },

            AppMessage::LookupSettled(ticket, outcome) => {
                if self.controller.settle(&ticket, outcome) {
                    self.state.lookup = self.controller.state().clone();
                }
            }
        }
    }

    fn on_ui_tick(&mut self) -> bool {
        let mut actions = Vec::new();
        actions.extend(self.query_bar.tick(&self.state));
        actions.extend(self.result_panel.tick(&self.state));
        for a in actions {
            self.dispatch(a);
        }
        let had_toasts = !self.toast.is_empty();
        self.toast.tick();
        self.state.lookup.is_loading || had_toasts
    }

    // ── Lookup pipeline ───────────────────────────────────────────────────────

    /// A word survived the quiet window: enter Loading and fire the request.
    fn start_lookup(&mut self, word: &str) {
        // The word may have been queued just before the input was emptied
        if self.state.input_text.trim().is_empty() {
            debug!("input empty, dropping committed word {:?}", word);
            return;
        }
        let Some(ticket) = self.controller.begin(word) else {
            return;
        };
        self.state.lookup = self.controller.state().clone();

        let Some(tx) = self.msg_tx.clone() else {
            warn!("lookup for {:?} dropped: event loop not running", word);
            return;
        };
        let client = self.client.clone();
        tokio::spawn(async move {
            let outcome = lookup::execute(&client, &ticket).await;
            let _ = tx.send(AppMessage::LookupSettled(ticket, outcome)).await;
        });
    }

    // ── Keyboard ──────────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            return vec![Action::Quit];
        }
        if self.help_overlay.visible {
            return self.help_overlay.handle_key(key, &self.state);
        }

        match key.code {
            KeyCode::F(1) => return vec![Action::ToggleHelp],
            KeyCode::Tab => return vec![Action::FocusNext],
            KeyCode::BackTab => return vec![Action::FocusPrev],
            KeyCode::Char('l') if ctrl => return vec![Action::ToggleLogs],
            KeyCode::Char('k') if ctrl => return vec![Action::ToggleKeys],
            KeyCode::Char('p') if ctrl => return vec![Action::PlayPronunciation],
            KeyCode::Char('y') if ctrl => return vec![Action::CopyResult],
            _ => {}
        }

        match self.focus.current() {
            ComponentId::ResultPanel => {
                let actions = self.result_panel.handle_key(key, &self.state);
                if actions.is_empty() && is_typing(&key) {
                    // Typing from the result pane goes back to the input
                    self.focus.set(ComponentId::QueryBar);
                    return self.query_bar.handle_key(key, &self.state);
                }
                actions
            }
            ComponentId::LogPanel => self.log_panel.handle_key(key, &self.state),
            _ => self.query_bar.handle_key(key, &self.state),
        }
    }

    // ── Actions ───────────────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        // Broadcast to components first so toggles land before the App reacts
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.query_bar.on_action(&action, s));
            out.extend(self.result_panel.on_action(&action, s));
            out.extend(self.log_panel.on_action(&action, s));
            out.extend(self.help_overlay.on_action(&action, s));
            out
        };

        self.apply_action(action);

        // Depth-limited to 1 level
        for a in secondary {
            self.apply_action(a);
        }
    }

    fn apply_action(&mut self, action: Action) {
        match &action {
            Action::Noop | Action::QueryChanged(_) => {}
            _ => debug!("apply_action: {:?}", action),
        }
        match action {
            // ── Query ─────────────────────────────────────────────────────────
            Action::QueryChanged(text) | Action::QuerySubmitted(text) => {
                self.state.input_text = text.clone();
                if let Some(d) = self.debouncer.as_mut() {
                    if text.trim().is_empty() {
                        d.cancel();
                    } else {
                        d.schedule(text);
                    }
                }
            }
            Action::QueryCleared => {
                self.state.input_text.clear();
                if let Some(d) = self.debouncer.as_mut() {
                    if d.is_pending() {
                        debug!("input cleared, scheduled lookup dropped");
                    }
                    d.cancel();
                }
            }

            // ── Result ────────────────────────────────────────────────────────
            Action::PlayPronunciation => {
                if !self.state.lookup.has_audio() {
                    self.toast.warning("No pronunciation for this word");
                    return;
                }
                let url = self.state.lookup.audio_url.clone();
                match self.player.play(&url) {
                    Ok(()) => self
                        .toast
                        .info(format!("Playing \"{}\"", self.state.lookup.result_title)),
                    Err(e) => {
                        warn!("pronunciation failed: {:#}", e);
                        self.toast.error(format!("{:#}", e));
                    }
                }
            }
            Action::CopyResult => {
                let Some(text) = self.state.clipboard_text() else {
                    self.toast.warning("Nothing to copy yet");
                    return;
                };
                match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.clone())) {
                    Ok(()) => {
                        info!("copied to clipboard: {}", text);
                        self.toast.success("Copied to clipboard");
                    }
                    Err(e) => {
                        warn!("clipboard: {}", e);
                        self.toast.error(format!("Clipboard error: {}", e));
                    }
                }
            }

            // ── Navigation ────────────────────────────────────────────────────
            Action::FocusNext => {
                self.focus.next();
            }
            Action::FocusPrev => {
                self.focus.prev();
            }

            // ── UI toggles ────────────────────────────────────────────────────
            Action::ToggleLogs => {
                // LogPanel already flipped `expanded` in on_action
                if self.log_panel.expanded {
                    self.reload_log();
                }
                self.focus.set_log_open(self.log_panel.expanded);
            }
            Action::ToggleKeys => {
                self.show_keys_bar = !self.show_keys_bar;
            }
            Action::ToggleHelp => {}

            Action::Quit => {
                info!("quit requested");
                self.should_quit = true;
            }

            // Handled by components in on_action
            Action::ScrollUp(_) | Action::ScrollDown(_) | Action::Resize(_, _) | Action::Noop => {}
        }
    }

    /// Read the tail of the log file into `state.log_lines`.
    fn reload_log(&mut self) {
        match read_tail(&self.state.log_path, LOG_TAIL_BYTES, LOG_TAIL_LINES) {
            Ok(lines) => self.state.log_lines = lines,
            Err(e) => debug!("log tail unavailable: {}", e),
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        use crate::theme::C_BG;
        use ratatui::widgets::Block;
        let area = frame.area();

        frame.render_widget(
            Block::default().style(ratatui::style::Style::default().bg(C_BG)),
            area,
        );

        // ── Outer layout: query | result | log | (keys) ──────────────────────
        let query_h = QueryBar::height(&self.state);
        let log_h = if self.log_panel.expanded { 10u16 } else { 1 };
        let status_h = if self.show_keys_bar { 1u16 } else { 0 };

        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(query_h),
                Constraint::Min(3),
                Constraint::Length(log_h),
                Constraint::Length(status_h),
            ])
            .split(area);

        let focused = self.focus.current();
        self.query_bar.draw(
            frame,
            outer[0],
            focused == ComponentId::QueryBar,
            &self.state,
        );
        self.result_panel.draw(
            frame,
            outer[1],
            focused == ComponentId::ResultPanel,
            &self.state,
        );
        self.log_panel.draw(
            frame,
            outer[2],
            focused == ComponentId::LogPanel,
            &self.state,
        );
        if self.show_keys_bar {
            let bar_focus = if self.help_overlay.visible {
                ComponentId::HelpOverlay
            } else {
                focused
            };
            status_bar::draw_keys_bar(frame, outer[3], bar_focus, self.state.lookup.is_loading);
        }

        // ── Help overlay (on top of everything) ──────────────────────────────
        self.help_overlay.draw(frame, area, false, &self.state);

        // ── Toast notifications (topmost layer) ──────────────────────────────
        self.toast.draw(frame, area);
    }
}

/// Plain characters that should land in the input.
fn is_typing(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char(_) | KeyCode::Backspace)
        && !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

/// Last `max_lines` lines from the final `max_bytes` of `path`.
fn read_tail(path: &std::path::Path, max_bytes: u64, max_lines: usize) -> io::Result<Vec<String>> {
    let mut file = std::fs::File::open(path)?;
    let len = file.metadata()?.len();
    let start = len.saturating_sub(max_bytes);
    file.seek(SeekFrom::Start(start))?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;

    let text = String::from_utf8_lossy(&buf);
    let mut lines: Vec<&str> = text.lines().collect();
    // A mid-file start usually cuts the first line in half
    if start > 0 && !lines.is_empty() {
        lines.remove(0);
    }
    let skip = lines.len().saturating_sub(max_lines);
    Ok(lines[skip..].iter().map(|l| l.to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wordbook_proto::protocol::{Entry, NotFound};

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn plain(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_is_typing() {
        assert!(is_typing(&plain('a')));
        assert!(is_typing(&KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE)));
        assert!(!is_typing(&ctrl('a')));
        assert!(!is_typing(&KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)));
    }

    #[test]
    fn test_read_tail_keeps_last_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for i in 0..20 {
            writeln!(file, "line {}", i).unwrap();
        }
        let lines = read_tail(file.path(), 1024, 5).unwrap();
        assert_eq!(lines, ["line 15", "line 16", "line 17", "line 18", "line 19"]);
    }

    #[test]
    fn test_read_tail_drops_cut_first_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "aaaaaaaaaa\nbbb\nccc\n").unwrap();
        // 10 bytes from the end lands inside the first line's tail
        let lines = read_tail(file.path(), 10, 100).unwrap();
        assert_eq!(lines, ["bbb", "ccc"]);
    }

    #[test]
    fn test_read_tail_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_tail(&dir.path().join("nope.log"), 1024, 10).is_err());
    }

    // ── Lookup triggers ───────────────────────────────────────────────────────

    const WINDOW: Duration = Duration::from_millis(500);

    fn test_app() -> App {
        let mut config = Config::default();
        config.service.base_url = "http://127.0.0.1:9/api/v2/entries/en".to_string();
        config.lookup.debounce_ms = WINDOW.as_millis() as u64;
        let client = DictionaryClient::new(&config.service).unwrap();
        App::new(&config, client, PathBuf::from("wordbook.log"))
    }

    /// App wired to channels the test holds the other ends of.
    fn connected_app() -> (App, mpsc::Receiver<AppMessage>, mpsc::Receiver<String>) {
        let mut app = test_app();
        let (msg_tx, msg_rx) = mpsc::channel(16);
        let (word_tx, word_rx) = mpsc::channel(16);
        app.connect(msg_tx, word_tx);
        (app, msg_rx, word_rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_burst_commits_last_text() {
        let (mut app, _msg_rx, mut word_rx) = connected_app();
        for text in ["c", "ca", "cat"] {
            app.dispatch(Action::QueryChanged(text.to_string()));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(word_rx.try_recv().is_err());

        tokio::time::sleep(WINDOW).await;
        assert_eq!(word_rx.try_recv().unwrap(), "cat");
        assert_eq!(app.state.input_text, "cat");
    }

    #[tokio::test(start_paused = true)]
    async fn test_emptying_input_cancels_pending_lookup() {
        let (mut app, _msg_rx, mut word_rx) = connected_app();
        app.dispatch(Action::QueryChanged("ca".to_string()));
        tokio::time::sleep(Duration::from_millis(200)).await;
        app.dispatch(Action::QueryCleared);
        assert!(app.state.input_text.is_empty());

        tokio::time::sleep(WINDOW * 3).await;
        assert!(word_rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_whitespace_text_cancels_instead_of_scheduling() {
        let (mut app, _msg_rx, mut word_rx) = connected_app();
        app.dispatch(Action::QueryChanged("cat".to_string()));
        tokio::time::sleep(Duration::from_millis(100)).await;
        app.dispatch(Action::QueryChanged("   ".to_string()));

        tokio::time::sleep(WINDOW * 3).await;
        assert!(word_rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_on_unchanged_text_waits_for_window() {
        let (mut app, _msg_rx, mut word_rx) = connected_app();
        app.dispatch(Action::QueryChanged("dog".to_string()));
        tokio::time::sleep(WINDOW + Duration::from_millis(100)).await;
        assert_eq!(word_rx.try_recv().unwrap(), "dog");

        app.dispatch(Action::QuerySubmitted("dog".to_string()));
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(word_rx.try_recv().is_err());
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(word_rx.try_recv().unwrap(), "dog");
    }

    #[tokio::test(start_paused = true)]
    async fn test_word_queued_before_clear_starts_nothing() {
        let (mut app, _msg_rx, mut word_rx) = connected_app();
        app.dispatch(Action::QueryChanged("cat".to_string()));
        tokio::time::sleep(WINDOW + Duration::from_millis(100)).await;
        let word = word_rx.try_recv().unwrap();

        // Cleared after delivery but before the loop picked the word up
        app.dispatch(Action::QueryCleared);
        app.start_lookup(&word);
        assert!(!app.state.lookup.is_loading);
        assert!(app.state.lookup.query_text.is_empty());
    }

    #[tokio::test]
    async fn test_only_newest_settlement_reaches_state() {
        // Not connected: start_lookup enters Loading without spawning a request
        let mut app = test_app();
        app.state.input_text = "cat".to_string();
        app.start_lookup("ca");
        app.start_lookup("cat");
        assert!(app.state.lookup.is_loading);
        assert_eq!(app.state.lookup.query_text, "cat");

        let stale = LookupTicket {
            generation: 1,
            word: "ca".to_string(),
        };
        app.handle_message(AppMessage::LookupSettled(
            stale,
            Ok(DictionaryResponse::NotFound(NotFound {
                title: "No Definitions Found".to_string(),
                message: None,
            })),
        ));
        assert!(app.state.lookup.is_loading);
        assert!(app.state.lookup.result_title.is_empty());

        let newest = LookupTicket {
            generation: 2,
            word: "cat".to_string(),
        };
        app.handle_message(AppMessage::LookupSettled(
            newest,
            Ok(DictionaryResponse::Found(Entry {
                word: "cat".to_string(),
                definition: "A small domesticated carnivore.".to_string(),
                audio_url: None,
            })),
        ));
        assert!(!app.state.lookup.is_loading);
        assert_eq!(app.state.lookup.result_title, "cat");
        assert_eq!(
            app.state.lookup.result_meaning,
            "A small domesticated carnivore."
        );
    }
}
