//! Action enum — all user-initiated intents and internal events.

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    QueryBar,
    ResultPanel,
    LogPanel,
    HelpOverlay,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Query ────────────────────────────────────────────────────────────────
    /// The input text changed (watched value update).
    QueryChanged(String),
    /// Enter pressed on non-empty input.
    QuerySubmitted(String),
    /// Input emptied; any scheduled lookup is dropped.
    QueryCleared,

    // ── Result ───────────────────────────────────────────────────────────────
    PlayPronunciation,
    CopyResult,
    ScrollUp(usize),
    ScrollDown(usize),

    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleLogs,
    ToggleHelp,
    ToggleKeys,

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
    Resize(u16, u16),
    Noop,
}
