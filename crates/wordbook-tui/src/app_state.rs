//! AppState — shared read-only data passed to all components during render/event.
//!
//! Components read this, but never mutate it.
//! The App event-loop is the only thing that writes to AppState.

use std::path::PathBuf;

use crate::lookup::LookupState;

pub struct AppState {
    /// Snapshot of the lookup controller's state, refreshed after every
    /// begin/settle.
    pub lookup: LookupState,
    /// Current text of the input (may differ from the committed query).
    pub input_text: String,
    /// Cached tail of the log file (refreshed periodically by App).
    pub log_lines: Vec<String>,
    pub log_path: PathBuf,
}

impl AppState {
    pub fn new(log_path: PathBuf) -> Self {
        Self {
            lookup: LookupState::default(),
            input_text: String::new(),
            log_lines: Vec::new(),
            log_path,
        }
    }

    /// Text copied by the clipboard action, `None` without a result.
    pub fn clipboard_text(&self) -> Option<String> {
        if !self.lookup.has_result() {
            return None;
        }
        Some(format!(
            "{}: {}",
            self.lookup.result_title, self.lookup.result_meaning
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipboard_text_needs_result() {
        let mut state = AppState::new(PathBuf::from("wordbook.log"));
        assert_eq!(state.clipboard_text(), None);

        state.lookup.result_title = "cat".to_string();
        state.lookup.result_meaning = "A small domesticated carnivore.".to_string();
        assert_eq!(
            state.clipboard_text().as_deref(),
            Some("cat: A small domesticated carnivore.")
        );
    }
}
