//! Lookup controller — one lookup cycle from a committed word to displayed result.
//!
//! ```text
//!  Idle ──begin(w)──▶ Loading ──settle(Ok)──▶ Idle (title/meaning/audio replaced)
//!                            └──settle(Err)─▶ Idle (error set, result kept)
//! ```
//!
//! Every `begin` hands out a ticket carrying a generation number. Only the
//! ticket from the newest `begin` may settle; older tickets are dropped so a
//! slow answer for an earlier word can never overwrite a newer one.

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use wordbook_proto::client::{DictionaryClient, LookupError};
use wordbook_proto::protocol::DictionaryResponse;

pub const MEANING_NOT_AVAILABLE: &str = "N/A";
pub const LOOKUP_FAILED: &str = "An error happened, try again later";

pub fn searching_message(word: &str) -> String {
    format!("Searching the meaning of \"{}\"", word)
}

/// Presentation state of the lookup screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupState {
    pub query_text: String,
    pub status_message: String,
    pub result_title: String,
    pub result_meaning: String,
    pub audio_url: String,
    pub is_loading: bool,
    pub error_message: String,
    /// When the displayed result (or error) was applied.
    pub looked_up_at: Option<DateTime<Local>>,
}

impl LookupState {
    pub fn has_result(&self) -> bool {
        !self.result_title.is_empty()
    }

    pub fn has_error(&self) -> bool {
        !self.error_message.is_empty()
    }

    pub fn has_audio(&self) -> bool {
        !self.audio_url.is_empty()
    }
}

/// Proof of a dispatched lookup; hand it back to [`LookupController::settle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub generation: u64,
    pub word: String,
}

#[derive(Debug, Default)]
pub struct LookupController {
    state: LookupState,
    generation: u64,
}

impl LookupController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    /// Enter `Loading` for `word`. Blank words start nothing.
    pub fn begin(&mut self, word: &str) -> Option<LookupTicket> {
        let word = word.trim();
        if word.is_empty() {
            return None;
        }
        self.generation += 1;
        self.state.query_text = word.to_string();
        self.state.status_message = searching_message(word);
        self.state.error_message.clear();
        self.state.is_loading = true;
        info!("lookup #{} dispatched for {:?}", self.generation, word);
        Some(LookupTicket {
            generation: self.generation,
            word: word.to_string(),
        })
    }

    /// Apply the outcome of `ticket`'s request. Returns `false` (state
    /// untouched) when a newer lookup has been dispatched since.
    pub fn settle(
        &mut self,
        ticket: &LookupTicket,
        outcome: Result<DictionaryResponse, LookupError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "discarding stale lookup #{} for {:?} (current #{})",
                ticket.generation, ticket.word, self.generation
            );
            return false;
        }

        match outcome {
            Ok(DictionaryResponse::NotFound(nf)) => {
                debug!("{:?}: {}", ticket.word, nf.title);
                self.state.result_title = ticket.word.clone();
                self.state.result_meaning = MEANING_NOT_AVAILABLE.to_string();
                self.state.audio_url.clear();
            }
            Ok(DictionaryResponse::Found(entry)) => {
                self.state.result_title = entry.word;
                self.state.result_meaning = entry.definition;
                self.state.audio_url = entry.audio_url.unwrap_or_default();
            }
            Err(e) => {
                warn!("lookup for {:?} failed: {}", ticket.word, e);
                self.state.error_message = LOOKUP_FAILED.to_string();
            }
        }
        self.state.is_loading = false;
        self.state.looked_up_at = Some(Local::now());
        true
    }
}

/// Run the request for `ticket`; the result goes back through `settle`.
pub async fn execute(
    client: &DictionaryClient,
    ticket: &LookupTicket,
) -> Result<DictionaryResponse, LookupError> {
    client.lookup(&ticket.word).await
}
