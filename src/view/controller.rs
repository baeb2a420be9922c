//! View controller
//!
//! Owns the [`ViewState`] and applies the lookup transitions. The controller
//! never performs I/O itself: starting a search hands back a [`SearchRequest`]
//! that the caller executes and later resolves with [`ViewController::on_fetch_resolved`].

use tracing::debug;

use crate::client::FetchError;
use crate::models::Contributor;
use crate::view::state::{Phase, ViewState};

/// Prefix of every error message shown for a failed lookup.
pub const LOOKUP_FAILED_PREFIX: &str = "Failed to find contributor: ";

/// A lookup the caller must run on behalf of the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Identifies the search; only the latest one may resolve.
    pub generation: u64,
    pub username: String,
}

/// Events accepted by [`ViewController::dispatch`].
#[derive(Debug)]
pub enum ViewEvent {
    QueryTextChanged(String),
    SearchTriggered,
    FetchResolved {
        generation: u64,
        outcome: Result<Contributor, FetchError>,
    },
}

/// Single owner of the lookup view state.
#[derive(Debug, Default)]
pub struct ViewController {
    state: ViewState,
    generation: u64,
}

impl ViewController {
    pub fn new(initial_query: impl Into<String>) -> Self {
        Self {
            state: ViewState::new(initial_query),
            generation: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Generation of the most recent search, 0 before the first one.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether an avatar fetched for `generation` belongs to the card on screen.
    pub fn shows_result_of(&self, generation: u64) -> bool {
        generation == self.generation && self.phase() == Phase::Success
    }

    /// Routes an event to its transition.
    ///
    /// Returns the lookup to run when the event started a search.
    pub fn dispatch(&mut self, event: ViewEvent) -> Option<SearchRequest> {
        match event {
            ViewEvent::QueryTextChanged(text) => {
                self.on_query_text_change(text);
                None
            }
            ViewEvent::SearchTriggered => self.on_search_triggered(),
            ViewEvent::FetchResolved {
                generation,
                outcome,
            } => {
                self.on_fetch_resolved(generation, outcome);
                None
            }
        }
    }

    /// Replaces the query text. Valid in every phase.
    pub fn on_query_text_change(&mut self, text: impl Into<String>) {
        self.state.query_text = text.into();
    }

    /// Starts a lookup for the current query text.
    ///
    /// An empty query is ignored and leaves the state untouched. A search
    /// started while another is in flight supersedes it.
    pub fn on_search_triggered(&mut self) -> Option<SearchRequest> {
        if self.state.query_text.is_empty() {
            debug!("ignoring search with empty query");
            return None;
        }

        if self.state.is_loading {
            debug!(superseded = self.generation, "search superseded");
        }

        self.state.error_message.clear();
        self.state.result = None;
        self.state.is_loading = true;
        self.generation += 1;

        debug!(
            generation = self.generation,
            username = %self.state.query_text,
            "search started"
        );

        Some(SearchRequest {
            generation: self.generation,
            username: self.state.query_text.clone(),
        })
    }

    /// Applies the outcome of the lookup started as `generation`.
    ///
    /// Returns `false` when the outcome was discarded, either because no
    /// lookup is outstanding or because a newer search superseded it.
    pub fn on_fetch_resolved(
        &mut self,
        generation: u64,
        outcome: Result<Contributor, FetchError>,
    ) -> bool {
        if !self.state.is_loading || generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                loading = self.state.is_loading,
                "discarding stale lookup result"
            );
            return false;
        }

        self.state.is_loading = false;
        match outcome {
            Ok(contributor) => {
                debug!(generation, username = %contributor.github_username, "lookup succeeded");
                self.state.result = Some(contributor);
            }
            Err(err) => {
                debug!(generation, error = %err, "lookup failed");
                self.state.error_message = format!("{LOOKUP_FAILED_PREFIX}{err}");
            }
        }
        true
    }
}
