//! View state of the tracker and the request generations guarding it.
//!
//! Searches may overlap. Each one is issued a [`Ticket`]; only the outcome of
//! the most recently issued ticket is applied; older ones are dropped, so the
//! displayed result always belongs to the last search the user started.

use common::SearchResult;
use tracing::{debug, warn};

use crate::error::{ErrorKind, SearchError};

/// Generation tag of one issued search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// What the user currently sees.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    /// No search has completed yet.
    #[default]
    Empty,
    /// Jobs and analysis of the last applied response, replaced as a whole.
    Displayed(SearchResult),
    /// The last applied search failed.
    Failed(FailureView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureView {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&SearchError> for FailureView {
    fn from(err: &SearchError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

#[derive(Debug, Default)]
pub struct SearchSession {
    latest: u64,
    pending: bool,
    view: ViewState,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new search and supersedes every earlier one.
    pub fn begin(&mut self) -> Ticket {
        self.latest += 1;
        self.pending = true;
        debug!(generation = self.latest, "Search started");
        Ticket(self.latest)
    }

    /// Applies `outcome` if `ticket` is still the latest search.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<SearchResult, SearchError>,
    ) -> Completion {
        if ticket.0 != self.latest {
            warn!(
                generation = ticket.0,
                latest = self.latest,
                "Discarding response of superseded search"
            );
            return Completion::Stale;
        }

        self.pending = false;
        self.view = match outcome {
            Ok(result) => ViewState::Displayed(result),
            Err(err) => ViewState::Failed(FailureView::from(&err)),
        };
        Completion::Applied
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// True while the latest search has not completed.
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
