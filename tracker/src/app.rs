//! Terminal front-end: owns the search session and prints the current view.

use std::collections::HashMap;
use std::future::Future;
use std::io::Write;

use anyhow::{Context, Result};
use common::{SearchQuery, SearchResult};
use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::{self, JoinSet};
use tracing::{error, info};

use crate::client::QueryClient;
use crate::error::SearchError;
use crate::presenter;
use crate::session::{Completion, SearchSession, Ticket, ViewState};

pub const TITLE: &str = "Live Job Tracker";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Text,
    Json,
}

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(SearchQuery),
    Quit,
    Skip,
}

/// Parses `title ; location`. A line without `;` searches with an empty
/// location. Whitespace around the separator is dropped.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    match line {
        "" => Command::Skip,
        ":q" | ":quit" => Command::Quit,
        _ => {
            let (query, location) = line.split_once(';').unwrap_or((line, ""));
            Command::Search(SearchQuery::new(query.trim(), location.trim()))
        }
    }
}

type Outcome = Result<SearchResult, SearchError>;

/// Searches that have been started but not collected yet.
///
/// Every spawned search is remembered by task id, so even a task that
/// panics still yields its ticket and query.
#[derive(Default)]
struct InFlight {
    tasks: JoinSet<Outcome>,
    searches: HashMap<task::Id, (Ticket, SearchQuery)>,
}

impl InFlight {
    fn spawn<F>(&mut self, ticket: Ticket, query: SearchQuery, search: F)
    where
        F: Future<Output = Outcome> + Send + 'static,
    {
        let handle = self.tasks.spawn(search);
        self.searches.insert(handle.id(), (ticket, query));
    }

    fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    async fn next(&mut self) -> Option<(Ticket, SearchQuery, Outcome)> {
        loop {
            let (id, outcome) = match self.tasks.join_next_with_id().await? {
                Ok((id, outcome)) => (id, outcome),
                Err(e) => {
                    error!("Search task failed: {}", e);
                    (e.id(), Err(SearchError::Interrupted(e.to_string())))
                }
            };
            if let Some((ticket, query)) = self.searches.remove(&id) {
                return Some((ticket, query, outcome));
            }
        }
    }
}

pub struct Tracker {
    client: QueryClient,
    session: SearchSession,
    mode: OutputMode,
}

impl Tracker {
    pub fn new(client: QueryClient, mode: OutputMode) -> Self {
        Self {
            client,
            session: SearchSession::new(),
            mode,
        }
    }

    pub fn view(&self) -> &ViewState {
        self.session.view()
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Runs one search to completion and applies it.
    pub async fn search_once(&mut self, query: &SearchQuery) -> &ViewState {
        let ticket = self.session.begin();
        let outcome = self.client.search(query).await;
        self.session.complete(ticket, outcome);
        self.session.view()
    }

    /// Writes the current view. Nothing is written before the first result.
    pub fn present<W: Write>(&self, out: &mut W) -> Result<()> {
        match (self.session.view(), self.mode) {
            (ViewState::Empty, _) => {}
            (ViewState::Displayed(result), OutputMode::Text) => {
                write!(out, "{}", presenter::render(result))?;
            }
            (ViewState::Displayed(result), OutputMode::Json) => {
                serde_json::to_writer_pretty(&mut *out, &presenter::render(result))?;
                writeln!(out)?;
            }
            (ViewState::Failed(failure), OutputMode::Text) => {
                writeln!(out, "Search failed ({}): {}", failure.kind, failure.message)?;
            }
            (ViewState::Failed(failure), OutputMode::Json) => {
                let body = json!({
                    "error": { "kind": failure.kind.to_string(), "message": failure.message }
                });
                serde_json::to_writer_pretty(&mut *out, &body)?;
                writeln!(out)?;
            }
        }
        out.flush()?;
        Ok(())
    }

    /// Marks the start of each applied result in text mode, so an empty
    /// result is visibly different from the one before it.
    fn write_heading<W: Write>(&self, query: &SearchQuery, out: &mut W) -> Result<()> {
        let ViewState::Displayed(result) = self.session.view() else {
            return Ok(());
        };
        if self.mode != OutputMode::Text {
            return Ok(());
        }
        let lead = if presenter::render(result).is_blank() {
            "No results for"
        } else {
            "Results for"
        };
        writeln!(out, "\n{lead} {:?} in {:?}", query.query, query.location)?;
        Ok(())
    }

    /// Reads `title ; location` lines until `:q` or end of input.
    ///
    /// Every line starts a search right away, even while earlier ones are
    /// still running. Only the newest search's outcome is shown.
    pub async fn run_interactive<R, W>(&mut self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        if self.mode == OutputMode::Text {
            writeln!(out, "{TITLE}")?;
            writeln!(out, "Enter `job title ; location` to search, `:q` to quit.")?;
            out.flush()?;
        }

        let mut lines = input.lines();
        let mut in_flight = InFlight::default();
        let mut input_open = true;

        while input_open || !in_flight.is_empty() {
            tokio::select! {
                line = lines.next_line(), if input_open => {
                    let Some(line) = line.context("Failed to read input")? else {
                        input_open = false;
                        continue;
                    };
                    match parse_command(&line) {
                        Command::Skip => {}
                        Command::Quit => input_open = false,
                        Command::Search(query) => {
                            let ticket = self.session.begin();
                            info!(
                                generation = ticket.generation(),
                                "Searching for {:?} in {:?}",
                                query.query,
                                query.location
                            );
                            let client = self.client.clone();
                            let request = query.clone();
                            in_flight.spawn(ticket, query, async move {
                                client.search(&request).await
                            });
                        }
                    }
                }
                Some((ticket, query, outcome)) = in_flight.next(), if !in_flight.is_empty() => {
                    if self.session.complete(ticket, outcome) == Completion::Applied {
                        self.write_heading(&query, out)?;
                        self.present(out)?;
                    }
                }
            }
        }
        Ok(())
    }
}
