//! Live job tracker
//!
//! Sends a job title and location to a remote search API and renders the
//! returned listings plus a chart of the top hiring companies.

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod input;
pub mod presenter;
pub mod session;

pub use client::QueryClient;
pub use config::TrackerConfig;
pub use error::{ErrorKind, SearchError};
pub use session::{SearchSession, Ticket, ViewState};
