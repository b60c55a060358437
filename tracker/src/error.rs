use thiserror::Error;

/// Broad category of a failed search, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Network,
    Server,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Input => write!(f, "input error"),
            ErrorKind::Network => write!(f, "network error"),
            ErrorKind::Server => write!(f, "server error"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SearchError {
    /// Rejected before any request was sent.
    #[error("Invalid search: {0}")]
    Input(String),

    /// The server could not be reached or the exchange was cut short
    /// (DNS, connection refused, timeout, truncated body).
    #[error("Could not reach search service: {0}")]
    Network(#[source] reqwest::Error),

    /// Non-success status code.
    #[error("Search service returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Success status, but the body is not a search result.
    #[error("Malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The task running the search died before producing an outcome.
    #[error("Search was interrupted: {0}")]
    Interrupted(String),

    /// The HTTP client itself could not be built.
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::Input(_) => ErrorKind::Input,
            SearchError::Network(_) | SearchError::Interrupted(_) | SearchError::Client(_) => {
                ErrorKind::Network
            }
            SearchError::Status { .. } | SearchError::Malformed(_) => ErrorKind::Server,
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
