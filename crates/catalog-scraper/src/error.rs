use thiserror::Error;

/// Coarse classification of a failed page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailureKind {
    Timeout,
    Status(u16),
    Transport,
    Other,
}

impl std::fmt::Display for FetchFailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchFailureKind::Timeout => write!(f, "timeout"),
            FetchFailureKind::Status(status) => write!(f, "http status {status}"),
            FetchFailureKind::Transport => write!(f, "transport"),
            FetchFailureKind::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request to {url} timed out: {source}")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("network error fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to fetch {url}: {reason}")]
    Other { url: String, reason: String },
}

impl ScraperError {
    /// Returns the fetch classification, or `None` for errors that did not
    /// come from a page request (e.g. client construction).
    #[must_use]
    pub fn fetch_kind(&self) -> Option<FetchFailureKind> {
        match self {
            ScraperError::Http(_) => None,
            ScraperError::Timeout { .. } => Some(FetchFailureKind::Timeout),
            ScraperError::UnexpectedStatus { status, .. } => {
                Some(FetchFailureKind::Status(*status))
            }
            ScraperError::Transport { .. } => Some(FetchFailureKind::Transport),
            ScraperError::Other { .. } => Some(FetchFailureKind::Other),
        }
    }
}

/// A product card that cannot produce a record at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("product card has no title element")]
    MissingTitle,
}

/// Failure to extract one optional field from a card. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("malformed value: {0}")]
    Malformed(String),
}
