// File: crates/dataviz-core/src/error.rs
// Summary: Error taxonomy for loading, validating and transforming chart datasets.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// Transport failure or non-2xx status while fetching a document.
    #[error("failed to fetch {url}: {message}")]
    Network { url: String, message: String },

    /// Body was not JSON, or JSON did not match the expected schema.
    #[error("failed to parse {what}: {message}")]
    Parse { what: String, message: String },

    /// Input that cannot produce geometry (empty dataset, degenerate extent).
    #[error("precondition violated: {0}")]
    Precondition(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ChartError {
    pub fn parse(what: impl Into<String>, message: impl ToString) -> Self {
        Self::Parse { what: what.into(), message: message.to_string() }
    }

    pub fn network(url: impl Into<String>, message: impl ToString) -> Self {
        Self::Network { url: url.into(), message: message.to_string() }
    }
}

impl From<csv::Error> for ChartError {
    fn from(e: csv::Error) -> Self {
        match e.into_kind() {
            csv::ErrorKind::Io(io) => ChartError::Io(io),
            other => ChartError::Io(std::io::Error::new(std::io::ErrorKind::Other, format!("{other:?}"))),
        }
    }
}
