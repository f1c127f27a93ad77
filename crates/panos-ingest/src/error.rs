//! Error types for page ingestion.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
