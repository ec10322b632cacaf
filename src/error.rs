// src/error.rs

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Everything that can go wrong while fetching or parsing PWS pages.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The HTTP collaborator failed: unreachable host, non-2xx status, body read error.
    #[error("transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    /// A compact date or a daily-history body did not have the expected shape.
    #[error("format error: {reason}")]
    Format { reason: String },

    /// A station-directory row did not match the positional markup layout.
    #[error("extraction error in station row {row}: {source}")]
    Extraction {
        row: usize,
        #[source]
        source: ExtractFault,
    },

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    pub(crate) fn format(reason: impl Into<String>) -> Self {
        ScrapeError::Format {
            reason: reason.into(),
        }
    }

    pub(crate) fn transport(url: impl ToString, source: impl Into<BoxError>) -> Self {
        ScrapeError::Transport {
            url: url.to_string(),
            source: source.into(),
        }
    }
}

/// Why a single rendered `<tr>` could not be turned into a station record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractFault {
    #[error("row markup has {found} lines, line {index} is required")]
    MissingLine { index: usize, found: usize },

    #[error("marker {marker:?} not found on line {line}")]
    MissingMarker { line: usize, marker: &'static str },
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
