use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the flight network library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when an airport code is not part of the network.
    #[error("unknown airport: {code}{}", format_suggestions(.suggestions))]
    UnknownAirport {
        code: String,
        suggestions: Vec<String>,
    },

    /// Raised when a query asks for a route from an airport to itself.
    #[error("source and destination are both {code}")]
    SameEndpoints { code: String },

    /// A path referenced a leg that the network does not contain.
    ///
    /// Paths produced by the finder always follow existing edges, so this
    /// signals a programming error rather than a user mistake.
    #[error("path references missing route {from} -> {to}")]
    MissingEdge { from: String, to: String },

    /// Raised when engine configuration fails validation.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Dataset files could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for JSON (configuration) errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error means a requested airport was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::UnknownAirport { .. })
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
