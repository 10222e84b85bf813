use thiserror::Error;

/// Convenient result alias for the railplan library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a station code could not be found in the network.
    #[error("unknown station: {code}{}", format_suggestions(.suggestions))]
    UnknownStation {
        code: String,
        suggestions: Vec<String>,
    },

    /// Raised when a network dataset fails structural validation.
    #[error("invalid network data: {message}")]
    NetworkDataValidation { message: String },

    /// Raised when car data fails validation.
    #[error("invalid car data: {message}")]
    CarDataValidation { message: String },

    /// Raised when the same car id appears twice for one operator.
    #[error("duplicate car id '{id}' for operator {operator}")]
    DuplicateCarId { operator: String, id: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
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
