/// Result alias that carries the custom [`SortVizError`] type.
pub type Result<T> = std::result::Result<T, SortVizError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum SortVizError {
    /// The requested name is not one of the registered algorithms.
    #[error("sorting method `{0}` not found")]
    UnknownAlgorithm(String),
    /// Another sort is already running on the same engine.
    #[error("a sort is already in progress")]
    SortInProgress,
    #[error("sort was cancelled")]
    Cancelled,
    /// Bogo sort hit its configured attempt cap before the sequence sorted.
    #[error("gave up after {attempts} shuffle attempts")]
    AttemptsExhausted { attempts: u64 },
    #[error("audio unavailable: {0}")]
    Audio(String),
    #[error("render failed: {0}")]
    Render(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl SortVizError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

impl From<&str> for SortVizError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for SortVizError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_algorithm_names_the_method() {
        let err = SortVizError::UnknownAlgorithm("wobble".to_string());
        assert!(format!("{err}").contains("wobble"));
    }

    #[test]
    fn converts_from_io_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SortVizError = io.into();
        assert!(matches!(err, SortVizError::Io(_)));
    }
}
