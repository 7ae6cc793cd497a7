//! Error types for the Sibyl service.

/// Top-level error type for the question-answering service.
#[derive(Debug, thiserror::Error)]
pub enum SibylError {
    /// Every configured knowledge miner failed; there is no evidence to
    /// rank against.
    #[error("all knowledge miners failed: {0}")]
    AllMinersFailed(String),

    /// HTTP request to a search backend failed.
    #[error("http error: {0}")]
    Http(String),

    /// Search backend response could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// HTTP listener error.
    #[error("server error: {0}")]
    Server(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, SibylError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_their_context() {
        let err = SibylError::AllMinersFailed("DuckDuckGo: timeout; Bing: 401".into());
        assert_eq!(
            err.to_string(),
            "all knowledge miners failed: DuckDuckGo: timeout; Bing: 401"
        );

        let err = SibylError::Config("no miners configured".into());
        assert_eq!(err.to_string(), "config error: no miners configured");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        let err = SibylError::from(io);
        assert!(matches!(err, SibylError::Io(_)));
        assert!(err.to_string().contains("missing file"));
    }
}
