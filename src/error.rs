use thiserror::Error;

pub type Result<T> = std::result::Result<T, VoteError>;

/// Everything that can go wrong between a click and a counter update.
///
/// A missing counter element is deliberately absent here: it means the page
/// markup and the server disagree, and the widget treats it as a no-op.
#[derive(Debug, Error)]
pub enum VoteError {
    #[error("HTTP error! Status: {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to parse vote response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for VoteError {
    fn from(err: reqwest::Error) -> Self {
        VoteError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_matches_console_output() {
        assert_eq!(VoteError::Status(503).to_string(), "HTTP error! Status: 503");
    }

    #[test]
    fn parse_errors_convert_from_serde() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        let vote_err: VoteError = err.into();
        assert!(matches!(vote_err, VoteError::Parse(_)));
    }
}
