use thiserror::Error;
use tickergen_core::{CoreError, ErrorKind};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Core(error) => match error.kind() {
                ErrorKind::Validation => 2,
                ErrorKind::EmptyResult => 3,
                ErrorKind::Parse => 4,
                ErrorKind::Feed | ErrorKind::Publish => 6,
            },
            Self::Config(_) => 2,
            Self::Logging(_) => 10,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use tickergen_core::{FeedError, InstrumentError};

    use super::*;

    #[test]
    fn exit_codes_follow_error_kind() {
        let validation = CliError::from(CoreError::from(InstrumentError::InvalidData {
            value: serde_json::Value::Null,
        }));
        assert_eq!(validation.exit_code(), 2);
        assert_eq!(CliError::from(CoreError::EmptyResult).exit_code(), 3);

        let feed = CliError::from(CoreError::from(FeedError::UnexpectedStatus { status: 503 }));
        assert_eq!(feed.exit_code(), 6);
        assert_eq!(feed.to_string(), "got non 200 response, status code: 503");
    }
}
