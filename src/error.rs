use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RedmineError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Non-success status carrying a parseable `{"errors": [...]}` body.
    /// Displays as the server messages joined by newlines.
    #[error("{}", messages.join("\n"))]
    Server { status: u16, messages: Vec<String> },

    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error(
        "No API key found. Set REDMINE_API_KEY env var or add api_key to ~/.config/redmine/config.toml"
    )]
    MissingApiKey,

    #[error(
        "No Redmine URL found. Set REDMINE_URL env var or add url to ~/.config/redmine/config.toml"
    )]
    MissingEndpoint,
}

impl RedmineError {
    /// HTTP status of a server-reported error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            RedmineError::Server { status, .. } => Some(*status),
            RedmineError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RedmineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_joins_messages_with_newlines() {
        let err = RedmineError::Server {
            status: 422,
            messages: vec!["Login has already been taken".into(), "Email is invalid".into()],
        };
        assert_eq!(err.to_string(), "Login has already been taken\nEmail is invalid");
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_decode_error_has_no_status() {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = RedmineError::Decode(source);
        assert!(err.to_string().starts_with("Failed to decode response"));
        assert_eq!(err.status(), None);
    }
}
