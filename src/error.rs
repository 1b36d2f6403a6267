use reqwest::StatusCode;
use thiserror::Error;

/// Failure of one of the two remote calls (translate, suggestions).
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("translation service error ({status}) from {url}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("failed to parse response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl RemoteError {
    pub(crate) fn from_send(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            RemoteError::Timeout {
                url: url.to_string(),
            }
        } else {
            RemoteError::Transport {
                url: url.to_string(),
                source,
            }
        }
    }

    /// Timeouts, transport failures, 5xx and 429 are worth another attempt.
    /// Other 4xx responses and undecodable bodies are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            RemoteError::Timeout { .. } | RemoteError::Transport { .. } => true,
            RemoteError::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            RemoteError::Decode { .. } => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("speech recognition failed: {0}")]
    Recognition(String),

    #[error("speech synthesis failed: {0}")]
    Synthesis(String),
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown language code: '{0}'")]
    UnknownLanguage(String),

    #[error("Unsupported UI locale: '{0}'")]
    UnknownLocale(String),
}
