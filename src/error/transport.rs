use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to connect: {source}")]
    Connect {
        #[source]
        source: reqwest::Error,
    },
    #[error("Request timed out.")]
    Timeout,
    #[error("Request failed: {source}")]
    Request {
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to read response body: {source}")]
    ReadBody {
        #[source]
        source: reqwest::Error,
    },
    #[error("Malformed gRPC frame: {reason}")]
    MalformedFrame { reason: &'static str },
    #[error("Failed to decode protobuf message: {source}")]
    Decode {
        #[source]
        source: prost::DecodeError,
    },
    #[error("Transport unavailable: {reason}")]
    Unavailable { reason: String },
}

impl TransportError {
    /// Classifies a `reqwest` failure into the retryable/terminal buckets used
    /// by the executor.
    #[must_use]
    pub fn from_reqwest(source: reqwest::Error) -> Self {
        if source.is_timeout() {
            TransportError::Timeout
        } else if source.is_connect() {
            TransportError::Connect { source }
        } else {
            TransportError::Request { source }
        }
    }

    /// Connection failures and timeouts are worth another attempt; malformed
    /// replies are not.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            TransportError::Connect { .. }
                | TransportError::Timeout
                | TransportError::Unavailable { .. }
        )
    }
}
