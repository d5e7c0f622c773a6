//! Pluggable delivery of book-creation requests (REST or gRPC).
mod endpoint;
mod grpc;
mod http;
pub mod proto;

#[cfg(test)]
pub(crate) mod stub;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{BookPayload, ProtocolKind};
use crate::error::{AppResult, ConfigError, TransportError};

pub use endpoint::{resolve_grpc_endpoint, resolve_http_endpoint};
pub use grpc::{GRPC_OK, GrpcTransport, grpc_code_name};
pub use http::HttpTransport;

pub(crate) use grpc::{grpc_frame, parse_grpc_frame};

/// What came back from a single request. `status` is an HTTP status for the
/// REST transport and a gRPC status code for the RPC transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub response_bytes: u64,
}

#[async_trait]
pub trait Transport: Send + Sync {
    fn protocol(&self) -> ProtocolKind;

    /// Human-readable endpoint, used in logs and the run summary.
    fn target(&self) -> &str;

    /// Sends one request and waits for its status.
    ///
    /// # Errors
    ///
    /// Returns a `TransportError` when no status could be obtained.
    async fn send(&self, payload: &BookPayload) -> Result<TransportResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub protocol: ProtocolKind,
    pub target: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl TransportConfig {
    /// Checks the target shape for the chosen protocol without building a
    /// client.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when the target cannot be resolved.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.protocol {
            ProtocolKind::Http => resolve_http_endpoint(&self.target).map(drop),
            ProtocolKind::Grpc => resolve_grpc_endpoint(&self.target).map(drop),
        }
    }
}

/// Builds the transport for a run. The returned client owns a connection
/// pool shared by every virtual user.
///
/// # Errors
///
/// Returns an error when the target is invalid or the client cannot be
/// built.
pub fn build_transport(config: &TransportConfig) -> AppResult<Arc<dyn Transport>> {
    let transport: Arc<dyn Transport> = match config.protocol {
        ProtocolKind::Http => {
            let url = resolve_http_endpoint(&config.target)?;
            Arc::new(HttpTransport::new(
                url,
                config.request_timeout,
                config.connect_timeout,
            )?)
        }
        ProtocolKind::Grpc => {
            let url = resolve_grpc_endpoint(&config.target)?;
            Arc::new(GrpcTransport::new(
                url,
                config.request_timeout,
                config.connect_timeout,
            )?)
        }
    };
    Ok(transport)
}
