use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::args::DEFAULT_USER_AGENT;
use crate::domain::{BookPayload, ProtocolKind};
use crate::error::TransportError;

use super::{Transport, TransportResponse};

const JSON_CONTENT_TYPE: &str = "application/json";

/// POSTs the payload as JSON and reports the HTTP status.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    url: Url,
    target: String,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns `BuildClientFailed` when the client cannot be constructed.
    pub fn new(
        url: Url,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .tcp_nodelay(true)
            .build()
            .map_err(|source| TransportError::BuildClientFailed { source })?;
        let target = url.to_string();
        Ok(Self {
            client,
            url,
            target,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn protocol(&self) -> ProtocolKind {
        ProtocolKind::Http
    }

    fn target(&self) -> &str {
        &self.target
    }

    async fn send(&self, payload: &BookPayload) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .json(payload)
            .send()
            .await
            .map_err(TransportError::from_reqwest)?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|source| TransportError::ReadBody { source })?;
        Ok(TransportResponse {
            status,
            response_bytes: u64::try_from(body.len()).unwrap_or(u64::MAX),
        })
    }
}
