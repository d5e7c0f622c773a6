use std::time::Duration;

use async_trait::async_trait;
use prost::Message;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use url::Url;

use crate::args::DEFAULT_USER_AGENT;
use crate::domain::{BookPayload, ProtocolKind};
use crate::error::TransportError;

use super::proto::{AddBookRequest, AddBookResponse};
use super::{Transport, TransportResponse};

pub(super) const ADD_BOOK_PATH: &str = "/library.Library/AddBook";

pub const GRPC_OK: u16 = 0;
const GRPC_UNKNOWN: u16 = 2;
const GRPC_PERMISSION_DENIED: u16 = 7;
const GRPC_UNIMPLEMENTED: u16 = 12;
const GRPC_INTERNAL: u16 = 13;
const GRPC_UNAVAILABLE: u16 = 14;
const GRPC_UNAUTHENTICATED: u16 = 16;

const FRAME_HEADER_LEN: usize = 5;

/// Unary `AddBook` over HTTP/2. Cleartext targets use prior knowledge (h2c),
/// TLS targets negotiate HTTP/2 through ALPN.
#[derive(Debug, Clone)]
pub struct GrpcTransport {
    client: reqwest::Client,
    url: Url,
    target: String,
}

impl GrpcTransport {
    /// # Errors
    ///
    /// Returns `BuildClientFailed` when the client cannot be constructed.
    pub fn new(
        url: Url,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .http2_adaptive_window(true)
            .tcp_nodelay(true);
        if url.scheme() == "http" {
            builder = builder.http2_prior_knowledge();
        }
        let client = builder
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
impl Transport for GrpcTransport {
    fn protocol(&self) -> ProtocolKind {
        ProtocolKind::Grpc
    }

    fn target(&self) -> &str {
        &self.target
    }

    async fn send(&self, payload: &BookPayload) -> Result<TransportResponse, TransportError> {
        let message = AddBookRequest::from(payload).encode_to_vec();
        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/grpc")
            .header("te", "trailers")
            .body(grpc_frame(&message))
            .send()
            .await
            .map_err(TransportError::from_reqwest)?;

        let http_status = response.status();
        if http_status != StatusCode::OK {
            return Ok(TransportResponse {
                status: grpc_status_from_http(http_status),
                response_bytes: 0,
            });
        }
        // Trailers-only responses (every error from a conforming server)
        // carry the status in the headers block.
        let header_status = grpc_status_header(response.headers());

        let body = response
            .bytes()
            .await
            .map_err(|source| TransportError::ReadBody { source })?;
        let response_bytes = u64::try_from(body.len()).unwrap_or(u64::MAX);

        if let Some(status) = header_status {
            return Ok(TransportResponse {
                status,
                response_bytes,
            });
        }
        if body.is_empty() {
            return Ok(TransportResponse {
                status: GRPC_UNKNOWN,
                response_bytes,
            });
        }

        let frame = parse_grpc_frame(&body)?;
        AddBookResponse::decode(frame).map_err(|source| TransportError::Decode { source })?;
        Ok(TransportResponse {
            status: GRPC_OK,
            response_bytes,
        })
    }
}

/// Prefixes a message with the uncompressed gRPC length-delimited header.
pub(crate) fn grpc_frame(payload: &[u8]) -> Vec<u8> {
    let payload_len = u32::try_from(payload.len()).unwrap_or(u32::MAX);
    let mut framed = Vec::with_capacity(payload.len().saturating_add(FRAME_HEADER_LEN));
    framed.push(0);
    framed.extend_from_slice(&payload_len.to_be_bytes());
    framed.extend_from_slice(payload);
    framed
}

/// Returns the message bytes of the first frame in `body`.
pub(crate) fn parse_grpc_frame(body: &[u8]) -> Result<&[u8], TransportError> {
    let (header, rest) = body
        .split_at_checked(FRAME_HEADER_LEN)
        .ok_or(TransportError::MalformedFrame {
            reason: "frame shorter than header",
        })?;
    let [compressed, len @ ..] = header else {
        return Err(TransportError::MalformedFrame {
            reason: "frame shorter than header",
        });
    };
    if *compressed != 0 {
        return Err(TransportError::MalformedFrame {
            reason: "compressed frames are not supported",
        });
    }
    let len_bytes: [u8; 4] = len.try_into().map_err(|_err| TransportError::MalformedFrame {
        reason: "frame shorter than header",
    })?;
    let message_len = usize::try_from(u32::from_be_bytes(len_bytes)).map_err(|_err| {
        TransportError::MalformedFrame {
            reason: "frame length overflows usize",
        }
    })?;
    rest.get(..message_len)
        .ok_or(TransportError::MalformedFrame {
            reason: "frame truncated",
        })
}

fn grpc_status_header(headers: &HeaderMap) -> Option<u16> {
    let raw = headers.get("grpc-status")?;
    let status = raw
        .to_str()
        .ok()
        .and_then(|value| value.trim().parse::<u16>().ok())
        .unwrap_or(GRPC_UNKNOWN);
    Some(status)
}

/// HTTP-to-gRPC status mapping for responses that never reached a gRPC
/// handler (proxies, wrong port).
fn grpc_status_from_http(status: StatusCode) -> u16 {
    match status.as_u16() {
        400 => GRPC_INTERNAL,
        401 => GRPC_UNAUTHENTICATED,
        403 => GRPC_PERMISSION_DENIED,
        404 => GRPC_UNIMPLEMENTED,
        429 | 502 | 503 | 504 => GRPC_UNAVAILABLE,
        _ => GRPC_UNKNOWN,
    }
}

#[must_use]
pub const fn grpc_code_name(code: u16) -> &'static str {
    match code {
        0 => "OK",
        1 => "CANCELLED",
        2 => "UNKNOWN",
        3 => "INVALID_ARGUMENT",
        4 => "DEADLINE_EXCEEDED",
        5 => "NOT_FOUND",
        6 => "ALREADY_EXISTS",
        7 => "PERMISSION_DENIED",
        8 => "RESOURCE_EXHAUSTED",
        9 => "FAILED_PRECONDITION",
        10 => "ABORTED",
        11 => "OUT_OF_RANGE",
        12 => "UNIMPLEMENTED",
        13 => "INTERNAL",
        14 => "UNAVAILABLE",
        15 => "DATA_LOSS",
        16 => "UNAUTHENTICATED",
        _ => "UNRECOGNIZED",
    }
}
