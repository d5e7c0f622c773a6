use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{BookPayload, ProtocolKind};
use crate::error::TransportError;

use super::{Transport, TransportResponse};

/// Body size reported for every status reply.
pub(crate) const STUB_RESPONSE_BYTES: u64 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StubReply {
    Status(u16),
    Unavailable,
    Malformed,
}

/// In-memory transport for exercising the executor and scheduler. Replies
/// come from `script` first, then `fallback` forever.
#[derive(Debug)]
pub(crate) struct StubTransport {
    protocol: ProtocolKind,
    script: Mutex<VecDeque<StubReply>>,
    fallback: StubReply,
    delay: Duration,
    calls: AtomicU64,
    payloads: Mutex<Vec<BookPayload>>,
}

impl StubTransport {
    pub(crate) fn new(fallback: StubReply) -> Self {
        Self {
            protocol: ProtocolKind::Http,
            script: Mutex::new(VecDeque::new()),
            fallback,
            delay: Duration::ZERO,
            calls: AtomicU64::new(0),
            payloads: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_script<I>(mut self, replies: I) -> Self
    where
        I: IntoIterator<Item = StubReply>,
    {
        self.script = Mutex::new(replies.into_iter().collect());
        self
    }

    pub(crate) const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) const fn with_protocol(mut self, protocol: ProtocolKind) -> Self {
        self.protocol = protocol;
        self
    }

    pub(crate) fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn payloads(&self) -> Vec<BookPayload> {
        self.payloads
            .lock()
            .map(|payloads| payloads.clone())
            .unwrap_or_default()
    }

    fn next_reply(&self) -> StubReply {
        self.script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or(self.fallback)
    }
}

#[async_trait]
impl Transport for StubTransport {
    fn protocol(&self) -> ProtocolKind {
        self.protocol
    }

    fn target(&self) -> &str {
        "stub://library"
    }

    async fn send(&self, payload: &BookPayload) -> Result<TransportResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut payloads) = self.payloads.lock() {
            payloads.push(payload.clone());
        }
        let reply = self.next_reply();
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match reply {
            StubReply::Status(status) => Ok(TransportResponse {
                status,
                response_bytes: STUB_RESPONSE_BYTES,
            }),
            StubReply::Unavailable => Err(TransportError::Unavailable {
                reason: "connection refused".to_owned(),
            }),
            StubReply::Malformed => Err(TransportError::MalformedFrame {
                reason: "truncated frame",
            }),
        }
    }
}
