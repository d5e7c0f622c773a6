use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::ProtocolKind;

#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// JSON over HTTP POST
    Http,
    /// Unary gRPC over HTTP/2
    Grpc,
}

impl From<Protocol> for ProtocolKind {
    fn from(value: Protocol) -> Self {
        match value {
            Protocol::Http => ProtocolKind::Http,
            Protocol::Grpc => ProtocolKind::Grpc,
        }
    }
}

/// Built-in load shapes matching the service's tank scripts.
#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// 100 VUs for 2s against the REST gateway
    Rest,
    /// 100 VUs for 2s against the gRPC port
    Grpc,
    /// 300 VUs for 10s against the REST gateway
    Soak,
}

impl Preset {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Preset::Rest => "rest",
            Preset::Grpc => "grpc",
            Preset::Soak => "soak",
        }
    }
}
