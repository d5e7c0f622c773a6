use std::collections::BTreeSet;

use crate::domain::ProtocolKind;
use crate::error::ConfigError;
use crate::transport::{GRPC_OK, grpc_code_name};

const HTTP_DEFAULT_SUCCESS: [u16; 2] = [200, 201];

/// Status codes that count as a passed check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessStatuses {
    protocol: ProtocolKind,
    codes: BTreeSet<u16>,
}

impl SuccessStatuses {
    /// Uses `codes` when given, otherwise the protocol default (200/201 for
    /// HTTP, OK for gRPC).
    ///
    /// # Errors
    ///
    /// Returns `EmptySuccessStatuses` if the resulting set would be empty.
    pub fn new(protocol: ProtocolKind, codes: &[u16]) -> Result<Self, ConfigError> {
        let codes: BTreeSet<u16> = if codes.is_empty() {
            match protocol {
                ProtocolKind::Http => HTTP_DEFAULT_SUCCESS.into_iter().collect(),
                ProtocolKind::Grpc => BTreeSet::from([GRPC_OK]),
            }
        } else {
            codes.iter().copied().collect()
        };
        if codes.is_empty() {
            return Err(ConfigError::EmptySuccessStatuses);
        }
        Ok(Self { protocol, codes })
    }

    #[must_use]
    pub fn contains(&self, status: u16) -> bool {
        self.codes.contains(&status)
    }

    /// Check label, e.g. `status is 200 or 201` or `status is OK`.
    #[must_use]
    pub fn label(&self) -> String {
        let names: Vec<String> = self
            .codes
            .iter()
            .map(|code| match self.protocol {
                ProtocolKind::Http => code.to_string(),
                ProtocolKind::Grpc => grpc_code_name(*code).to_owned(),
            })
            .collect();
        format!("status is {}", names.join(" or "))
    }
}
