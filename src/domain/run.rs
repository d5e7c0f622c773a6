use std::time::Duration;

use serde::Serialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolKind {
    Http,
    Grpc,
}

impl ProtocolKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ProtocolKind::Http => "http",
            ProtocolKind::Grpc => "grpc",
        }
    }
}

/// How virtual users are brought online at the start of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampStrategy {
    /// Every virtual user starts immediately.
    Constant,
    /// Virtual user starts are spread evenly across `ramp_up`.
    Ramping { ramp_up: Duration },
}

impl RampStrategy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RampStrategy::Constant => "constant",
            RampStrategy::Ramping { .. } => "ramping",
        }
    }
}

/// Upper bound on concurrent virtual users for a single process.
pub const MAX_VIRTUAL_USERS: u64 = 1_000_000;

/// Validated load shape. Fields are private so a profile cannot be changed
/// once a run has been planned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadProfile {
    virtual_users: u64,
    duration: Duration,
    ramp: RampStrategy,
}

impl LoadProfile {
    /// Builds a profile, rejecting a virtual-user count outside
    /// `1..=MAX_VIRTUAL_USERS`, a zero duration, and ramps that outlast the run.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` describing the first invalid field.
    pub fn new(
        virtual_users: u64,
        duration: Duration,
        ramp: RampStrategy,
    ) -> Result<Self, ConfigError> {
        if virtual_users < 1 {
            return Err(ConfigError::VirtualUsersTooSmall {
                value: virtual_users,
            });
        }
        if virtual_users > MAX_VIRTUAL_USERS {
            return Err(ConfigError::VirtualUsersTooLarge {
                value: virtual_users,
                max: MAX_VIRTUAL_USERS,
            });
        }
        if duration.is_zero() {
            return Err(ConfigError::DurationNotPositive);
        }
        if let RampStrategy::Ramping { ramp_up } = ramp {
            if ramp_up.is_zero() {
                return Err(ConfigError::RampUpZero);
            }
            if ramp_up > duration {
                return Err(ConfigError::RampLongerThanDuration { ramp_up, duration });
            }
        }
        Ok(Self {
            virtual_users,
            duration,
            ramp,
        })
    }

    #[must_use]
    pub const fn virtual_users(&self) -> u64 {
        self.virtual_users
    }

    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub const fn ramp(&self) -> RampStrategy {
        self.ramp
    }
}

/// One pass of a virtual user's loop. `virtual_user_id` is 1-based and
/// `iteration_index` is 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Iteration {
    pub virtual_user_id: u64,
    pub iteration_index: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub passed: bool,
    pub label: String,
    pub status: Option<u16>,
    pub latency: Duration,
    pub virtual_user_id: u64,
    pub iteration_index: u64,
    pub attempts: u32,
    /// Body bytes of the final response; zero when no response arrived.
    pub response_bytes: u64,
}
