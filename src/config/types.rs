use std::time::Duration;

use serde::Deserialize;

use crate::args::{Preset, Protocol, parse_delay_arg, parse_duration_arg};
use crate::error::ValidationError;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub preset: Option<Preset>,
    pub protocol: Option<Protocol>,
    #[serde(alias = "target")]
    pub url: Option<String>,
    #[serde(alias = "virtual_users")]
    pub vus: Option<u64>,
    pub duration: Option<DurationValue>,
    pub ramp_up: Option<DurationValue>,
    #[serde(alias = "authors")]
    pub author_ids: Option<Vec<String>>,
    pub name_template: Option<String>,
    #[serde(alias = "success_status")]
    pub success_statuses: Option<Vec<u16>>,
    pub think_time: Option<DurationValue>,
    pub timeout: Option<DurationValue>,
    pub connect_timeout: Option<DurationValue>,
    pub retries: Option<u32>,
    pub grace_period: Option<DurationValue>,
    pub seed: Option<u64>,
    pub summary_json: Option<String>,
    pub fail_on_check: Option<bool>,
}

/// A duration written either as whole seconds or as a suffixed string
/// (`"250ms"`, `"2s"`, `"1m"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration_arg(text),
        }
    }

    /// Like [`DurationValue::to_duration`] but zero is allowed.
    pub(crate) fn to_delay(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_delay_arg(text),
        }
    }
}
