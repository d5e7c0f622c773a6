use super::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML config '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to parse JSON config '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported config extension '{ext}'. Use .toml or .json.")]
    UnsupportedExtension { ext: String },
    #[error("Config file must have .toml or .json extension.")]
    MissingExtension,
    #[error("Invalid '{field}': {source}")]
    InvalidDuration {
        field: &'static str,
        #[source]
        source: ValidationError,
    },
    #[error("Virtual user count must be >= 1 (got {value}).")]
    VirtualUsersTooSmall { value: u64 },
    #[error("Virtual user count must be <= {max} (got {value}).")]
    VirtualUsersTooLarge { value: u64, max: u64 },
    #[error("Run duration must be > 0.")]
    DurationNotPositive,
    #[error("Ramp-up ({ramp_up:?}) must not exceed the run duration ({duration:?}).")]
    RampLongerThanDuration {
        ramp_up: std::time::Duration,
        duration: std::time::Duration,
    },
    #[error("Ramp-up must be > 0.")]
    RampUpZero,
    #[error("Author pool must contain at least one identifier.")]
    EmptyAuthorPool,
    #[error("Author identifiers must not be blank.")]
    BlankAuthorId,
    #[error("At least one success status is required.")]
    EmptySuccessStatuses,
    #[error("No target set. Pass --url, a config 'url', or a --preset.")]
    MissingTarget,
    #[error("Invalid target URL '{url}': {source}")]
    InvalidTarget {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Unsupported target scheme '{scheme}'. Use http or https.")]
    UnsupportedScheme { scheme: String },
    #[error("Target '{url}' has no host.")]
    TargetMissingHost { url: String },
    #[error("Name template must not be empty.")]
    EmptyNameTemplate,
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
