mod app;
mod config;
mod metrics;
mod transport;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use metrics::MetricsError;
pub use transport::TransportError;
pub use validation::ValidationError;
