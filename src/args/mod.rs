//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod tests;

pub use cli::TesterArgs;
pub use types::{Preset, Protocol};

pub(crate) use defaults::DEFAULT_USER_AGENT;
pub(crate) use parsers::{parse_delay_arg, parse_duration_arg};
