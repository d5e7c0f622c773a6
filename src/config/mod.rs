//! Configuration loading, presets, and profile validation.
mod apply;
mod loader;
mod presets;
mod profile;
pub mod types;


pub use apply::{apply_config, apply_preset};
pub use loader::load_config;
pub use profile::load_profile;

pub(crate) use loader::DEFAULT_CONFIG_FILES;
#[cfg(test)]
pub(crate) use loader::load_config_file;
