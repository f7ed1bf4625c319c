//! Run configuration and header override files.
mod loader;
pub mod types;


pub use loader::{DEFAULT_CONFIG_FILES, load_config, load_header_overrides};
pub use types::{ConfigFile, PlanConfig};

#[cfg(test)]
pub(crate) use loader::load_config_file;
