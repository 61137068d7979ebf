//! Configuration discovery and loading for the CLI

pub mod defaults;
pub mod loader;

pub use loader::{CliConfigLoader, ConfigSource, LoadedConfig};
