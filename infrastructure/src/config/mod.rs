//! Configuration file loading for ICGL
//!
//! Handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Explicitly provided config path
//! 2. Project root: `./icgl.toml` or `./.icgl.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/icgl/config.toml`
//! 4. Fallback: `~/.config/icgl/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{FileAnalysisConfig, FileConfig, FileLoggingConfig, FileSignoffConfig};
pub use loader::ConfigLoader;
