//! Configuration management for chatpdf
//!
//! This crate provides a validated configuration system with support for:
//! - Multiple formats (YAML, TOML, JSON)
//! - Config validation with helpful error messages
//! - Config merging (file + environment + CLI)
//! - Credentials read once from the process environment
//!
//! # Example
//!
//! ```no_run
//! use chatpdf_config::{Config, Credentials};
//!
//! // Load from default location (.chatpdf.{toml,yml,json})
//! let config = Config::load()?;
//!
//! // Or load from specific file
//! let config = Config::from_file("path/to/config.toml")?;
//!
//! // Credentials are resolved separately and never written to config files
//! let credentials = Credentials::from_env(&config.api)?;
//!
//! let chunk_size = config.chunking.chunk_size;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod credentials;
pub mod error;
pub mod loader;
pub mod types;
pub mod validation;

pub use credentials::Credentials;
pub use error::{ConfigError, ErrorFormatter, Result};
pub use loader::ConfigBuilder;
pub use types::*;

/// Trait for config validation
pub use validation::Validate;
