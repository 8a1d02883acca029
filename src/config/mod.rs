//! Configuration module for Coachmap
//!
//! Handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use coachmap::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Scraper will retry up to {} times", config.scraper.max_retries);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, DirectoryConfig, FailurePolicy, OutputConfig, ScraperConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
