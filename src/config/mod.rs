//! Configuration module for Web Analyzer
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; a missing file section falls back to the built-in
//! defaults (30s fetch timeout, 20 probe workers, 30s probing deadline, 5s per probe).
//!
//! # Example
//!
//! ```no_run
//! use web_analyzer::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("analyzer.toml")).unwrap();
//! println!("Probe workers: {}", config.links.max_workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetchConfig, LinksConfig, ParserConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
