//! # tlstats-cli
//!
//! Command-line tooling around [`tlstats_core`]: reads a JSON requirements
//! corpus, analyzes every formula, and exports the flattened statistics as
//! CSV into a managed working directory.
//!
//! ## Modules
//!
//! - [`config`]: run configuration, loadable from JSON
//! - [`corpus`]: corpus reading, validation and batch analysis
//! - [`flatten`]: dotted-key flattening of nested records
//! - [`export`]: CSV export with timestamped filenames
//! - [`error`]: digest error type
//! - [`logging`]: logging utilities

pub mod config;
pub mod corpus;
pub mod error;
pub mod export;
pub mod flatten;

/// Logging utilities
pub mod logging {
    use log::LevelFilter;
    use std::env;

    /// Initialize logger based on debug flag or environment variable
    pub fn init_logger(debug: bool) {
        let log_level = if debug {
            LevelFilter::Debug
        } else if env::var("RUST_LOG").is_ok() {
            // Allow RUST_LOG to override if set
            env_logger::init();
            return;
        } else {
            LevelFilter::Warn
        };

        env_logger::Builder::new().filter_level(log_level).init();
    }
}
