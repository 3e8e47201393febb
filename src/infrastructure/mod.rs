//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where the client keeps its configuration file and its log file,
//! following the XDG base directory conventions with `$HOME` fallbacks.

pub mod paths;

pub use paths::{config_file, expand_tilde, log_dir};
