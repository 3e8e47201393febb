//! Structured logging to a rotating file.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt JSON layer → RotatingFile → reelscout.log
//! ```
//!
//! # Features
//!
//! - **JSON lines**: one event per line with the enclosing span's fields
//! - **Automatic Rotation**: files rotate at 10MB with 3 numbered backups
//! - **Quiet terminal**: stdout belongs to the renderer
//!
//! # Configuration
//!
//! Level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option (or `REELSCOUT_LOG`)
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - `init`: subscriber setup
//! - `file_writer`: size-rotated file writer

mod file_writer;
mod init;

pub use file_writer::{RotatingFile, MAX_BACKUP_FILES, MAX_FILE_SIZE_BYTES};
pub use init::{init_tracing, LOG_FILE_NAME};
