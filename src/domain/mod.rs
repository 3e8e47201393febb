//! Domain layer for Reelscout.
//!
//! Core data types shared by every other layer, independent of the HTTP client
//! and the terminal host.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Movie records and listing pages
//! - [`image`]: Image configuration and URL derivation

pub mod error;
pub mod image;
pub mod movie;

pub use error::{ReelscoutError, Result};
pub use image::{ConfigurationResponse, ImageCandidate, ImageConfig, ImageKind};
pub use movie::{Movie, MoviePage};
