//! Remote metadata API layer.
//!
//! Requests leave the controller as [`FetchRequest`]s tagged with the state
//! that produced them, run concurrently on the session loop, and come back as
//! [`FetchOutcome`]s carrying the same tag.
//!
//! # Architecture
//!
//! - `messages`: Request/response types and stale-detection tags
//! - `client`: The [`MovieApi`] seam and its `reqwest` implementation

pub mod client;
pub mod messages;

pub use client::{Credential, MovieApi, TmdbClient};
pub use messages::{DetailOutcome, FetchOutcome, FetchRequest, FetchTag, ListQuery, PageOutcome};
