//! Request and response types exchanged between the controller and the
//! remote API layer.
//!
//! Every list request carries a [`FetchTag`] recording the controller state it
//! was issued for. The tag travels back with the outcome so the controller can
//! tell a current response from a stale one.

use crate::domain::{Movie, MoviePage};
use std::fmt;

/// Identity of a list request: the state that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchTag {
    /// Bumped on every term change; the cheap part of the comparison.
    pub generation: u64,
    /// Trimmed term the request was issued for. Empty means trending.
    pub term: String,
    /// 1-based page requested.
    pub page: u32,
}

impl fmt::Display for FetchTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {:?} p{}", self.generation, self.term, self.page)
    }
}

/// Which listing endpoint a request goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListQuery {
    /// `GET /trending/movie/week?page={page}`
    Trending { page: u32 },
    /// `GET /search/movie?query={query}&page={page}`
    Search { query: String, page: u32 },
}

impl ListQuery {
    /// Chooses the endpoint for a tag: trending for an empty term, search otherwise.
    #[must_use]
    pub fn for_tag(tag: &FetchTag) -> Self {
        if tag.term.is_empty() {
            Self::Trending { page: tag.page }
        } else {
            Self::Search {
                query: tag.term.clone(),
                page: tag.page,
            }
        }
    }
}

/// A list request ready to be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub tag: FetchTag,
    pub query: ListQuery,
}

impl FetchRequest {
    #[must_use]
    pub fn new(tag: FetchTag) -> Self {
        let query = ListQuery::for_tag(&tag);
        Self { tag, query }
    }
}

/// Settled outcome of a remote call, with the error already rendered to text.
///
/// The controller only needs to know that a call failed and what to report, so
/// errors are flattened here and the outcome stays `Clone + PartialEq` for tests.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Loaded(T),
    Failed(String),
}

/// Outcome of a list request.
pub type PageOutcome = FetchOutcome<MoviePage>;

/// Outcome of a detail request.
pub type DetailOutcome = FetchOutcome<Movie>;

impl<T> From<crate::domain::Result<T>> for FetchOutcome<T> {
    fn from(result: crate::domain::Result<T>) -> Self {
        match result {
            Ok(value) => Self::Loaded(value),
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}
