//! Loading phase and route state types.
//!
//! # State Machine
//!
//! The list controller is either **Idle** or **Loading**. It moves to
//! Loading whenever a list request is dispatched and back to Idle when the
//! current request settles, successfully or not. There is no terminal state.
//!
//! Independently, the user is on one of two routes:
//! - **List**: the trending or search results
//! - **Detail**: a single movie, with the list preserved underneath

use crate::domain::Movie;

/// Whether a list request for the current tag is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
}

/// Which screen is shown.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Route {
    #[default]
    List,
    Detail(DetailState),
}

/// State of the detail screen for one movie id.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailState {
    pub id: u64,
    /// `None` until the detail request settles successfully.
    pub movie: Option<Movie>,
    pub loading: bool,
    pub error: Option<String>,
}

impl DetailState {
    /// Detail screen waiting on its first response.
    #[must_use]
    pub const fn opening(id: u64) -> Self {
        Self {
            id,
            movie: None,
            loading: true,
            error: None,
        }
    }
}
