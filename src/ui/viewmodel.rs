//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! a [`Renderer`](crate::ui::Renderer). They contain no business logic, only
//! display-ready data: titles, years, and image URLs already derived from the
//! image configuration.

use crate::domain::ImageCandidate;

/// Complete view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub header: HeaderInfo,
    pub body: Body,
    pub footer: FooterInfo,
    /// Non-blocking notice, e.g. the last failed request.
    pub notice: Option<String>,
}

/// Route-specific content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    List(ListViewModel),
    Detail(DetailViewModel),
}

/// The result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListViewModel {
    pub items: Vec<DisplayItem>,

    /// Drives the loading indicator below the list.
    pub loading: bool,

    /// Present only when there are no results and nothing is loading.
    pub empty_state: Option<EmptyState>,
}

/// One row of the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub id: u64,
    pub title: String,
    pub year: Option<i32>,

    /// Default-size poster, `None` without a poster or configuration.
    pub poster_url: Option<String>,

    /// Responsive candidates for the renderer to choose from.
    pub poster_candidates: Vec<ImageCandidate>,
}

/// The detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailViewModel {
    pub id: u64,
    pub title: Option<String>,
    pub year: Option<i32>,
    pub overview: Option<String>,
    pub rating: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub backdrop_candidates: Vec<ImageCandidate>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
    /// Page cursor and result count.
    pub progress: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Command help text.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No results found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}
