//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the single source of truth for the
//! query/pagination controller: the settled search term, the page cursor, the
//! accumulated results and the loading phase, plus the current route.
//!
//! # Stale Responses
//!
//! Every dispatched list request is tagged with the state that produced it
//! (see [`FetchTag`]). A term change bumps `generation` and resets the cursor
//! in the same step, so any response still in flight for the previous term
//! carries a tag that no longer matches and is dropped by
//! [`AppState::apply_page`] without touching `results` or the loading phase.
//!
//! # Example
//!
//! ```rust
//! use reelscout::app::AppState;
//!
//! let mut state = AppState::new();
//! let request = state.begin_fetch();
//! assert_eq!(request.tag.page, 1);
//! assert!(state.is_loading());
//! ```

use super::modes::{DetailState, LoadPhase, Route};
use crate::domain::{ImageKind, Movie, MoviePage};
use crate::images::{ConfigResolver, Resolution};
use crate::remote::{DetailOutcome, FetchOutcome, FetchRequest, FetchTag, PageOutcome};
use crate::ui::viewmodel::{
    Body, DetailViewModel, DisplayItem, EmptyState, FooterInfo, HeaderInfo, ListViewModel, ViewModel,
};

/// Normalizes raw input into a term. Whitespace-only input is the empty term.
#[must_use]
pub fn normalize_term(raw: &str) -> String {
    raw.trim().to_string()
}

/// Central controller state.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Settled, trimmed search term. Empty selects the trending listing.
    pub term: String,

    /// 1-based page cursor for `term`.
    pub page: u32,

    /// Accumulated results for `term`, replaced on page 1 and appended after.
    pub results: Vec<Movie>,

    /// Idle or Loading for the current tag.
    pub phase: LoadPhase,

    /// Incremented on every term change; part of every [`FetchTag`].
    pub generation: u64,

    /// Page count reported by the last applied response.
    pub total_pages: Option<u32>,

    /// Generation whose page 1 has been applied. Until it equals `generation`,
    /// `results` still belongs to an earlier term.
    pub first_page_of: Option<u64>,

    /// Message from the last failed list request, cleared on next dispatch.
    pub last_error: Option<String>,

    /// Screen currently shown.
    pub route: Route,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates the initial state: empty term, page 1, no results, idle.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            term: String::new(),
            page: 1,
            results: Vec::new(),
            phase: LoadPhase::Idle,
            generation: 0,
            total_pages: None,
            first_page_of: None,
            last_error: None,
            route: Route::List,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    /// Tag describing the request the current state calls for.
    #[must_use]
    pub fn current_tag(&self) -> FetchTag {
        FetchTag {
            generation: self.generation,
            term: self.term.clone(),
            page: self.page,
        }
    }

    /// Replaces the term if it differs after trimming.
    ///
    /// Resets the cursor to page 1 and bumps the generation in the same step,
    /// which is what invalidates every outstanding request for the old term.
    /// Returns whether anything changed.
    pub fn set_term(&mut self, raw: &str) -> bool {
        let term = normalize_term(raw);
        if term == self.term {
            return false;
        }

        tracing::debug!(
            previous = %self.term,
            term = %term,
            previous_page = self.page,
            "term changed, resetting cursor"
        );

        self.term = term;
        self.page = 1;
        self.generation += 1;
        self.total_pages = None;
        true
    }

    /// Marks the current tag as loading and returns the request to issue.
    pub fn begin_fetch(&mut self) -> FetchRequest {
        self.phase = LoadPhase::Loading;
        self.last_error = None;
        let request = FetchRequest::new(self.current_tag());
        tracing::debug!(tag = %request.tag, "dispatching list request");
        request
    }

    /// Advances the cursor if idle; returns the request to issue.
    ///
    /// While loading, the signal is dropped rather than queued, so any number
    /// of proximity signals during one request advance the cursor at most once.
    /// If page 1 of the current term never arrived, page 1 is requested again
    /// so its response replaces the list. Nothing is requested past the last
    /// page the API reported.
    pub fn advance_page(&mut self) -> Option<FetchRequest> {
        if self.is_loading() {
            tracing::trace!(page = self.page, "scroll signal ignored while loading");
            return None;
        }
        if self.first_page_of != Some(self.generation) {
            tracing::debug!(term = %self.term, "first page missing, requesting it again");
            self.page = 1;
            return Some(self.begin_fetch());
        }
        if let Some(total) = self.total_pages {
            if self.page >= total {
                tracing::trace!(page = self.page, total = total, "last page reached");
                return None;
            }
        }
        self.page += 1;
        Some(self.begin_fetch())
    }

    /// Applies a settled list response.
    ///
    /// Returns `false` if the tag is stale, in which case nothing changes.
    pub fn apply_page(&mut self, tag: &FetchTag, outcome: PageOutcome) -> bool {
        if *tag != self.current_tag() {
            tracing::debug!(
                stale = %tag,
                current = %self.current_tag(),
                "dropping stale response"
            );
            return false;
        }

        match outcome {
            FetchOutcome::Loaded(page) => self.merge(tag.page, page),
            FetchOutcome::Failed(message) => {
                tracing::warn!(tag = %tag, error = %message, "list request failed");
                if self.page > 1 {
                    // Step back so the next proximity signal asks for the same page.
                    self.page -= 1;
                }
                self.last_error = Some(message);
            }
        }

        self.phase = LoadPhase::Idle;
        true
    }

    fn merge(&mut self, page_number: u32, page: MoviePage) {
        let total_pages = page.total_pages;
        let batch = page.into_batch();
        let batch_len = batch.len();

        if page_number == 1 {
            self.results = batch;
            self.first_page_of = Some(self.generation);
        } else {
            self.results.extend(batch);
        }
        if total_pages > 0 {
            self.total_pages = Some(total_pages);
        }

        tracing::debug!(
            page = page_number,
            batch_len = batch_len,
            total = self.results.len(),
            "results merged"
        );
    }

    /// Switches to the detail route for `id`.
    pub fn open_detail(&mut self, id: u64) {
        self.route = Route::Detail(DetailState::opening(id));
    }

    /// Returns to the list. Returns whether the route changed.
    pub fn close_detail(&mut self) -> bool {
        if matches!(self.route, Route::List) {
            return false;
        }
        self.route = Route::List;
        true
    }

    /// Applies a settled detail response if its id is still on screen.
    pub fn apply_detail(&mut self, id: u64, outcome: DetailOutcome) -> bool {
        let Route::Detail(detail) = &mut self.route else {
            tracing::debug!(id = id, "dropping detail response, list is shown");
            return false;
        };
        if detail.id != id {
            tracing::debug!(id = id, shown = detail.id, "dropping detail response for another movie");
            return false;
        }

        detail.loading = false;
        match outcome {
            FetchOutcome::Loaded(movie) => detail.movie = Some(movie),
            FetchOutcome::Failed(message) => {
                tracing::warn!(id = id, error = %message, "detail request failed");
                detail.error = Some(message);
            }
        }
        true
    }

    /// Computes a renderable view model from current state.
    ///
    /// Image URLs are derived through `images`; while the configuration is
    /// pending or unavailable every URL is `None`.
    #[must_use]
    pub fn compute_viewmodel(&self, images: &ConfigResolver) -> ViewModel {
        let body = match &self.route {
            Route::List => Body::List(self.compute_list(images)),
            Route::Detail(detail) => Body::Detail(Self::compute_detail(detail, images)),
        };

        ViewModel {
            header: self.compute_header(),
            body,
            footer: self.compute_footer(),
            notice: self.compute_notice(images),
        }
    }

    fn compute_list(&self, images: &ConfigResolver) -> ListViewModel {
        let items = self
            .results
            .iter()
            .map(|movie| DisplayItem {
                id: movie.id,
                title: movie.title.clone(),
                year: movie.release_year(),
                poster_url: images.image_url(movie.poster_path.as_deref(), ImageKind::Poster, None),
                poster_candidates: images.image_candidates(movie.poster_path.as_deref(), ImageKind::Poster),
            })
            .collect();

        let empty_state = (self.results.is_empty() && !self.is_loading()).then(|| EmptyState {
            message: "No results found".to_string(),
            subtitle: if self.term.is_empty() {
                "Nothing is trending right now".to_string()
            } else {
                format!("Nothing matches \"{}\"", self.term)
            },
        });

        ListViewModel {
            items,
            loading: self.is_loading(),
            empty_state,
        }
    }

    fn compute_detail(detail: &DetailState, images: &ConfigResolver) -> DetailViewModel {
        let movie = detail.movie.as_ref();
        let poster = movie.and_then(|m| m.poster_path.as_deref());
        let backdrop = movie.and_then(|m| m.backdrop_path.as_deref());

        DetailViewModel {
            id: detail.id,
            title: movie.map(|m| m.title.clone()),
            year: movie.and_then(Movie::release_year),
            overview: movie.and_then(|m| m.overview.clone()),
            rating: movie.and_then(|m| m.vote_average).map(|v| format!("{v:.1}/10")),
            poster_url: images.image_url(poster, ImageKind::Poster, None),
            backdrop_url: images.image_url(backdrop, ImageKind::Backdrop, None),
            backdrop_candidates: images.image_candidates(backdrop, ImageKind::Backdrop),
            loading: detail.loading,
            error: detail.error.clone(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match &self.route {
            Route::Detail(_) => " Movie details ".to_string(),
            Route::List if self.term.is_empty() => " Trending this week ".to_string(),
            Route::List => format!(" Results for \"{}\" ", self.term),
        };
        let progress = match self.total_pages {
            Some(total) => format!("page {}/{total}, {} loaded", self.page, self.results.len()),
            None => format!("page {}, {} loaded", self.page, self.results.len()),
        };
        HeaderInfo { title, progress }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.route {
            Route::List => "type to search  :more  next page  :clear  trending  :open <id>  :quit",
            Route::Detail(_) => ":back  return to list  :quit",
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_notice(&self, images: &ConfigResolver) -> Option<String> {
        if let Some(error) = &self.last_error {
            return Some(format!("Could not load results: {error}"));
        }
        match images.state() {
            Resolution::Unavailable => Some("Images unavailable".to_string()),
            Resolution::Pending | Resolution::Ready(_) => None,
        }
    }
}
