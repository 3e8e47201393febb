//! Event handling and state transition logic.
//!
//! This module implements the controller's explicit message handlers. Each
//! [`Event`] mutates [`AppState`] and yields the actions the session loop must
//! execute; nothing here performs I/O, so every transition is testable
//! synchronously.
//!
//! # Event Types
//!
//! - **Input**: `TermSettled` (from the debouncer), `ScrollNear` (from the host)
//! - **Navigation**: `OpenDetail`, `Back`
//! - **Remote**: `FetchSettled`, `DetailSettled`, `ImagesResolved`
//! - **Lifecycle**: `Start`
//!
//! # Example
//!
//! ```rust
//! use reelscout::app::{handle_event, Action, AppState, Event};
//!
//! let mut state = AppState::new();
//! let (render, actions) = handle_event(&mut state, Event::Start);
//! assert!(render);
//! assert!(matches!(actions.as_slice(), [Action::FetchPage(_)]));
//! ```

use crate::app::{Action, AppState, Route};
use crate::remote::{DetailOutcome, FetchTag, PageOutcome};

/// Events delivered to the controller by the session loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Session started; loads the first trending page.
    Start,

    /// The debouncer settled on a new input value.
    TermSettled(String),

    /// The host reported the viewport is near the end of the list.
    ScrollNear,

    /// A list request settled.
    FetchSettled {
        /// Tag the request was issued with.
        tag: FetchTag,
        /// Response page or error text.
        outcome: PageOutcome,
    },

    /// The user asked for a movie's detail screen.
    OpenDetail(u64),

    /// The user left the detail screen.
    Back,

    /// A detail request settled.
    DetailSettled {
        /// Movie id that was requested.
        id: u64,
        /// Movie record or error text.
        outcome: DetailOutcome,
    },

    /// The image configuration fetch finished, successfully or not.
    ImagesResolved,
}

/// Processes an event, mutates state, and returns `(should_render, actions)`.
///
/// # Tracing
///
/// Each call creates a debug-level span carrying the event.
pub fn handle_event(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event = ?event).entered();

    match event {
        Event::Start => {
            tracing::debug!("loading first trending page");
            let request = state.begin_fetch();
            (true, vec![Action::FetchPage(request)])
        }
        Event::TermSettled(raw) => {
            if !state.set_term(&raw) {
                tracing::debug!(term = %raw, "settled term unchanged");
                return (false, vec![]);
            }
            let request = state.begin_fetch();
            (true, vec![Action::FetchPage(request)])
        }
        Event::ScrollNear => {
            if !matches!(state.route, Route::List) {
                return (false, vec![]);
            }
            state
                .advance_page()
                .map_or((false, vec![]), |request| (true, vec![Action::FetchPage(request)]))
        }
        Event::FetchSettled { tag, outcome } => {
            let applied = state.apply_page(&tag, outcome);
            (applied, vec![])
        }
        Event::OpenDetail(id) => {
            tracing::debug!(id = id, "opening detail");
            state.open_detail(id);
            (true, vec![Action::FetchDetail { id }])
        }
        Event::Back => (state.close_detail(), vec![]),
        Event::DetailSettled { id, outcome } => (state.apply_detail(id, outcome), vec![]),
        Event::ImagesResolved => (true, vec![]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Movie, MoviePage};
    use crate::remote::{FetchOutcome, FetchRequest, ListQuery};

    fn single_fetch(actions: Vec<Action>) -> FetchRequest {
        match actions.as_slice() {
            [Action::FetchPage(request)] => request.clone(),
            other => panic!("expected one fetch, got {other:?}"),
        }
    }

    fn settle(state: &mut AppState, request: &FetchRequest, ids: &[u64]) -> bool {
        let page = MoviePage {
            results: ids.iter().map(|&id| Movie::new(id, id.to_string())).collect(),
            ..MoviePage::default()
        };
        handle_event(
            state,
            Event::FetchSettled {
                tag: request.tag.clone(),
                outcome: FetchOutcome::Loaded(page),
            },
        )
        .0
    }

    #[test]
    fn start_requests_trending_page_one() {
        let mut state = AppState::new();
        let (_, actions) = handle_event(&mut state, Event::Start);
        assert_eq!(single_fetch(actions).query, ListQuery::Trending { page: 1 });
    }

    #[test]
    fn settled_term_searches_from_page_one() {
        let mut state = AppState::new();
        state.page = 3;
        let (render, actions) = handle_event(&mut state, Event::TermSettled("alien".to_string()));
        assert!(render);
        assert_eq!(
            single_fetch(actions).query,
            ListQuery::Search { query: "alien".to_string(), page: 1 }
        );
    }

    #[test]
    fn clearing_the_term_returns_to_trending() {
        let mut state = AppState::new();
        handle_event(&mut state, Event::TermSettled("alien".to_string()));
        let (_, actions) = handle_event(&mut state, Event::TermSettled("   ".to_string()));
        assert_eq!(single_fetch(actions).query, ListQuery::Trending { page: 1 });
    }

    #[test]
    fn unchanged_term_issues_nothing() {
        let mut state = AppState::new();
        let (render, actions) = handle_event(&mut state, Event::TermSettled(String::new()));
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn scroll_burst_under_load_yields_one_advance() {
        let mut state = AppState::new();
        let first = single_fetch(handle_event(&mut state, Event::Start).1);

        for _ in 0..3 {
            let (_, actions) = handle_event(&mut state, Event::ScrollNear);
            assert!(actions.is_empty());
        }
        settle(&mut state, &first, &[1, 2]);

        let next = single_fetch(handle_event(&mut state, Event::ScrollNear).1);
        assert_eq!(next.query, ListQuery::Trending { page: 2 });
        assert!(handle_event(&mut state, Event::ScrollNear).1.is_empty());
    }

    #[test]
    fn batman_page_two_never_lands_on_superman() {
        let mut state = AppState::new();
        let batman_p1 = single_fetch(handle_event(&mut state, Event::TermSettled("batman".into())).1);
        settle(&mut state, &batman_p1, &[1, 2]);
        let batman_p2 = single_fetch(handle_event(&mut state, Event::ScrollNear).1);

        let superman_p1 = single_fetch(handle_event(&mut state, Event::TermSettled("superman".into())).1);
        assert_eq!(superman_p1.tag.page, 1);
        assert!(settle(&mut state, &superman_p1, &[10, 11]));

        assert!(!settle(&mut state, &batman_p2, &[3, 4]));
        let ids: Vec<u64> = state.results.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![10, 11]);
    }

    #[test]
    fn scroll_is_ignored_on_detail_screen() {
        let mut state = AppState::new();
        handle_event(&mut state, Event::OpenDetail(42));
        assert_eq!(handle_event(&mut state, Event::ScrollNear), (false, vec![]));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn open_detail_requests_movie_and_back_restores_list() {
        let mut state = AppState::new();
        let (render, actions) = handle_event(&mut state, Event::OpenDetail(42));
        assert!(render);
        assert_eq!(actions, vec![Action::FetchDetail { id: 42 }]);

        let (render, _) = handle_event(
            &mut state,
            Event::DetailSettled { id: 42, outcome: FetchOutcome::Loaded(Movie::new(42, "Heat")) },
        );
        assert!(render);

        assert!(handle_event(&mut state, Event::Back).0);
        assert!(!handle_event(&mut state, Event::Back).0);
    }
}
