//! The session loop: one logical thread driving the whole client.
//!
//! [`Session::run`] multiplexes four sources with `tokio::select!`:
//!
//! ```text
//!  host signals ──► Debouncer ──► TermSettled ─┐
//!  host signals ──────────────► ScrollNear, ──┤
//!                               Open, Back    ├──► handle_event ──► actions ──► in-flight
//!  in-flight requests ──► FetchSettled, ──────┤                                    │
//!                         DetailSettled       │          ◄─────────────────────────┘
//!  config resolver ──► ImagesResolved ────────┘
//! ```
//!
//! Requests run concurrently as futures in a `FuturesUnordered` on the same
//! task; their outcomes are applied strictly through the event handler, which
//! drops anything whose tag is stale. Nothing is ever cancelled over the
//! network.

use crate::app::{handle_event, Action, AppState, Event};
use crate::debounce::Debouncer;
use crate::domain::Result;
use crate::images::ConfigResolver;
use crate::remote::{FetchOutcome, FetchRequest, MovieApi};
use crate::ui::Renderer;
use futures_util::future::{FutureExt, LocalBoxFuture};
use futures_util::stream::{FuturesUnordered, StreamExt};
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::Instrument;

/// Notifications from the host environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostSignal {
    /// The full current contents of the search field.
    Input(String),
    /// The viewport came near the end of the rendered list.
    ScrollNear,
    /// Open the detail screen of a movie.
    Open(u64),
    /// Leave the detail screen.
    Back,
    /// Stop the session.
    Shutdown,
}

/// What woke the loop up.
enum Wake {
    Signal(Option<HostSignal>),
    Settled(String),
    Completed(Event),
    Images,
}

/// Owns the controller state and every collaborator it needs.
pub struct Session<A, R> {
    state: AppState,
    api: Rc<A>,
    renderer: R,
    images: ConfigResolver,
    debouncer: Debouncer<String>,
    in_flight: FuturesUnordered<LocalBoxFuture<'static, Event>>,
}

impl<A, R> Session<A, R>
where
    A: MovieApi + 'static,
    R: Renderer,
{
    /// Creates a session. The image configuration fetch is issued through
    /// `api` once, when the loop starts.
    pub fn new(api: A, renderer: R, debounce: Duration) -> Self {
        let api = Rc::new(api);
        let images = {
            let api = Rc::clone(&api);
            ConfigResolver::new(async move { api.image_config().await })
        };

        Self {
            state: AppState::new(),
            api,
            renderer,
            images,
            debouncer: Debouncer::new(debounce),
            in_flight: FuturesUnordered::new(),
        }
    }

    /// Runs until `Shutdown` or until the signal channel closes, then
    /// returns the final state.
    ///
    /// # Errors
    ///
    /// Returns an error only if the renderer fails to write.
    pub async fn run(mut self, mut signals: mpsc::Receiver<HostSignal>) -> Result<AppState> {
        tracing::info!("session started");
        self.dispatch(Event::Start)?;

        loop {
            let wake = tokio::select! {
                signal = signals.recv() => Wake::Signal(signal),
                term = self.debouncer.settled() => Wake::Settled(term),
                Some(event) = self.in_flight.next(), if !self.in_flight.is_empty() => Wake::Completed(event),
                _ = self.images.resolve(), if self.images.is_pending() => Wake::Images,
            };

            match wake {
                Wake::Signal(None | Some(HostSignal::Shutdown)) => break,
                Wake::Signal(Some(HostSignal::Input(text))) => self.debouncer.push(text),
                Wake::Signal(Some(HostSignal::ScrollNear)) => self.dispatch(Event::ScrollNear)?,
                Wake::Signal(Some(HostSignal::Open(id))) => self.dispatch(Event::OpenDetail(id))?,
                Wake::Signal(Some(HostSignal::Back)) => self.dispatch(Event::Back)?,
                Wake::Settled(term) => self.dispatch(Event::TermSettled(term))?,
                Wake::Completed(event) => self.dispatch(event)?,
                Wake::Images => self.dispatch(Event::ImagesResolved)?,
            }
        }

        self.debouncer.cancel();
        tracing::info!(
            in_flight = self.in_flight.len(),
            results = self.state.results.len(),
            "session stopped"
        );
        Ok(self.state)
    }

    fn dispatch(&mut self, event: Event) -> Result<()> {
        let (should_render, actions) = handle_event(&mut self.state, event);
        for action in actions {
            self.execute(action);
        }
        if should_render {
            let view = self.state.compute_viewmodel(&self.images);
            self.renderer.render(&view)?;
        }
        Ok(())
    }

    fn execute(&mut self, action: Action) {
        match action {
            Action::FetchPage(request) => self.spawn_page(request),
            Action::FetchDetail { id } => self.spawn_detail(id),
        }
    }

    fn spawn_page(&mut self, request: FetchRequest) {
        let api = Rc::clone(&self.api);
        let span = tracing::debug_span!("fetch_page", tag = %request.tag);
        let FetchRequest { tag, query } = request;

        let future = async move {
            let outcome = FetchOutcome::from(api.list(&query).await);
            Event::FetchSettled { tag, outcome }
        }
        .instrument(span)
        .boxed_local();

        self.in_flight.push(future);
    }

    fn spawn_detail(&mut self, id: u64) {
        let api = Rc::clone(&self.api);
        let future = async move {
            let outcome = FetchOutcome::from(api.movie(id).await);
            Event::DetailSettled { id, outcome }
        }
        .instrument(tracing::debug_span!("fetch_detail", id = id))
        .boxed_local();

        self.in_flight.push(future);
    }
}
