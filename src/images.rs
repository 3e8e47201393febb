//! One-shot image configuration resolver.
//!
//! [`ConfigResolver`] wraps the configuration fetch in a shared future. The
//! request starts the first time anything awaits [`ConfigResolver::resolve`]
//! and runs exactly once; every caller, concurrent or late, receives the same
//! outcome. A failed fetch is logged and leaves the resolver permanently
//! [`Resolution::Unavailable`]. Nothing retries.
//!
//! The resolver is constructed once per process and handed to consumers by
//! reference. Consumers that cannot wait use [`ConfigResolver::state`], which
//! never blocks.

use crate::domain::{ImageCandidate, ImageConfig, ImageKind, Result};
use futures_util::future::{FutureExt, LocalBoxFuture, Shared};
use std::future::Future;
use std::sync::Arc;
use tracing::Instrument;

/// Non-blocking view of the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The fetch has not completed yet.
    Pending,
    /// The configuration arrived and is now fixed for the process lifetime.
    Ready(&'a ImageConfig),
    /// The fetch failed; images are unavailable until restart.
    Unavailable,
}

/// Fetches the image configuration once and shares it with every consumer.
#[derive(Clone)]
pub struct ConfigResolver {
    shared: Shared<LocalBoxFuture<'static, Option<Arc<ImageConfig>>>>,
}

impl ConfigResolver {
    /// Wraps `fetch` so it runs at most once.
    ///
    /// The future is lazy; the owning loop should start awaiting
    /// [`resolve`](Self::resolve) at startup.
    pub fn new<F>(fetch: F) -> Self
    where
        F: Future<Output = Result<ImageConfig>> + 'static,
    {
        let shared = async move {
            match fetch.await {
                Ok(config) => {
                    tracing::debug!(
                        base_url = %config.base_url,
                        poster_sizes = config.poster_sizes.len(),
                        backdrop_sizes = config.backdrop_sizes.len(),
                        "image configuration resolved"
                    );
                    Some(Arc::new(config))
                }
                Err(e) => {
                    tracing::error!(error = %e, "image configuration unavailable");
                    None
                }
            }
        }
        .instrument(tracing::debug_span!("resolve_image_config"))
        .boxed_local()
        .shared();

        Self { shared }
    }

    /// Creates a resolver that is already resolved.
    #[must_use]
    pub fn ready(config: ImageConfig) -> Self {
        let resolver = Self::new(std::future::ready(Ok(config)));
        // A ready future settles on first poll.
        resolver.shared.clone().now_or_never();
        resolver
    }

    /// Waits for the configuration, issuing the fetch if nobody has yet.
    ///
    /// Returns `None` when the fetch failed.
    pub async fn resolve(&self) -> Option<Arc<ImageConfig>> {
        self.shared.clone().await
    }

    /// Current state without waiting.
    #[must_use]
    pub fn state(&self) -> Resolution<'_> {
        match self.shared.peek() {
            None => Resolution::Pending,
            Some(Some(config)) => Resolution::Ready(config.as_ref()),
            Some(None) => Resolution::Unavailable,
        }
    }

    /// Whether the fetch is still outstanding.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.shared.peek().is_none()
    }

    /// The resolved configuration, if any.
    #[must_use]
    pub fn config(&self) -> Option<&ImageConfig> {
        match self.state() {
            Resolution::Ready(config) => Some(config),
            Resolution::Pending | Resolution::Unavailable => None,
        }
    }

    /// Builds an image URL, or `None` if the path is empty or the
    /// configuration is not available.
    #[must_use]
    pub fn image_url(&self, path: Option<&str>, kind: ImageKind, target_width: Option<u32>) -> Option<String> {
        self.config()?.image_url(path, kind, target_width)
    }

    /// Responsive `(url, width)` candidates; empty while unresolved.
    #[must_use]
    pub fn image_candidates(&self, path: Option<&str>, kind: ImageKind) -> Vec<ImageCandidate> {
        self.config()
            .map_or_else(Vec::new, |config| config.image_candidates(path, kind))
    }
}

impl std::fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("state", &self.state())
            .finish()
    }
}
