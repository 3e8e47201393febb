//! Quiet-interval debouncing of rapidly changing input.
//!
//! A [`Debouncer`] holds at most one pending value and a deadline. Every
//! [`push`](Debouncer::push) replaces both, so only the latest value can settle
//! and only once `delay` has passed without another push.
//!
//! There is no background task: the deadline is awaited by whoever polls
//! [`settled`](Debouncer::settled), which makes cancellation structural. A
//! superseded value is simply overwritten, and dropping the debouncer drops the
//! pending value with it, so nothing can be emitted after teardown.
//!
//! # Example
//!
//! ```rust
//! use reelscout::debounce::Debouncer;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut debouncer = Debouncer::new(Duration::from_millis(10));
//! debouncer.push("ave".to_string());
//! assert_eq!(debouncer.settled().await, "ave");
//! # }
//! ```

use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Collapses a stream of values into settled values.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

impl<T> Debouncer<T> {
    /// Creates an idle debouncer with the given quiet interval.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    /// Records a new input value, superseding any pending one.
    pub fn push(&mut self, value: T) {
        let deadline = Instant::now() + self.delay;
        tracing::trace!(delay_ms = self.delay.as_millis() as u64, "debounce restarted");
        self.pending = Some(Pending { value, deadline });
    }

    /// Drops the pending value without emitting it.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            tracing::trace!("pending debounce cancelled");
        }
    }

    /// Whether a value is waiting to settle.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Waits until the pending value settles and returns it.
    ///
    /// Never completes while nothing is pending. Cancel-safe: dropping the
    /// future before it completes leaves the pending value in place, which is
    /// what `tokio::select!` loops rely on.
    pub async fn settled(&mut self) -> T {
        let Some(deadline) = self.pending.as_ref().map(|p| p.deadline) else {
            return std::future::pending().await;
        };

        sleep_until(deadline).await;

        match self.pending.take() {
            Some(pending) => pending.value,
            None => std::future::pending().await,
        }
    }
}
