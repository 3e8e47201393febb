//! Actions representing side effects to be executed by the session loop.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! handler itself never touches the network; the loop turns every action into
//! an in-flight future whose outcome comes back as another event.

use crate::remote::FetchRequest;

/// Commands produced by the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Issue a list request. Its outcome returns as `Event::FetchSettled`
    /// with the same tag.
    FetchPage(FetchRequest),

    /// Issue a detail request. Its outcome returns as `Event::DetailSettled`.
    FetchDetail {
        /// Movie id to load.
        id: u64,
    },
}
