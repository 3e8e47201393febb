//! Application layer coordinating state, events, and actions.
//!
//! This module is the query/pagination controller. It sits between the
//! session loop (which owns timers, the network and the terminal) and the
//! domain types.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Host Signals → Events → Event Handler → State Mutations → Actions → Requests
//!                            ↑                                           ↓
//!                            └────────────── Tagged Outcomes ────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Loading phase and route types
//! - [`state`]: Controller state and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{DetailState, LoadPhase, Route};
pub use state::AppState;
