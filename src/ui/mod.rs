//! User interface layer.
//!
//! Transforms controller state into frames through view models:
//!
//! ```text
//! AppState → compute_viewmodel → ViewModel → Renderer → Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: The `Renderer` seam and a plain-text terminal renderer

pub mod renderer;
pub mod viewmodel;

pub use renderer::{select_candidate, Renderer, TerminalRenderer};
pub use viewmodel::{
    Body, DetailViewModel, DisplayItem, EmptyState, FooterInfo, HeaderInfo, ListViewModel, ViewModel,
};
