//! Reelscout: a terminal movie browser over a TMDB-style metadata API.
//!
//! Reelscout provides:
//! - Trending movies on startup, free-text search as you type
//! - Debounced input, so only settled terms reach the network
//! - Scroll-driven pagination that resets on every new term
//! - Protection against stale responses from superseded queries
//! - Poster and backdrop URLs derived from a configuration fetched once

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal host (main.rs)                            │  ← stdin → HostSignal
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Session loop (session)                             │  ← select! over signals,
//! │  - Debouncer (debounce)                             │    timers, requests
//! │  - Config resolver (images)                         │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ App Layer     │   │ UI Layer      │   │ Remote Layer  │
//! │ (app/)        │   │ (ui/)         │   │ (remote/)     │
//! │ - State       │   │ - View models │   │ - MovieApi    │
//! │ - Events      │   │ - Renderer    │   │ - TmdbClient  │
//! │ - Actions     │   │               │   │ - Fetch tags  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - Error types, Movie, ImageConfig                  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Query/pagination controller with event/action model
//! - [`debounce`]: Quiet-interval debouncing of input
//! - [`domain`]: Core domain types (Movie, ImageConfig, errors)
//! - [`images`]: One-shot image configuration resolver
//! - [`remote`]: HTTP client and tagged request types
//! - [`session`]: The single-threaded loop tying everything together
//! - [`ui`]: View models and rendering
//! - `observability`: tracing subscriber and rotating log file
//!
//! # Configuration
//!
//! ```toml
//! # ~/.config/reelscout/config.toml
//! api_key = "..."
//! language = "en-US"
//! debounce_ms = 500
//! trace_level = "debug"
//! ```
//!
//! `TMDB_API_KEY`, `TMDB_ACCESS_TOKEN` and `REELSCOUT_LOG` override the file.
//!
//! # Example
//!
//! ```rust
//! use reelscout::{handle_event, AppState, Event};
//!
//! let mut state = AppState::new();
//! let (_, actions) = handle_event(&mut state, Event::Start);
//! assert_eq!(actions.len(), 1);
//! ```

pub mod app;
pub mod debounce;
pub mod domain;
pub mod images;
pub mod infrastructure;
pub mod observability;
pub mod remote;
pub mod session;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, LoadPhase, Route};
pub use domain::{ReelscoutError, Result};
pub use session::{HostSignal, Session};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Default quiet interval before a typed term is searched.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Client configuration.
///
/// Loaded from a TOML file, a flat key/value map, or defaults, then
/// overridden from the environment.
///
/// # Example
///
/// ```toml
/// api_base_url = "https://api.themoviedb.org/3"
/// access_token = "eyJhbGciOi..."
/// debounce_ms = 300
/// poster_width = 185
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API root, without trailing slash. Default: `https://api.themoviedb.org/3`
    pub api_base_url: String,

    /// v3 API key, sent as a query parameter.
    pub api_key: Option<String>,

    /// v4 read access token, sent as a bearer token. Wins over `api_key`.
    pub access_token: Option<String>,

    /// Response language. Default: `"en-US"`
    pub language: String,

    /// Debounce quiet interval in milliseconds. Default: 500
    pub debounce_ms: u64,

    /// Per-request timeout in seconds. Default: 10
    pub request_timeout_secs: u64,

    /// Width the terminal renderer picks poster candidates for. Unset hides URLs.
    pub poster_width: Option<u32>,

    /// Tracing level filter. Options: `trace`, `debug`, `info`, `warn`, `error`.
    /// Default: `"info"`
    pub trace_level: Option<String>,

    /// Directory for the rotating log file. Default: the platform state dir.
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: None,
            access_token: None,
            language: "en-US".to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            request_timeout_secs: 10,
            poster_width: None,
            trace_level: None,
            log_dir: None,
        }
    }
}

impl Config {
    /// Parses a TOML document; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML for this shape.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Builds a configuration from flat string pairs.
    ///
    /// Unparsable numeric values fall back to their defaults rather than
    /// failing, and empty strings count as absent.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use reelscout::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_key".to_string(), "abc".to_string());
    /// map.insert("debounce_ms".to_string(), "not a number".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.api_key.as_deref(), Some("abc"));
    /// assert_eq!(config.debounce_ms, 500);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            map.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            api_base_url: text("api_base_url").unwrap_or(defaults.api_base_url),
            api_key: text("api_key"),
            access_token: text("access_token"),
            language: text("language").unwrap_or(defaults.language),
            debounce_ms: text("debounce_ms")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.debounce_ms),
            request_timeout_secs: text("request_timeout_secs")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            poster_width: text("poster_width").and_then(|s| s.parse().ok()),
            trace_level: text("trace_level"),
            log_dir: text("log_dir").map(PathBuf::from),
        }
    }

    /// Applies `TMDB_API_KEY`, `TMDB_ACCESS_TOKEN` and `REELSCOUT_LOG`.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        let env: BTreeMap<String, String> = std::env::vars()
            .filter(|(key, _)| key.starts_with("TMDB_") || key.starts_with("REELSCOUT_"))
            .collect();
        self.with_overrides_from(&env)
    }

    fn with_overrides_from(mut self, env: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| env.get(key).filter(|v| !v.trim().is_empty()).cloned();

        if let Some(key) = get("TMDB_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(token) = get("TMDB_ACCESS_TOKEN") {
            self.access_token = Some(token);
        }
        if let Some(level) = get("REELSCOUT_LOG") {
            self.trace_level = Some(level);
        }
        self
    }

    /// Debounce interval as a `Duration`.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Checks values that would make the client unusable.
    ///
    /// A missing credential is deliberately not checked here; it is reported
    /// per request.
    ///
    /// # Errors
    ///
    /// Returns [`ReelscoutError::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(ReelscoutError::Config(format!(
                "api_base_url must be an http(s) URL, got {:?}",
                self.api_base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ReelscoutError::Config("request_timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}
