//! Path resolution for configuration and state.
//!
//! Every function here takes its environment lookup as a closure so tests can
//! run without touching the process environment.

use crate::Config;
use std::path::PathBuf;

const APP_DIR: &str = "reelscout";

/// Returns the directory the rotating log file lives in.
///
/// Resolution order:
/// 1. `config.log_dir`, with a leading `~` expanded
/// 2. `$XDG_STATE_HOME/reelscout`
/// 3. `$HOME/.local/state/reelscout`
/// 4. `./reelscout` as a last resort
#[must_use]
pub fn log_dir(config: &Config) -> PathBuf {
    log_dir_with(config, |key| std::env::var(key).ok())
}

/// Returns the default configuration file path,
/// `$XDG_CONFIG_HOME/reelscout/config.toml` or `~/.config/reelscout/config.toml`.
#[must_use]
pub fn config_file() -> Option<PathBuf> {
    config_file_with(|key| std::env::var(key).ok())
}

/// Expands a leading `~` to `$HOME`.
///
/// # Examples
///
/// ```
/// use reelscout::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    expand_tilde_with(path, |key| std::env::var(key).ok())
}

fn log_dir_with(config: &Config, env: impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(dir) = &config.log_dir {
        return PathBuf::from(expand_tilde_with(&dir.to_string_lossy(), &env));
    }
    if let Some(state) = non_empty(env("XDG_STATE_HOME")) {
        return PathBuf::from(state).join(APP_DIR);
    }
    if let Some(home) = non_empty(env("HOME")) {
        return PathBuf::from(home).join(".local").join("state").join(APP_DIR);
    }
    PathBuf::from(APP_DIR)
}

fn config_file_with(env: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    let base = non_empty(env("XDG_CONFIG_HOME"))
        .map(PathBuf::from)
        .or_else(|| non_empty(env("HOME")).map(|home| PathBuf::from(home).join(".config")))?;
    Some(base.join(APP_DIR).join("config.toml"))
}

fn expand_tilde_with(path: &str, env: impl Fn(&str) -> Option<String>) -> String {
    let Some(home) = non_empty(env("HOME")) else {
        return path.to_string();
    };
    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("{}/{rest}", home.trim_end_matches('/'))
    } else {
        path.to_string()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
