//! Image-serving configuration and URL derivation.
//!
//! The remote API publishes a base URL and ordered size tokens (`w92`, `w342`,
//! ..., `original`). Image URLs are built as `base_url + size + path`, where
//! `path` is the relative path carried by a [`Movie`](super::Movie).

use serde::{Deserialize, Serialize};

/// Size token meaning "full resolution", never offered as a responsive candidate.
pub const ORIGINAL_SIZE: &str = "original";

/// Default size for posters when no responsive choice is made.
pub const DEFAULT_POSTER_SIZE: &str = "w342";

/// Default size for backdrops when no responsive choice is made.
pub const DEFAULT_BACKDROP_SIZE: &str = "w780";

/// Which artwork an image path refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Poster,
    Backdrop,
}

impl ImageKind {
    /// Size token used when the caller has no target width.
    #[must_use]
    pub const fn default_size(self) -> &'static str {
        match self {
            Self::Poster => DEFAULT_POSTER_SIZE,
            Self::Backdrop => DEFAULT_BACKDROP_SIZE,
        }
    }
}

/// One entry of a responsive candidate set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    pub url: String,
    pub width: u32,
}

/// Resolved image configuration.
///
/// Size lists are ordered smallest to largest, usually ending in `original`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageConfig {
    #[serde(rename = "secure_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub poster_sizes: Vec<String>,
    #[serde(default)]
    pub backdrop_sizes: Vec<String>,
}

/// Body of `GET /configuration`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigurationResponse {
    pub images: ImageConfig,
}

impl ImageConfig {
    fn sizes(&self, kind: ImageKind) -> &[String] {
        match kind {
            ImageKind::Poster => &self.poster_sizes,
            ImageKind::Backdrop => &self.backdrop_sizes,
        }
    }

    fn join(&self, size: &str, path: &str) -> String {
        format!("{}{size}{path}", self.base_url)
    }

    /// Builds the URL for `path`, or `None` when `path` is empty.
    ///
    /// Without a target width the kind's default token is used as-is, even if
    /// the size list does not contain it. With a target width the smallest
    /// candidate at least that wide is chosen, falling back to the last token of
    /// the list, and to the default token when the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelscout::domain::{ImageConfig, ImageKind};
    ///
    /// let config = ImageConfig {
    ///     base_url: "https://img/t/p/".to_string(),
    ///     poster_sizes: vec!["w92".into(), "w342".into(), "original".into()],
    ///     backdrop_sizes: vec![],
    /// };
    /// assert_eq!(
    ///     config.image_url(Some("/x.jpg"), ImageKind::Poster, None).as_deref(),
    ///     Some("https://img/t/p/w342/x.jpg")
    /// );
    /// ```
    #[must_use]
    pub fn image_url(&self, path: Option<&str>, kind: ImageKind, target_width: Option<u32>) -> Option<String> {
        let path = path.filter(|p| !p.is_empty())?;

        let Some(target) = target_width else {
            return Some(self.join(kind.default_size(), path));
        };

        let fitting = self
            .image_candidates(Some(path), kind)
            .into_iter()
            .find(|candidate| candidate.width >= target);

        if let Some(candidate) = fitting {
            return Some(candidate.url);
        }

        let size = self
            .sizes(kind)
            .last()
            .map_or(kind.default_size(), String::as_str);
        Some(self.join(size, path))
    }

    /// Enumerates `(url, width)` pairs for every sized token of `kind`.
    ///
    /// Skips `original` and any token without a parsable width. Order follows
    /// the configuration, smallest first. Picking among them is left to the
    /// renderer.
    #[must_use]
    pub fn image_candidates(&self, path: Option<&str>, kind: ImageKind) -> Vec<ImageCandidate> {
        let Some(path) = path.filter(|p| !p.is_empty()) else {
            return vec![];
        };

        self.sizes(kind)
            .iter()
            .filter(|size| size.as_str() != ORIGINAL_SIZE)
            .filter_map(|size| {
                parse_width(size).map(|width| ImageCandidate {
                    url: self.join(size, path),
                    width,
                })
            })
            .collect()
    }
}

/// Parses the pixel width out of a token such as `w342`.
fn parse_width(size: &str) -> Option<u32> {
    size.strip_prefix('w')?.parse().ok()
}
