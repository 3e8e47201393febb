//! Movie records as returned by the remote metadata API.
//!
//! Items are received verbatim and never mutated. Only the fields the client
//! displays are modelled; everything else in the payload is ignored by serde.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One media record from a list, search or detail response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

impl Movie {
    /// Creates a movie with only an id and a title.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelscout::domain::Movie;
    ///
    /// let movie = Movie::new(603, "The Matrix");
    /// assert_eq!(movie.id, 603);
    /// assert!(movie.poster_path.is_none());
    /// ```
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: None,
            backdrop_path: None,
            release_date: None,
            overview: None,
            vote_average: None,
        }
    }

    /// Returns the release year, if the API sent a parsable `YYYY-MM-DD` date.
    ///
    /// The API sends an empty string for unreleased titles, which yields `None`.
    ///
    /// ```
    /// use reelscout::domain::Movie;
    ///
    /// let mut movie = Movie::new(1, "x");
    /// movie.release_date = Some("1999-03-30".to_string());
    /// assert_eq!(movie.release_year(), Some(1999));
    /// ```
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        let raw = self.release_date.as_deref()?;
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .map(|date| date.year())
    }
}

/// One page of a trending or search listing.
///
/// A response without a `results` array decodes to an empty batch rather than
/// an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoviePage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<Movie>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

impl MoviePage {
    /// Returns the batch with duplicate ids removed, keeping first occurrences.
    ///
    /// Uniqueness only holds inside one page; the accumulator does not
    /// deduplicate across pages.
    #[must_use]
    pub fn into_batch(self) -> Vec<Movie> {
        let mut seen = std::collections::HashSet::with_capacity(self.results.len());
        self.results
            .into_iter()
            .filter(|movie| seen.insert(movie.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_results_field_decodes_as_empty_batch() {
        let page: MoviePage = serde_json::from_str(r#"{"page": 3}"#).unwrap();
        assert_eq!(page.page, 3);
        assert!(page.into_batch().is_empty());
    }

    #[test]
    fn decodes_api_item_and_ignores_unknown_fields() {
        let json = r#"{
            "page": 1,
            "results": [{
                "id": 27205,
                "title": "Inception",
                "poster_path": "/inception.jpg",
                "release_date": "2010-07-15",
                "overview": "A thief who steals corporate secrets.",
                "adult": false,
                "genre_ids": [28, 878]
            }],
            "total_pages": 12
        }"#;
        let page: MoviePage = serde_json::from_str(json).unwrap();
        let batch = page.into_batch();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].title, "Inception");
        assert_eq!(batch[0].poster_path.as_deref(), Some("/inception.jpg"));
        assert_eq!(batch[0].release_year(), Some(2010));
    }

    #[test]
    fn batch_drops_duplicate_ids_within_page() {
        let page = MoviePage {
            results: vec![Movie::new(1, "a"), Movie::new(2, "b"), Movie::new(1, "a again")],
            ..MoviePage::default()
        };
        let titles: Vec<_> = page.into_batch().into_iter().map(|m| m.title).collect();
        assert_eq!(titles, vec!["a", "b"]);
    }

    #[test]
    fn empty_release_date_has_no_year() {
        let mut movie = Movie::new(1, "Untitled");
        movie.release_date = Some(String::new());
        assert_eq!(movie.release_year(), None);
    }
}
