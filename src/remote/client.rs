//! HTTP client for the movie metadata API.
//!
//! [`MovieApi`] is the seam between the controller loop and the network: the
//! session drives any implementation, and tests substitute a scripted one.
//! [`TmdbClient`] is the production implementation over `reqwest`.

use crate::domain::{ConfigurationResponse, ImageConfig, Movie, MoviePage, ReelscoutError, Result};
use crate::remote::messages::ListQuery;
use crate::Config;
use serde::de::DeserializeOwned;

/// Remote operations the client consumes.
#[allow(async_fn_in_trait)]
pub trait MovieApi {
    /// `GET /trending/movie/week?page={page}`
    async fn trending(&self, page: u32) -> Result<MoviePage>;

    /// `GET /search/movie?query={query}&page={page}`
    async fn search(&self, query: &str, page: u32) -> Result<MoviePage>;

    /// `GET /movie/{id}`
    async fn movie(&self, id: u64) -> Result<Movie>;

    /// `GET /configuration`, unwrapped to its `images` section.
    async fn image_config(&self) -> Result<ImageConfig>;

    /// Executes a list query against the matching endpoint.
    async fn list(&self, query: &ListQuery) -> Result<MoviePage> {
        match query {
            ListQuery::Trending { page } => self.trending(*page).await,
            ListQuery::Search { query, page } => self.search(query, *page).await,
        }
    }
}

/// How requests are authenticated.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// v3 API key, sent as the `api_key` query parameter.
    ApiKey(String),
    /// v4 read access token, sent as a bearer token.
    Bearer(String),
}

impl Credential {
    /// Picks the credential from configuration, preferring the access token.
    #[must_use]
    pub fn from_config(config: &Config) -> Option<Self> {
        let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.trim().is_empty());
        non_empty(&config.access_token)
            .map(Self::Bearer)
            .or_else(|| non_empty(&config.api_key).map(Self::ApiKey))
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("ApiKey(..)"),
            Self::Bearer(_) => f.write_str("Bearer(..)"),
        }
    }
}

/// `reqwest`-backed [`MovieApi`].
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    language: String,
    credential: Option<Credential>,
}

impl TmdbClient {
    /// Builds a client from configuration.
    ///
    /// A missing credential is not an error here; each call fails with
    /// [`ReelscoutError::MissingCredential`] before touching the network.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("reelscout/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
            credential: Credential::from_config(config),
        })
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, String)]) -> Result<T> {
        let credential = self.credential.as_ref().ok_or(ReelscoutError::MissingCredential)?;

        let url = format!("{}{endpoint}", self.base_url);
        let mut request = self
            .http
            .get(&url)
            .query(&[("language", self.language.as_str())])
            .query(params);

        request = match credential {
            Credential::ApiKey(key) => request.query(&[("api_key", key.as_str())]),
            Credential::Bearer(token) => request.bearer_auth(token),
        };

        tracing::debug!(endpoint = endpoint, "sending request");
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(endpoint = endpoint, status = status.as_u16(), "request rejected");
            return Err(ReelscoutError::Http {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl MovieApi for TmdbClient {
    async fn trending(&self, page: u32) -> Result<MoviePage> {
        self.get("/trending/movie/week", &[("page", page.to_string())]).await
    }

    async fn search(&self, query: &str, page: u32) -> Result<MoviePage> {
        if query.trim().is_empty() {
            return Err(ReelscoutError::Config("search query must not be empty".to_string()));
        }
        self.get(
            "/search/movie",
            &[("query", query.to_string()), ("page", page.to_string())],
        )
        .await
    }

    async fn movie(&self, id: u64) -> Result<Movie> {
        self.get(&format!("/movie/{id}"), &[]).await
    }

    async fn image_config(&self) -> Result<ImageConfig> {
        let response: ConfigurationResponse = self.get("/configuration", &[]).await?;
        Ok(response.images)
    }
}
