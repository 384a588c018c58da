//! HTTP transport for the TMDB API.

use super::movie::{
    MovieCreditsRequest, MovieDetail, MovieDetailRequest, SearchMovieRequest, SearchMovieResponse,
};
use super::tv::{
    SearchTvRequest, SearchTvResponse, TvCreditsRequest, TvDetail, TvDetailRequest,
    TvEpisodeDetail, TvEpisodeRequest, TvSeasonDetail, TvSeasonRequest,
};
use super::{Credits, TmdbApi, TmdbError, TmdbResponse};
use serde::de::DeserializeOwned;
use std::env;
use tracing::debug;

/// Base URL of the TMDB v3 API
pub const DEFAULT_API_URL: &str = "https://api.themoviedb.org/3";

/// Prefix for image URLs; the size token and the image path are appended
pub const DEFAULT_IMAGE_URL: &str = "https://image.tmdb.org/t/p/";

/// Image size used when none is requested
const DEFAULT_IMAGE_SIZE: &str = "original";

/// Connection settings for [`TmdbClient`].
///
/// Both authentication mechanisms are optional and may be combined; most
/// endpoints of the real service require at least one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Override for the API base URL
    pub api_url: Option<String>,
    /// v3 API key, sent as the `api_key` query parameter
    pub api_key: Option<String>,
    /// v4 read access token, sent as a bearer token
    pub access_token: Option<String>,
    /// Override for the image host prefix
    pub image_url: Option<String>,
}

impl Config {
    /// Reads the configuration from `TMDB_API_KEY`, `TMDB_ACCESS_TOKEN`,
    /// `TMDB_API_URL` and `TMDB_IMAGE_URL`. Empty variables count as unset.
    pub fn from_env() -> Self {
        Self {
            api_url: env_var("TMDB_API_URL"),
            api_key: env_var("TMDB_API_KEY"),
            access_token: env_var("TMDB_ACCESS_TOKEN"),
            image_url: env_var("TMDB_IMAGE_URL"),
        }
    }

    /// Sets the v3 API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the v4 read access token.
    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    /// Points the client at another API base URL.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    /// Overrides the image host prefix.
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// The API base URL without a trailing slash.
    pub fn api_url(&self) -> &str {
        non_empty(&self.api_url)
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
    }

    /// The image host prefix.
    pub fn image_url(&self) -> &str {
        non_empty(&self.image_url).unwrap_or(DEFAULT_IMAGE_URL)
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// Blocking client for the TMDB API.
///
/// Each call performs exactly one GET request. There are no retries and no
/// explicit timeout beyond the HTTP client's defaults.
pub struct TmdbClient {
    client: reqwest::blocking::Client,
    config: Config,
}

impl TmdbClient {
    /// Creates a new client from the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            config,
        }
    }

    /// Returns the configuration this client was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Performs a GET request against `path` and returns the raw body.
    ///
    /// Parameters with empty values are not sent. A body that decodes as an
    /// error envelope with a non-zero status code is turned into
    /// [`TmdbError::ApiError`], whatever the HTTP status was.
    pub fn get(&self, path: &str, params: &[(&str, String)]) -> Result<Vec<u8>, TmdbError> {
        let data = self.send(path, params)?;
        check_envelope(&data)?;
        Ok(data)
    }

    /// Checks the configured credentials against `/authentication`.
    ///
    /// The endpoint answers with a status envelope either way (a valid key
    /// yields status code 1), so the `success` flag decides the outcome.
    pub fn authenticate(&self) -> Result<TmdbResponse, TmdbError> {
        let data = self.send("/authentication", &[])?;
        let response: TmdbResponse = decode(&data)?;
        if !response.success {
            return Err(TmdbError::ApiError {
                code: response.status_code,
                message: response.status_message,
            });
        }
        Ok(response)
    }

    fn send(&self, path: &str, params: &[(&str, String)]) -> Result<Vec<u8>, TmdbError> {
        let url = format!("{}{}", self.config.api_url(), path);
        let query = self.query_pairs(params);

        let mut request = self.client.get(&url).query(&query);
        if let Some(token) = non_empty(&self.config.access_token) {
            request = request.bearer_auth(token);
        }

        debug!(%url, "requesting");
        let response = request
            .send()
            .map_err(|e| TmdbError::RequestError(e.to_string()))?;
        let status = response.status();

        let data = response
            .bytes()
            .map_err(|e| TmdbError::RequestError(e.to_string()))?;
        debug!(%url, status = status.as_u16(), bytes = data.len(), "received response");

        Ok(data.to_vec())
    }

    /// Builds the query string pairs: the API key first, then every
    /// parameter with a non-empty value.
    pub(crate) fn query_pairs<'a>(&'a self, params: &'a [(&str, String)]) -> Vec<(&'a str, &'a str)> {
        let mut query = Vec::with_capacity(params.len() + 1);
        if let Some(api_key) = non_empty(&self.config.api_key) {
            query.push(("api_key", api_key));
        }
        query.extend(
            params
                .iter()
                .filter(|(_, value)| !value.is_empty())
                .map(|(name, value)| (*name, value.as_str())),
        );
        query
    }

    fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, TmdbError> {
        let data = self.get(path, params)?;
        decode(&data)
    }
}

/// Probes a response body for the error envelope.
///
/// Bodies that are not shaped like an envelope, or carry status code 0, are
/// successful responses.
pub(crate) fn check_envelope(data: &[u8]) -> Result<(), TmdbError> {
    match serde_json::from_slice::<TmdbResponse>(data) {
        Ok(envelope) if envelope.status_code != 0 => Err(TmdbError::ApiError {
            code: envelope.status_code,
            message: envelope.status_message,
        }),
        _ => Ok(()),
    }
}

fn decode<T: DeserializeOwned>(data: &[u8]) -> Result<T, TmdbError> {
    serde_json::from_slice(data).map_err(|e| TmdbError::ParseError(e.to_string()))
}

/// Joins the image host, the size token and the relative path.
pub(crate) fn build_image_url(host: &str, path: &str, size: Option<&str>) -> String {
    if path.is_empty() {
        return String::new();
    }
    let size = size.filter(|size| !size.is_empty()).unwrap_or(DEFAULT_IMAGE_SIZE);
    format!("{}{}{}", host, size, path)
}

impl TmdbApi for TmdbClient {
    fn search_movie(
        &self,
        query: &str,
        opts: &SearchMovieRequest,
    ) -> Result<SearchMovieResponse, TmdbError> {
        self.fetch("/search/movie", &opts.params(query))
    }

    fn movie_detail(&self, id: u64, opts: &MovieDetailRequest) -> Result<MovieDetail, TmdbError> {
        self.fetch(&format!("/movie/{}", id), &opts.params())
    }

    fn movie_credits(&self, id: u64, opts: &MovieCreditsRequest) -> Result<Credits, TmdbError> {
        self.fetch(&format!("/movie/{}/credits", id), &opts.params())
    }

    fn search_tv(
        &self,
        query: &str,
        opts: &SearchTvRequest,
    ) -> Result<SearchTvResponse, TmdbError> {
        self.fetch("/search/tv", &opts.params(query))
    }

    fn tv_detail(&self, id: u64, opts: &TvDetailRequest) -> Result<TvDetail, TmdbError> {
        self.fetch(&format!("/tv/{}", id), &opts.params())
    }

    fn tv_credits(&self, id: u64, opts: &TvCreditsRequest) -> Result<Credits, TmdbError> {
        self.fetch(&format!("/tv/{}/credits", id), &opts.params())
    }

    fn tv_season(
        &self,
        id: u64,
        season: u32,
        opts: &TvSeasonRequest,
    ) -> Result<TvSeasonDetail, TmdbError> {
        self.fetch(&format!("/tv/{}/season/{}", id, season), &opts.params())
    }

    fn tv_episode(
        &self,
        id: u64,
        season: u32,
        episode: u32,
        opts: &TvEpisodeRequest,
    ) -> Result<TvEpisodeDetail, TmdbError> {
        self.fetch(
            &format!("/tv/{}/season/{}/episode/{}", id, season, episode),
            &opts.params(),
        )
    }

    fn image_url(&self, path: &str, size: Option<&str>) -> String {
        build_image_url(self.config.image_url(), path, size)
    }
}
