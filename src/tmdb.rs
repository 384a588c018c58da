//! Client for The Movie Database (TMDB) v3 API.
//!
//! This module provides the typed records for movies, TV shows, seasons,
//! episodes and credits, the request option records for each resource, and
//! the [`TmdbApi`] trait implemented by both the plain HTTP client and the
//! persistent, cache-backed client.
mod client;
mod common;
mod movie;
mod tv;

pub use client::{Config, DEFAULT_API_URL, DEFAULT_IMAGE_URL, TmdbClient};
pub use common::{
    CastMember, Company, Country, Credits, CrewMember, Genre, Person, SpokenLanguage,
};
pub use movie::{
    Collection, Movie, MovieCreditsRequest, MovieDetail, MovieDetailRequest, SearchMovieRequest,
    SearchMovieResponse,
};
pub use tv::{
    Creator, Episode, SearchTvRequest, SearchTvResponse, SeasonSummary, TvCreditsRequest,
    TvDetail, TvDetailRequest, TvEpisodeDetail, TvEpisodeRequest, TvSeasonDetail,
    TvSeasonRequest, TvShow,
};

use crate::cache::CacheError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while talking to the TMDB API.
#[derive(Debug, Error)]
pub enum TmdbError {
    /// The HTTP request could not be sent or its body could not be read
    #[error("Request failed: {0}")]
    RequestError(String),

    /// The API answered with an error envelope carrying a non-zero status code
    #[error("{message} (code: {code})")]
    ApiError { code: i64, message: String },

    /// Failed to parse the API's JSON response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// The persistent cache could not be set up or an entry could not be read
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

/// The generic status body TMDB returns for errors and for `/authentication`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbResponse {
    pub status_code: i64,
    pub status_message: String,
    pub success: bool,
}

/// Read operations offered by a TMDB client.
///
/// Every operation maps to exactly one API call. Options left at their
/// defaults are not sent, except for the search page (defaults to 1) and
/// `include_adult` (defaults to false).
pub trait TmdbApi {
    /// Search for movies by their original, translated and alternative titles.
    fn search_movie(
        &self,
        query: &str,
        opts: &SearchMovieRequest,
    ) -> Result<SearchMovieResponse, TmdbError>;

    /// Get the top level details of a movie by ID.
    fn movie_detail(&self, id: u64, opts: &MovieDetailRequest) -> Result<MovieDetail, TmdbError>;

    /// Get the cast and crew for a movie.
    fn movie_credits(&self, id: u64, opts: &MovieCreditsRequest) -> Result<Credits, TmdbError>;

    /// Search for TV shows by their original, translated and also known as names.
    fn search_tv(&self, query: &str, opts: &SearchTvRequest)
    -> Result<SearchTvResponse, TmdbError>;

    /// Get the details of a TV show.
    fn tv_detail(&self, id: u64, opts: &TvDetailRequest) -> Result<TvDetail, TmdbError>;

    /// Get the latest season credits of a TV show.
    fn tv_credits(&self, id: u64, opts: &TvCreditsRequest) -> Result<Credits, TmdbError>;

    /// Get the details of one season of a TV show, including its episodes.
    fn tv_season(
        &self,
        id: u64,
        season: u32,
        opts: &TvSeasonRequest,
    ) -> Result<TvSeasonDetail, TmdbError>;

    /// Get the details of one episode of a TV show.
    fn tv_episode(
        &self,
        id: u64,
        season: u32,
        episode: u32,
        opts: &TvEpisodeRequest,
    ) -> Result<TvEpisodeDetail, TmdbError>;

    /// Builds the full URL of an image from its relative path.
    ///
    /// `size` defaults to `"original"`. An empty path yields an empty string.
    fn image_url(&self, path: &str, size: Option<&str>) -> String;
}

/// Renders an optional value as a query parameter, empty when unset.
pub(crate) fn param<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

/// Adds `(name, value)` to `segments` when the value is set and non-empty.
pub(crate) fn push_segment<T: ToString>(
    segments: &mut Vec<(&'static str, String)>,
    name: &'static str,
    value: &Option<T>,
) {
    let value = param(value);
    if !value.is_empty() {
        segments.push((name, value));
    }
}
