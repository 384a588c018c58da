//! Movie resources: search, details and credits.

use super::common::{Company, Country, Genre, SpokenLanguage};
use super::{param, push_segment};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// A movie as it appears in search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Movie {
    pub adult: bool,
    pub backdrop_path: Option<String>,
    /// Only present in search results; details carry `genres` instead
    pub genre_ids: Vec<u64>,
    pub id: u64,
    pub original_language: String,
    pub original_title: String,
    pub overview: String,
    pub popularity: f64,
    pub poster_path: Option<String>,
    pub release_date: String,
    pub title: String,
    pub video: bool,
    pub vote_average: f64,
    pub vote_count: u64,
}

/// One page of movie search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchMovieResponse {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
    pub results: Vec<Movie>,
}

/// The collection a movie belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Collection {
    pub id: u64,
    pub name: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

/// Full details of a movie.
///
/// The summary fields shared with search results live in [`Movie`] and are
/// reachable directly through `Deref`, e.g. `detail.title`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub movie: Movie,
    pub belongs_to_collection: Option<Collection>,
    pub budget: u64,
    pub genres: Vec<Genre>,
    pub homepage: Option<String>,
    pub imdb_id: Option<String>,
    pub production_companies: Vec<Company>,
    pub production_countries: Vec<Country>,
    pub revenue: u64,
    pub runtime: Option<u32>,
    pub spoken_languages: Vec<SpokenLanguage>,
    pub status: String,
    pub tagline: Option<String>,
}

impl Deref for MovieDetail {
    type Target = Movie;

    fn deref(&self) -> &Self::Target {
        &self.movie
    }
}

/// Options for [`TmdbApi::search_movie`](super::TmdbApi::search_movie).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchMovieRequest {
    pub include_adult: bool,
    pub language: Option<String>,
    pub primary_release_year: Option<u16>,
    /// Page to fetch, starting at 1; unset or 0 means the first page
    pub page: Option<u32>,
    pub region: Option<String>,
    pub year: Option<u16>,
}

impl SearchMovieRequest {
    /// The page that will be requested.
    pub fn page(&self) -> u32 {
        self.page.filter(|page| *page >= 1).unwrap_or(1)
    }

    /// Query parameters for `/search/movie`.
    pub(crate) fn params(&self, query: &str) -> Vec<(&'static str, String)> {
        vec![
            ("query", query.to_string()),
            ("page", self.page().to_string()),
            ("year", param(&self.year)),
            ("region", param(&self.region)),
            ("language", param(&self.language)),
            ("primary_release_year", param(&self.primary_release_year)),
            ("include_adult", self.include_adult.to_string()),
        ]
    }

    /// Options that differ from the defaults, in a fixed order.
    pub(crate) fn key_segments(&self) -> Vec<(&'static str, String)> {
        let mut segments = Vec::new();
        if self.page() != 1 {
            segments.push(("page", self.page().to_string()));
        }
        push_segment(&mut segments, "year", &self.year);
        push_segment(&mut segments, "region", &self.region);
        push_segment(&mut segments, "language", &self.language);
        push_segment(&mut segments, "primary_release_year", &self.primary_release_year);
        if self.include_adult {
            segments.push(("include_adult", "true".to_string()));
        }
        segments
    }
}

/// Options for [`TmdbApi::movie_detail`](super::TmdbApi::movie_detail).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieDetailRequest {
    pub language: Option<String>,
    /// Comma separated sub-resources to embed in the response
    pub append_to_response: Option<String>,
}

impl MovieDetailRequest {
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("language", param(&self.language)),
            ("append_to_response", param(&self.append_to_response)),
        ]
    }

    pub(crate) fn key_segments(&self) -> Vec<(&'static str, String)> {
        let mut segments = Vec::new();
        push_segment(&mut segments, "language", &self.language);
        push_segment(&mut segments, "append_to_response", &self.append_to_response);
        segments
    }
}

/// Options for [`TmdbApi::movie_credits`](super::TmdbApi::movie_credits).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieCreditsRequest {
    pub language: Option<String>,
}

impl MovieCreditsRequest {
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        vec![("language", param(&self.language))]
    }

    pub(crate) fn key_segments(&self) -> Vec<(&'static str, String)> {
        let mut segments = Vec::new();
        push_segment(&mut segments, "language", &self.language);
        segments
    }
}
