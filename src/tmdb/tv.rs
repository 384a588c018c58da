//! TV resources: search, show details, credits, seasons and episodes.

use super::common::{CastMember, Company, Country, CrewMember, Genre, SpokenLanguage};
use super::{param, push_segment};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// A TV show as it appears in search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TvShow {
    pub id: u64,
    pub adult: bool,
    pub backdrop_path: Option<String>,
    pub genre_ids: Vec<u64>,
    pub origin_country: Vec<String>,
    pub original_language: String,
    pub original_name: String,
    pub overview: String,
    pub popularity: f64,
    pub poster_path: Option<String>,
    pub first_air_date: Option<String>,
    pub name: String,
    pub vote_average: f64,
    pub vote_count: u64,
}

/// One page of TV search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchTvResponse {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
    pub results: Vec<TvShow>,
}

/// A creator of a TV show.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Creator {
    pub id: u64,
    pub credit_id: String,
    pub name: String,
    pub gender: u8,
    pub profile_path: Option<String>,
}

/// A season as listed on the show details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonSummary {
    pub air_date: Option<String>,
    pub episode_count: u32,
    pub id: u64,
    pub name: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub season_number: u32,
    pub vote_average: f64,
}

/// A single episode.
///
/// Episodes embedded in show details or season details carry only a subset
/// of the fields; `crew` and `guest_stars` stay empty there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Episode {
    pub air_date: Option<String>,
    pub episode_number: u32,
    pub id: u64,
    pub name: String,
    pub overview: String,
    pub production_code: String,
    pub runtime: Option<u32>,
    pub season_number: u32,
    pub show_id: u64,
    pub still_path: Option<String>,
    pub vote_average: f64,
    pub vote_count: u64,
    pub crew: Vec<CrewMember>,
    pub guest_stars: Vec<CastMember>,
}

/// Full details of a single episode.
pub type TvEpisodeDetail = Episode;

/// Full details of a season, with its episodes in airing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TvSeasonDetail {
    pub id: u64,
    pub air_date: Option<String>,
    pub episodes: Vec<Episode>,
    pub name: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub season_number: u32,
    pub vote_average: f64,
}

/// Full details of a TV show.
///
/// The summary fields shared with search results live in [`TvShow`] and are
/// reachable directly through `Deref`, e.g. `detail.name`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TvDetail {
    #[serde(flatten)]
    pub show: TvShow,
    pub created_by: Vec<Creator>,
    pub episode_run_time: Vec<u32>,
    pub genres: Vec<Genre>,
    pub homepage: Option<String>,
    pub in_production: bool,
    pub languages: Vec<String>,
    pub last_air_date: Option<String>,
    pub last_episode_to_air: Option<Episode>,
    pub next_episode_to_air: Option<Episode>,
    pub networks: Vec<Company>,
    pub number_of_episodes: u32,
    pub number_of_seasons: u32,
    pub production_companies: Vec<Company>,
    pub production_countries: Vec<Country>,
    pub seasons: Vec<SeasonSummary>,
    pub spoken_languages: Vec<SpokenLanguage>,
    pub status: String,
    pub tagline: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Deref for TvDetail {
    type Target = TvShow;

    fn deref(&self) -> &Self::Target {
        &self.show
    }
}

/// Options for [`TmdbApi::search_tv`](super::TmdbApi::search_tv).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTvRequest {
    pub first_air_date_year: Option<u16>,
    pub include_adult: bool,
    pub language: Option<String>,
    /// Page to fetch, starting at 1; unset or 0 means the first page
    pub page: Option<u32>,
    pub year: Option<u16>,
}

impl SearchTvRequest {
    /// The page that will be requested.
    pub fn page(&self) -> u32 {
        self.page.filter(|page| *page >= 1).unwrap_or(1)
    }

    /// Query parameters for `/search/tv`.
    pub(crate) fn params(&self, query: &str) -> Vec<(&'static str, String)> {
        vec![
            ("query", query.to_string()),
            ("year", param(&self.year)),
            ("language", param(&self.language)),
            ("first_air_date_year", param(&self.first_air_date_year)),
            ("page", self.page().to_string()),
            ("include_adult", self.include_adult.to_string()),
        ]
    }

    pub(crate) fn key_segments(&self) -> Vec<(&'static str, String)> {
        let mut segments = Vec::new();
        if self.page() != 1 {
            segments.push(("page", self.page().to_string()));
        }
        push_segment(&mut segments, "year", &self.year);
        push_segment(&mut segments, "language", &self.language);
        push_segment(&mut segments, "first_air_date_year", &self.first_air_date_year);
        if self.include_adult {
            segments.push(("include_adult", "true".to_string()));
        }
        segments
    }
}

/// Options for show, season and episode details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TvDetailRequest {
    pub language: Option<String>,
}

impl TvDetailRequest {
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        vec![("language", param(&self.language))]
    }

    pub(crate) fn key_segments(&self) -> Vec<(&'static str, String)> {
        let mut segments = Vec::new();
        push_segment(&mut segments, "language", &self.language);
        segments
    }
}

/// Options for [`TmdbApi::tv_season`](super::TmdbApi::tv_season).
pub type TvSeasonRequest = TvDetailRequest;

/// Options for [`TmdbApi::tv_episode`](super::TmdbApi::tv_episode).
pub type TvEpisodeRequest = TvDetailRequest;

/// Options for [`TmdbApi::tv_credits`](super::TmdbApi::tv_credits).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TvCreditsRequest {
    pub language: Option<String>,
}

impl TvCreditsRequest {
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        vec![("language", param(&self.language))]
    }

    pub(crate) fn key_segments(&self) -> Vec<(&'static str, String)> {
        let mut segments = Vec::new();
        push_segment(&mut segments, "language", &self.language);
        segments
    }
}
