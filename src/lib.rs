//! tmdb_persist - Client for The Movie Database API with a persistent cache
//!
//! This library provides a blocking client for the TMDB v3 API and a
//! cache-backed wrapper that stores every response on disk, so repeated
//! lookups survive process restarts without touching the network.

mod cache;
mod persistent;
mod temp;
mod tmdb;

// Re-export error types
pub use cache::CacheError;
pub use tmdb::TmdbError;

// Re-export clients and configuration
pub use persistent::{
    CacheOutcome, Cached, PersistentClient, PersistentConfig, RequestDescriptor, Resource,
};
pub use tmdb::{Config, DEFAULT_API_URL, DEFAULT_IMAGE_URL, TmdbApi, TmdbClient, TmdbResponse};

// Re-export records and request options
pub use tmdb::{
    CastMember, Collection, Company, Country, Creator, Credits, CrewMember, Episode, Genre, Movie,
    MovieCreditsRequest, MovieDetail, MovieDetailRequest, Person, SearchMovieRequest,
    SearchMovieResponse, SearchTvRequest, SearchTvResponse, SeasonSummary, SpokenLanguage,
    TvCreditsRequest, TvDetail, TvDetailRequest, TvEpisodeDetail, TvEpisodeRequest,
    TvSeasonDetail, TvSeasonRequest, TvShow,
};

pub use cache::default_cache_dir;

/// Client flavour selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientMode {
    /// Talk to the API directly on every call
    Plain,
    /// Serve repeated calls from the on-disk cache
    Persistent,
}

/// Creates a client of the requested flavour behind the [`TmdbApi`] trait
///
/// The cache directory in `config` is only used (and created) in
/// [`ClientMode::Persistent`].
///
/// # Examples
///
/// ```no_run
/// use tmdb_persist::{ClientMode, PersistentConfig, TvSeasonRequest, connect};
///
/// let client = connect(PersistentConfig::from_env(), ClientMode::Persistent).unwrap();
/// let season = client.tv_season(1399, 1, &TvSeasonRequest::default()).unwrap();
/// for episode in &season.episodes {
///     println!("{}", episode.name);
/// }
/// ```
pub fn connect(config: PersistentConfig, mode: ClientMode) -> Result<Box<dyn TmdbApi>, TmdbError> {
    let client: Box<dyn TmdbApi> = match mode {
        ClientMode::Plain => Box::new(TmdbClient::new(config.client)),
        ClientMode::Persistent => Box::new(PersistentClient::new(config)?),
    };
    Ok(client)
}
