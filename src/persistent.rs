//! Persistent TMDB client
//!
//! This module provides a caching wrapper around any [`TmdbApi`]
//! implementation. Every response is stored as a JSON file in a cache
//! directory and served from there on later calls, across process runs.
//! Entries never expire; delete the files to refresh them.
mod request;

pub use request::{RequestDescriptor, Resource};

use crate::cache::{CacheError, CacheStorage};
use crate::tmdb::{
    Config, Credits, MovieCreditsRequest, MovieDetail, MovieDetailRequest, SearchMovieRequest,
    SearchMovieResponse, SearchTvRequest, SearchTvResponse, TmdbApi, TmdbClient, TmdbError,
    TvCreditsRequest, TvDetail, TvDetailRequest, TvEpisodeDetail, TvEpisodeRequest,
    TvSeasonDetail, TvSeasonRequest,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Settings for [`PersistentClient`]: the API settings plus the cache location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistentConfig {
    /// Settings for the wrapped HTTP client
    pub client: Config,
    /// Cache directory; defaults to `<user config dir>/tmdb`
    pub cache_dir: Option<PathBuf>,
}

impl PersistentConfig {
    /// Reads [`Config::from_env`] plus `TMDB_CACHE_DIR`.
    pub fn from_env() -> Self {
        Self {
            client: Config::from_env(),
            cache_dir: env::var_os("TMDB_CACHE_DIR")
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Sets the directory cache entries are written to.
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(cache_dir.into());
        self
    }
}

/// How a [`Cached`] value was obtained.
#[derive(Debug)]
pub enum CacheOutcome {
    /// Served from an existing cache entry
    Hit,
    /// Fetched from the API and written to the cache
    Stored,
    /// Fetched from the API, but writing the cache entry failed
    ///
    /// The value is still returned; the next call will fetch again.
    StoreFailed(CacheError),
}

/// A response record together with the way it was obtained.
#[derive(Debug)]
pub struct Cached<T> {
    pub value: T,
    pub outcome: CacheOutcome,
}

impl<T> Cached<T> {
    /// Discards the outcome and returns the record.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Whether the record came from an existing cache entry.
    pub fn is_hit(&self) -> bool {
        matches!(self.outcome, CacheOutcome::Hit)
    }
}

/// A TMDB client that persists every response on disk
///
/// A stored entry is authoritative for its request: it is never checked
/// against the API again. A corrupt entry is reported as an error rather than
/// silently fetched again. The cache directory is not locked; concurrent
/// misses for the same request may both fetch, and the last write wins.
pub struct PersistentClient<A = TmdbClient>
where
    A: TmdbApi,
{
    /// The underlying client
    inner: A,
    /// Cache storage for responses
    cache: CacheStorage,
}

impl PersistentClient<TmdbClient> {
    /// Creates a persistent client talking to the TMDB API over HTTP.
    ///
    /// Fails if the cache directory cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tmdb_persist::{PersistentClient, PersistentConfig, SearchMovieRequest, TmdbApi};
    ///
    /// let client = PersistentClient::new(PersistentConfig::from_env()).unwrap();
    /// let result = client
    ///     .search_movie("The Matrix", &SearchMovieRequest::default())
    ///     .unwrap();
    /// for movie in result.results {
    ///     println!("{} {}", movie.id, movie.title);
    /// }
    /// ```
    pub fn new(config: PersistentConfig) -> Result<Self, TmdbError> {
        Self::wrap(TmdbClient::new(config.client), config.cache_dir)
    }
}

impl<A> PersistentClient<A>
where
    A: TmdbApi,
{
    /// Wraps an existing client, caching into `cache_dir` (or the default
    /// location when `None`).
    pub fn wrap(inner: A, cache_dir: Option<PathBuf>) -> Result<Self, TmdbError> {
        let cache = CacheStorage::open(cache_dir)?;
        Ok(Self { inner, cache })
    }

    /// Returns the wrapped client.
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Returns the cache directory.
    pub fn cache_dir(&self) -> &Path {
        self.cache.cache_dir()
    }

    /// Returns the file the given request is cached in.
    pub fn entry_path(&self, request: &RequestDescriptor) -> PathBuf {
        self.cache.entry_path(&request.cache_key())
    }

    /// Serves `request` from the cache, or runs `fetch` and stores its result.
    fn cached<T, F>(&self, request: RequestDescriptor, fetch: F) -> Result<Cached<T>, TmdbError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&A) -> Result<T, TmdbError>,
    {
        let key = request.cache_key();

        if let Some(value) = self.cache.load(&key)? {
            debug!(%key, "cache hit");
            return Ok(Cached {
                value,
                outcome: CacheOutcome::Hit,
            });
        }

        debug!(%key, "cache miss");
        let value = fetch(&self.inner)?;

        // A failed write must not cost the caller the fetched value
        let outcome = match self.cache.store(&key, &value) {
            Ok(()) => CacheOutcome::Stored,
            Err(e) => {
                warn!(%key, error = %e, "failed to store cache entry");
                CacheOutcome::StoreFailed(e)
            }
        };

        Ok(Cached { value, outcome })
    }

    /// Searches movies, serving repeated searches from the cache
    ///
    /// # Arguments
    ///
    /// * `query` - Title to search for; part of the cache key
    /// * `opts` - Search options; only non-default values enter the cache key
    ///
    /// # Returns
    ///
    /// The search page together with how it was obtained. A failed cache
    /// write is reported in [`Cached::outcome`] rather than as an error.
    pub fn search_movie_cached(
        &self,
        query: &str,
        opts: &SearchMovieRequest,
    ) -> Result<Cached<SearchMovieResponse>, TmdbError> {
        let request = RequestDescriptor::new(Resource::MovieSearch {
            query: query.to_string(),
        })
        .with_options(opts.key_segments());
        self.cached(request, |api| api.search_movie(query, opts))
    }

    /// Fetches movie details through the cache.
    pub fn movie_detail_cached(
        &self,
        id: u64,
        opts: &MovieDetailRequest,
    ) -> Result<Cached<MovieDetail>, TmdbError> {
        let request = RequestDescriptor::new(Resource::MovieDetail { id })
            .with_options(opts.key_segments());
        self.cached(request, |api| api.movie_detail(id, opts))
    }

    /// Fetches the cast and crew of a movie through the cache.
    pub fn movie_credits_cached(
        &self,
        id: u64,
        opts: &MovieCreditsRequest,
    ) -> Result<Cached<Credits>, TmdbError> {
        let request = RequestDescriptor::new(Resource::MovieCredits { id })
            .with_options(opts.key_segments());
        self.cached(request, |api| api.movie_credits(id, opts))
    }

    /// Searches TV shows, serving repeated searches from the cache.
    pub fn search_tv_cached(
        &self,
        query: &str,
        opts: &SearchTvRequest,
    ) -> Result<Cached<SearchTvResponse>, TmdbError> {
        let request = RequestDescriptor::new(Resource::TvSearch {
            query: query.to_string(),
        })
        .with_options(opts.key_segments());
        self.cached(request, |api| api.search_tv(query, opts))
    }

    /// Fetches TV show details through the cache.
    pub fn tv_detail_cached(
        &self,
        id: u64,
        opts: &TvDetailRequest,
    ) -> Result<Cached<TvDetail>, TmdbError> {
        let request =
            RequestDescriptor::new(Resource::TvDetail { id }).with_options(opts.key_segments());
        self.cached(request, |api| api.tv_detail(id, opts))
    }

    /// Fetches the cast and crew of a TV show through the cache.
    pub fn tv_credits_cached(
        &self,
        id: u64,
        opts: &TvCreditsRequest,
    ) -> Result<Cached<Credits>, TmdbError> {
        let request =
            RequestDescriptor::new(Resource::TvCredits { id }).with_options(opts.key_segments());
        self.cached(request, |api| api.tv_credits(id, opts))
    }

    /// Fetches a season with its episode list through the cache.
    pub fn tv_season_cached(
        &self,
        id: u64,
        season: u32,
        opts: &TvSeasonRequest,
    ) -> Result<Cached<TvSeasonDetail>, TmdbError> {
        let request = RequestDescriptor::new(Resource::TvSeason { id, season })
            .with_options(opts.key_segments());
        self.cached(request, |api| api.tv_season(id, season, opts))
    }

    /// Fetches a single episode through the cache.
    pub fn tv_episode_cached(
        &self,
        id: u64,
        season: u32,
        episode: u32,
        opts: &TvEpisodeRequest,
    ) -> Result<Cached<TvEpisodeDetail>, TmdbError> {
        let request = RequestDescriptor::new(Resource::TvEpisode {
            id,
            season,
            episode,
        })
        .with_options(opts.key_segments());
        self.cached(request, |api| api.tv_episode(id, season, episode, opts))
    }
}

impl<A> TmdbApi for PersistentClient<A>
where
    A: TmdbApi,
{
    fn search_movie(
        &self,
        query: &str,
        opts: &SearchMovieRequest,
    ) -> Result<SearchMovieResponse, TmdbError> {
        self.search_movie_cached(query, opts).map(Cached::into_inner)
    }

    fn movie_detail(&self, id: u64, opts: &MovieDetailRequest) -> Result<MovieDetail, TmdbError> {
        self.movie_detail_cached(id, opts).map(Cached::into_inner)
    }

    fn movie_credits(&self, id: u64, opts: &MovieCreditsRequest) -> Result<Credits, TmdbError> {
        self.movie_credits_cached(id, opts).map(Cached::into_inner)
    }

    fn search_tv(
        &self,
        query: &str,
        opts: &SearchTvRequest,
    ) -> Result<SearchTvResponse, TmdbError> {
        self.search_tv_cached(query, opts).map(Cached::into_inner)
    }

    fn tv_detail(&self, id: u64, opts: &TvDetailRequest) -> Result<TvDetail, TmdbError> {
        self.tv_detail_cached(id, opts).map(Cached::into_inner)
    }

    fn tv_credits(&self, id: u64, opts: &TvCreditsRequest) -> Result<Credits, TmdbError> {
        self.tv_credits_cached(id, opts).map(Cached::into_inner)
    }

    fn tv_season(
        &self,
        id: u64,
        season: u32,
        opts: &TvSeasonRequest,
    ) -> Result<TvSeasonDetail, TmdbError> {
        self.tv_season_cached(id, season, opts)
            .map(Cached::into_inner)
    }

    fn tv_episode(
        &self,
        id: u64,
        season: u32,
        episode: u32,
        opts: &TvEpisodeRequest,
    ) -> Result<TvEpisodeDetail, TmdbError> {
        self.tv_episode_cached(id, season, episode, opts)
            .map(Cached::into_inner)
    }

    fn image_url(&self, path: &str, size: Option<&str>) -> String {
        self.inner.image_url(path, size)
    }
}
