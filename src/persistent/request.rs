//! Request descriptors and cache key derivation.

use std::fmt;

/// Longest key kept verbatim, leaving room for the `.json` suffix below the
/// usual 255 byte file name limit
const MAX_KEY_LEN: usize = 200;

/// A cacheable API resource together with the parameters that identify it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    MovieSearch { query: String },
    MovieDetail { id: u64 },
    MovieCredits { id: u64 },
    TvSearch { query: String },
    TvDetail { id: u64 },
    TvCredits { id: u64 },
    TvSeason { id: u64, season: u32 },
    TvEpisode { id: u64, season: u32, episode: u32 },
}

/// Identifies one cacheable call: the resource plus any request options
/// that differ from their defaults.
///
/// Only used to derive a cache key; never persisted itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    resource: Resource,
    options: Vec<(&'static str, String)>,
}

impl RequestDescriptor {
    /// Describes a request for `resource` with default options.
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            options: Vec::new(),
        }
    }

    /// Attaches the non-default options of the request.
    pub(crate) fn with_options(mut self, options: Vec<(&'static str, String)>) -> Self {
        self.options = options;
        self
    }

    /// The requested resource.
    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    /// Derives the file stem of the cache entry.
    ///
    /// The key starts with a fixed prefix per resource kind followed by the
    /// identifying parameters. Free text is percent-escaped, leaving only
    /// `A-Z a-z 0-9 - _ . ~`, so the key is a single valid file name. Options
    /// follow as `@name=value` segments; since `@` and `=` are always escaped
    /// inside values, distinct requests never share a key.
    ///
    /// Keys longer than 200 bytes are cut and end in `#` plus the BLAKE3
    /// hash of the full key. `#` never occurs in an uncut key.
    pub fn cache_key(&self) -> String {
        let mut key = match &self.resource {
            Resource::MovieSearch { query } => format!("movie-search-{}", escape(query)),
            Resource::MovieDetail { id } => format!("movie-{}", id),
            Resource::MovieCredits { id } => format!("movie-credits-{}", id),
            Resource::TvSearch { query } => format!("tv-search-{}", escape(query)),
            Resource::TvDetail { id } => format!("tv-{}", id),
            Resource::TvCredits { id } => format!("tv-credits-{}", id),
            Resource::TvSeason { id, season } => format!("tv-season-{}-{}", id, season),
            Resource::TvEpisode {
                id,
                season,
                episode,
            } => format!("tv-episode-{}-{}-{}", id, season, episode),
        };

        for (name, value) in &self.options {
            key.push('@');
            key.push_str(name);
            key.push('=');
            key.push_str(&escape(value));
        }

        cap_length(key)
    }
}

impl From<Resource> for RequestDescriptor {
    fn from(resource: Resource) -> Self {
        Self::new(resource)
    }
}

impl fmt::Display for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cache_key())
    }
}

fn escape(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}

fn cap_length(key: String) -> String {
    if key.len() <= MAX_KEY_LEN {
        return key;
    }

    let hash = blake3::hash(key.as_bytes()).to_hex();
    let mut end = MAX_KEY_LEN - hash.len() - 1;
    while !key.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}#{}", &key[..end], hash)
}
