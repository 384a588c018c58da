//! Records shared between the movie and TV resources.
//!
//! Field names mirror the TMDB JSON format. Every record tolerates missing
//! fields, and values TMDB sends as `null` are modelled as `Option`.

use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// A genre as listed on a detail record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// A production company or TV network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    pub id: u64,
    pub name: String,
    pub logo_path: Option<String>,
    pub origin_country: String,
}

/// A production country.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Country {
    pub iso_3166_1: String,
    pub name: String,
}

/// A language spoken in a movie or show.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpokenLanguage {
    pub iso_639_1: String,
    pub name: String,
    pub english_name: String,
}

/// The person fields shared by cast and crew entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    pub adult: bool,
    pub gender: u8,
    pub id: u64,
    pub known_for_department: Option<String>,
    pub name: String,
    pub original_name: String,
    pub popularity: f64,
    pub profile_path: Option<String>,
    pub credit_id: String,
}

/// A cast entry of a credits list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CastMember {
    #[serde(flatten)]
    pub person: Person,
    /// Only present on movie credits
    pub cast_id: Option<u64>,
    pub character: String,
    pub order: u32,
}

impl Deref for CastMember {
    type Target = Person;

    fn deref(&self) -> &Self::Target {
        &self.person
    }
}

/// A crew entry of a credits list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrewMember {
    #[serde(flatten)]
    pub person: Person,
    pub department: String,
    pub job: String,
}

impl Deref for CrewMember {
    type Target = Person;

    fn deref(&self) -> &Self::Target {
        &self.person
    }
}

/// Cast and crew of a movie or TV show.
///
/// Only the credit entries are returned; fetching further details for the
/// people listed is up to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credits {
    pub id: u64,
    pub cast: Vec<CastMember>,
    pub crew: Vec<CrewMember>,
}
