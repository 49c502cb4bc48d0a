//! Typed records for the server's JSON schemas.
//!
//! Every type here is an ephemeral value object rebuilt per response.
//! Unknown extra fields are ignored and absent optional fields become
//! `None`; a missing required field fails deserialization, which the
//! clients surface as [`Error::Mapping`](crate::Error::Mapping).

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::platform::MediaType;

/// Cross-platform IDs for one anime title.
///
/// A `None` field means the platform has no mapping for that title.
/// Numeric-ID platforms are `u64`, slug-keyed platforms are `String`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeRelation {
    /// Title of the anime.
    pub title: String,
    /// aniDB ID, without the `a` prefix.
    #[serde(default)]
    pub anidb: Option<u64>,
    /// AniList ID.
    #[serde(default)]
    pub anilist: Option<u64>,
    /// Anime-Planet slug.
    #[serde(default)]
    pub animeplanet: Option<String>,
    /// aniSearch ID.
    #[serde(default)]
    pub anisearch: Option<u64>,
    /// Annict ID.
    #[serde(default)]
    pub annict: Option<u64>,
    /// IMDb ID (`tt`-prefixed), mostly for movies.
    #[serde(default)]
    pub imdb: Option<String>,
    /// Kaize slug.
    #[serde(default)]
    pub kaize: Option<String>,
    /// Kaize numeric ID, used internally by the Kaize API.
    #[serde(default)]
    pub kaize_id: Option<u64>,
    /// Kitsu ID.
    #[serde(default)]
    pub kitsu: Option<u64>,
    /// LiveChart ID.
    #[serde(default)]
    pub livechart: Option<u64>,
    /// MyAnimeList ID.
    #[serde(default)]
    pub myanimelist: Option<u64>,
    /// Nautiljon slug, in plus format.
    #[serde(default)]
    pub nautiljon: Option<String>,
    /// Nautiljon numeric ID, used internally by Nautiljon.
    #[serde(default)]
    pub nautiljon_id: Option<u64>,
    /// Notify.moe base64 ID.
    #[serde(default)]
    pub notify: Option<String>,
    /// Otak Otaku ID.
    #[serde(default)]
    pub otakotaku: Option<u64>,
    /// Shikimori ID, without the letter prefix; shares MAL's ID space.
    #[serde(default)]
    pub shikimori: Option<u64>,
    /// Shoboi ID.
    #[serde(default)]
    pub shoboi: Option<u64>,
    /// SilverYasha ID.
    #[serde(default)]
    pub silveryasha: Option<u64>,
    /// TheMovieDB ID, only for movies.
    #[serde(default)]
    pub themoviedb: Option<u64>,
    /// Trakt ID.
    #[serde(default)]
    pub trakt: Option<u64>,
    /// Trakt season number, `None` for movies.
    #[serde(default)]
    pub trakt_season: Option<u64>,
    /// Trakt media type (`shows` or `movies`).
    #[serde(default)]
    pub trakt_type: Option<MediaType>,
}

/// Last-refresh time of the mapping dataset, as exposed inside `/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatedStruct {
    /// Unix epoch seconds of the refresh.
    pub timestamp: i64,
    /// The same instant, ISO 8601 formatted.
    pub iso: String,
}

impl UpdatedStruct {
    /// The refresh instant as a UTC datetime, `None` if the epoch is out
    /// of chrono's representable range.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

/// Per-platform entry counts reported by `/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformCounts {
    /// Total number of canonical entries.
    pub total: u64,
    #[serde(default)]
    pub anidb: Option<u64>,
    #[serde(default)]
    pub anilist: Option<u64>,
    #[serde(default)]
    pub animeplanet: Option<u64>,
    #[serde(default)]
    pub anisearch: Option<u64>,
    #[serde(default)]
    pub annict: Option<u64>,
    #[serde(default)]
    pub imdb: Option<u64>,
    #[serde(default)]
    pub kaize: Option<u64>,
    #[serde(default)]
    pub kitsu: Option<u64>,
    #[serde(default)]
    pub livechart: Option<u64>,
    #[serde(default)]
    pub myanimelist: Option<u64>,
    #[serde(default)]
    pub nautiljon: Option<u64>,
    #[serde(default)]
    pub notify: Option<u64>,
    #[serde(default)]
    pub otakotaku: Option<u64>,
    #[serde(default)]
    pub shikimori: Option<u64>,
    #[serde(default)]
    pub shoboi: Option<u64>,
    #[serde(default)]
    pub silveryasha: Option<u64>,
    #[serde(default)]
    pub themoviedb: Option<u64>,
    #[serde(default)]
    pub trakt: Option<u64>,
}

/// Point-in-time snapshot from `/status`: dataset provenance, counts and
/// the endpoint directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiStatus {
    /// Main repository of the API.
    pub mainrepo: String,
    /// Last dataset refresh.
    pub updated: UpdatedStruct,
    /// Contributors to the dataset.
    pub contributors: Vec<String>,
    /// Upstream sources the dataset aggregates.
    pub sources: Vec<String>,
    /// License of the dataset.
    pub license: String,
    /// Project website.
    pub website: String,
    /// Entry counts per platform.
    pub counts: PlatformCounts,
    /// Endpoint directory, route pattern by name.
    pub endpoints: HashMap<String, String>,
}

/// Liveness snapshot from `/heartbeat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heartbeat {
    /// Human-readable status, e.g. `"OK"`.
    pub status: String,
    /// HTTP-style status code.
    pub code: u16,
    /// Server-measured response latency, human formatted.
    pub response_time: String,
    /// Request wall-clock time, human formatted.
    pub request_time: String,
    /// Request time as Unix epoch seconds with fractional part.
    pub request_epoch: f64,
}

impl Heartbeat {
    /// The request instant as a UTC datetime, `None` if the epoch is out
    /// of chrono's representable range.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        let secs = self.request_epoch.trunc() as i64;
        let nanos = (self.request_epoch.fract() * 1_000_000_000.0) as u32;
        DateTime::from_timestamp(secs, nanos)
    }
}

/// Fixed text format of the `/updated` endpoint. "UTC" is literal.
const UPDATED_FORMAT: &str = "Updated on %m/%d/%Y %H:%M:%S UTC";

/// Response of the `/updated` endpoint.
///
/// The server returns one plain-text timestamp; this wraps it so callers
/// can take either view of the same instant — the raw text via
/// [`Updated::as_str`], or a parsed datetime via [`Updated::datetime`] —
/// without a second request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Updated {
    raw: String,
}

impl Updated {
    pub(crate) fn new(raw: String) -> Self {
        Self { raw }
    }

    /// The raw server text, e.g. `Updated on 06/05/2025 13:37:00 UTC`.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Consume, returning the raw server text.
    pub fn into_string(self) -> String {
        self.raw
    }

    /// Parse the text into a UTC datetime.
    pub fn datetime(&self) -> Result<DateTime<Utc>, Error> {
        let naive = NaiveDateTime::parse_from_str(self.raw.trim(), UPDATED_FORMAT)
            .map_err(|e| Error::Mapping(format!("unexpected /updated text {:?}: {e}", self.raw)))?;
        Ok(naive.and_utc())
    }
}

impl fmt::Display for Updated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
