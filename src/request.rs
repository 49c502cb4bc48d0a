//! The pure request-building and response-interpretation core.
//!
//! Both calling conventions delegate here: paths, validation rules and
//! status handling live in one place so the blocking and async facades
//! cannot drift apart. Nothing in this module performs I/O.

use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::error::Error;
use crate::platform::{MediaType, Platform};

/// Public V3 deployment of AnimeAPI.
pub const DEFAULT_BASE_URL: &str = "https://animeapi.my.id";

/// Default request timeout, matching the upstream client.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(100);

/// Kitsu's public API, used only to resolve slugs to numeric IDs.
pub(crate) const KITSU_SLUG_URL: &str = "https://kitsu.io/api/edge/anime";

/// A title identifier on some platform: numeric for most platforms, a
/// slug for the slug-keyed ones (Anime-Planet, Kaize, Nautiljon, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleId {
    Numeric(u64),
    Slug(String),
}

impl TitleId {
    /// Whether the ID is numeric, either by type or by content.
    pub fn is_numeric(&self) -> bool {
        match self {
            TitleId::Numeric(_) => true,
            TitleId::Slug(s) => !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()),
        }
    }

    fn segment(&self) -> String {
        match self {
            TitleId::Numeric(n) => n.to_string(),
            TitleId::Slug(s) => s.clone(),
        }
    }
}

impl From<u64> for TitleId {
    fn from(id: u64) -> Self {
        TitleId::Numeric(id)
    }
}

impl From<u32> for TitleId {
    fn from(id: u32) -> Self {
        TitleId::Numeric(id.into())
    }
}

impl From<i64> for TitleId {
    fn from(id: i64) -> Self {
        match u64::try_from(id) {
            Ok(n) => TitleId::Numeric(n),
            // Negative IDs never match anything; let the server say 404.
            Err(_) => TitleId::Slug(id.to_string()),
        }
    }
}

impl From<i32> for TitleId {
    fn from(id: i32) -> Self {
        i64::from(id).into()
    }
}

impl From<&str> for TitleId {
    fn from(id: &str) -> Self {
        TitleId::Slug(id.to_string())
    }
}

impl From<String> for TitleId {
    fn from(id: String) -> Self {
        TitleId::Slug(id)
    }
}

impl fmt::Display for TitleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TitleId::Numeric(n) => write!(f, "{n}"),
            TitleId::Slug(s) => f.write_str(s),
        }
    }
}

/// Join percent-encoded path segments onto a copy of `base`.
fn join(base: &Url, segments: &[&str]) -> Result<Url, Error> {
    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| Error::Usage("base URL cannot be used as a base (no path)"))?;
        path.pop_if_empty();
        for segment in segments {
            path.push(segment);
        }
    }
    Ok(url)
}

/// Build the single-relation URL `/<platform>/<id>[...]`, applying the
/// platform-specific rules:
///
/// - Trakt and TheMovieDB require a media type segment before the ID and
///   take an optional season suffix (`/seasons/<n>` resp. `/season/<n>`,
///   shows/tv only). Season 0 is not indexed for Trakt.
/// - Shikimori IDs arrive with a letter prefix in the wild (`z218`); any
///   non-digit characters are stripped.
pub(crate) fn relation_url(
    base: &Url,
    id: &TitleId,
    platform: Platform,
    media_type: Option<MediaType>,
    season: Option<u32>,
) -> Result<Url, Error> {
    if let Some(media_type) = media_type {
        media_type.validate_for(platform)?;
    } else if platform.requires_media_type() {
        return Err(Error::MediaTypeRequired(platform));
    }

    match platform {
        Platform::Trakt => {
            if season == Some(0) {
                return Err(Error::InvalidSeason(0));
            }
            let media_type = media_type.unwrap_or(MediaType::Shows);
            let id = id.segment();
            let season = match (season, media_type) {
                (Some(n), MediaType::Shows) => Some(n.to_string()),
                _ => None,
            };
            let mut segments = vec![platform.as_str(), media_type.as_str(), id.as_str()];
            if let Some(ref n) = season {
                segments.push("seasons");
                segments.push(n);
            }
            join(base, &segments)
        }
        Platform::TheMovieDb => {
            let media_type = media_type.unwrap_or(MediaType::Movie);
            let id = id.segment();
            let season = match (season, media_type) {
                (Some(n), MediaType::Tv) => Some(n.to_string()),
                _ => None,
            };
            let mut segments = vec![platform.as_str(), media_type.as_str(), id.as_str()];
            if let Some(ref n) = season {
                segments.push("season");
                segments.push(n);
            }
            join(base, &segments)
        }
        Platform::Shikimori => {
            let digits: String = id
                .segment()
                .chars()
                .filter(|c| c.is_ascii_digit())
                .collect();
            join(base, &[platform.as_str(), &digits])
        }
        _ => {
            let id = id.segment();
            join(base, &[platform.as_str(), &id])
        }
    }
}

/// `/<platform>` — all relations for a platform, keyed by ID.
pub(crate) fn dict_url(base: &Url, platform: Platform) -> Result<Url, Error> {
    join(base, &[platform.as_str()])
}

/// `/<platform>()` — all relations for a platform, in server order.
pub(crate) fn list_url(base: &Url, platform: Platform) -> Result<Url, Error> {
    let segment = format!("{}()", platform.as_str());
    join(base, &[&segment])
}

/// `/animeapi` — the full index across all platforms.
pub(crate) fn index_url(base: &Url) -> Result<Url, Error> {
    join(base, &["animeapi"])
}

pub(crate) fn status_url(base: &Url) -> Result<Url, Error> {
    join(base, &["status"])
}

pub(crate) fn heartbeat_url(base: &Url) -> Result<Url, Error> {
    join(base, &["heartbeat"])
}

pub(crate) fn updated_url(base: &Url) -> Result<Url, Error> {
    join(base, &["updated"])
}

/// Map a response status to the error taxonomy: 404 is [`Error::NotFound`]
/// (the ID/platform has no relation), anything else non-2xx is
/// [`Error::Server`].
pub(crate) fn check_status(status: u16, body: &str, url: &Url) -> Result<(), Error> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    tracing::warn!(status, %url, "AnimeAPI returned an error status");
    if status == 404 {
        Err(Error::NotFound {
            url: url.to_string(),
        })
    } else {
        Err(Error::Server {
            status,
            message: body.to_string(),
        })
    }
}

/// Decode a JSON body, mapping serde failures to [`Error::Mapping`].
pub(crate) fn decode_json<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| Error::Mapping(e.to_string()))
}

/// Shape of Kitsu's slug-filter response; only the ID is of interest.
#[derive(Debug, Deserialize)]
pub(crate) struct KitsuSlugResponse {
    pub(crate) data: Vec<KitsuSlugEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct KitsuSlugEntry {
    pub(crate) id: String,
}

/// Extract the numeric ID from a slug-filter response, mapping an empty
/// match list to [`Error::NotFound`].
pub(crate) fn kitsu_id_from_slug_response(body: &str, slug: &str) -> Result<u64, Error> {
    let parsed: KitsuSlugResponse = decode_json(body)?;
    let entry = parsed.data.first().ok_or_else(|| Error::NotFound {
        url: format!("{KITSU_SLUG_URL}?filter[slug]={slug}"),
    })?;
    entry
        .id
        .parse()
        .map_err(|_| Error::Mapping(format!("Kitsu returned a non-numeric ID: {:?}", entry.id)))
}
