use thiserror::Error;

use crate::platform::{MediaType, Platform};

/// Errors surfaced by the AnimeAPI clients.
///
/// Validation variants (`InvalidPlatform`, `InvalidMediaType`,
/// `UnsupportedMediaType`, `MediaTypeRequired`, `InvalidSeason`) are raised
/// client-side before any request is made. The remaining variants map
/// directly to transport and response outcomes; nothing is retried or
/// papered over, callers decide policy.
#[derive(Debug, Error)]
pub enum Error {
    /// The given string does not name a supported platform.
    #[error("unknown platform: {0:?}")]
    InvalidPlatform(String),

    /// The given string does not name a known media type.
    #[error("unknown media type: {0:?}")]
    InvalidMediaType(String),

    /// The media type exists but does not apply to this platform
    /// (e.g. `tv` on Trakt).
    #[error("media type {media_type} is not valid for {platform}")]
    UnsupportedMediaType {
        platform: Platform,
        media_type: MediaType,
    },

    /// The platform has type-ambiguous IDs and needs a media type to
    /// disambiguate (Trakt, TheMovieDB).
    #[error("{0} requires a media type")]
    MediaTypeRequired(Platform),

    /// The server does not index season 0 (specials) for Trakt shows.
    #[error("season {0} is not supported for Trakt shows")]
    InvalidSeason(u32),

    /// HTTP 404: no relation exists for the given ID on that platform.
    #[error("no relation found at {url}")]
    NotFound { url: String },

    /// HTTP 5xx (or any other unexpected status) from the server.
    #[error("server error (status {status}): {message}")]
    Server { status: u16, message: String },

    /// Network-level failure: DNS, timeout, connection reset.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body did not match the expected record shape.
    #[error("mapping error: {0}")]
    Mapping(String),

    /// The client was used outside an open session.
    #[error("usage error: {0}")]
    Usage(&'static str),
}
