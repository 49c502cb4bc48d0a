//! Closed enums for the platforms and media types AnimeAPI knows about,
//! plus the string coercion used at every client entry point.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// An anime cataloguing service with its own ID space.
///
/// The set is fixed by the server's dataset; every variant has a canonical
/// lowercase URL segment returned by [`Platform::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// AniDB
    AniDb,
    /// AniList
    AniList,
    /// Anime-Planet (slug-keyed)
    AnimePlanet,
    /// aniSearch, a German anime database
    AniSearch,
    /// Annict, a Japanese anime database
    Annict,
    /// IMDb, mostly for movies
    Imdb,
    /// Kaize (slug-keyed)
    Kaize,
    /// Kitsu
    Kitsu,
    /// LiveChart, a TV schedule database
    LiveChart,
    /// MyAnimeList
    MyAnimeList,
    /// Nautiljon, a French anime database (slug-keyed)
    Nautiljon,
    /// Notify.moe (base64-keyed)
    NotifyMoe,
    /// Otak Otaku, an Indonesian anime database
    OtakOtaku,
    /// Shikimori, a Russian anime database sharing MAL's ID space
    Shikimori,
    /// Shobocalendar, a Japanese TV schedule database
    Shoboi,
    /// SilverYasha Database Tontonan Indonesia
    SilverYasha,
    /// TheMovieDB
    TheMovieDb,
    /// Trakt
    Trakt,
}

impl Platform {
    /// Every supported platform, in canonical-segment order.
    pub const ALL: [Platform; 18] = [
        Platform::AniDb,
        Platform::AniList,
        Platform::AnimePlanet,
        Platform::AniSearch,
        Platform::Annict,
        Platform::Imdb,
        Platform::Kaize,
        Platform::Kitsu,
        Platform::LiveChart,
        Platform::MyAnimeList,
        Platform::Nautiljon,
        Platform::NotifyMoe,
        Platform::OtakOtaku,
        Platform::Shikimori,
        Platform::Shoboi,
        Platform::SilverYasha,
        Platform::TheMovieDb,
        Platform::Trakt,
    ];

    /// The canonical URL path segment for this platform.
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::AniDb => "anidb",
            Platform::AniList => "anilist",
            Platform::AnimePlanet => "animeplanet",
            Platform::AniSearch => "anisearch",
            Platform::Annict => "annict",
            Platform::Imdb => "imdb",
            Platform::Kaize => "kaize",
            Platform::Kitsu => "kitsu",
            Platform::LiveChart => "livechart",
            Platform::MyAnimeList => "myanimelist",
            Platform::Nautiljon => "nautiljon",
            Platform::NotifyMoe => "notify",
            Platform::OtakOtaku => "otakotaku",
            Platform::Shikimori => "shikimori",
            Platform::Shoboi => "shoboi",
            Platform::SilverYasha => "silveryasha",
            Platform::TheMovieDb => "themoviedb",
            Platform::Trakt => "trakt",
        }
    }

    /// Whether IDs on this platform are not type-unique, so a
    /// [`MediaType`] is required to disambiguate.
    pub fn requires_media_type(self) -> bool {
        matches!(self, Platform::Trakt | Platform::TheMovieDb)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = Error;

    /// Case-insensitive parse accepting the canonical segment and the
    /// common abbreviations (`mal`, `tmdb`, `kt`, ...).
    fn from_str(s: &str) -> Result<Self, Error> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "anidb" | "adb" => Platform::AniDb,
            "anilist" | "al" => Platform::AniList,
            "animeplanet" | "anime-planet" | "anipla" | "ap" => Platform::AnimePlanet,
            "anisearch" | "as" => Platform::AniSearch,
            "annict" => Platform::Annict,
            "imdb" => Platform::Imdb,
            "kaize" | "kz" => Platform::Kaize,
            "kitsu" | "kt" => Platform::Kitsu,
            "livechart" | "lc" => Platform::LiveChart,
            "myanimelist" | "mal" => Platform::MyAnimeList,
            "nautiljon" | "nj" => Platform::Nautiljon,
            "notify" | "notifymoe" | "notify.moe" | "nm" => Platform::NotifyMoe,
            "otakotaku" | "ot" => Platform::OtakOtaku,
            "shikimori" | "sh" => Platform::Shikimori,
            "shoboi" | "syoboi" | "shobocal" | "syobocal" => Platform::Shoboi,
            "silveryasha" | "dbti" => Platform::SilverYasha,
            "themoviedb" | "tmdb" => Platform::TheMovieDb,
            "trakt" => Platform::Trakt,
            _ => return Err(Error::InvalidPlatform(s.to_string())),
        })
    }
}

/// Loosely-typed platform input: either a pre-validated [`Platform`] or a
/// raw string. Every facade method normalizes through this before any I/O,
/// so unknown strings are rejected without a wasted round trip.
pub trait IntoPlatform {
    fn into_platform(self) -> Result<Platform, Error>;
}

impl IntoPlatform for Platform {
    fn into_platform(self) -> Result<Platform, Error> {
        Ok(self)
    }
}

impl IntoPlatform for &Platform {
    fn into_platform(self) -> Result<Platform, Error> {
        Ok(*self)
    }
}

impl IntoPlatform for &str {
    fn into_platform(self) -> Result<Platform, Error> {
        self.parse()
    }
}

impl IntoPlatform for String {
    fn into_platform(self) -> Result<Platform, Error> {
        self.parse()
    }
}

impl IntoPlatform for &String {
    fn into_platform(self) -> Result<Platform, Error> {
        self.parse()
    }
}

/// Media type disambiguating movie vs. show on platforms with shared ID
/// spaces. `Shows`/`Movies` are Trakt's segment forms, `Movie`/`Tv` are
/// TheMovieDB's; validity is checked per platform at request build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Shows,
    Movies,
    Movie,
    Tv,
}

impl MediaType {
    /// The URL path segment for this media type.
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Shows => "shows",
            MediaType::Movies => "movies",
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }

    /// Check that this media type applies to `platform`.
    pub(crate) fn validate_for(self, platform: Platform) -> Result<(), Error> {
        let valid = match platform {
            Platform::Trakt => matches!(self, MediaType::Shows | MediaType::Movies),
            Platform::TheMovieDb => matches!(self, MediaType::Movie | MediaType::Tv),
            _ => false,
        };
        if valid {
            Ok(())
        } else {
            Err(Error::UnsupportedMediaType {
                platform,
                media_type: self,
            })
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "shows" | "show" => MediaType::Shows,
            "movies" => MediaType::Movies,
            "movie" => MediaType::Movie,
            "tv" => MediaType::Tv,
            _ => return Err(Error::InvalidMediaType(s.to_string())),
        })
    }
}
