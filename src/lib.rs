//! Typed Rust client for [AnimeAPI], the service mapping anime IDs
//! between cataloguing platforms (MyAnimeList, AniList, Kitsu, Trakt,
//! TheMovieDB and friends).
//!
//! The crate is a thin binding: it builds GET requests against the fixed
//! endpoint set, validates parameters client-side (platform and media
//! type coercion, Trakt/TMDB disambiguation) and deserializes the JSON
//! responses into typed records. The mapping itself is entirely
//! server-side. There is no caching, no retrying and no authentication —
//! transport failures surface unchanged and callers pick their own
//! policy by matching on [`Error`].
//!
//! Two calling conventions share one request-building and mapping core:
//! [`AnimeApi`] (async, explicit [`open`](AnimeApi::open)/
//! [`close`](AnimeApi::close) session scope) and
//! [`blocking::AnimeApi`] (pool acquired at construction). Identical
//! inputs produce identical outcomes on both.
//!
//! ```no_run
//! use animeapi::{AnimeApi, MediaType, Platform};
//!
//! # async fn run() -> Result<(), animeapi::Error> {
//! let mut api = AnimeApi::new();
//! api.open()?;
//!
//! // Strings and enums are interchangeable for the platform argument.
//! let frieren = api.get_anime_relations(52991, "mal", None, None).await?;
//! println!("{:?} is {:?} on AniList", frieren.title, frieren.anilist);
//!
//! let by_trakt = api
//!     .get_anime_relations(152334, Platform::Trakt, Some(MediaType::Shows), Some(1))
//!     .await?;
//! println!("{}", by_trakt.title);
//!
//! api.close();
//! # Ok(())
//! # }
//! ```
//!
//! [AnimeAPI]: https://animeapi.my.id

pub mod blocking;
mod client;
mod error;
mod models;
mod platform;
mod request;

pub use client::AnimeApi;
pub use error::Error;
pub use models::{AnimeRelation, ApiStatus, Heartbeat, PlatformCounts, Updated, UpdatedStruct};
pub use platform::{IntoPlatform, MediaType, Platform};
pub use request::{TitleId, DEFAULT_BASE_URL};
