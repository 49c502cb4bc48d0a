//! Blocking AnimeAPI client.
//!
//! Same surface and outcomes as [`crate::AnimeApi`], executed entirely on
//! the caller's thread over `reqwest::blocking`. The connection pool is
//! acquired at construction (construction is session entry) and released
//! on drop, so there is no separate open/close step and no usage error to
//! hit.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::Error;
use crate::models::{AnimeRelation, ApiStatus, Heartbeat, Updated};
use crate::platform::{IntoPlatform, MediaType, Platform};
use crate::request::{self, TitleId};

/// Blocking client for AnimeAPI.
///
/// ```no_run
/// use animeapi::blocking::AnimeApi;
/// use animeapi::Platform;
///
/// # fn run() -> Result<(), animeapi::Error> {
/// let api = AnimeApi::new()?;
/// let relation = api.get_anime_relations(1, Platform::MyAnimeList, None, None)?;
/// assert_eq!(relation.myanimelist, Some(1));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AnimeApi {
    base_url: Url,
    http: Client,
}

/// Configuration for a blocking [`AnimeApi`].
#[derive(Debug, Clone)]
pub struct Builder {
    base_url: Url,
    timeout: Duration,
    headers: HeaderMap,
}

impl Builder {
    /// Point the client at a custom deployment of the API.
    pub fn base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set extra headers sent with every request.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Build the client, acquiring its connection pool.
    pub fn build(self) -> Result<AnimeApi, Error> {
        let http = Client::builder()
            .timeout(self.timeout)
            .default_headers(self.headers)
            .build()?;
        Ok(AnimeApi {
            base_url: self.base_url,
            http,
        })
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            base_url: Url::parse(request::DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: request::DEFAULT_TIMEOUT,
            headers: HeaderMap::new(),
        }
    }
}

impl AnimeApi {
    /// Client against the public deployment, with the default timeout.
    pub fn new() -> Result<Self, Error> {
        Builder::default().build()
    }

    /// Start configuring a client.
    pub fn builder() -> Builder {
        Builder::default()
    }

    fn get_body(&self, url: Url) -> Result<String, Error> {
        tracing::debug!(%url, "GET");
        let resp = self.http.get(url.clone()).send()?;
        let status = resp.status().as_u16();
        let body = resp.text()?;
        request::check_status(status, &body, &url)?;
        Ok(body)
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        let body = self.get_body(url)?;
        request::decode_json(&body)
    }

    fn resolve_kitsu_slug(&self, slug: &str) -> Result<u64, Error> {
        tracing::debug!(slug, "resolving Kitsu slug");
        let resp = self
            .http
            .get(request::KITSU_SLUG_URL)
            .query(&[("filter[slug]", slug)])
            .send()?;
        let status = resp.status().as_u16();
        let url = resp.url().clone();
        let body = resp.text()?;
        request::check_status(status, &body, &url)?;
        request::kitsu_id_from_slug_response(&body, slug)
    }

    /// Get the cross-platform relations for one title.
    ///
    /// See [`crate::AnimeApi::get_anime_relations`] for the parameter
    /// rules; outcomes are identical.
    pub fn get_anime_relations(
        &self,
        id: impl Into<TitleId>,
        platform: impl IntoPlatform,
        media_type: Option<MediaType>,
        season: Option<u32>,
    ) -> Result<AnimeRelation, Error> {
        let platform = platform.into_platform()?;
        let id = id.into();
        let mut url = request::relation_url(&self.base_url, &id, platform, media_type, season)?;

        if platform == Platform::Kitsu && !id.is_numeric() {
            let resolved = self.resolve_kitsu_slug(&id.to_string())?;
            url = request::relation_url(
                &self.base_url,
                &TitleId::Numeric(resolved),
                platform,
                media_type,
                season,
            )?;
        }

        self.get_json(url)
    }

    /// Get every relation on a platform, keyed by that platform's ID.
    pub fn get_dict_anime_relations(
        &self,
        platform: impl IntoPlatform,
    ) -> Result<HashMap<String, AnimeRelation>, Error> {
        let platform = platform.into_platform()?;
        let url = request::dict_url(&self.base_url, platform)?;
        self.get_json(url)
    }

    /// Get every relation on a platform as a list, in server order.
    pub fn get_list_anime_relations(
        &self,
        platform: impl IntoPlatform,
    ) -> Result<Vec<AnimeRelation>, Error> {
        let platform = platform.into_platform()?;
        let url = request::list_url(&self.base_url, platform)?;
        self.get_json(url)
    }

    /// Get the full index of known titles across all platforms.
    pub fn get_list_index(&self) -> Result<Vec<AnimeRelation>, Error> {
        let url = request::index_url(&self.base_url)?;
        self.get_json(url)
    }

    /// Get the server's status snapshot: dataset provenance and counts.
    pub fn get_status(&self) -> Result<ApiStatus, Error> {
        let url = request::status_url(&self.base_url)?;
        self.get_json(url)
    }

    /// Get the server's liveness snapshot.
    pub fn get_heartbeat(&self) -> Result<Heartbeat, Error> {
        let url = request::heartbeat_url(&self.base_url)?;
        self.get_json(url)
    }

    /// Get the dataset's last-refresh time, with raw and parsed views.
    pub fn get_updated_time(&self) -> Result<Updated, Error> {
        let url = request::updated_url(&self.base_url)?;
        let body = self.get_body(url)?;
        Ok(Updated::new(body))
    }
}
