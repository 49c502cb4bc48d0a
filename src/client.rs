//! Async AnimeAPI client.

use std::collections::HashMap;

use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::error::Error;
use crate::models::{AnimeRelation, ApiStatus, Heartbeat, Updated};
use crate::platform::{IntoPlatform, MediaType, Platform};
use crate::request::{self, TitleId};

/// Async client for AnimeAPI.
///
/// Construction is cheap and performs no I/O; [`AnimeApi::open`] acquires
/// the connection pool that is reused across calls, [`AnimeApi::close`]
/// releases it. Endpoint methods called outside an open session fail with
/// [`Error::Usage`] before any network attempt. Methods take `&self` and
/// hold no per-call state, so one open client can be shared freely across
/// concurrent tasks.
///
/// ```no_run
/// use animeapi::{AnimeApi, Platform};
///
/// # async fn run() -> Result<(), animeapi::Error> {
/// let mut api = AnimeApi::new();
/// api.open()?;
/// let relation = api
///     .get_anime_relations(1, Platform::MyAnimeList, None, None)
///     .await?;
/// assert_eq!(relation.myanimelist, Some(1));
/// api.close();
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AnimeApi {
    base_url: Url,
    timeout: Duration,
    headers: HeaderMap,
    http: Option<Client>,
}

impl AnimeApi {
    /// Client against the public deployment, with the default timeout.
    pub fn new() -> Self {
        let base_url = Url::parse(request::DEFAULT_BASE_URL).expect("default base URL is valid");
        Self::with_base_url(base_url)
    }

    /// Client against a custom deployment of the API.
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: request::DEFAULT_TIMEOUT,
            headers: HeaderMap::new(),
            http: None,
        }
    }

    /// Set the per-request timeout. Takes effect on the next [`open`].
    ///
    /// [`open`]: AnimeApi::open
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set extra headers sent with every request. Takes effect on the
    /// next [`open`].
    ///
    /// [`open`]: AnimeApi::open
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Open the session: build the connection pool reused by every call.
    /// Idempotent while open.
    pub fn open(&mut self) -> Result<(), Error> {
        if self.http.is_none() {
            let client = Client::builder()
                .timeout(self.timeout)
                .default_headers(self.headers.clone())
                .build()?;
            self.http = Some(client);
        }
        Ok(())
    }

    /// Close the session, dropping the connection pool. Further calls
    /// fail with [`Error::Usage`] until reopened.
    pub fn close(&mut self) {
        self.http = None;
    }

    /// Whether a session is currently open.
    pub fn is_open(&self) -> bool {
        self.http.is_some()
    }

    fn session(&self) -> Result<&Client, Error> {
        self.http
            .as_ref()
            .ok_or(Error::Usage("session is not open; call open() first"))
    }

    async fn get_body(&self, url: Url) -> Result<String, Error> {
        let http = self.session()?;
        tracing::debug!(%url, "GET");
        let resp = http.get(url.clone()).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        request::check_status(status, &body, &url)?;
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        let body = self.get_body(url).await?;
        request::decode_json(&body)
    }

    /// Resolve a Kitsu slug to its numeric ID via Kitsu's own API.
    async fn resolve_kitsu_slug(&self, slug: &str) -> Result<u64, Error> {
        let http = self.session()?;
        tracing::debug!(slug, "resolving Kitsu slug");
        let resp = http
            .get(request::KITSU_SLUG_URL)
            .query(&[("filter[slug]", slug)])
            .send()
            .await?;
        let status = resp.status().as_u16();
        let url = resp.url().clone();
        let body = resp.text().await?;
        request::check_status(status, &body, &url)?;
        request::kitsu_id_from_slug_response(&body, slug)
    }

    /// Get the cross-platform relations for one title.
    ///
    /// `media_type` is required for Trakt and TheMovieDB, whose IDs are
    /// not type-unique; `season` narrows Trakt shows (`/seasons/<n>`) and
    /// TheMovieDB tv (`/season/<n>`). A Kitsu slug is first resolved to
    /// its numeric ID through Kitsu's API.
    pub async fn get_anime_relations(
        &self,
        id: impl Into<TitleId>,
        platform: impl IntoPlatform,
        media_type: Option<MediaType>,
        season: Option<u32>,
    ) -> Result<AnimeRelation, Error> {
        let platform = platform.into_platform()?;
        let id = id.into();
        // Validates platform rules before the session is touched.
        let mut url = request::relation_url(&self.base_url, &id, platform, media_type, season)?;

        if platform == Platform::Kitsu && !id.is_numeric() {
            let resolved = self.resolve_kitsu_slug(&id.to_string()).await?;
            url = request::relation_url(
                &self.base_url,
                &TitleId::Numeric(resolved),
                platform,
                media_type,
                season,
            )?;
        }

        self.get_json(url).await
    }

    /// Get every relation on a platform, keyed by that platform's ID.
    pub async fn get_dict_anime_relations(
        &self,
        platform: impl IntoPlatform,
    ) -> Result<HashMap<String, AnimeRelation>, Error> {
        let platform = platform.into_platform()?;
        let url = request::dict_url(&self.base_url, platform)?;
        self.get_json(url).await
    }

    /// Get every relation on a platform as a list, in server order.
    pub async fn get_list_anime_relations(
        &self,
        platform: impl IntoPlatform,
    ) -> Result<Vec<AnimeRelation>, Error> {
        let platform = platform.into_platform()?;
        let url = request::list_url(&self.base_url, platform)?;
        self.get_json(url).await
    }

    /// Get the full index of known titles across all platforms.
    pub async fn get_list_index(&self) -> Result<Vec<AnimeRelation>, Error> {
        let url = request::index_url(&self.base_url)?;
        self.get_json(url).await
    }

    /// Get the server's status snapshot: dataset provenance and counts.
    pub async fn get_status(&self) -> Result<ApiStatus, Error> {
        let url = request::status_url(&self.base_url)?;
        self.get_json(url).await
    }

    /// Get the server's liveness snapshot.
    pub async fn get_heartbeat(&self) -> Result<Heartbeat, Error> {
        let url = request::heartbeat_url(&self.base_url)?;
        self.get_json(url).await
    }

    /// Get the dataset's last-refresh time. The returned [`Updated`]
    /// exposes both the raw server text and a parsed datetime, from one
    /// request.
    pub async fn get_updated_time(&self) -> Result<Updated, Error> {
        let url = request::updated_url(&self.base_url)?;
        let body = self.get_body(url).await?;
        Ok(Updated::new(body))
    }
}

impl Default for AnimeApi {
    fn default() -> Self {
        Self::new()
    }
}
