//! Async client against the in-process mock server: every endpoint, the
//! full error taxonomy, and the session scope rules.

mod common;

use std::collections::HashSet;

use animeapi::{AnimeApi, Error, MediaType, Platform};

async fn open_client() -> AnimeApi {
    let addr = common::serve(common::app()).await;
    let mut api = AnimeApi::with_base_url(common::base_url(addr));
    api.open().expect("open session");
    api
}

#[tokio::test]
async fn fetches_single_relation() {
    let api = open_client().await;

    let relation = api
        .get_anime_relations(1, Platform::MyAnimeList, None, None)
        .await
        .unwrap();

    assert_eq!(relation.title, "Cowboy Bebop");
    assert_eq!(relation.myanimelist, Some(1));
    assert_eq!(relation.trakt_type, Some(MediaType::Shows));
    // Platforms without a mapping come back empty, not as errors.
    assert_eq!(relation.imdb, None);
    assert_eq!(relation.themoviedb, None);
    assert_eq!(relation.kaize, None);
}

#[tokio::test]
async fn platform_strings_and_enums_are_interchangeable() {
    let api = open_client().await;

    let by_enum = api
        .get_anime_relations(1, Platform::MyAnimeList, None, None)
        .await
        .unwrap();
    let by_alias = api.get_anime_relations(1, "MAL", None, None).await.unwrap();

    assert_eq!(by_enum, by_alias);
}

#[tokio::test]
async fn dict_and_list_hold_the_same_relations() {
    let api = open_client().await;

    let dict = api.get_dict_anime_relations(Platform::Kitsu).await.unwrap();
    let list = api.get_list_anime_relations(Platform::Kitsu).await.unwrap();

    assert_eq!(dict.len(), list.len());
    let dict_titles: HashSet<&str> = dict.values().map(|r| r.title.as_str()).collect();
    let list_titles: HashSet<&str> = list.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(dict_titles, list_titles);

    // The dict form is keyed by the platform's own ID.
    assert_eq!(dict["244"].title, "Bleach");
    assert_eq!(dict["244"].kitsu, Some(244));
}

#[tokio::test]
async fn full_index_covers_all_platforms() {
    let api = open_client().await;

    let index = api.get_list_index().await.unwrap();

    assert_eq!(index.len(), 3);
    assert_eq!(index[0].title, "Cowboy Bebop");
}

#[tokio::test]
async fn status_snapshot() {
    let api = open_client().await;

    let status = api.get_status().await.unwrap();

    assert_eq!(status.license, "AGPL-3.0");
    assert_eq!(status.counts.total, 3);
    assert_eq!(status.counts.kitsu, Some(2));
    assert_eq!(status.counts.trakt, None);
    assert_eq!(status.updated.timestamp, 1749130620);
}

#[tokio::test]
async fn heartbeat_snapshot() {
    let api = open_client().await;

    let heartbeat = api.get_heartbeat().await.unwrap();

    assert_eq!(heartbeat.status, "OK");
    assert_eq!(heartbeat.code, 200);
    assert_eq!(heartbeat.datetime().unwrap().timestamp(), 1749130620);
}

#[tokio::test]
async fn updated_views_denote_the_same_instant() {
    let api = open_client().await;

    let updated = api.get_updated_time().await.unwrap();

    assert_eq!(updated.as_str(), common::UPDATED_TEXT);
    let parsed = updated.datetime().unwrap();
    assert_eq!(parsed.to_rfc3339(), "2025-06-05T13:37:00+00:00");
}

#[tokio::test]
async fn missing_relation_is_not_found() {
    let api = open_client().await;

    let err = api
        .get_anime_relations(999_999_999u64, Platform::MyAnimeList, None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }), "got {err:?}");
}

#[tokio::test]
async fn server_failure_is_a_server_error() {
    let addr = common::serve(common::degraded_app()).await;
    let mut api = AnimeApi::with_base_url(common::base_url(addr));
    api.open().unwrap();

    let err = api.get_status().await.unwrap_err();
    assert!(
        matches!(err, Error::Server { status: 500, .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn malformed_body_is_a_mapping_error() {
    let addr = common::serve(common::degraded_app()).await;
    let mut api = AnimeApi::with_base_url(common::base_url(addr));
    api.open().unwrap();

    // /heartbeat answers 200 with required fields missing.
    let err = api.get_heartbeat().await.unwrap_err();
    assert!(matches!(err, Error::Mapping(_)), "got {err:?}");
}

#[tokio::test]
async fn missing_required_field_in_relation_is_a_mapping_error() {
    let api = open_client().await;

    let err = api
        .get_anime_relations(2, Platform::MyAnimeList, None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Mapping(_)), "got {err:?}");
}

#[tokio::test]
async fn calls_outside_a_session_are_usage_errors() {
    // No open(): no connection pool exists, so no network attempt can
    // have been made.
    let api = AnimeApi::new();

    let err = api.get_status().await.unwrap_err();
    assert!(matches!(err, Error::Usage(_)), "got {err:?}");

    let err = api
        .get_anime_relations(1, Platform::MyAnimeList, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Usage(_)), "got {err:?}");
}

#[tokio::test]
async fn session_reopens_after_close() {
    let addr = common::serve(common::app()).await;
    let mut api = AnimeApi::with_base_url(common::base_url(addr));

    api.open().unwrap();
    assert!(api.is_open());
    api.get_status().await.unwrap();

    api.close();
    assert!(!api.is_open());
    assert!(matches!(
        api.get_status().await.unwrap_err(),
        Error::Usage(_)
    ));

    api.open().unwrap();
    api.get_status().await.unwrap();
}

#[tokio::test]
async fn invalid_platform_is_rejected_before_any_network_use() {
    // An unopened client has no transport at all; getting
    // InvalidPlatform (not Usage) proves validation came first.
    let api = AnimeApi::new();

    let err = api.get_dict_anime_relations("paramount").await.unwrap_err();
    assert!(
        matches!(err, Error::InvalidPlatform(ref s) if s == "paramount"),
        "got {err:?}"
    );
}

#[tokio::test]
async fn ambiguous_platforms_require_a_media_type() {
    let api = AnimeApi::new();

    let err = api
        .get_anime_relations(152334u64, Platform::Trakt, None, None)
        .await
        .unwrap_err();
    assert!(
        matches!(err, Error::MediaTypeRequired(Platform::Trakt)),
        "got {err:?}"
    );

    let err = api
        .get_anime_relations(9336u64, Platform::TheMovieDb, Some(MediaType::Shows), None)
        .await
        .unwrap_err();
    assert!(
        matches!(err, Error::UnsupportedMediaType { .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn one_open_client_is_shareable_across_tasks() {
    let addr = common::serve(common::app()).await;
    let mut api = AnimeApi::with_base_url(common::base_url(addr));
    api.open().unwrap();
    let api = std::sync::Arc::new(api);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let api = api.clone();
        handles.push(tokio::spawn(async move {
            api.get_anime_relations(1, Platform::MyAnimeList, None, None)
                .await
                .unwrap()
        }));
    }
    for handle in handles {
        let relation = handle.await.unwrap();
        assert_eq!(relation.myanimelist, Some(1));
    }
}
