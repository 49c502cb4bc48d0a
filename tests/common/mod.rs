//! In-process AnimeAPI stand-in serving canned payloads, plus helpers to
//! run it on a random port for the async and blocking clients.
#![allow(dead_code)]

use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

pub const RELATION_MAL_1: &str = r#"{
    "title": "Cowboy Bebop",
    "anidb": 23,
    "anilist": 1,
    "animeplanet": "cowboy-bebop",
    "anisearch": 19,
    "annict": 360,
    "imdb": null,
    "kitsu": 1,
    "livechart": 3418,
    "myanimelist": 1,
    "notify": "Tk3ccKimg",
    "shikimori": 1,
    "shoboi": 538,
    "trakt": 30857,
    "trakt_season": 1,
    "trakt_type": "shows"
}"#;

pub const RELATION_KITSU_244: &str = r#"{
    "title": "Bleach",
    "kitsu": 244,
    "myanimelist": 269,
    "anilist": 269
}"#;

pub const RELATION_KITSU_245: &str = r#"{
    "title": "Death Note",
    "kitsu": 245,
    "myanimelist": 1535,
    "anilist": 1535
}"#;

pub const STATUS_JSON: &str = r#"{
    "mainrepo": "https://github.com/nattadasu/animeApi",
    "updated": {"timestamp": 1749130620, "iso": "2025-06-05T13:37:00+00:00"},
    "contributors": ["nattadasu"],
    "sources": ["manami-project/anime-offline-database", "kawaiioverflow/arm"],
    "license": "AGPL-3.0",
    "website": "https://animeapi.my.id",
    "counts": {"total": 3, "myanimelist": 3, "kitsu": 2},
    "endpoints": {"status": "/status", "heartbeat": "/heartbeat"}
}"#;

pub const HEARTBEAT_JSON: &str = r#"{
    "status": "OK",
    "code": 200,
    "response_time": "0.002 s",
    "request_time": "05/06/2025 13:37:00",
    "request_epoch": 1749130620.25
}"#;

pub const UPDATED_TEXT: &str = "Updated on 06/05/2025 13:37:00 UTC";

fn kitsu_dict() -> String {
    format!(r#"{{"244": {RELATION_KITSU_244}, "245": {RELATION_KITSU_245}}}"#)
}

fn kitsu_list() -> String {
    format!("[{RELATION_KITSU_244}, {RELATION_KITSU_245}]")
}

fn full_index() -> String {
    format!("[{RELATION_MAL_1}, {RELATION_KITSU_244}, {RELATION_KITSU_245}]")
}

/// A healthy server: every endpoint answers with a canned payload.
/// Unrouted paths get axum's default 404.
pub fn app() -> Router {
    Router::new()
        .route("/myanimelist/1", get(|| async { RELATION_MAL_1 }))
        // Malformed on purpose: the required `title` field is missing.
        .route("/myanimelist/2", get(|| async { r#"{"myanimelist": 2}"# }))
        .route("/kitsu", get(|| async { kitsu_dict() }))
        .route("/kitsu()", get(|| async { kitsu_list() }))
        .route("/animeapi", get(|| async { full_index() }))
        .route("/status", get(|| async { STATUS_JSON }))
        .route("/heartbeat", get(|| async { HEARTBEAT_JSON }))
        .route("/updated", get(|| async { UPDATED_TEXT }))
}

/// A misbehaving server: 5xx on `/status`, truncated JSON on `/heartbeat`.
pub fn degraded_app() -> Router {
    Router::new()
        .route(
            "/status",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database exploded") }),
        )
        .route("/heartbeat", get(|| async { r#"{"status": "OK"}"# }))
}

/// Serve `router` on a random local port from the ambient tokio runtime.
pub async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("mock server addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock server");
    });
    addr
}

/// Serve `router` on a random local port from a background thread, for
/// tests that drive the blocking client without a runtime of their own.
pub fn serve_blocking(router: Router) -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind mock server");
    let addr = std_listener.local_addr().expect("mock server addr");
    std_listener.set_nonblocking(true).expect("nonblocking listener");

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("mock server runtime");
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener)
                .expect("adopt mock server listener");
            axum::serve(listener, router).await
        })
        .expect("mock server");
    });

    addr
}

pub fn base_url(addr: SocketAddr) -> url::Url {
    url::Url::parse(&format!("http://{addr}")).expect("mock base URL")
}
