use std::sync::Arc;
use std::time::Duration;

use auth::TokenIssuer;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::auth::current_account::current_account;
use super::handlers::auth::login::login;
use super::handlers::auth::refresh_token::refresh_token;
use super::handlers::auth::register::register;
use super::handlers::playlists::add_song::add_song;
use super::handlers::playlists::create_playlist::create_playlist;
use super::handlers::playlists::delete_playlist::delete_playlist;
use super::handlers::playlists::get_playlist::get_playlist;
use super::handlers::playlists::list_playlists::list_playlists;
use super::handlers::playlists::remove_song::remove_song;
use super::handlers::playlists::reorder_songs::reorder_songs;
use super::handlers::playlists::update_playlist::update_playlist;
use super::handlers::songs::create_song::create_song;
use super::handlers::songs::delete_song::delete_song;
use super::handlers::songs::get_song::get_song;
use super::handlers::songs::list_songs::list_songs;
use super::handlers::songs::search_songs::search_songs;
use super::handlers::songs::update_song::update_song;
use super::middleware::authenticate as auth_middleware;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::playlist::ports::PlaylistServicePort;
use crate::domain::song::ports::SongServicePort;

/// Shared state handed to every handler.
///
/// Services are held as trait objects so alternative implementations
/// (e.g. in-memory repositories in the test suite) can be wired in.
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub song_service: Arc<dyn SongServicePort>,
    pub playlist_service: Arc<dyn PlaylistServicePort>,
    pub token_issuer: Arc<TokenIssuer>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    song_service: Arc<dyn SongServicePort>,
    playlist_service: Arc<dyn PlaylistServicePort>,
    token_issuer: Arc<TokenIssuer>,
) -> Router {
    let state = AppState {
        account_service,
        song_service,
        playlist_service,
        token_issuer,
    };

    // Catalog reads are public; search and every mutation require a
    // bearer token.
    let public_routes = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh-token", post(refresh_token))
        .route("/api/songs", get(list_songs))
        .route("/api/songs/:song_id", get(get_song));

    let protected_routes = Router::new()
        .route("/api/auth/user", get(current_account))
        .route("/api/songs/search", get(search_songs))
        .route("/api/songs", post(create_song))
        .route("/api/songs/:song_id", put(update_song))
        .route("/api/songs/:song_id", delete(delete_song))
        .route("/api/playlists", get(list_playlists))
        .route("/api/playlists", post(create_playlist))
        .route("/api/playlists/:playlist_id", get(get_playlist))
        .route("/api/playlists/:playlist_id", put(update_playlist))
        .route("/api/playlists/:playlist_id", delete(delete_playlist))
        .route("/api/playlists/:playlist_id/songs", post(add_song))
        .route("/api/playlists/:playlist_id/songs", put(reorder_songs))
        .route(
            "/api/playlists/:playlist_id/songs/:song_id",
            delete(remove_song),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
