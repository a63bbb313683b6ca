use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::SongData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn search_songs(
    State(state): State<AppState>,
    Query(params): Query<SearchSongsParams>,
) -> Result<ApiSuccess<Vec<SongData>>, ApiError> {
    let text = params
        .query
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Search query is required".to_string()))?;

    state
        .song_service
        .search_songs(text)
        .await
        .map_err(ApiError::from)
        .map(|songs| {
            ApiSuccess::new(
                StatusCode::OK,
                songs.iter().map(SongData::from).collect(),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchSongsParams {
    query: Option<String>,
}
