use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::SongPageData;
use crate::domain::song::models::SongPageQuery;
use crate::domain::song::models::SongSortField;
use crate::domain::song::models::SortDirection;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_songs(
    State(state): State<AppState>,
    Query(params): Query<ListSongsParams>,
) -> Result<ApiSuccess<SongPageData>, ApiError> {
    state
        .song_service
        .list_songs(params.into_query())
        .await
        .map_err(ApiError::from)
        .map(|ref page| ApiSuccess::new(StatusCode::OK, page.into()))
}

/// Raw query string of the listing endpoint.
///
/// Every parameter is optional and parsed leniently: a value that does
/// not parse, or a non-positive number, falls back to its default
/// rather than failing the request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSongsParams {
    page: Option<String>,
    limit: Option<String>,
    search: Option<String>,
    sort_by: Option<String>,
    sort_order: Option<String>,
}

impl ListSongsParams {
    fn into_query(self) -> SongPageQuery {
        SongPageQuery {
            page: parse_positive(self.page.as_deref()).unwrap_or(SongPageQuery::DEFAULT_PAGE),
            page_size: parse_positive(self.limit.as_deref())
                .unwrap_or(SongPageQuery::DEFAULT_PAGE_SIZE),
            search: self
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            sort_field: self
                .sort_by
                .as_deref()
                .map(SongSortField::parse_or_default)
                .unwrap_or(SongSortField::Title),
            sort_direction: self
                .sort_order
                .as_deref()
                .map(SortDirection::parse_or_default)
                .unwrap_or(SortDirection::Ascending),
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|s| s.trim().parse::<u32>().ok()).filter(|n| *n > 0)
}
