//! Upcoming events handler.

use axum::extract::{Path, State};
use axum::Json;

use congregate_pco::{EventsPage, ListParams};

use crate::error::ApiResult;
use crate::extractors::{parse_group_type_id, EventsQuery};
use crate::router::AppState;

/// `GET /events/grouptype/:group_type_id`
pub async fn upcoming_events_by_group_type(
    State(state): State<AppState>,
    Path(group_type_id): Path<String>,
    query: EventsQuery,
) -> ApiResult<Json<EventsPage>> {
    let group_type_id = parse_group_type_id(&group_type_id)?;

    let page = state
        .pco
        .fetch_upcoming_events(
            &group_type_id,
            query.upcoming,
            ListParams {
                page: query.page,
                passthrough: query.passthrough,
            },
        )
        .await?;

    Ok(Json(page))
}
