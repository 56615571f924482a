//! Group listing handlers.

use axum::extract::{Path, State};
use axum::Json;

use congregate_pco::{GroupsPage, ListParams};

use crate::error::ApiResult;
use crate::extractors::{parse_group_type_id, ListQuery};
use crate::router::AppState;

/// `GET /groups/grouptype/:group_type_id`
pub async fn list_groups_by_group_type(
    State(state): State<AppState>,
    Path(group_type_id): Path<String>,
    query: ListQuery,
) -> ApiResult<Json<GroupsPage>> {
    let group_type_id = parse_group_type_id(&group_type_id)?;

    let page = state
        .pco
        .fetch_groups_by_group_type(
            &group_type_id,
            ListParams {
                page: query.page,
                passthrough: query.passthrough,
            },
        )
        .await?;

    Ok(Json(page))
}

/// `GET /groups` — the filtered public listing.
pub async fn list_public_groups(
    State(state): State<AppState>,
    query: ListQuery,
) -> ApiResult<Json<GroupsPage>> {
    let page = state
        .pco
        .fetch_public_groups(ListParams {
            page: query.page,
            passthrough: query.passthrough,
        })
        .await?;

    Ok(Json(page))
}
