//! Registration signups handler.

use axum::extract::State;
use axum::Json;

use congregate_pco::{ListParams, SignupsPage};

use crate::error::ApiResult;
use crate::extractors::ListQuery;
use crate::router::AppState;

/// `GET /signups`
pub async fn list_registration_signups(
    State(state): State<AppState>,
    query: ListQuery,
) -> ApiResult<Json<SignupsPage>> {
    let page = state
        .pco
        .fetch_registration_signups(ListParams {
            page: query.page,
            passthrough: query.passthrough,
        })
        .await?;

    Ok(Json(page))
}
