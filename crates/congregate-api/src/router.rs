//! Router assembly for the aggregation API.

use axum::routing::get;
use axum::Router;

use congregate_pco::PcoClient;

use crate::handlers;

/// Shared state for the aggregation handlers.
#[derive(Clone)]
pub struct AppState {
    /// Upstream Planning Center client.
    pub pco: PcoClient,
}

/// Events routes, mounted at `/events`.
pub fn events_router() -> Router<AppState> {
    Router::new().route(
        "/grouptype/:group_type_id",
        get(handlers::events::upcoming_events_by_group_type),
    )
}

/// Group routes, mounted at `/groups`.
pub fn groups_router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::groups::list_public_groups))
        .route(
            "/grouptype/:group_type_id",
            get(handlers::groups::list_groups_by_group_type),
        )
}

/// Signup routes, mounted at `/signups`.
pub fn signups_router() -> Router<AppState> {
    Router::new().route("/", get(handlers::signups::list_registration_signups))
}

/// The complete aggregation router with the not-found fallback applied.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .nest("/events", events_router())
        .nest("/groups", groups_router())
        .nest("/signups", signups_router())
        .fallback(handlers::not_found)
        .with_state(state)
}
