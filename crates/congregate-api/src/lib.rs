//! Inbound HTTP surface for the congregate aggregation gateway.
//!
//! Three logical operations over the Planning Center upstream: upcoming
//! events by group type, group listings (by type and the filtered public
//! listing), and registration signups. Handlers are thin — query parsing
//! and validation live in [`extractors`], everything upstream-facing lives
//! in `congregate-pco`.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;

pub use error::{ApiError, ApiResult};
pub use router::{api_router, events_router, groups_router, signups_router, AppState};
