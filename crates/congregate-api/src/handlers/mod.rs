//! Request handlers, one module per operation.

pub mod events;
pub mod groups;
pub mod signups;

use crate::error::ApiError;

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
