//! Axum extractors for the aggregation handlers.
//!
//! Inbound query strings are parsed by hand rather than through
//! `axum::extract::Query`: pagination and flag keys are picked out and
//! validated, while every other pair — order and duplicates preserved — is
//! kept as an opaque passthrough forwarded verbatim to the upstream.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ApiError;

/// Parsed inbound query for plain list operations.
#[derive(Debug, Default, Clone)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub passthrough: Vec<(String, String)>,
}

/// Parsed inbound query for the events operation; adds the boolean-like
/// `upcoming` flag (absent → false).
#[derive(Debug, Default, Clone)]
pub struct EventsQuery {
    pub page: Option<u64>,
    pub upcoming: bool,
    pub passthrough: Vec<(String, String)>,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let mut query = ListQuery::default();
        for (key, value) in query_pairs(parts) {
            if key == "page" {
                query.page = Some(parse_page(&value)?);
            } else {
                query.passthrough.push((key, value));
            }
        }
        Ok(query)
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for EventsQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let mut query = EventsQuery::default();
        for (key, value) in query_pairs(parts) {
            match key.as_str() {
                "page" => query.page = Some(parse_page(&value)?),
                "upcoming" => query.upcoming = parse_upcoming(&value)?,
                _ => query.passthrough.push((key, value)),
            }
        }
        Ok(query)
    }
}

fn query_pairs(parts: &Parts) -> Vec<(String, String)> {
    let query = parts.uri.query().unwrap_or("");
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

fn parse_page(raw: &str) -> Result<u64, ApiError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ApiError::Validation("page must be a non-negative integer".to_string()))
}

/// `""`, `true`, `1`, `yes` → true; `false`, `0`, `no` → false; anything
/// else is invalid.
fn parse_upcoming(raw: &str) -> Result<bool, ApiError> {
    match raw.trim().to_lowercase().as_str() {
        "" | "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ApiError::Validation(
            "upcoming must be a boolean-like value (true/false)".to_string(),
        )),
    }
}

/// Validate the group-type path parameter: all digits, nothing else.
pub fn parse_group_type_id(raw: &str) -> Result<String, ApiError> {
    let value = raw.trim();
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ApiError::Validation(
            "groupTypeId must be a positive integer".to_string(),
        ));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_parses_non_negative_integers() {
        assert_eq!(parse_page("0").unwrap(), 0);
        assert_eq!(parse_page(" 12 ").unwrap(), 12);
        assert!(parse_page("-1").is_err());
        assert!(parse_page("2.5").is_err());
        assert!(parse_page("abc").is_err());
    }

    #[test]
    fn upcoming_accepts_boolean_like_values() {
        for raw in ["", "true", "TRUE", "1", "yes", " Yes "] {
            assert!(parse_upcoming(raw).unwrap(), "{raw:?} should be true");
        }
        for raw in ["false", "0", "no", "No"] {
            assert!(!parse_upcoming(raw).unwrap(), "{raw:?} should be false");
        }
        assert!(parse_upcoming("maybe").is_err());
    }

    #[test]
    fn group_type_id_must_be_all_digits() {
        assert_eq!(parse_group_type_id("42").unwrap(), "42");
        assert_eq!(parse_group_type_id(" 42 ").unwrap(), "42");
        assert!(parse_group_type_id("abc").is_err());
        assert!(parse_group_type_id("4a2").is_err());
        assert!(parse_group_type_id("-1").is_err());
        assert!(parse_group_type_id("").is_err());
    }
}
