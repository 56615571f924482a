//! Pagination normalization.
//!
//! Inbound requests may carry any mix of three pagination inputs: a `page`
//! number (already validated by the caller), a raw `per_page` string and a
//! raw `offset` string. [`normalize_pagination`] reconciles them into one
//! consistent [`PaginationState`]. Fields that cannot be derived stay `None`
//! and are omitted from both the upstream query and the response envelope,
//! so a request that never asked for pagination keeps the upstream default
//! behavior.

use serde::Serialize;

/// A reconciled pagination triple.
///
/// Invariant: whenever `page` and `per_page` are both defined and `offset`
/// was not supplied explicitly, `offset == page * per_page`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub offset: Option<u64>,
}

/// Reconcile `page`, raw `per_page` and raw `offset` into a consistent triple.
///
/// * `per_page` is taken from the raw value when it parses to an integer > 0;
///   otherwise it falls back to `default_per_page`, but only when `page` was
///   supplied.
/// * `offset` is taken from the raw value when it parses to an integer ≥ 0;
///   otherwise it is derived as `page * per_page` when both are known.
/// * `page` is derived as `offset / per_page` when absent but derivable.
///
/// When none of the three inputs are present, all fields stay `None`.
#[must_use]
pub fn normalize_pagination(
    per_page_raw: Option<&str>,
    offset_raw: Option<&str>,
    page: Option<u64>,
    default_per_page: u64,
) -> PaginationState {
    let parsed_per_page = per_page_raw
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .filter(|value| *value > 0)
        .map(|value| value as u64);

    let per_page = match parsed_per_page {
        Some(value) => Some(value),
        None if page.is_some() => Some(default_per_page),
        None => None,
    };

    let parsed_offset = offset_raw
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .filter(|value| *value >= 0)
        .map(|value| value as u64);

    let offset = match parsed_offset {
        Some(value) => Some(value),
        None => match (page, per_page) {
            (Some(page), Some(per_page)) => Some(page * per_page),
            _ => None,
        },
    };

    let page = page.or_else(|| match (offset, per_page) {
        (Some(offset), Some(per_page)) if per_page > 0 => Some(offset / per_page),
        _ => None,
    });

    PaginationState { page, per_page, offset }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: u64 = 3;

    #[test]
    fn no_inputs_yields_no_outputs() {
        let state = normalize_pagination(None, None, None, DEFAULT);
        assert_eq!(state, PaginationState::default());
    }

    #[test]
    fn page_alone_uses_default_per_page() {
        let state = normalize_pagination(None, None, Some(2), DEFAULT);
        assert_eq!(state.page, Some(2));
        assert_eq!(state.per_page, Some(DEFAULT));
        assert_eq!(state.offset, Some(2 * DEFAULT));
    }

    #[test]
    fn explicit_per_page_wins_over_default() {
        let state = normalize_pagination(Some("10"), None, Some(3), DEFAULT);
        assert_eq!(state.per_page, Some(10));
        assert_eq!(state.offset, Some(30));
    }

    #[test]
    fn explicit_offset_wins_over_derivation() {
        let state = normalize_pagination(Some("5"), Some("7"), Some(4), DEFAULT);
        assert_eq!(state.offset, Some(7));
        assert_eq!(state.page, Some(4));
    }

    #[test]
    fn page_is_derived_from_offset_and_per_page() {
        let state = normalize_pagination(Some("5"), Some("12"), None, DEFAULT);
        assert_eq!(state.page, Some(2));
        assert_eq!(state.per_page, Some(5));
        assert_eq!(state.offset, Some(12));
    }

    #[test]
    fn offset_without_per_page_leaves_page_absent() {
        let state = normalize_pagination(None, Some("9"), None, DEFAULT);
        assert_eq!(state.page, None);
        assert_eq!(state.per_page, None);
        assert_eq!(state.offset, Some(9));
    }

    #[test]
    fn invalid_raw_values_are_ignored() {
        let state = normalize_pagination(Some("abc"), Some("-4"), Some(1), DEFAULT);
        assert_eq!(state.per_page, Some(DEFAULT));
        assert_eq!(state.offset, Some(DEFAULT));

        let state = normalize_pagination(Some("0"), None, None, DEFAULT);
        assert_eq!(state, PaginationState::default());

        let state = normalize_pagination(Some("-2"), None, None, DEFAULT);
        assert_eq!(state, PaginationState::default());
    }

    #[test]
    fn offset_zero_is_valid() {
        let state = normalize_pagination(Some("5"), Some("0"), None, DEFAULT);
        assert_eq!(state.offset, Some(0));
        assert_eq!(state.page, Some(0));
    }

    #[test]
    fn invariant_offset_equals_page_times_per_page_when_derived() {
        for page in 0..5 {
            for per_page in 1..5 {
                let state = normalize_pagination(
                    Some(&per_page.to_string()),
                    None,
                    Some(page),
                    DEFAULT,
                );
                assert_eq!(state.offset, Some(page * per_page));
            }
        }
    }
}
