//! Upstream query construction.
//!
//! Three write modes with distinct precedence: passthrough pairs are
//! appended verbatim (duplicates preserved), pagination parameters use
//! *ensure* semantics (an existing key wins, whatever its value), and
//! operation filters use *set* semantics (server policy replaces whatever
//! the caller passed).

use chrono::{DateTime, Utc};
use url::Url;

/// Query key for the upcoming-events time filter.
pub const STARTS_AT_QUERY_KEY: &str = "where[starts_at][gte]";

/// Append every passthrough pair verbatim; repeated keys are preserved.
pub fn apply_passthrough(url: &mut Url, params: &[(String, String)]) {
    if params.is_empty() {
        return;
    }
    let mut pairs = url.query_pairs_mut();
    for (key, value) in params {
        pairs.append_pair(key, value);
    }
}

/// Set `key` only if the query does not already carry it.
pub fn ensure_param(url: &mut Url, key: &str, value: &str) {
    if get_param(url, key).is_none() {
        url.query_pairs_mut().append_pair(key, value);
    }
}

/// Set `key`, replacing every existing occurrence.
pub fn set_param(url: &mut Url, key: &str, value: &str) {
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(existing, _)| existing != key)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut pairs = url.query_pairs_mut();
    pairs.clear();
    for (k, v) in &retained {
        pairs.append_pair(k, v);
    }
    pairs.append_pair(key, value);
}

/// First value of `key`, if present.
#[must_use]
pub fn get_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(existing, _)| existing == key)
        .map(|(_, value)| value.into_owned())
}

/// Timestamp for the upcoming filter: the given instant's UTC date pinned to
/// the fixed 05:00:00Z wall-clock anchor, not the instant itself. The
/// day-boundary anchor is deliberate and part of the query contract.
#[must_use]
pub fn upcoming_window_start(now: DateTime<Utc>) -> String {
    format!("{}T05:00:00Z", now.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn url() -> Url {
        Url::parse("https://api.example.test/groups/v2/groups").unwrap()
    }

    #[test]
    fn passthrough_preserves_order_and_duplicates() {
        let mut url = url();
        apply_passthrough(
            &mut url,
            &[
                ("where[tag]".to_string(), "a".to_string()),
                ("where[tag]".to_string(), "b".to_string()),
                ("order".to_string(), "name".to_string()),
            ],
        );
        assert_eq!(url.query(), Some("where%5Btag%5D=a&where%5Btag%5D=b&order=name"));
    }

    #[test]
    fn ensure_does_not_overwrite() {
        let mut url = url();
        apply_passthrough(&mut url, &[("per_page".to_string(), "10".to_string())]);
        ensure_param(&mut url, "per_page", "6");
        assert_eq!(get_param(&url, "per_page"), Some("10".to_string()));
        assert_eq!(url.query_pairs().count(), 1);
    }

    #[test]
    fn ensure_adds_when_absent() {
        let mut url = url();
        ensure_param(&mut url, "per_page", "6");
        assert_eq!(get_param(&url, "per_page"), Some("6".to_string()));
    }

    #[test]
    fn set_replaces_every_occurrence() {
        let mut url = url();
        apply_passthrough(
            &mut url,
            &[
                ("order".to_string(), "name".to_string()),
                ("order".to_string(), "id".to_string()),
                ("per_page".to_string(), "4".to_string()),
            ],
        );
        set_param(&mut url, "order", "starts_at");

        let orders: Vec<String> = url
            .query_pairs()
            .filter(|(k, _)| k == "order")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(orders, ["starts_at"]);
        assert_eq!(get_param(&url, "per_page"), Some("4".to_string()));
    }

    #[test]
    fn upcoming_window_pins_day_anchor() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 22, 41, 7).unwrap();
        assert_eq!(upcoming_window_start(now), "2024-03-09T05:00:00Z");
    }
}
