//! Upcoming events: upstream fetch plus group-detail enrichment.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use futures::future;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;

use congregate_core::{normalize_pagination, Document, RelationshipRef, Resource};

use crate::client::{ListParams, PcoClient};
use crate::error::PcoResult;
use crate::query::{self, STARTS_AT_QUERY_KEY};

/// Response envelope for the events listing.
///
/// `startsAt` mirrors the final value of the time-window filter (null when
/// none was applied); `pageSize` reports the normalized per-page value.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsPage {
    pub starts_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
    pub events: Vec<Resource>,
    pub links: Map<String, Value>,
    pub next_exist: bool,
    pub upcoming: bool,
}

/// Attribute paths checked, in order, for a representative group image:
/// header photo at three decreasing resolutions, the generic photo at the
/// same three, then the two flat URL fields.
const IMAGE_CANDIDATE_PATHS: [&[&str]; 8] = [
    &["header_photo", "original"],
    &["header_photo", "large"],
    &["header_photo", "medium"],
    &["photo", "original"],
    &["photo", "large"],
    &["photo", "medium"],
    &["header_photo_url"],
    &["photo_url"],
];

impl PcoClient {
    /// Fetch events for a group type, enriched with per-group details.
    ///
    /// With `upcoming` set, the time-window filter is pinned to today's
    /// 05:00:00Z anchor and the sort order to `starts_at`, regardless of any
    /// passthrough value for either key.
    pub async fn fetch_upcoming_events(
        &self,
        group_type_id: &str,
        upcoming: bool,
        params: ListParams,
    ) -> PcoResult<EventsPage> {
        let mut url = Url::parse(&format!(
            "{}/groups/v2/group_types/{group_type_id}/events",
            self.base_url
        ))?;

        query::apply_passthrough(&mut url, &params.passthrough);

        let pagination = normalize_pagination(
            query::get_param(&url, "per_page").as_deref(),
            query::get_param(&url, "offset").as_deref(),
            params.page,
            self.default_per_page,
        );

        if let Some(per_page) = pagination.per_page {
            query::ensure_param(&mut url, "per_page", &per_page.to_string());
        }
        if let Some(offset) = pagination.offset {
            query::ensure_param(&mut url, "offset", &offset.to_string());
        }

        if upcoming {
            let window_start = query::upcoming_window_start(Utc::now());
            query::set_param(&mut url, STARTS_AT_QUERY_KEY, &window_start);
            query::set_param(&mut url, "order", "starts_at");
        }

        let starts_at = query::get_param(&url, STARTS_AT_QUERY_KEY);

        debug!(
            group_type_id,
            page = ?pagination.page,
            per_page = ?pagination.per_page,
            offset = ?pagination.offset,
            starts_at = ?starts_at,
            upcoming,
            url = %url,
            "fetching events"
        );

        let document: Document = self.get_json(url, "events").await?;
        let next_exist = document.has_next();
        let events = self.enrich_events_with_group_details(document.data).await;

        Ok(EventsPage {
            starts_at,
            page: pagination.page,
            offset: pagination.offset,
            page_size: pagination.per_page,
            events,
            links: document.links,
            next_exist,
            upcoming,
        })
    }

    /// Attach `groupDetails` (and `groupImage` when derivable) to every
    /// event whose `group` relationship resolves.
    ///
    /// One detail fetch per unique group id, all launched together and
    /// awaited jointly. A failed fetch is logged and leaves that group's
    /// events unenriched; it never aborts the batch.
    async fn enrich_events_with_group_details(&self, events: Vec<Resource>) -> Vec<Resource> {
        let mut seen = HashSet::new();
        let group_ids: Vec<String> = events
            .iter()
            .filter_map(extract_group_id)
            .filter(|id| seen.insert(id.clone()))
            .collect();

        if group_ids.is_empty() {
            return events;
        }

        let fetches = group_ids.iter().map(|group_id| async move {
            match self.fetch_group_detail(group_id).await {
                Ok(detail) => Some((group_id.clone(), detail)),
                Err(error) => {
                    warn!(group_id = %group_id, error = %error, "failed to fetch group details");
                    None
                }
            }
        });

        let details: HashMap<String, Value> =
            future::join_all(fetches).await.into_iter().flatten().collect();

        events
            .into_iter()
            .map(|mut event| {
                let Some(group_id) = extract_group_id(&event) else {
                    return event;
                };
                let Some(detail) = details.get(&group_id) else {
                    return event;
                };
                event
                    .extra
                    .insert("groupDetails".to_string(), detail.clone());
                if let Some(image) = extract_group_image(detail) {
                    event.extra.insert("groupImage".to_string(), Value::String(image));
                }
                event
            })
            .collect()
    }

    /// Full single-group detail payload, kept verbatim for the envelope.
    async fn fetch_group_detail(&self, group_id: &str) -> PcoResult<Value> {
        let url = Url::parse(&format!("{}/groups/v2/groups/{group_id}", self.base_url))?;
        self.get_json(url, "group-detail").await
    }
}

/// Group id referenced by an event's `group` relationship, if any.
fn extract_group_id(event: &Resource) -> Option<String> {
    match event.relationship("group")? {
        RelationshipRef::One(stub) if !stub.id.is_empty() => Some(stub.id),
        _ => None,
    }
}

fn extract_group_image(detail: &Value) -> Option<String> {
    let attributes = detail.get("data")?.get("attributes")?;
    IMAGE_CANDIDATE_PATHS.iter().find_map(|path| {
        let value = path
            .iter()
            .try_fold(attributes, |current, segment| current.get(segment))?;
        match value.as_str() {
            Some(text) if !text.is_empty() => Some(text.to_string()),
            _ => None,
        }
    })
}
