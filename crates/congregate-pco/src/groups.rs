//! Group listings: by group type, and the filtered public listing.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use congregate_core::{merge_included, normalize_pagination, Document, Resource};

use crate::client::{ListParams, PcoClient};
use crate::error::PcoResult;
use crate::query;

/// Fallback page size for the public listing when the caller specifies none.
const DEFAULT_PUBLIC_PER_PAGE: u64 = 6;

/// Over-fetch multiplier compensating for post-fetch eligibility attrition.
/// A heuristic, not a sufficiency guarantee: when more than half of a
/// fetched window is ineligible, the returned page comes up short.
const OVER_FETCH_FACTOR: u64 = 2;

/// Enrollment strategies that admit self-service signup.
const OPEN_STRATEGIES: [&str; 2] = ["request_to_join", "open_signup"];

/// Response envelope for both group listings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupsPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
    pub groups: Vec<Resource>,
    pub links: Map<String, Value>,
    pub next_exist: bool,
    pub includes: Vec<Resource>,
}

/// Per-group enrollment snapshot from the secondary lookup. Request-scoped.
#[derive(Debug, Clone, Default)]
pub struct EnrollmentRecord {
    pub strategy: Option<String>,
    pub auto_closed: bool,
}

impl PcoClient {
    /// Fetch groups belonging to a group type, with `included` resources
    /// merged into the primary records.
    pub async fn fetch_groups_by_group_type(
        &self,
        group_type_id: &str,
        params: ListParams,
    ) -> PcoResult<GroupsPage> {
        let mut url = Url::parse(&format!(
            "{}/groups/v2/group_types/{group_type_id}/groups",
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

        debug!(
            group_type_id,
            page = ?pagination.page,
            per_page = ?pagination.per_page,
            offset = ?pagination.offset,
            url = %url,
            "fetching groups"
        );

        let document: Document = self.get_json(url, "groups").await?;
        let next_exist = document.has_next();
        let Document { data, included, links } = document;
        let groups = merge_included(data, &included);

        Ok(GroupsPage {
            page: pagination.page,
            offset: pagination.offset,
            page_size: pagination.per_page,
            groups,
            links,
            next_exist,
            includes: included,
        })
    }

    /// Fetch the public group listing: non-archived groups that are open for
    /// enrollment, exactly `per_page` of them when enough are eligible.
    ///
    /// Eligibility is only knowable after a per-group enrollment lookup, and
    /// upstream pagination happens before that filtering — so the upstream
    /// window is over-fetched at twice the requested size and the eligible
    /// list truncated locally. The enrollment lookups run one at a time, in
    /// candidate order.
    pub async fn fetch_public_groups(&self, params: ListParams) -> PcoResult<GroupsPage> {
        let mut url = Url::parse(&format!("{}/groups/v2/groups", self.base_url))?;

        query::set_param(&mut url, "archived_at", "null");
        query::set_param(&mut url, "include", "enrollment");

        query::apply_passthrough(&mut url, &params.passthrough);

        let pagination = normalize_pagination(
            query::get_param(&url, "per_page").as_deref(),
            query::get_param(&url, "offset").as_deref(),
            params.page,
            self.default_per_page,
        );

        let requested_per_page = pagination.per_page.unwrap_or(DEFAULT_PUBLIC_PER_PAGE);
        let fetch_per_page = requested_per_page * OVER_FETCH_FACTOR;
        let offset = pagination.offset.unwrap_or(0);

        query::ensure_param(&mut url, "per_page", &fetch_per_page.to_string());
        query::ensure_param(&mut url, "offset", &offset.to_string());

        debug!(
            page = ?pagination.page,
            requested_per_page,
            fetch_per_page,
            offset,
            url = %url,
            "fetching public groups"
        );

        let document: Document = self.get_json(url, "all-groups").await?;
        let upstream_next = document.has_next();
        let Document { data, included, links } = document;
        let fetched = data.len();
        let candidates = merge_included(data, &included);

        let mut eligible = Vec::new();
        for mut group in candidates {
            let enrollment = self.fetch_group_enrollment(&group.id).await?;
            if !is_eligible(&group, &enrollment) {
                continue;
            }
            if let Some(strategy) = enrollment.strategy {
                group
                    .extra
                    .insert("enrollmentStrategy".to_string(), Value::String(strategy));
            }
            eligible.push(group);
        }

        let eligible_count = eligible.len() as u64;
        let mut groups = eligible;
        groups.truncate(requested_per_page as usize);

        debug!(
            fetched,
            eligible = eligible_count,
            requested = requested_per_page,
            returned = groups.len(),
            offset,
            "public groups filtered"
        );

        Ok(GroupsPage {
            page: pagination.page,
            offset: Some(offset),
            page_size: Some(requested_per_page),
            groups,
            links,
            next_exist: eligible_count > requested_per_page || upstream_next,
            includes: included,
        })
    }

    /// Enrollment strategy and auto-closed flag for one group.
    ///
    /// A non-2xx response degrades to an empty record — the eligibility
    /// check then rejects the group; transport failures propagate.
    async fn fetch_group_enrollment(&self, group_id: &str) -> PcoResult<EnrollmentRecord> {
        let url = Url::parse(&format!(
            "{}/groups/v2/groups/{group_id}/enrollment",
            self.base_url
        ))?;

        let response = self.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!(
                group_id,
                status = status.as_u16(),
                "enrollment lookup failed, treating group as closed"
            );
            return Ok(EnrollmentRecord::default());
        }

        let payload: Value = response.json().await?;
        let attributes = payload.get("data").and_then(|data| data.get("attributes"));

        Ok(EnrollmentRecord {
            strategy: attributes
                .and_then(|a| a.get("strategy"))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            auto_closed: attributes
                .and_then(|a| a.get("auto_closed"))
                .and_then(Value::as_bool)
                .unwrap_or(false),
        })
    }
}

/// A group is eligible for the public listing iff its enrollment strategy
/// admits self-service signup, its own `enrollment_open` attribute is true,
/// and the merged enrollment resource is not auto-closed.
fn is_eligible(group: &Resource, enrollment: &EnrollmentRecord) -> bool {
    let strategy_ok = enrollment
        .strategy
        .as_deref()
        .is_some_and(|strategy| OPEN_STRATEGIES.contains(&strategy));

    // `enrollment_open` defaults to true when absent or null; non-boolean
    // values do not count as open.
    let enrollment_open = match group.attributes.get("enrollment_open") {
        None | Some(Value::Null) => true,
        Some(Value::Bool(open)) => *open,
        Some(_) => false,
    };

    // `auto_closed` is read from the merged enrollment resource (the
    // `include=enrollment` side table), not from the secondary lookup.
    let auto_closed = group
        .extra
        .get("enrollment")
        .and_then(|enrollment| enrollment.get("attributes"))
        .and_then(|attributes| attributes.get("auto_closed"))
        .and_then(Value::as_bool)
        == Some(true);

    strategy_ok && enrollment_open && !auto_closed
}
