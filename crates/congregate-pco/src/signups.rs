//! Registration signups read-through.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use congregate_core::{normalize_pagination, Document, Resource};

use crate::client::{ListParams, PcoClient};
use crate::error::PcoResult;
use crate::query;

/// Response envelope for the signups listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupsPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
    pub signups: Vec<Resource>,
    pub links: Map<String, Value>,
    pub next_exist: bool,
    pub includes: Vec<Resource>,
}

impl PcoClient {
    /// Fetch registration signups with their events included.
    ///
    /// The envelope carries the full upstream list; the non-archived subset
    /// is computed for the log line only.
    pub async fn fetch_registration_signups(&self, params: ListParams) -> PcoResult<SignupsPage> {
        let mut url = Url::parse(&format!("{}/registrations/v2/signups", self.base_url))?;

        query::set_param(&mut url, "include", "event");

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
            page = ?pagination.page,
            per_page = ?pagination.per_page,
            offset = ?pagination.offset,
            url = %url,
            "fetching registration signups"
        );

        let document: Document = self.get_json(url, "registration-signups").await?;
        let next_exist = document.has_next();
        let Document { data, included, links } = document;

        let non_archived = data
            .iter()
            .filter(|signup| {
                signup
                    .attributes
                    .get("archived_on")
                    .is_some_and(Value::is_null)
            })
            .count();
        debug!(
            total = data.len(),
            non_archived, "fetched registration signups"
        );

        Ok(SignupsPage {
            page: pagination.page,
            offset: pagination.offset,
            page_size: pagination.per_page,
            signups: data,
            links,
            next_exist,
            includes: included,
        })
    }
}
