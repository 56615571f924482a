//! Planning Center Online upstream client.
//!
//! This crate owns everything that talks to the upstream group-management
//! API: query construction (passthrough forwarding, pagination injection,
//! operation filters), the authenticated HTTP calls, and the four fetch
//! operations the gateway exposes — upcoming events (with group-detail
//! enrichment), groups by group type, the filtered public group listing
//! (with over-fetch compensation), and registration signups.

pub mod client;
pub mod error;
pub mod events;
pub mod groups;
pub mod query;
pub mod signups;

pub use client::{ListParams, PcoClient};
pub use error::{PcoError, PcoResult};
pub use events::EventsPage;
pub use groups::{EnrollmentRecord, GroupsPage};
pub use signups::SignupsPage;
