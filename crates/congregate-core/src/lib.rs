//! Core resource model and normalization logic for the congregate
//! aggregation gateway.
//!
//! This crate is pure logic with no I/O: the JSON:API resource model as
//! returned by the upstream, the pagination normalizer that reconciles the
//! three partially-overlapping pagination inputs, and the resource graph
//! merger that resolves `included` side-table entries into primary records.

pub mod merge;
pub mod pagination;
pub mod resource;

pub use merge::merge_included;
pub use pagination::{normalize_pagination, PaginationState};
pub use resource::{Document, RelationshipRef, Resource, ResourceIdentifier};
