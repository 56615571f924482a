//! JSON:API `included` graph merging.

use std::collections::HashMap;

use serde_json::Value;

use crate::resource::{RelationshipRef, Resource};

/// Resolve `included` resources into the primary list.
///
/// Each relationship whose stub matches an included resource by `(type, id)`
/// gains a top-level field named after the relationship, carrying the full
/// resource (or, for stub sequences, the list of matches — misses dropped).
/// Stubs with no match are left untouched and a missing related resource
/// never fails the merge. The `relationships` member itself is preserved as
/// received, so merging is idempotent. Output order matches input order.
#[must_use]
pub fn merge_included(primary: Vec<Resource>, included: &[Resource]) -> Vec<Resource> {
    if primary.is_empty() || included.is_empty() {
        return primary;
    }

    let lookup: HashMap<(&str, &str), &Resource> = included
        .iter()
        .map(|resource| ((resource.kind.as_str(), resource.id.as_str()), resource))
        .collect();

    primary
        .into_iter()
        .map(|resource| resolve_relationships(resource, &lookup))
        .collect()
}

fn resolve_relationships(
    mut resource: Resource,
    lookup: &HashMap<(&str, &str), &Resource>,
) -> Resource {
    let references: Vec<(String, RelationshipRef)> = resource
        .relationships
        .iter()
        .filter_map(|(name, value)| {
            RelationshipRef::from_value(value).map(|reference| (name.clone(), reference))
        })
        .collect();

    for (name, reference) in references {
        match reference {
            RelationshipRef::One(stub) => {
                if let Some(full) = lookup.get(&(stub.kind.as_str(), stub.id.as_str())) {
                    resource.extra.insert(name, resource_value(full));
                }
            }
            RelationshipRef::Many(stubs) => {
                let resolved: Vec<Value> = stubs
                    .iter()
                    .filter_map(|stub| lookup.get(&(stub.kind.as_str(), stub.id.as_str())))
                    .map(|full| resource_value(full))
                    .collect();
                if !resolved.is_empty() {
                    resource.extra.insert(name, Value::Array(resolved));
                }
            }
        }
    }

    resource
}

fn resource_value(resource: &Resource) -> Value {
    serde_json::to_value(resource).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resource(raw: serde_json::Value) -> Resource {
        serde_json::from_value(raw).unwrap()
    }

    fn group_with_enrollment(group_id: &str, enrollment_id: &str) -> Resource {
        resource(json!({
            "type": "Group",
            "id": group_id,
            "attributes": {"name": format!("Group {group_id}")},
            "relationships": {
                "enrollment": {"data": {"type": "Enrollment", "id": enrollment_id}}
            }
        }))
    }

    #[test]
    fn resolves_single_stub_into_sibling_field() {
        let enrollment = resource(json!({
            "type": "Enrollment",
            "id": "e1",
            "attributes": {"auto_closed": false}
        }));

        let merged = merge_included(vec![group_with_enrollment("g1", "e1")], &[enrollment.clone()]);

        assert_eq!(merged.len(), 1);
        assert_eq!(
            merged[0].extra.get("enrollment"),
            Some(&serde_json::to_value(&enrollment).unwrap())
        );
        // The relationships member itself stays untouched.
        assert!(merged[0].relationships.contains_key("enrollment"));
    }

    #[test]
    fn unmatched_stub_is_left_untouched() {
        let primary = group_with_enrollment("g1", "e-missing");
        let other = resource(json!({"type": "Enrollment", "id": "e-other"}));

        let merged = merge_included(vec![primary.clone()], &[other]);

        assert_eq!(merged, vec![primary]);
    }

    #[test]
    fn resolves_stub_sequences_dropping_misses() {
        let primary = resource(json!({
            "type": "Group",
            "id": "g1",
            "relationships": {
                "tags": {"data": [
                    {"type": "Tag", "id": "t1"},
                    {"type": "Tag", "id": "t-missing"},
                    {"type": "Tag", "id": "t2"}
                ]}
            }
        }));
        let tags = [
            resource(json!({"type": "Tag", "id": "t1", "attributes": {"name": "a"}})),
            resource(json!({"type": "Tag", "id": "t2", "attributes": {"name": "b"}})),
        ];

        let merged = merge_included(vec![primary], &tags);

        let resolved = merged[0].extra.get("tags").and_then(Value::as_array).unwrap();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].get("id"), Some(&json!("t1")));
        assert_eq!(resolved[1].get("id"), Some(&json!("t2")));
    }

    #[test]
    fn sequence_with_no_matches_adds_nothing() {
        let primary = resource(json!({
            "type": "Group",
            "id": "g1",
            "relationships": {"tags": {"data": [{"type": "Tag", "id": "t9"}]}}
        }));
        let included = [resource(json!({"type": "Tag", "id": "t1"}))];

        let merged = merge_included(vec![primary.clone()], &included);

        assert_eq!(merged, vec![primary]);
    }

    #[test]
    fn merge_is_idempotent() {
        let included = [resource(json!({
            "type": "Enrollment",
            "id": "e1",
            "attributes": {"strategy": "open_signup"}
        }))];
        let once = merge_included(vec![group_with_enrollment("g1", "e1")], &included);
        let twice = merge_included(once.clone(), &included);

        assert_eq!(once, twice);
    }

    #[test]
    fn empty_included_short_circuits() {
        let primary = vec![group_with_enrollment("g1", "e1")];
        assert_eq!(merge_included(primary.clone(), &[]), primary);
    }

    #[test]
    fn preserves_primary_ordering() {
        let primaries: Vec<Resource> = (0..5)
            .map(|n| group_with_enrollment(&format!("g{n}"), "e1"))
            .collect();
        let included = [resource(json!({"type": "Enrollment", "id": "e1"}))];

        let merged = merge_included(primaries, &included);

        let ids: Vec<&str> = merged.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["g0", "g1", "g2", "g3", "g4"]);
    }

    #[test]
    fn malformed_relationship_values_are_ignored() {
        let primary = resource(json!({
            "type": "Group",
            "id": "g1",
            "relationships": {"broken": 42, "also_broken": {"data": "huh"}}
        }));
        let included = [resource(json!({"type": "Enrollment", "id": "e1"}))];

        let merged = merge_included(vec![primary.clone()], &included);

        assert_eq!(merged, vec![primary]);
    }
}
