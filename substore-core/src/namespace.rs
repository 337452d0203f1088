//! Namespace composition and event translation
//!
//! A namespace path is the `/`-join of the labels explicitly supplied along
//! a derivation chain. Outgoing events are tagged with the full path exactly
//! once, at the namespace-supplying node closest to the dispatcher; incoming
//! events are un-tagged by stripping the same prefix.

use crate::store::Reducer;
use std::sync::Arc;
use substore_types::Event;

/// Compose a node's namespace path from its parent's path and the label
/// supplied at this level, if any.
///
/// Nodes that supply no label inherit the parent path unchanged, so the
/// composition is associative over any interleaving of labeled and
/// unlabeled levels.
pub fn compose_namespace(parent_path: &str, supplied: Option<&str>) -> String {
    match supplied {
        Some(label) if !label.is_empty() => {
            if parent_path.is_empty() {
                label.to_string()
            } else {
                format!("{parent_path}/{label}")
            }
        }
        _ => parent_path.to_string(),
    }
}

/// Tag an outgoing event with a namespace path.
///
/// Returns the event unchanged when the path is empty.
pub fn prefix_event(path: &str, event: Event) -> Event {
    if path.is_empty() {
        return event;
    }
    let kind = format!("{}/{}", path, event.kind);
    tracing::trace!("tagging {} as {}", event.kind, kind);
    event.with_kind(kind)
}

/// Un-tag an incoming event, stripping `"{path}/"` from its kind if present.
///
/// Events whose kind does not carry the prefix pass through unchanged. The
/// match is purely textual: a kind that happens to start with the path
/// segment for unrelated reasons is stripped all the same.
pub fn strip_event(path: &str, event: Event) -> Event {
    if path.is_empty() {
        return event;
    }
    match event
        .kind
        .strip_prefix(path)
        .and_then(|rest| rest.strip_prefix('/'))
    {
        Some(inner) => {
            tracing::trace!("un-tagging {} as {}", event.kind, inner);
            let inner = inner.to_string();
            event.with_kind(inner)
        }
        None => event,
    }
}

/// Wrap a reducer so it handles exactly the events tagged with `namespace`.
///
/// Matching events reach the inner reducer with the prefix stripped; every
/// other event leaves the state untouched. This is the state-side inverse
/// of the dispatch tagging done by a namespaced derivation.
pub fn namespaced(namespace: impl Into<String>, reducer: Reducer) -> Reducer {
    let prefix = format!("{}/", namespace.into());
    Arc::new(move |state, event| match event.kind.strip_prefix(&prefix) {
        Some(inner) => {
            let inner = inner.to_string();
            (*reducer)(state, &event.with_kind(inner))
        }
        None => state.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_compose_joins_with_slash() {
        assert_eq!(compose_namespace("", Some("a")), "a");
        assert_eq!(compose_namespace("a", Some("b")), "a/b");
        assert_eq!(compose_namespace("a/b", Some("c")), "a/b/c");
    }

    #[test]
    fn test_compose_inherits_when_no_label() {
        assert_eq!(compose_namespace("a/b", None), "a/b");
        assert_eq!(compose_namespace("a/b", Some("")), "a/b");
        assert_eq!(compose_namespace("", None), "");
    }

    #[test]
    fn test_prefix_event_rewrites_kind_only() {
        let event = Event::new("SAVE").with_field("id", 7);
        let tagged = prefix_event("a/b", event);

        assert_eq!(tagged.kind, "a/b/SAVE");
        assert_eq!(tagged.field("id"), Some(&json!(7)));
    }

    #[test]
    fn test_strip_event_requires_full_segment() {
        let stripped = strip_event("a/b", Event::new("a/b/SAVE"));
        assert_eq!(stripped.kind, "SAVE");

        // "a/bc" shares a textual prefix with "a/b" but is a different path.
        let unrelated = strip_event("a/b", Event::new("a/bc/SAVE"));
        assert_eq!(unrelated.kind, "a/bc/SAVE");

        let untouched = strip_event("a/b", Event::new("SAVE"));
        assert_eq!(untouched.kind, "SAVE");
    }

    #[test]
    fn test_empty_path_is_identity() {
        let event = Event::new("SAVE");
        assert_eq!(prefix_event("", event.clone()).kind, "SAVE");
        assert_eq!(strip_event("", event).kind, "SAVE");
    }

    #[test]
    fn test_namespaced_reducer_routes_by_prefix() {
        let inner: Reducer = Arc::new(|state, event| match event.kind.as_str() {
            "INCREMENT" => json!(state.as_i64().unwrap_or(0) + 1),
            _ => state.clone(),
        });
        let reducer = namespaced("counter", inner);

        let state = json!(0);
        let state = (*reducer)(&state, &Event::new("counter/INCREMENT"));
        assert_eq!(state, json!(1));

        // Untagged and foreign-tagged events leave the state alone.
        let state = (*reducer)(&state, &Event::new("INCREMENT"));
        assert_eq!(state, json!(1));
        let state = (*reducer)(&state, &Event::new("other/INCREMENT"));
        assert_eq!(state, json!(1));
    }

    proptest! {
        #[test]
        fn prop_compose_equals_join_of_supplied_labels(
            levels in proptest::collection::vec(
                proptest::option::of("[a-z][a-z0-9]{0,7}"),
                0..8,
            )
        ) {
            let mut path = String::new();
            for level in &levels {
                path = compose_namespace(&path, level.as_deref());
            }

            let expected = levels
                .iter()
                .flatten()
                .cloned()
                .collect::<Vec<_>>()
                .join("/");
            prop_assert_eq!(path, expected);
        }

        #[test]
        fn prop_strip_inverts_prefix(
            labels in proptest::collection::vec("[a-z][a-z0-9]{0,7}", 1..4),
            kind in "[A-Z][A-Z_]{0,9}",
        ) {
            let path = labels.join("/");
            let event = Event::new(kind).with_field("id", 7);

            let round_tripped = strip_event(&path, prefix_event(&path, event.clone()));
            prop_assert_eq!(round_tripped, event);
        }

        #[test]
        fn prop_strip_ignores_unrelated_kinds(
            labels in proptest::collection::vec("[a-z][a-z0-9]{0,7}", 1..4),
            kind in "[A-Z][A-Z_]{0,9}",
        ) {
            // Uppercase kinds can never start with a lowercase path segment.
            let path = labels.join("/");
            let event = Event::new(kind);

            let untouched = strip_event(&path, event.clone());
            prop_assert_eq!(untouched, event);
        }
    }
}
