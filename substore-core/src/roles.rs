//! Role classification for derivation-chain nodes

use substore_types::Role;

/// Classify a node's role tags from its parent's tags and whether a
/// namespace was supplied at this level.
///
/// The first wrapping of a true root container (recognized by an empty
/// parent tag set) is always `[Root, NamespaceRoot]`, whatever the
/// arguments. Every other node is `[NamespaceRoot, Child]` when it supplies
/// a namespace and `[Child]` otherwise. A parent's tags never propagate
/// into its children; only the namespace path does.
pub fn classify(parent_tags: &[Role], namespace_supplied: bool) -> Vec<Role> {
    if parent_tags.is_empty() {
        vec![Role::Root, Role::NamespaceRoot]
    } else if namespace_supplied {
        vec![Role::NamespaceRoot, Role::Child]
    } else {
        vec![Role::Child]
    }
}
