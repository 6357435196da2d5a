//! Removal of unreachable type definitions.
//!
//! Reachability is a breadth-first walk over type names, starting at the
//! `Query` and `Mutation` roots and every custom scalar. Edges come from the
//! document itself:
//! - object types and extensions: field types and argument types
//! - extensions count as extra fields of their target type
//! - unions: member types
//! - input objects: input field types
//! - enums and scalars: none

use crate::ast::{Definition, Document, FieldDefinition};
use gqlkit_semantic::{MUTATION_TYPE, QUERY_TYPE};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::{BTreeSet, VecDeque};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A pruned document and the names that were dropped from it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PruneResult {
    pub document: Document,
    /// Sorted names of removed type definitions.
    pub removed_types: Vec<String>,
}

/// Keeps only the definitions reachable from the root operation types.
#[must_use]
pub fn prune_document(document: &Document) -> PruneResult {
    let reachable = reachable_types(document);

    let mut removed = BTreeSet::new();
    let definitions = document
        .definitions
        .iter()
        .filter(|def| {
            let keep = reachable.contains(def.name());
            if !keep && !def.is_extension() {
                removed.insert(def.name().to_string());
            }
            keep
        })
        .cloned()
        .collect();

    tracing::debug!(
        reachable = reachable.len(),
        removed = removed.len(),
        "pruned unreachable types"
    );

    PruneResult {
        document: Document::new(definitions),
        removed_types: removed.into_iter().collect(),
    }
}

/// Every type name ever enqueued by the walk.
///
/// Built-in scalars referenced by fields are included even though they have
/// no definition.
#[must_use]
pub fn reachable_types(document: &Document) -> FxHashSet<&str> {
    let mut by_name: FxHashMap<&str, Vec<&Definition>> = FxHashMap::default();
    for def in &document.definitions {
        by_name.entry(def.name()).or_default().push(def);
    }

    let mut walk = Walk::default();

    for root in [QUERY_TYPE, MUTATION_TYPE] {
        if by_name.contains_key(root) {
            walk.enqueue(root);
        }
    }
    for def in &document.definitions {
        if let Definition::Scalar(scalar) = def {
            walk.enqueue(&scalar.name);
        }
    }

    while let Some(name) = walk.queue.pop_front() {
        let Some(defs) = by_name.get(name) else {
            continue;
        };
        for &def in defs {
            match def {
                Definition::Object(object) => walk.fields(&object.fields),
                Definition::ObjectExtension(extension) => walk.fields(&extension.fields),
                Definition::Union(union) => {
                    for member in &union.members {
                        walk.enqueue(member);
                    }
                }
                Definition::InputObject(input) => {
                    for field in &input.fields {
                        walk.enqueue(field.ty.named_type());
                    }
                }
                Definition::Enum(_) | Definition::Scalar(_) => {}
            }
        }
    }

    walk.reachable
}

#[derive(Default)]
struct Walk<'a> {
    reachable: FxHashSet<&'a str>,
    queue: VecDeque<&'a str>,
}

impl<'a> Walk<'a> {
    fn enqueue(&mut self, name: &'a str) {
        if self.reachable.insert(name) {
            self.queue.push_back(name);
        }
    }

    fn fields(&mut self, fields: &'a [FieldDefinition]) {
        for field in fields {
            self.enqueue(field.ty.named_type());
            for arg in &field.arguments {
                self.enqueue(arg.ty.named_type());
            }
        }
    }
}
