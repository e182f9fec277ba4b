//! Cycle-safe discovery of the composite types reachable from a root.
//!
//! Discovery walks field references depth-first. A visited set guarantees
//! each type is expanded once, so the only self-referential shape allowed
//! (`Option<Self>`) terminates after one visit. Any other cycle is found on
//! the in-progress path and reported instead of being expanded.
//!
//! # Examples
//!
//! ```
//! use optica::discovery::discover;
//! use optica::schema::{CompositeType, Schema, TypeRef};
//!
//! let schema: Schema = [CompositeType::builder("Node")
//!     .field("value", TypeRef::scalar("String"))
//!     .field("child", TypeRef::optional(TypeRef::composite("Node")))
//!     .build()]
//! .into_iter()
//! .collect();
//!
//! let discovery = discover(&schema, "Node").unwrap();
//! assert_eq!(discovery.len(), 1);
//! assert!(discovery.is_recursive("Node"));
//! ```

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, trace};

use crate::schema::{Field, FieldShape, Schema, SchemaError, classify};

/// A field together with its shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedField {
    /// The field as declared.
    pub field: Field,
    /// Its classification.
    pub shape: FieldShape,
}

impl ClassifiedField {
    /// The composite the field reaches, if any.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.field.ty.referenced_composite()
    }
}

/// One reachable composite with its classified fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredType {
    name: String,
    fields: Vec<ClassifiedField>,
}

impl DiscoveredType {
    /// The type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Classified fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[ClassifiedField] {
        &self.fields
    }

    /// Whether the type refers to itself through an optional field.
    #[must_use]
    pub fn is_recursive(&self) -> bool {
        self.fields
            .iter()
            .any(|field| field.shape == FieldShape::RecursiveOptionalSelfRef)
    }
}

/// The result of [`discover`]: the root first, then every reachable type in
/// first-visit order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    types: Vec<DiscoveredType>,
}

impl Discovery {
    /// The root type.
    #[must_use]
    pub fn root(&self) -> &DiscoveredType {
        &self.types[0]
    }

    /// All discovered types, root first.
    #[must_use]
    pub fn types(&self) -> &[DiscoveredType] {
        &self.types
    }

    /// Looks a discovered type up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DiscoveredType> {
        self.types.iter().find(|discovered| discovered.name == name)
    }

    /// Whether `name` was reached.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of discovered types. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Always `false`; the root is always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Whether `name` is discovered and refers to itself through an optional.
    #[must_use]
    pub fn is_recursive(&self, name: &str) -> bool {
        self.get(name).is_some_and(DiscoveredType::is_recursive)
    }

    /// The recursive types, in discovery order.
    pub fn recursive_types(&self) -> impl Iterator<Item = &DiscoveredType> {
        self.types.iter().filter(|discovered| discovered.is_recursive())
    }

    /// Types that need a presence-aware accessor.
    ///
    /// A type qualifies when it is the target of an optional or map-value
    /// field, when it is recursive, or when it is a required field of a type
    /// that already qualifies.
    #[must_use]
    pub fn behind_optional(&self) -> BTreeSet<String> {
        let mut pending: Vec<&str> = Vec::new();
        for discovered in &self.types {
            if discovered.is_recursive() {
                pending.push(&discovered.name);
            }
            for field in &discovered.fields {
                if matches!(
                    field.shape,
                    FieldShape::OptionalCompositeRef | FieldShape::MapOfComposite
                ) {
                    pending.extend(field.target());
                }
            }
        }

        let mut closure = BTreeSet::new();
        while let Some(name) = pending.pop() {
            if !closure.insert(name.to_string()) {
                continue;
            }
            let Some(discovered) = self.get(name) else {
                continue;
            };
            pending.extend(
                discovered
                    .fields
                    .iter()
                    .filter(|field| field.shape == FieldShape::CompositeRef)
                    .filter_map(ClassifiedField::target),
            );
        }
        closure
    }
}

/// Finds every composite reachable from `root`.
///
/// # Errors
///
/// - [`SchemaError::UnknownType`] if `root` or a referenced type is missing.
/// - [`SchemaError::UnsupportedCycle`] for any cycle that is not a direct
///   `Option<Self>` self-reference, with the offending path.
/// - [`SchemaError::UnsupportedShape`] if a reachable field cannot be
///   classified.
pub fn discover(schema: &Schema, root: &str) -> Result<Discovery, SchemaError> {
    let mut walk = Walk {
        schema,
        visited: HashSet::new(),
        path: Vec::new(),
        types: Vec::new(),
    };
    walk.visit(root)?;
    debug!(root, types = walk.types.len(), "schema discovery finished");
    Ok(Discovery { types: walk.types })
}

struct Walk<'a> {
    schema: &'a Schema,
    visited: HashSet<&'a str>,
    path: Vec<&'a str>,
    types: Vec<DiscoveredType>,
}

impl Walk<'_> {
    fn visit(&mut self, name: &str) -> Result<(), SchemaError> {
        let definition = self.schema.resolve(name)?;
        let name = definition.name();
        if !self.visited.insert(name) {
            return Ok(());
        }
        debug!(type_name = name, depth = self.path.len(), "discovered composite");

        let slot = self.types.len();
        self.types.push(DiscoveredType {
            name: name.to_string(),
            fields: Vec::with_capacity(definition.fields().len()),
        });
        self.path.push(name);

        for field in definition.fields() {
            let shape = classify(name, field)?;
            trace!(type_name = name, field = %field.name, %shape, "classified field");
            self.types[slot].fields.push(ClassifiedField {
                field: field.clone(),
                shape,
            });

            let Some(target) = field.ty.referenced_composite() else {
                continue;
            };
            if target == name {
                continue;
            }
            if let Some(start) = self.path.iter().position(|entered| *entered == target) {
                let mut path: Vec<String> =
                    self.path[start..].iter().map(ToString::to_string).collect();
                path.push(target.to_string());
                return Err(SchemaError::UnsupportedCycle { path });
            }
            self.visit(target)?;
        }

        self.path.pop();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CompositeType, TypeRef};

    #[test]
    fn test_diamond_is_expanded_once() {
        let schema: Schema = [
            CompositeType::builder("Root")
                .field("left", TypeRef::composite("Left"))
                .field("right", TypeRef::composite("Right"))
                .build(),
            CompositeType::builder("Left")
                .field("leaf", TypeRef::composite("Leaf"))
                .build(),
            CompositeType::builder("Right")
                .field("leaf", TypeRef::optional(TypeRef::composite("Leaf")))
                .build(),
            CompositeType::builder("Leaf")
                .field("value", TypeRef::scalar("u8"))
                .build(),
        ]
        .into_iter()
        .collect();

        let discovery = discover(&schema, "Root").unwrap();
        let names: Vec<&str> = discovery.types().iter().map(DiscoveredType::name).collect();
        assert_eq!(names, ["Root", "Left", "Leaf", "Right"]);
        assert_eq!(discovery.behind_optional(), BTreeSet::from(["Leaf".to_string()]));
    }
}
