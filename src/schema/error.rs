use thiserror::Error;

/// Failures while discovering or planning accessors for a schema.
///
/// Every variant is fatal for the generation run that produced it: an
/// accessor surface with a silently skipped field would be wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A field's type matches none of the recognised shapes.
    #[error("field `{type_name}.{field}` has unsupported type `{ty}`")]
    UnsupportedShape {
        /// Declaring composite.
        type_name: String,
        /// Offending field.
        field: String,
        /// The field type as Rust source.
        ty: String,
    },

    /// A cycle other than a self-reference through `Option`.
    #[error("unsupported cycle {}", .path.join(" -> "))]
    UnsupportedCycle {
        /// Type names along the cycle, first and last equal.
        path: Vec<String>,
    },

    /// A field refers to a composite that is not registered.
    #[error("unknown composite type `{name}`")]
    UnknownType {
        /// The missing name.
        name: String,
    },

    /// Generation was asked to start from something that is not a composite.
    #[error("`{name}` is not a composite type")]
    NotComposite {
        /// The type as Rust source.
        name: String,
    },

    /// Two accessor units would be emitted under one name.
    #[error("accessor `{name}` would be generated for both `{first}` and `{second}`")]
    NameCollision {
        /// The contested accessor name.
        name: String,
        /// Type that claimed it first.
        first: String,
        /// Type that claimed it second.
        second: String,
    },

    /// A field would be emitted as a method the accessor already defines.
    #[error("field `{type_name}.{field}` clashes with the `{field}` method of `{accessor}`")]
    ReservedField {
        /// Declaring composite.
        type_name: String,
        /// Offending field.
        field: String,
        /// Accessor that carries the method.
        accessor: String,
    },
}
