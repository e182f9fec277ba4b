//! Static schema descriptors for composite types.
//!
//! A schema is a registry of [`CompositeType`] definitions, each an ordered
//! list of named fields whose types are described by [`TypeRef`]. Definitions
//! are built by hand or derived from Rust types through [`Describe`], usually
//! via `#[derive(Schema)]`.
//!
//! Nothing here inspects values at runtime: the description is computed once
//! from static type information and then walked by discovery and planning.
//!
//! # Examples
//!
//! ```
//! use optica::schema::{CompositeType, Schema, TypeRef};
//!
//! let node = CompositeType::builder("Node")
//!     .field("value", TypeRef::scalar("String"))
//!     .field("child", TypeRef::optional(TypeRef::composite("Node")))
//!     .build();
//!
//! let mut schema = Schema::new();
//! assert!(schema.insert(node));
//! assert_eq!(schema.resolve("Node").map(|node| node.fields().len()), Ok(2));
//! ```

mod describe;
mod error;
mod shape;

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use describe::Describe;
pub use error::SchemaError;
pub use shape::{FieldShape, classify};

/// Which standard map a map-typed field uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MapKind {
    /// `std::collections::HashMap`
    Hash,
    /// `std::collections::BTreeMap`
    BTree,
}

/// The declared type of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TypeRef {
    /// A leaf value with no accessors of its own, named as written in Rust.
    Scalar(String),
    /// A reference to a composite type registered in the same schema.
    Composite(String),
    /// `Option<T>`
    Optional(Box<TypeRef>),
    /// `Vec<T>`
    List(Box<TypeRef>),
    /// `Box<T>`, accepted as a field type or directly inside `Option`, where
    /// it is transparent to classification.
    Boxed(Box<TypeRef>),
    /// `HashMap<K, V>` or `BTreeMap<K, V>`
    Map {
        /// Map flavour.
        kind: MapKind,
        /// Key type.
        key: Box<TypeRef>,
        /// Value type.
        value: Box<TypeRef>,
    },
    /// A type outside the recognised shapes, kept so errors can name it.
    Unsupported {
        /// The outer type name.
        name: String,
        /// Type arguments, if any.
        arguments: Vec<TypeRef>,
    },
}

impl TypeRef {
    /// A scalar named `name`.
    pub fn scalar(name: impl Into<String>) -> Self {
        Self::Scalar(name.into())
    }

    /// A reference to the composite type `name`.
    pub fn composite(name: impl Into<String>) -> Self {
        Self::Composite(name.into())
    }

    /// `Option<inner>`.
    #[must_use]
    pub fn optional(inner: Self) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// `Vec<element>`.
    #[must_use]
    pub fn list(element: Self) -> Self {
        Self::List(Box::new(element))
    }

    /// `Box<inner>`.
    #[must_use]
    pub fn boxed(inner: Self) -> Self {
        Self::Boxed(Box::new(inner))
    }

    /// A map of `kind` from `key` to `value`.
    #[must_use]
    pub fn map(kind: MapKind, key: Self, value: Self) -> Self {
        Self::Map {
            kind,
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// An unrecognised type.
    pub fn unsupported(name: impl Into<String>, arguments: Vec<Self>) -> Self {
        Self::Unsupported {
            name: name.into(),
            arguments,
        }
    }

    /// The type with the accepted `Box` layer removed.
    ///
    /// `Box<T>` becomes `T` and `Option<Box<T>>` becomes `Option<T>`; any
    /// other type is returned unchanged.
    #[must_use]
    pub fn unboxed(&self) -> Self {
        match self {
            Self::Boxed(inner) => inner.as_ref().clone(),
            Self::Optional(inner) => match inner.as_ref() {
                Self::Boxed(boxed) => Self::Optional(boxed.clone()),
                _ => self.clone(),
            },
            _ => self.clone(),
        }
    }

    /// The composite this type refers to, looking through one optional, list
    /// or map-value layer and one `Box`.
    ///
    /// Keys and nested containers are not looked through: those shapes are
    /// rejected by [`classify`] anyway.
    pub fn referenced_composite(&self) -> Option<&str> {
        match self.peel() {
            Self::Optional(inner) | Self::List(inner) => inner.direct_composite(),
            Self::Map { value, .. } => value.direct_composite(),
            other => other.direct_composite(),
        }
    }

    fn direct_composite(&self) -> Option<&str> {
        match self.peel() {
            Self::Composite(name) => Some(name),
            _ => None,
        }
    }

    fn peel(&self) -> &Self {
        match self {
            Self::Boxed(inner) => inner,
            other => other,
        }
    }
}

/// Renders the type as Rust source.
impl fmt::Display for TypeRef {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(name) | Self::Composite(name) => formatter.write_str(name),
            Self::Optional(inner) => write!(formatter, "::core::option::Option<{inner}>"),
            Self::List(element) => write!(formatter, "::std::vec::Vec<{element}>"),
            Self::Boxed(inner) => write!(formatter, "::std::boxed::Box<{inner}>"),
            Self::Map { kind, key, value } => {
                let path = match kind {
                    MapKind::Hash => "::std::collections::HashMap",
                    MapKind::BTree => "::std::collections::BTreeMap",
                };
                write!(formatter, "{path}<{key}, {value}>")
            }
            Self::Unsupported { name, arguments } => {
                formatter.write_str(name)?;
                if let Some((first, rest)) = arguments.split_first() {
                    write!(formatter, "<{first}")?;
                    for argument in rest {
                        write!(formatter, ", {argument}")?;
                    }
                    formatter.write_str(">")?;
                }
                Ok(())
            }
        }
    }
}

/// One named field of a composite type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Field {
    /// Field name as written in Rust.
    pub name: String,
    /// Declared type.
    pub ty: TypeRef,
}

impl Field {
    /// Creates a field.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A named aggregate of ordered fields.
///
/// Identity is the name: a schema holds at most one definition per name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompositeType {
    name: String,
    fields: Vec<Field>,
}

impl CompositeType {
    /// Creates a definition from its fields, in declaration order.
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Starts building a definition field by field.
    pub fn builder(name: impl Into<String>) -> CompositeTypeBuilder {
        CompositeTypeBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// The type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks a field up by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Builder returned by [`CompositeType::builder`].
#[derive(Debug, Clone)]
pub struct CompositeTypeBuilder {
    name: String,
    fields: Vec<Field>,
}

impl CompositeTypeBuilder {
    /// Appends a field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.fields.push(Field::new(name, ty));
        self
    }

    /// Finishes the definition.
    #[must_use]
    pub fn build(self) -> CompositeType {
        CompositeType::new(self.name, self.fields)
    }
}

/// A registry of composite type definitions, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Schema {
    types: BTreeMap<String, CompositeType>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the schema of `T` and every composite it reaches.
    ///
    /// ```
    /// use optica::schema::{Describe, Schema, TypeRef};
    ///
    /// let schema = Schema::of::<Vec<Option<String>>>();
    /// assert!(schema.is_empty());
    /// assert_eq!(
    ///     <Option<u8> as Describe>::type_ref(),
    ///     TypeRef::optional(TypeRef::scalar("u8"))
    /// );
    /// ```
    #[must_use]
    pub fn of<T: Describe + ?Sized>() -> Self {
        let mut schema = Self::new();
        T::register(&mut schema);
        schema
    }

    /// Adds a definition.
    ///
    /// Returns `false`, keeping the existing entry, if the name is already
    /// registered. Derived registration relies on this to stop on cycles.
    pub fn insert(&mut self, definition: CompositeType) -> bool {
        if self.types.contains_key(definition.name()) {
            return false;
        }
        self.types.insert(definition.name.clone(), definition);
        true
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Looks a definition up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CompositeType> {
        self.types.get(name)
    }

    /// Looks a definition up by name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownType`] if `name` is not registered.
    pub fn resolve(&self, name: &str) -> Result<&CompositeType, SchemaError> {
        self.get(name).ok_or_else(|| SchemaError::UnknownType {
            name: name.to_string(),
        })
    }

    /// Number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no definition is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterates the definitions in name order.
    pub fn types(&self) -> impl Iterator<Item = &CompositeType> {
        self.types.values()
    }
}

impl FromIterator<CompositeType> for Schema {
    fn from_iter<I: IntoIterator<Item = CompositeType>>(iter: I) -> Self {
        let mut schema = Self::new();
        schema.extend(iter);
        schema
    }
}

impl Extend<CompositeType> for Schema {
    fn extend<I: IntoIterator<Item = CompositeType>>(&mut self, iter: I) {
        for definition in iter {
            self.insert(definition);
        }
    }
}
