//! Field shape classification.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Field, SchemaError, TypeRef};

/// The structural pattern of a field, which alone decides what accessor is
/// generated for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FieldShape {
    /// `T` where `T` is a scalar.
    Scalar,
    /// `Option<T>` where `T` is a scalar.
    OptionalScalar,
    /// A composite other than the declaring type.
    CompositeRef,
    /// `Option<C>` where `C` is a composite other than the declaring type.
    OptionalCompositeRef,
    /// `Vec<T>` of scalars.
    ListOfScalar,
    /// `Vec<C>` of composites.
    ListOfComposite,
    /// Map from a scalar key to scalar values.
    MapOfScalar,
    /// Map from a scalar key to composite values.
    MapOfComposite,
    /// `Option<Self>`: the declaring type referring to itself.
    RecursiveOptionalSelfRef,
}

impl FieldShape {
    /// Whether a field of this shape reaches another composite accessor.
    #[must_use]
    pub const fn is_composite(self) -> bool {
        matches!(
            self,
            Self::CompositeRef
                | Self::OptionalCompositeRef
                | Self::ListOfComposite
                | Self::MapOfComposite
                | Self::RecursiveOptionalSelfRef
        )
    }

    /// Short name used in logs and error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::OptionalScalar => "optional scalar",
            Self::CompositeRef => "composite",
            Self::OptionalCompositeRef => "optional composite",
            Self::ListOfScalar => "list of scalars",
            Self::ListOfComposite => "list of composites",
            Self::MapOfScalar => "map of scalars",
            Self::MapOfComposite => "map of composites",
            Self::RecursiveOptionalSelfRef => "optional self-reference",
        }
    }
}

impl fmt::Display for FieldShape {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Classifies `field` of the composite named `declaring`.
///
/// # Errors
///
/// - [`SchemaError::UnsupportedShape`] for unrecognised containers, nested
///   containers (`Vec<Option<T>>`, `Option<Vec<T>>`, ...), maps whose key
///   is not a scalar, and `Box` anywhere but the field itself or directly
///   inside its `Option`.
/// - [`SchemaError::UnsupportedCycle`] when the declaring type refers to
///   itself other than through `Option`.
///
/// # Example
///
/// ```
/// use optica::schema::{classify, Field, FieldShape, TypeRef};
///
/// let child = Field::new("child", TypeRef::optional(TypeRef::composite("Node")));
/// assert_eq!(classify("Node", &child), Ok(FieldShape::RecursiveOptionalSelfRef));
/// assert_eq!(classify("Tree", &child), Ok(FieldShape::OptionalCompositeRef));
/// ```
pub fn classify(declaring: &str, field: &Field) -> Result<FieldShape, SchemaError> {
    let unsupported = || SchemaError::UnsupportedShape {
        type_name: declaring.to_string(),
        field: field.name.clone(),
        ty: field.ty.to_string(),
    };
    let self_cycle = || SchemaError::UnsupportedCycle {
        path: vec![declaring.to_string(), declaring.to_string()],
    };

    match &field.ty.unboxed() {
        TypeRef::Scalar(_) => Ok(FieldShape::Scalar),
        TypeRef::Composite(name) if name == declaring => Err(self_cycle()),
        TypeRef::Composite(_) => Ok(FieldShape::CompositeRef),
        TypeRef::Optional(inner) => match inner.as_ref() {
            TypeRef::Scalar(_) => Ok(FieldShape::OptionalScalar),
            TypeRef::Composite(name) if name == declaring => {
                Ok(FieldShape::RecursiveOptionalSelfRef)
            }
            TypeRef::Composite(_) => Ok(FieldShape::OptionalCompositeRef),
            _ => Err(unsupported()),
        },
        TypeRef::List(element) => match element.as_ref() {
            TypeRef::Scalar(_) => Ok(FieldShape::ListOfScalar),
            TypeRef::Composite(name) if name == declaring => Err(self_cycle()),
            TypeRef::Composite(_) => Ok(FieldShape::ListOfComposite),
            _ => Err(unsupported()),
        },
        TypeRef::Map { key, value, .. } => {
            if !matches!(key.as_ref(), TypeRef::Scalar(_)) {
                return Err(unsupported());
            }
            match value.as_ref() {
                TypeRef::Scalar(_) => Ok(FieldShape::MapOfScalar),
                TypeRef::Composite(name) if name == declaring => Err(self_cycle()),
                TypeRef::Composite(_) => Ok(FieldShape::MapOfComposite),
                _ => Err(unsupported()),
            }
        }
        TypeRef::Boxed(_) | TypeRef::Unsupported { .. } => Err(unsupported()),
    }
}
