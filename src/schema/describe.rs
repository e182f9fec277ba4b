//! Static type descriptions.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use super::{MapKind, Schema, TypeRef};

/// A Rust type that can describe itself as a [`TypeRef`].
///
/// Scalars and standard containers are covered here. Structs implement it
/// through `#[derive(Schema)]`, which also registers their definition.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use optica::schema::{Describe, MapKind, TypeRef};
///
/// assert_eq!(
///     <HashMap<String, Vec<u32>> as Describe>::type_ref(),
///     TypeRef::map(
///         MapKind::Hash,
///         TypeRef::scalar("String"),
///         TypeRef::list(TypeRef::scalar("u32")),
///     )
/// );
/// ```
pub trait Describe {
    /// How a field of this type is declared.
    fn type_ref() -> TypeRef;

    /// Adds every composite definition this type reaches to `schema`.
    ///
    /// Scalars register nothing.
    fn register(schema: &mut Schema) {
        let _ = schema;
    }
}

macro_rules! describe_scalar {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Describe for $ty {
                fn type_ref() -> TypeRef {
                    TypeRef::scalar(stringify!($ty))
                }
            }
        )+
    };
}

describe_scalar!(
    bool, char, String, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
);

impl<T: Describe> Describe for Option<T> {
    fn type_ref() -> TypeRef {
        TypeRef::optional(T::type_ref())
    }

    fn register(schema: &mut Schema) {
        T::register(schema);
    }
}

impl<T: Describe> Describe for Box<T> {
    fn type_ref() -> TypeRef {
        TypeRef::boxed(T::type_ref())
    }

    fn register(schema: &mut Schema) {
        T::register(schema);
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn type_ref() -> TypeRef {
        TypeRef::list(T::type_ref())
    }

    fn register(schema: &mut Schema) {
        T::register(schema);
    }
}

impl<K: Describe, V: Describe> Describe for HashMap<K, V> {
    fn type_ref() -> TypeRef {
        TypeRef::map(MapKind::Hash, K::type_ref(), V::type_ref())
    }

    fn register(schema: &mut Schema) {
        K::register(schema);
        V::register(schema);
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn type_ref() -> TypeRef {
        TypeRef::map(MapKind::BTree, K::type_ref(), V::type_ref())
    }

    fn register(schema: &mut Schema) {
        K::register(schema);
        V::register(schema);
    }
}

// Containers with no accessor shape. They describe themselves so that
// classification can reject the field by name.
macro_rules! describe_unsupported {
    ($($container:ident),+ $(,)?) => {
        $(
            impl<T: Describe> Describe for $container<T> {
                fn type_ref() -> TypeRef {
                    TypeRef::unsupported(stringify!($container), vec![T::type_ref()])
                }

                fn register(schema: &mut Schema) {
                    T::register(schema);
                }
            }
        )+
    };
}

describe_unsupported!(HashSet, BTreeSet, VecDeque);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars_use_their_rust_names() {
        assert_eq!(<u64 as Describe>::type_ref(), TypeRef::scalar("u64"));
        assert_eq!(<String as Describe>::type_ref(), TypeRef::scalar("String"));
    }

    #[test]
    fn test_unsupported_container_keeps_its_argument() {
        assert_eq!(
            <HashSet<i32> as Describe>::type_ref(),
            TypeRef::unsupported("HashSet", vec![TypeRef::scalar("i32")])
        );
    }
}
