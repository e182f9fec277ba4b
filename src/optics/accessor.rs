//! Accessor objects: bundles of composed lenses with a nested-call surface.
//!
//! A generated accessor for a composite `T` is a plain struct holding one
//! [`BoxedLens`] from the root `S` to `T`. Its methods hand out the lenses, or
//! deeper accessor objects, for `T`'s fields. Every accessor is built by one of
//! the combinators below:
//!
//! | Field                   | Combinator          |
//! |-------------------------|---------------------|
//! | composite               | [`record`]          |
//! | optional composite      | [`optional_record`] |
//! | `Vec` of composites     | [`record_sequence`] |
//! | map of composites       | [`record_map`]      |
//!
//! A type behind an optional gets an accessor implementing
//! [`OptionalAccessor`]. A recursive type gets one accessor implementing both
//! traits: [`Accessor::from_lens`] anchors it at a required field and
//! [`OptionalAccessor::from_optional`] is used for every deeper `child()`.
//!
//! # Examples
//!
//! ```
//! use optica::optics::{Accessor, BoxedLens, Lens, Lensed, record};
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Address { city: String }
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Person { address: Address }
//!
//! struct AddressAccessor<S> { lens: BoxedLens<S, Address> }
//!
//! impl<S: 'static> Accessor<S, Address> for AddressAccessor<S> {
//!     fn from_lens(lens: BoxedLens<S, Address>) -> Self { Self { lens } }
//! }
//!
//! impl<S: 'static> AddressAccessor<S> {
//!     fn city(&self) -> BoxedLens<S, String> {
//!         self.lens.field(|address: &Address| address.city.clone(), |_address, city| Address { city })
//!     }
//! }
//!
//! struct PersonAccessor<S> { lens: BoxedLens<S, Person> }
//!
//! impl<S: 'static> Accessor<S, Person> for PersonAccessor<S> {
//!     fn from_lens(lens: BoxedLens<S, Person>) -> Self { Self { lens } }
//! }
//!
//! impl<S: 'static> PersonAccessor<S> {
//!     fn address(&self) -> AddressAccessor<S> {
//!         record(&self.lens, |person: &Person| person.address.clone(), |_person, address| Person { address })
//!     }
//! }
//!
//! impl Lensed for Person {
//!     type Accessor = PersonAccessor<Person>;
//! }
//!
//! let person = Person { address: Address { city: "Lyon".to_string() } };
//! let moved = person.clone().set_with(Person::lenses().address().city(), "Nantes".to_string());
//!
//! assert_eq!(moved.address.city, "Nantes");
//! assert_eq!(person.address.city, "Lyon");
//! ```

use super::collection::{Keyed, MapLens, MapOf, SeqLens, SeqOf};
use super::lens::{BoxedLens, Lens};
use super::optional::OptionalLens;
use crate::mutation::{BoundMutations, Mutations};

/// An accessor object rooted at `S` and focused on a required `T`.
pub trait Accessor<S, T>: Sized {
    /// Builds the accessor from a lens onto its focus.
    fn from_lens(lens: BoxedLens<S, T>) -> Self;
}

/// An accessor object rooted at `S` and focused on a `T` that may be absent.
pub trait OptionalAccessor<S, T>: Sized {
    /// Builds the accessor from a lens onto the optional focus.
    fn from_optional(lens: OptionalLens<S, T>) -> Self;
}

impl<S, T> Accessor<S, T> for BoxedLens<S, T> {
    fn from_lens(lens: BoxedLens<S, T>) -> Self {
        lens
    }
}

impl<S, T> OptionalAccessor<S, T> for OptionalLens<S, T> {
    fn from_optional(lens: Self) -> Self {
        lens
    }
}

/// A root composite with a generated accessor surface.
///
/// Implementors only name their accessor; the entry points are provided.
pub trait Lensed: Sized + Clone + 'static {
    /// The accessor object for `Self`, rooted at `Self`.
    type Accessor: Accessor<Self, Self>;

    /// The root accessor, built on the identity lens.
    fn lenses() -> Self::Accessor {
        Self::Accessor::from_lens(BoxedLens::identity())
    }

    /// Starts a bound mutation batch on this value.
    fn on(self) -> BoundMutations<Self> {
        Mutations::for_value(self)
    }

    /// Applies one `set` immediately.
    fn set_with<A, L>(self, lens: L, value: A) -> Self
    where
        L: Lens<Self, A>,
    {
        lens.set(self, value)
    }

    /// Applies one `modify` immediately.
    fn modify_with<A, L, F>(self, lens: L, function: F) -> Self
    where
        L: Lens<Self, A>,
        F: FnOnce(A) -> A,
    {
        lens.modify(self, function)
    }
}

/// Nested accessor for a required composite field of `P`.
pub fn record<S, P, T, C, G, St>(parent: &BoxedLens<S, P>, getter: G, setter: St) -> C
where
    S: 'static,
    P: 'static,
    T: 'static,
    C: Accessor<S, T>,
    G: Fn(&P) -> T + Send + Sync + 'static,
    St: Fn(P, T) -> P + Send + Sync + 'static,
{
    C::from_lens(parent.field(getter, setter))
}

/// Nested accessor for an optional composite field of `P`.
pub fn optional_record<S, P, T, C, G, St>(parent: &BoxedLens<S, P>, getter: G, setter: St) -> C
where
    S: 'static,
    P: 'static,
    T: 'static,
    C: OptionalAccessor<S, T>,
    G: Fn(&P) -> Option<T> + Send + Sync + 'static,
    St: Fn(P, Option<T>) -> P + Send + Sync + 'static,
{
    C::from_optional(OptionalLens::new(parent.field(getter, setter)))
}

/// Sequence adapter for a `Vec` field of scalars.
pub fn sequence<S, P, T, G, St>(parent: &BoxedLens<S, P>, getter: G, setter: St) -> SeqLens<S, T>
where
    S: 'static,
    P: 'static,
    T: Clone + 'static,
    G: Fn(&P) -> Vec<T> + Send + Sync + 'static,
    St: Fn(P, Vec<T>) -> P + Send + Sync + 'static,
{
    SeqLens::new(parent.field(getter, setter))
}

/// Sequence adapter for a `Vec` field of composites with accessor `C`.
pub fn record_sequence<S, P, T, C, G, St>(
    parent: &BoxedLens<S, P>,
    getter: G,
    setter: St,
) -> SeqOf<S, T, C>
where
    S: 'static,
    P: 'static,
    T: Clone + 'static,
    C: Accessor<S, T>,
    G: Fn(&P) -> Vec<T> + Send + Sync + 'static,
    St: Fn(P, Vec<T>) -> P + Send + Sync + 'static,
{
    SeqOf::new(parent.field(getter, setter))
}

/// Map adapter for a map field of scalars.
pub fn map<S, P, M, G, St>(parent: &BoxedLens<S, P>, getter: G, setter: St) -> MapLens<S, M>
where
    S: 'static,
    P: 'static,
    M: Keyed + 'static,
    M::Key: Clone + Send + Sync + 'static,
    M::Value: Clone + 'static,
    G: Fn(&P) -> M + Send + Sync + 'static,
    St: Fn(P, M) -> P + Send + Sync + 'static,
{
    MapLens::new(parent.field(getter, setter))
}

/// Map adapter for a map field of composites with presence-aware accessor `C`.
pub fn record_map<S, P, M, C, G, St>(
    parent: &BoxedLens<S, P>,
    getter: G,
    setter: St,
) -> MapOf<S, M, C>
where
    S: 'static,
    P: 'static,
    M: Keyed + 'static,
    M::Key: Clone + Send + Sync + 'static,
    M::Value: Clone + 'static,
    C: OptionalAccessor<S, M::Value>,
    G: Fn(&P) -> M + Send + Sync + 'static,
    St: Fn(P, M) -> P + Send + Sync + 'static,
{
    MapOf::new(parent.field(getter, setter))
}
