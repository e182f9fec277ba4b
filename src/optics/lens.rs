//! Lens optics for focusing on one part of an immutable value.
//!
//! A Lens is a getter paired with a copy-on-write setter. Lenses compose, so a
//! chain of field lenses reaches arbitrarily deep into nested values.
//!
//! Sources are taken by value in [`Lens::set`]: a caller that wants to keep the
//! original clones it first, and the original can never be observed changing.
//!
//! # Laws
//!
//! Every Lens must satisfy three laws:
//!
//! 1. **GetPut Law**: Getting and setting back yields the original.
//!    ```text
//!    lens.set(source.clone(), lens.get(&source)) == source
//!    ```
//!
//! 2. **PutGet Law**: Setting then getting yields the set value.
//!    ```text
//!    lens.get(&lens.set(source, value.clone())) == value
//!    ```
//!
//! 3. **PutPut Law**: Two consecutive sets is equivalent to the last set.
//!    ```text
//!    lens.set(lens.set(source, v1), v2) == lens.set(source, v2)
//!    ```
//!
//! # Examples
//!
//! ```
//! use optica::optics::Lens;
//! use optica::lens;
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Point { x: i32, y: i32 }
//!
//! let x_lens = lens!(Point, x);
//!
//! let point = Point { x: 10, y: 20 };
//! assert_eq!(x_lens.get(&point), 10);
//!
//! let updated = x_lens.set(point, 100);
//! assert_eq!(updated.x, 100);
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

/// A Lens focuses on a single part of a larger structure.
///
/// # Type Parameters
///
/// - `S`: The source type (the whole structure)
/// - `A`: The focused type
///
/// # Laws
///
/// 1. **GetPut Law**: `lens.set(source.clone(), lens.get(&source)) == source`
/// 2. **PutGet Law**: `lens.get(&lens.set(source, value.clone())) == value`
/// 3. **PutPut Law**: `lens.set(lens.set(source, v1), v2) == lens.set(source, v2)`
pub trait Lens<S, A> {
    /// Reads the focused value out of `source`.
    fn get(&self, source: &S) -> A;

    /// Replaces the focused value, returning a new source.
    ///
    /// # Arguments
    ///
    /// * `source` - The source structure (consumed)
    /// * `value` - The new value for the focus
    fn set(&self, source: S, value: A) -> S;

    /// Modifies the focused value by applying a function.
    ///
    /// Equivalent to `set(source, function(get(&source)))`.
    ///
    /// # Example
    ///
    /// ```
    /// use optica::optics::Lens;
    /// use optica::lens;
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Point { x: i32, y: i32 }
    ///
    /// let x_lens = lens!(Point, x);
    /// let doubled = x_lens.modify(Point { x: 10, y: 20 }, |x| x * 2);
    /// assert_eq!(doubled.x, 20);
    /// ```
    fn modify<F>(&self, source: S, function: F) -> S
    where
        Self: Sized,
        F: FnOnce(A) -> A,
    {
        let current = self.get(&source);
        self.set(source, function(current))
    }

    /// Composes this lens with another lens to focus on a nested part.
    ///
    /// The composed getter is `other.get(self.get(s))`; the composed setter
    /// modifies the intermediate value through `self`.
    ///
    /// # Example
    ///
    /// ```
    /// use optica::optics::Lens;
    /// use optica::lens;
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Address { street: String, city: String }
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Person { name: String, address: Address }
    ///
    /// let person_street = lens!(Person, address).compose(lens!(Address, street));
    ///
    /// let person = Person {
    ///     name: "Alice".to_string(),
    ///     address: Address { street: "Main St".to_string(), city: "Tokyo".to_string() },
    /// };
    /// assert_eq!(person_street.get(&person), "Main St");
    /// ```
    fn compose<B, L>(self, other: L) -> ComposedLens<Self, L, A>
    where
        Self: Sized,
        L: Lens<A, B>,
    {
        ComposedLens::new(self, other)
    }

    /// Erases the concrete lens type behind a shared, clonable handle.
    fn boxed(self) -> BoxedLens<S, A>
    where
        Self: Sized + Send + Sync + 'static,
        S: 'static,
        A: 'static,
    {
        BoxedLens::from_lens(self)
    }
}

impl<S, A, L> Lens<S, A> for &L
where
    L: Lens<S, A> + ?Sized,
{
    fn get(&self, source: &S) -> A {
        (**self).get(source)
    }

    fn set(&self, source: S, value: A) -> S {
        (**self).set(source, value)
    }
}

/// A lens implemented using getter and setter functions.
///
/// This is the most common way to create a lens. The `lens!` macro
/// generates a `FunctionLens` internally.
///
/// # Example
///
/// ```
/// use optica::optics::{Lens, FunctionLens};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let x_lens = FunctionLens::new(
///     |point: &Point| point.x,
///     |point: Point, x: i32| Point { x, ..point },
/// );
///
/// let point = Point { x: 10, y: 20 };
/// assert_eq!(x_lens.get(&point), 10);
/// ```
pub struct FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> A,
    St: Fn(S, A) -> S,
{
    getter: G,
    setter: St,
    _marker: PhantomData<fn(S) -> (S, A)>,
}

impl<S, A, G, St> FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> A,
    St: Fn(S, A) -> S,
{
    /// Creates a new `FunctionLens` from a getter and setter.
    #[must_use]
    pub const fn new(getter: G, setter: St) -> Self {
        Self {
            getter,
            setter,
            _marker: PhantomData,
        }
    }
}

impl<S, A, G, St> Lens<S, A> for FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> A,
    St: Fn(S, A) -> S,
{
    fn get(&self, source: &S) -> A {
        (self.getter)(source)
    }

    fn set(&self, source: S, value: A) -> S {
        (self.setter)(source, value)
    }
}

impl<S, A, G, St> Clone for FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> A + Clone,
    St: Fn(S, A) -> S + Clone,
{
    fn clone(&self) -> Self {
        Self {
            getter: self.getter.clone(),
            setter: self.setter.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S, A, G, St> std::fmt::Debug for FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> A,
    St: Fn(S, A) -> S,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FunctionLens")
            .finish_non_exhaustive()
    }
}

/// A lens composed of two lenses.
///
/// # Type Parameters
///
/// - `L1`: The outer lens
/// - `L2`: The inner lens
/// - `A`: The intermediate type (target of L1, source of L2)
pub struct ComposedLens<L1, L2, A> {
    first: L1,
    second: L2,
    _marker: PhantomData<fn() -> A>,
}

impl<L1, L2, A> ComposedLens<L1, L2, A> {
    /// Creates a new composed lens.
    #[must_use]
    pub const fn new(first: L1, second: L2) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }
}

impl<S, A, B, L1, L2> Lens<S, B> for ComposedLens<L1, L2, A>
where
    L1: Lens<S, A>,
    L2: Lens<A, B>,
{
    fn get(&self, source: &S) -> B {
        self.second.get(&self.first.get(source))
    }

    fn set(&self, source: S, value: B) -> S {
        let intermediate = self.first.get(&source);
        let updated = self.second.set(intermediate, value);
        self.first.set(source, updated)
    }
}

impl<L1: Clone, L2: Clone, A> Clone for ComposedLens<L1, L2, A> {
    fn clone(&self) -> Self {
        Self {
            first: self.first.clone(),
            second: self.second.clone(),
            _marker: PhantomData,
        }
    }
}

impl<L1: std::fmt::Debug, L2: std::fmt::Debug, A> std::fmt::Debug for ComposedLens<L1, L2, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ComposedLens")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

/// The identity lens: focuses on the whole source.
///
/// Composing with it on either side is a no-op.
pub struct IdentityLens<S> {
    _marker: PhantomData<fn(S) -> S>,
}

impl<S> IdentityLens<S> {
    /// Creates the identity lens for `S`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<S> Default for IdentityLens<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for IdentityLens<S> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<S> std::fmt::Debug for IdentityLens<S> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("IdentityLens")
    }
}

impl<S: Clone> Lens<S, S> for IdentityLens<S> {
    fn get(&self, source: &S) -> S {
        source.clone()
    }

    fn set(&self, _source: S, value: S) -> S {
        value
    }
}

/// A type-erased lens behind an [`Arc`].
///
/// Accessor objects store their lenses as `BoxedLens` so that deeply composed
/// chains keep a nameable type. Cloning is a reference-count increment.
///
/// # Example
///
/// ```
/// use optica::optics::{BoxedLens, Lens};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Inner { value: i32 }
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Outer { inner: Inner }
///
/// let inner = BoxedLens::new(
///     |outer: &Outer| outer.inner.clone(),
///     |outer: Outer, inner: Inner| Outer { inner, ..outer },
/// );
/// let value = inner.field(|inner: &Inner| inner.value, |_inner, value| Inner { value });
///
/// let data = Outer { inner: Inner { value: 1 } };
/// assert_eq!(value.set(data, 7), Outer { inner: Inner { value: 7 } });
/// ```
pub struct BoxedLens<S, A> {
    inner: Arc<dyn Lens<S, A> + Send + Sync>,
}

impl<S: 'static, A: 'static> BoxedLens<S, A> {
    /// Creates a boxed lens from a getter and setter (`Lens.of`).
    #[must_use]
    pub fn new<G, St>(getter: G, setter: St) -> Self
    where
        G: Fn(&S) -> A + Send + Sync + 'static,
        St: Fn(S, A) -> S + Send + Sync + 'static,
    {
        Self::from_lens(FunctionLens::new(getter, setter))
    }

    /// Boxes an existing lens.
    #[must_use]
    pub fn from_lens<L>(lens: L) -> Self
    where
        L: Lens<S, A> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(lens),
        }
    }

    /// Composes a projection of `A` onto this lens, producing a boxed lens on
    /// the projected part.
    #[must_use]
    pub fn field<B, G, St>(&self, getter: G, setter: St) -> BoxedLens<S, B>
    where
        B: 'static,
        G: Fn(&A) -> B + Send + Sync + 'static,
        St: Fn(A, B) -> A + Send + Sync + 'static,
    {
        self.then(FunctionLens::new(getter, setter))
    }

    /// Composes another lens onto this one and boxes the result.
    #[must_use]
    pub fn then<B, L>(&self, other: L) -> BoxedLens<S, B>
    where
        B: 'static,
        L: Lens<A, B> + Send + Sync + 'static,
    {
        BoxedLens::from_lens(self.clone().compose(other))
    }
}

impl<S: Clone + 'static> BoxedLens<S, S> {
    /// The boxed identity lens, the starting point of every accessor chain.
    #[must_use]
    pub fn identity() -> Self {
        Self::from_lens(IdentityLens::new())
    }
}

impl<S, A> Lens<S, A> for BoxedLens<S, A> {
    fn get(&self, source: &S) -> A {
        self.inner.get(source)
    }

    fn set(&self, source: S, value: A) -> S {
        self.inner.set(source, value)
    }
}

impl<S, A> Clone for BoxedLens<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, A> std::fmt::Debug for BoxedLens<S, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("BoxedLens").finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(BoxedLens<std::rc::Rc<String>, Vec<u8>>: Send, Sync, Clone);

/// Creates a lens for a struct field.
///
/// The getter clones the field; the setter moves the new value in and returns
/// the updated struct.
///
/// # Syntax
///
/// ```text
/// lens!(StructType, field_name)
/// ```
///
/// # Example
///
/// ```
/// use optica::optics::Lens;
/// use optica::lens;
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let x_lens = lens!(Point, x);
/// let point = Point { x: 10, y: 20 };
///
/// assert_eq!(x_lens.get(&point), 10);
/// assert_eq!(x_lens.set(point, 100), Point { x: 100, y: 20 });
/// ```
#[macro_export]
macro_rules! lens {
    ($struct_type:ident, $field:ident) => {
        $crate::optics::FunctionLens::new(
            |source: &$struct_type| ::core::clone::Clone::clone(&source.$field),
            |mut source: $struct_type, value| {
                source.$field = value;
                source
            },
        )
    };
    ($struct_type:ident < $($generic:tt),+ >, $field:ident) => {
        $crate::optics::FunctionLens::new(
            |source: &$struct_type<$($generic),+>| ::core::clone::Clone::clone(&source.$field),
            |mut source: $struct_type<$($generic),+>, value| {
                source.$field = value;
                source
            },
        )
    };
    ($struct_type:path, $field:ident) => {
        $crate::optics::FunctionLens::new(
            |source: &$struct_type| ::core::clone::Clone::clone(&source.$field),
            |mut source: $struct_type, value| {
                source.$field = value;
                source
            },
        )
    };
}
