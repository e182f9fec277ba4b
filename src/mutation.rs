//! Ordered batches of lens updates.
//!
//! A mutation batch records `set` and `modify` operations and folds them over
//! a starting value in insertion order. Operations are only ever appended.
//!
//! - [`Mutations`] is unbound and reusable: it is applied to an explicit value
//!   as many times as needed.
//! - [`BoundMutations`] carries its own starting value and is consumed by
//!   [`BoundMutations::apply`].
//!
//! Anything implementing [`Lens`] can drive a batch, including generated
//! accessor objects.
//!
//! # Examples
//!
//! ```
//! use optica::mutation::Mutations;
//! use optica::lens;
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Counter { value: i32 }
//!
//! let value = lens!(Counter, value);
//!
//! let set_then_modify = Mutations::for_value(Counter { value: 5 })
//!     .set(value.clone(), 10)
//!     .modify(value.clone(), |x| x + 1)
//!     .apply();
//! assert_eq!(set_then_modify.value, 11);
//!
//! let modify_then_set = Mutations::for_value(Counter { value: 5 })
//!     .modify(value.clone(), |x| x + 1)
//!     .set(value, 10)
//!     .apply();
//! assert_eq!(modify_then_set.value, 10);
//! ```

use crate::optics::Lens;

type Operation<S> = Box<dyn Fn(S) -> S>;
type OnceOperation<S> = Box<dyn FnOnce(S) -> S>;

/// A reusable, unbound batch of lens operations on `S`.
///
/// Recorded values are cloned on every [`Mutations::apply`], so the same batch
/// can be applied to many starting values.
pub struct Mutations<S> {
    operations: Vec<Operation<S>>,
}

impl<S: 'static> Mutations<S> {
    /// Starts an empty unbound batch.
    #[must_use]
    pub fn for_type() -> Self {
        Self {
            operations: Vec::new(),
        }
    }

    /// Starts a batch bound to `value`.
    #[must_use]
    pub fn for_value(value: S) -> BoundMutations<S> {
        BoundMutations::new(value)
    }

    /// Records a `set` of the lens focus to `value`.
    #[must_use]
    pub fn set<A, L>(mut self, lens: L, value: A) -> Self
    where
        A: Clone + 'static,
        L: Lens<S, A> + 'static,
    {
        self.operations
            .push(Box::new(move |source| lens.set(source, value.clone())));
        self
    }

    /// Records a `modify` of the lens focus with `function`.
    #[must_use]
    pub fn modify<A, L, F>(mut self, lens: L, function: F) -> Self
    where
        L: Lens<S, A> + 'static,
        F: Fn(A) -> A + 'static,
    {
        self.operations
            .push(Box::new(move |source| lens.modify(source, &function)));
        self
    }

    /// Number of recorded operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether no operation has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Folds the recorded operations over `source`, first to last.
    pub fn apply(&self, source: S) -> S {
        self.operations
            .iter()
            .fold(source, |current, operation| operation(current))
    }
}

impl<S: 'static> Default for Mutations<S> {
    fn default() -> Self {
        Self::for_type()
    }
}

impl<S> std::fmt::Debug for Mutations<S> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Mutations")
            .field("operations", &self.operations.len())
            .finish()
    }
}

/// A batch of lens operations bound to its starting value.
pub struct BoundMutations<S> {
    current: S,
    operations: Vec<OnceOperation<S>>,
}

impl<S: 'static> BoundMutations<S> {
    fn new(current: S) -> Self {
        Self {
            current,
            operations: Vec::new(),
        }
    }

    /// Records a `set` of the lens focus to `value`.
    #[must_use]
    pub fn set<A, L>(mut self, lens: L, value: A) -> Self
    where
        A: 'static,
        L: Lens<S, A> + 'static,
    {
        self.operations
            .push(Box::new(move |source| lens.set(source, value)));
        self
    }

    /// Records a `modify` of the lens focus with `function`.
    #[must_use]
    pub fn modify<A, L, F>(mut self, lens: L, function: F) -> Self
    where
        L: Lens<S, A> + 'static,
        F: FnOnce(A) -> A + 'static,
    {
        self.operations
            .push(Box::new(move |source| lens.modify(source, function)));
        self
    }

    /// Number of recorded operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether no operation has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Folds the recorded operations over the bound value, first to last.
    pub fn apply(self) -> S {
        self.operations
            .into_iter()
            .fold(self.current, |current, operation| operation(current))
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for BoundMutations<S> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("BoundMutations")
            .field("current", &self.current)
            .field("operations", &self.operations.len())
            .finish()
    }
}
