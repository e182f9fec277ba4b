//! Lenses into sequences and keyed maps.
//!
//! [`IndexLens`] focuses one element of a `Vec` by position and [`KeyLens`]
//! focuses one entry of a map by key. The adapters ([`SeqLens`], [`SeqOf`],
//! [`MapLens`], [`MapOf`]) sit on top of a lens onto the whole collection and
//! hand out further lenses, or nested accessor objects, for single elements.
//!
//! # Examples
//!
//! ```
//! use optica::optics::{IndexLens, Lens};
//!
//! let list = vec!["a", "b", "c"];
//! let updated = IndexLens::new(1).set(list.clone(), "x");
//!
//! assert_eq!(updated, vec!["a", "x", "c"]);
//! assert_eq!(list, vec!["a", "b", "c"]);
//! ```
//!
//! Map writes are upserts:
//!
//! ```
//! use std::collections::HashMap;
//! use optica::optics::{KeyLens, Lens};
//!
//! let map: HashMap<String, i32> = HashMap::from([("a".to_string(), 1)]);
//! let lens = KeyLens::new("missing".to_string());
//!
//! assert_eq!(lens.get(&map), None);
//! let updated = lens.set(map, Some(2));
//! assert_eq!(updated.get("missing"), Some(&2));
//! assert_eq!(updated.get("a"), Some(&1));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;

use super::accessor::{Accessor, OptionalAccessor};
use super::error::AccessError;
use super::lens::{BoxedLens, Lens};
use super::optional::OptionalLens;

#[cold]
#[track_caller]
fn out_of_range(index: usize, len: usize) -> ! {
    panic!("{}", AccessError::IndexOutOfRange { index, len })
}

/// A lens onto the element at a fixed position of a `Vec`.
///
/// Reading or writing past the end is a caller error: the [`Lens`] methods
/// panic, while [`IndexLens::try_get`] and [`IndexLens::try_set`] report it as
/// [`AccessError::IndexOutOfRange`].
#[derive(Debug)]
pub struct IndexLens<T> {
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> IndexLens<T> {
    /// Creates a lens focusing on `index`.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    /// The focused position.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }
}

impl<T: Clone> IndexLens<T> {
    /// Reads the focused element.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::IndexOutOfRange`] if the sequence is too short.
    pub fn try_get(&self, source: &[T]) -> Result<T, AccessError> {
        source
            .get(self.index)
            .cloned()
            .ok_or(AccessError::IndexOutOfRange {
                index: self.index,
                len: source.len(),
            })
    }

    /// Replaces the focused element.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::IndexOutOfRange`] if the sequence is too short.
    pub fn try_set(&self, mut source: Vec<T>, value: T) -> Result<Vec<T>, AccessError> {
        let len = source.len();
        let slot = source
            .get_mut(self.index)
            .ok_or(AccessError::IndexOutOfRange {
                index: self.index,
                len,
            })?;
        *slot = value;
        Ok(source)
    }
}

impl<T> Clone for IndexLens<T> {
    fn clone(&self) -> Self {
        Self::new(self.index)
    }
}

impl<T: Clone> Lens<Vec<T>, T> for IndexLens<T> {
    /// # Panics
    ///
    /// Panics if the index is out of range.
    fn get(&self, source: &Vec<T>) -> T {
        match source.get(self.index) {
            Some(element) => element.clone(),
            None => out_of_range(self.index, source.len()),
        }
    }

    /// # Panics
    ///
    /// Panics if the index is out of range.
    fn set(&self, mut source: Vec<T>, value: T) -> Vec<T> {
        let len = source.len();
        match source.get_mut(self.index) {
            Some(slot) => *slot = value,
            None => out_of_range(self.index, len),
        }
        source
    }
}

/// Map operations needed by [`KeyLens`].
pub trait Keyed {
    /// The key type.
    type Key;
    /// The value type.
    type Value;

    /// Looks a key up.
    fn lookup(&self, key: &Self::Key) -> Option<&Self::Value>;

    /// Inserts or overwrites an entry.
    fn upsert(&mut self, key: Self::Key, value: Self::Value);

    /// Removes an entry if present.
    fn discard(&mut self, key: &Self::Key);
}

impl<K: Eq + Hash, V, H: BuildHasher> Keyed for HashMap<K, V, H> {
    type Key = K;
    type Value = V;

    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn upsert(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn discard(&mut self, key: &K) {
        self.remove(key);
    }
}

impl<K: Ord, V> Keyed for BTreeMap<K, V> {
    type Key = K;
    type Value = V;

    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn upsert(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn discard(&mut self, key: &K) {
        self.remove(key);
    }
}

/// A lens onto the entry at a fixed key of a map.
///
/// The focus is `Option<V>`: a missing key reads as `None`, `Some(v)` is an
/// upsert and `None` removes the entry. Writes never fail.
#[derive(Debug, Clone)]
pub struct KeyLens<K> {
    key: K,
}

impl<K> KeyLens<K> {
    /// Creates a lens focusing on `key`.
    #[must_use]
    pub const fn new(key: K) -> Self {
        Self { key }
    }

    /// The focused key.
    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }
}

impl<M> Lens<M, Option<M::Value>> for KeyLens<M::Key>
where
    M: Keyed,
    M::Key: Clone,
    M::Value: Clone,
{
    fn get(&self, source: &M) -> Option<M::Value> {
        source.lookup(&self.key).cloned()
    }

    fn set(&self, mut source: M, value: Option<M::Value>) -> M {
        match value {
            Some(value) => source.upsert(self.key.clone(), value),
            None => source.discard(&self.key),
        }
        source
    }
}

/// Sequence adapter for elements without accessors of their own.
pub struct SeqLens<S, T> {
    lens: BoxedLens<S, Vec<T>>,
}

impl<S: 'static, T: Clone + 'static> SeqLens<S, T> {
    /// Wraps a lens onto the whole sequence.
    #[must_use]
    pub const fn new(lens: BoxedLens<S, Vec<T>>) -> Self {
        Self { lens }
    }

    /// The lens onto the whole sequence.
    #[must_use]
    pub const fn lens(&self) -> &BoxedLens<S, Vec<T>> {
        &self.lens
    }

    /// A lens onto the element at `index`.
    #[must_use]
    pub fn at(&self, index: usize) -> BoxedLens<S, T> {
        self.lens.then(IndexLens::new(index))
    }

    /// Number of elements in the focused sequence.
    pub fn len(&self, source: &S) -> usize {
        self.lens.get(source).len()
    }

    /// Whether the focused sequence is empty.
    pub fn is_empty(&self, source: &S) -> bool {
        self.len(source) == 0
    }

    /// Appends an element to the focused sequence.
    pub fn push(&self, source: S, element: T) -> S {
        self.lens.modify(source, |mut elements| {
            elements.push(element);
            elements
        })
    }
}

impl<S, T> Lens<S, Vec<T>> for SeqLens<S, T> {
    fn get(&self, source: &S) -> Vec<T> {
        self.lens.get(source)
    }

    fn set(&self, source: S, value: Vec<T>) -> S {
        self.lens.set(source, value)
    }
}

impl<S, T> Clone for SeqLens<S, T> {
    fn clone(&self) -> Self {
        Self {
            lens: self.lens.clone(),
        }
    }
}

impl<S, T> std::fmt::Debug for SeqLens<S, T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("SeqLens").finish_non_exhaustive()
    }
}

/// Sequence adapter whose elements are composites with their own accessor `C`.
pub struct SeqOf<S, T, C> {
    lens: BoxedLens<S, Vec<T>>,
    _marker: PhantomData<fn() -> C>,
}

impl<S: 'static, T: Clone + 'static, C: Accessor<S, T>> SeqOf<S, T, C> {
    /// Wraps a lens onto the whole sequence.
    #[must_use]
    pub const fn new(lens: BoxedLens<S, Vec<T>>) -> Self {
        Self {
            lens,
            _marker: PhantomData,
        }
    }

    /// The lens onto the whole sequence.
    #[must_use]
    pub const fn lens(&self) -> &BoxedLens<S, Vec<T>> {
        &self.lens
    }

    /// The accessor of the element at `index`.
    #[must_use]
    pub fn at(&self, index: usize) -> C {
        C::from_lens(self.lens.then(IndexLens::new(index)))
    }

    /// Number of elements in the focused sequence.
    pub fn len(&self, source: &S) -> usize {
        self.lens.get(source).len()
    }

    /// Whether the focused sequence is empty.
    pub fn is_empty(&self, source: &S) -> bool {
        self.len(source) == 0
    }
}

impl<S, T, C> Lens<S, Vec<T>> for SeqOf<S, T, C> {
    fn get(&self, source: &S) -> Vec<T> {
        self.lens.get(source)
    }

    fn set(&self, source: S, value: Vec<T>) -> S {
        self.lens.set(source, value)
    }
}

impl<S, T, C> Clone for SeqOf<S, T, C> {
    fn clone(&self) -> Self {
        Self {
            lens: self.lens.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S, T, C> std::fmt::Debug for SeqOf<S, T, C> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("SeqOf").finish_non_exhaustive()
    }
}

/// Map adapter for values without accessors of their own.
pub struct MapLens<S, M> {
    lens: BoxedLens<S, M>,
}

impl<S, M> MapLens<S, M>
where
    S: 'static,
    M: Keyed + 'static,
    M::Key: Clone + Send + Sync + 'static,
    M::Value: Clone + 'static,
{
    /// Wraps a lens onto the whole map.
    #[must_use]
    pub const fn new(lens: BoxedLens<S, M>) -> Self {
        Self { lens }
    }

    /// The lens onto the whole map.
    #[must_use]
    pub const fn lens(&self) -> &BoxedLens<S, M> {
        &self.lens
    }

    /// A lens onto the entry at `key`, with upsert writes.
    #[must_use]
    pub fn at(&self, key: M::Key) -> BoxedLens<S, Option<M::Value>> {
        self.lens.then(KeyLens::new(key))
    }
}

impl<S, M> Lens<S, M> for MapLens<S, M> {
    fn get(&self, source: &S) -> M {
        self.lens.get(source)
    }

    fn set(&self, source: S, value: M) -> S {
        self.lens.set(source, value)
    }
}

impl<S, M> Clone for MapLens<S, M> {
    fn clone(&self) -> Self {
        Self {
            lens: self.lens.clone(),
        }
    }
}

impl<S, M> std::fmt::Debug for MapLens<S, M> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("MapLens").finish_non_exhaustive()
    }
}

/// Map adapter whose values are composites.
///
/// [`MapOf::at`] yields the presence-aware accessor `C` of the value type, so
/// a missing key behaves exactly like an empty optional: reads fall back to
/// defaults and property writes are ignored. Use [`MapOf::entry`] to insert.
pub struct MapOf<S, M, C> {
    lens: BoxedLens<S, M>,
    _marker: PhantomData<fn() -> C>,
}

impl<S, M, C> MapOf<S, M, C>
where
    S: 'static,
    M: Keyed + 'static,
    M::Key: Clone + Send + Sync + 'static,
    M::Value: Clone + 'static,
    C: OptionalAccessor<S, M::Value>,
{
    /// Wraps a lens onto the whole map.
    #[must_use]
    pub const fn new(lens: BoxedLens<S, M>) -> Self {
        Self {
            lens,
            _marker: PhantomData,
        }
    }

    /// The lens onto the whole map.
    #[must_use]
    pub const fn lens(&self) -> &BoxedLens<S, M> {
        &self.lens
    }

    /// The accessor of the value at `key`.
    #[must_use]
    pub fn at(&self, key: M::Key) -> C {
        C::from_optional(OptionalLens::new(self.entry(key)))
    }

    /// A plain lens onto the entry at `key`, with upsert writes.
    #[must_use]
    pub fn entry(&self, key: M::Key) -> BoxedLens<S, Option<M::Value>> {
        self.lens.then(KeyLens::new(key))
    }
}

impl<S, M, C> Lens<S, M> for MapOf<S, M, C> {
    fn get(&self, source: &S) -> M {
        self.lens.get(source)
    }

    fn set(&self, source: S, value: M) -> S {
        self.lens.set(source, value)
    }
}

impl<S, M, C> Clone for MapOf<S, M, C> {
    fn clone(&self) -> Self {
        Self {
            lens: self.lens.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S, M, C> std::fmt::Debug for MapOf<S, M, C> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("MapOf").finish_non_exhaustive()
    }
}
