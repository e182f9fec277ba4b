//! Access to a composite value that sits behind an `Option`.
//!
//! [`OptionalLens`] wraps a lens onto `Option<T>` and lets call sites reach the
//! fields of `T` without unwrapping at every step.
//!
//! # Empty policy
//!
//! When the optional is empty:
//!
//! - reads through [`OptionalLens::property`] return the configured default;
//! - reads through [`OptionalLens::nested`] and
//!   [`OptionalLens::nested_optional`] return `None`;
//! - writes are silent no-ops. Nothing is created and nothing panics.
//!
//! Callers that need to know whether a write landed use
//! [`OptionalLens::is_present`] or [`OptionalLens::try_modify`].
//!
//! # Examples
//!
//! ```
//! use optica::optics::{BoxedLens, Lens, OptionalLens};
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Profile { nickname: String }
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct User { profile: Option<Profile> }
//!
//! let profile = OptionalLens::new(BoxedLens::new(
//!     |user: &User| user.profile.clone(),
//!     |_user: User, profile| User { profile },
//! ));
//! let nickname = profile.property(
//!     |profile: &Profile| profile.nickname.clone(),
//!     |_profile, nickname| Profile { nickname },
//!     String::new(),
//! );
//!
//! let anonymous = User { profile: None };
//! assert_eq!(nickname.get(&anonymous), "");
//! assert_eq!(nickname.set(anonymous, "neo".to_string()), User { profile: None });
//!
//! let known = User { profile: Some(Profile { nickname: "trinity".to_string() }) };
//! let renamed = nickname.set(known, "neo".to_string());
//! assert_eq!(renamed.profile.unwrap().nickname, "neo");
//! ```

use super::error::AccessError;
use super::lens::{BoxedLens, Lens};

/// A lens onto `Option<T>` with presence-aware access to `T`'s fields.
pub struct OptionalLens<S, T> {
    lens: BoxedLens<S, Option<T>>,
}

impl<S: 'static, T: 'static> OptionalLens<S, T> {
    /// Wraps a lens onto an optional value.
    #[must_use]
    pub const fn new(lens: BoxedLens<S, Option<T>>) -> Self {
        Self { lens }
    }

    /// Lifts a lens onto a required value.
    ///
    /// The lifted getter always yields `Some`; writing `None` leaves the source
    /// unchanged.
    #[must_use]
    pub fn from_required(lens: BoxedLens<S, T>) -> Self {
        let setter = lens.clone();
        Self::new(BoxedLens::new(
            move |source: &S| Some(lens.get(source)),
            move |source: S, value: Option<T>| match value {
                Some(value) => setter.set(source, value),
                None => source,
            },
        ))
    }

    /// The lens onto the optional value itself.
    #[must_use]
    pub const fn lens(&self) -> &BoxedLens<S, Option<T>> {
        &self.lens
    }

    /// Whether the optional currently holds a value.
    pub fn is_present(&self, source: &S) -> bool {
        self.lens.get(source).is_some()
    }

    /// Applies `function` to the held value.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::EmptyOptional`] instead of silently dropping the
    /// write when there is no value.
    pub fn try_modify<F>(&self, source: S, function: F) -> Result<S, AccessError>
    where
        F: FnOnce(T) -> T,
    {
        match self.lens.get(&source) {
            Some(value) => Ok(self.lens.set(source, Some(function(value)))),
            None => Err(AccessError::EmptyOptional),
        }
    }

    /// A lens onto one field of `T`.
    ///
    /// Reads yield `default` when empty; writes when empty are ignored.
    #[must_use]
    pub fn property<P, G, St>(&self, getter: G, setter: St, default: P) -> BoxedLens<S, P>
    where
        P: Clone + Send + Sync + 'static,
        G: Fn(&T) -> P + Send + Sync + 'static,
        St: Fn(T, P) -> T + Send + Sync + 'static,
    {
        self.lens.field(
            move |optional: &Option<T>| {
                optional
                    .as_ref()
                    .map_or_else(|| default.clone(), |value| getter(value))
            },
            move |optional: Option<T>, property: P| {
                optional.map(|value| setter(value, property))
            },
        )
    }

    /// Exposes a required composite field of `T` through the same empty policy.
    ///
    /// The deeper accessor sees `Option<N>`: `None` when the outer optional is
    /// empty. Writes of `Some` land only when the outer value is present;
    /// writes of `None` are ignored since the field itself is required.
    pub fn nested<N, C, G, St, F>(&self, getter: G, setter: St, factory: F) -> C
    where
        N: 'static,
        G: Fn(&T) -> N + Send + Sync + 'static,
        St: Fn(T, N) -> T + Send + Sync + 'static,
        F: FnOnce(OptionalLens<S, N>) -> C,
    {
        factory(OptionalLens::new(self.lens.field(
            move |optional: &Option<T>| optional.as_ref().map(|value| getter(value)),
            move |optional: Option<T>, nested: Option<N>| match (optional, nested) {
                (Some(value), Some(nested)) => Some(setter(value, nested)),
                (optional, _) => optional,
            },
        )))
    }

    /// Exposes an optional composite field of `T`, flattening the two layers.
    ///
    /// This is the step a recursive accessor takes for every `child()` call.
    pub fn nested_optional<N, C, G, St, F>(&self, getter: G, setter: St, factory: F) -> C
    where
        N: 'static,
        G: Fn(&T) -> Option<N> + Send + Sync + 'static,
        St: Fn(T, Option<N>) -> T + Send + Sync + 'static,
        F: FnOnce(OptionalLens<S, N>) -> C,
    {
        factory(OptionalLens::new(self.lens.field(
            move |optional: &Option<T>| optional.as_ref().and_then(|value| getter(value)),
            move |optional: Option<T>, nested: Option<N>| {
                optional.map(|value| setter(value, nested))
            },
        )))
    }
}

impl<S, T> Lens<S, Option<T>> for OptionalLens<S, T> {
    fn get(&self, source: &S) -> Option<T> {
        self.lens.get(source)
    }

    fn set(&self, source: S, value: Option<T>) -> S {
        self.lens.set(source, value)
    }
}

impl<S, T> Clone for OptionalLens<S, T> {
    fn clone(&self) -> Self {
        Self {
            lens: self.lens.clone(),
        }
    }
}

impl<S, T> std::fmt::Debug for OptionalLens<S, T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("OptionalLens")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    struct Inner {
        level: u8,
    }

    fn level(optional: &OptionalLens<Option<Inner>, Inner>) -> BoxedLens<Option<Inner>, u8> {
        optional.property(|inner: &Inner| inner.level, |_inner, level| Inner { level }, 0)
    }

    #[test]
    fn test_property_reads_default_when_empty() {
        let optional = OptionalLens::new(BoxedLens::identity());
        assert_eq!(level(&optional).get(&None), 0);
    }

    #[test]
    fn test_property_write_is_ignored_when_empty() {
        let optional = OptionalLens::new(BoxedLens::identity());
        assert_eq!(level(&optional).set(None, 3), None);
    }

    #[test]
    fn test_property_write_lands_when_present() {
        let optional = OptionalLens::new(BoxedLens::identity());
        let updated = level(&optional).set(Some(Inner { level: 1 }), 3);
        assert_eq!(updated, Some(Inner { level: 3 }));
    }

    #[test]
    fn test_try_modify_reports_empty() {
        let optional: OptionalLens<Option<Inner>, Inner> =
            OptionalLens::new(BoxedLens::identity());
        assert_eq!(
            optional.try_modify(None, |inner| inner),
            Err(AccessError::EmptyOptional)
        );
    }

    #[test]
    fn test_from_required_ignores_none() {
        let required = OptionalLens::from_required(BoxedLens::<u8, u8>::identity());
        assert_eq!(required.get(&4), Some(4));
        assert_eq!(required.set(4, None), 4);
        assert_eq!(required.set(4, Some(5)), 5);
    }
}
