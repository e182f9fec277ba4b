//! Runtime conditions raised while reading or writing through an accessor.
//!
//! The lens algebra itself never fails. These errors come from collection
//! adapters and the optional wrapper's checked entry points.

use thiserror::Error;

/// A caller-visible failure of a checked accessor operation.
///
/// # Examples
///
/// ```rust
/// use optica::optics::AccessError;
///
/// let error = AccessError::IndexOutOfRange { index: 5, len: 3 };
/// assert_eq!(error.to_string(), "index 5 out of range for sequence of length 3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// An index lens was applied to a sequence that is too short.
    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange {
        /// The index the lens focuses on.
        index: usize,
        /// The length of the sequence it was applied to.
        len: usize,
    },

    /// A checked write reached an optional that holds no value.
    #[error("cannot write through an empty optional")]
    EmptyOptional,
}
