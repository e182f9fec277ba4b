//! # optica
//!
//! Composable lenses for immutable data, and a schema-driven generator for
//! the accessor objects built from them.
//!
//! ## Overview
//!
//! - **Optics**: law-abiding lenses with copy-on-write updates, adapters for
//!   `Vec` and map fields, and presence-aware access through `Option`
//! - **Mutations**: ordered, reusable batches of lens updates
//! - **Schema**: static descriptions of composite types, derived through
//!   `#[derive(Schema)]`
//! - **Discovery**: cycle-safe search for every composite reachable from a
//!   root, including types that refer to themselves through `Option`
//! - **Plan**: type-directed selection of the accessor construct per field
//! - **Render**: the plan as Rust tokens
//!
//! ## Feature Flags
//!
//! - `derive`: `#[derive(Schema)]` and `#[derive(Lenses)]`
//! - `render`: token rendering of accessor plans
//! - `serde`: serialisation of schemas, plans and generator options
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use optica::prelude::*;
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Counter { value: i32, label: String }
//!
//! let value = lens!(Counter, value);
//! let counter = Counter { value: 5, label: "hits".to_string() };
//!
//! let updated = Mutations::for_value(counter.clone())
//!     .set(value.clone(), 10)
//!     .modify(value, |x| x + 1)
//!     .apply();
//!
//! assert_eq!(updated.value, 11);
//! assert_eq!(counter.value, 5);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use optica::prelude::*;
/// ```
pub mod prelude {
    pub use crate::lens;
    pub use crate::mutation::{BoundMutations, Mutations};
    pub use crate::optics::*;

    #[cfg(feature = "derive")]
    pub use optica_derive::{Lenses, Schema};
}

pub mod discovery;
pub mod mutation;
pub mod optics;
pub mod plan;
pub mod schema;

#[cfg(feature = "render")]
pub mod render;

#[cfg(feature = "derive")]
pub use optica_derive::{Lenses, Schema};
