//! Optics for immutable data manipulation.
//!
//! This module provides lenses and the accessor objects built from them.
//! A lens focuses on one part of a value, allowing type-safe reading and
//! copy-on-write updating of deeply nested fields.
//!
//! # Building Blocks
//!
//! - [`Lens`]: getter + setter over a source and a focus, with `modify` and
//!   `compose`
//! - [`FunctionLens`], [`ComposedLens`], [`IdentityLens`], [`BoxedLens`]:
//!   concrete lenses
//! - [`IndexLens`], [`KeyLens`]: lenses into `Vec` elements and map entries
//! - [`SeqLens`], [`SeqOf`], [`MapLens`], [`MapOf`]: collection adapters
//! - [`OptionalLens`]: presence-aware access through an `Option`
//! - [`Accessor`], [`OptionalAccessor`], [`Lensed`]: the accessor-object
//!   surface generated code implements
//!
//! # Example
//!
//! ```
//! use optica::optics::Lens;
//! use optica::lens;
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Address { street: String, city: String }
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Person { name: String, address: Address }
//!
//! let person_street = lens!(Person, address).compose(lens!(Address, street));
//!
//! let person = Person {
//!     name: "Alice".to_string(),
//!     address: Address {
//!         street: "Main St".to_string(),
//!         city: "Tokyo".to_string(),
//!     },
//! };
//!
//! assert_eq!(person_street.get(&person), "Main St");
//!
//! let updated = person_street.set(person.clone(), "Oak Ave".to_string());
//! assert_eq!(updated.address.street, "Oak Ave");
//! assert_eq!(updated.address.city, "Tokyo");
//! assert_eq!(person.address.street, "Main St");
//! ```
//!
//! # Lens Laws
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
//! Lenses produced by [`OptionalLens`] keep these laws while the optional is
//! present. When it is empty, writes are ignored by design of the empty
//! policy documented on that type.

mod accessor;
mod collection;
mod error;
mod lens;
mod optional;

pub use lens::BoxedLens;
pub use lens::ComposedLens;
pub use lens::FunctionLens;
pub use lens::IdentityLens;
pub use lens::Lens;

pub use collection::IndexLens;
pub use collection::KeyLens;
pub use collection::Keyed;
pub use collection::MapLens;
pub use collection::MapOf;
pub use collection::SeqLens;
pub use collection::SeqOf;

pub use optional::OptionalLens;

pub use accessor::Accessor;
pub use accessor::Lensed;
pub use accessor::OptionalAccessor;
pub use accessor::map;
pub use accessor::optional_record;
pub use accessor::record;
pub use accessor::record_map;
pub use accessor::record_sequence;
pub use accessor::sequence;

pub use error::AccessError;
