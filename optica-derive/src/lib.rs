//! Derive macros for optica schemas and lenses.
//!
//! # Available Derive Macros
//!
//! - [`Schema`]: implements `optica::schema::Describe` so the struct can be
//!   discovered and planned
//! - [`Lenses`]: generates one plain lens constructor per struct field
//!
//! # Example: Schema
//!
//! ```rust,ignore
//! use optica::Schema;
//! use optica::plan::Generator;
//!
//! #[derive(Clone, Schema)]
//! struct Node {
//!     value: String,
//!     child: Option<Box<Node>>,  // seen as Option<Node> by accessors
//! }
//!
//! let plan = Generator::default().generate_for::<Node>()?;
//! ```
//!
//! # Example: Lenses
//!
//! ```rust,ignore
//! use optica::Lenses;
//! use optica::optics::Lens;
//!
//! #[derive(Clone, Lenses)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! let point = Point { x: 10, y: 20 };
//! assert_eq!(Point::x_lens().get(&point), 10);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod lenses;
mod schema;

use proc_macro::TokenStream;

/// Derive macro describing a struct as a composite schema type.
///
/// Implements `optica::schema::Describe`: `type_ref()` names the struct as a
/// composite, and `register()` inserts its definition, one field per named
/// struct field in declaration order, then registers every field type.
/// Registration stops at types already in the schema, so self-referential
/// structs terminate.
///
/// # Requirements
///
/// - The struct must have named fields
/// - The struct must not be generic: the schema identifies types by name
/// - Every field type must implement `Describe`
///
/// # Example
///
/// ```rust,ignore
/// use optica::Schema;
/// use optica::schema::{Describe, TypeRef};
///
/// #[derive(Schema)]
/// struct Address {
///     city: String,
/// }
///
/// assert_eq!(Address::type_ref(), TypeRef::composite("Address"));
/// ```
#[proc_macro_derive(Schema)]
pub fn derive_schema(input: TokenStream) -> TokenStream {
    schema::derive_schema_impl(input)
}

/// Derive macro for generating Lens constructors for struct fields.
///
/// For each field `foo` of type `T`, generates:
///
/// ```rust,ignore
/// impl StructName {
///     pub fn foo_lens() -> impl Lens<StructName, T> + Clone { ... }
/// }
/// ```
///
/// The getter clones the field and the setter moves the new value in. A
/// field whose type is not `Clone` is reported at that field.
///
/// # Generics
///
/// Generic structs are supported, with every type parameter bounded by
/// `Clone`. Call the constructor on the concrete type:
///
/// ```rust,ignore
/// #[derive(Clone, Lenses)]
/// struct Container<T> {
///     value: T,
/// }
///
/// let lens = Container::<i32>::value_lens();
/// ```
#[proc_macro_derive(Lenses)]
pub fn derive_lenses(input: TokenStream) -> TokenStream {
    lenses::derive_lenses_impl(input)
}
