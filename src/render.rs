//! Rendering of accessor plans as Rust tokens.
//!
//! [`render`] turns an [`AccessorPlan`] into a [`TokenStream`] of accessor
//! structs, their trait impls, and the root's [`Lensed`] impl. Formatting the
//! stream and writing it anywhere is left to the caller.
//!
//! Setters in generated code take the parent by value, overwrite one field
//! and hand the parent back, so every update is copy-on-write by ownership.
//! Fields declared as `Box<T>` or `Option<Box<T>>` are exposed unboxed.
//!
//! ```
//! use optica::plan::Generator;
//! use optica::render::render;
//! use optica::schema::{CompositeType, Schema, TypeRef};
//!
//! let schema: Schema = [CompositeType::builder("Point")
//!     .field("x", TypeRef::scalar("i32"))
//!     .build()]
//! .into_iter()
//! .collect();
//!
//! let plan = Generator::default().generate(&schema, "Point").unwrap();
//! let tokens = render(&plan).unwrap();
//! assert!(syn::parse2::<syn::File>(tokens).is_ok());
//! ```
//!
//! [`Lensed`]: crate::optics::Lensed

use proc_macro2::{Ident, TokenStream};
use quote::quote;
use thiserror::Error;
use tracing::debug;

use crate::plan::{AccessorPlan, AccessorUnit, Construct, FieldAccessor, PropertyDefault, UnitVariant};
use crate::schema::{FieldShape, TypeRef};

/// Failures while turning a plan into tokens.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A type name in the plan does not parse as a Rust type.
    #[error("`{text}` is not a valid Rust type")]
    InvalidType {
        /// The offending text.
        text: String,
        /// Parser diagnostic.
        #[source]
        source: syn::Error,
    },

    /// A field or accessor name does not parse as an identifier.
    #[error("`{text}` is not a valid identifier")]
    InvalidIdent {
        /// The offending text.
        text: String,
        /// Parser diagnostic.
        #[source]
        source: syn::Error,
    },

    /// The configured crate path does not parse as a path.
    #[error("`{text}` is not a valid crate path")]
    InvalidPath {
        /// The offending text.
        text: String,
        /// Parser diagnostic.
        #[source]
        source: syn::Error,
    },

    /// A configured default does not parse as an expression.
    #[error("`{text}` is not a valid Rust expression")]
    InvalidExpr {
        /// The offending text.
        text: String,
        /// Parser diagnostic.
        #[source]
        source: syn::Error,
    },

    /// A construct that cannot appear in a unit of this variant.
    #[error("`{accessor}.{field}` has construct {construct} which a {variant:?} unit cannot hold")]
    Inconsistent {
        /// Accessor name.
        accessor: String,
        /// Field name.
        field: String,
        /// Construct kind.
        construct: &'static str,
        /// Unit variant.
        variant: UnitVariant,
    },
}

/// Renders every unit of `plan` plus the root's `Lensed` impl.
///
/// # Errors
///
/// Returns a [`RenderError`] if a name in the plan is not valid Rust, or if
/// the plan was not produced by [`crate::plan::Generator`] and pairs a
/// construct with a unit that cannot hold it.
pub fn render(plan: &AccessorPlan) -> Result<TokenStream, RenderError> {
    let krate = parse_path(plan.crate_path())?;
    let mut tokens = TokenStream::new();
    for unit in plan.units() {
        tokens.extend(render_unit(&krate, unit)?);
    }

    let root = parse_type(plan.root())?;
    let root_accessor = parse_ident(plan.root_accessor())?;
    tokens.extend(quote! {
        impl #krate::optics::Lensed for #root {
            type Accessor = #root_accessor<#root>;
        }
    });
    debug!(root = plan.root(), units = plan.units().len(), "rendered accessor plan");
    Ok(tokens)
}

fn render_unit(krate: &syn::Path, unit: &AccessorUnit) -> Result<TokenStream, RenderError> {
    let name = parse_ident(&unit.accessor_name)?;
    let target = parse_type(&unit.type_name)?;
    let doc = format!(" Accessor object focused on `{}`.", unit.type_name);

    let methods = unit
        .fields
        .iter()
        .map(|field| render_method(krate, unit, &target, field))
        .collect::<Result<Vec<_>, _>>()?;

    let (holder, focus, anchors) = match unit.variant {
        UnitVariant::Required => (
            quote!(#krate::optics::BoxedLens<S, #target>),
            quote!(#target),
            quote! {
                impl<S: 'static> #krate::optics::Accessor<S, #target> for #name<S> {
                    fn from_lens(lens: #krate::optics::BoxedLens<S, #target>) -> Self {
                        Self { lens }
                    }
                }
            },
        ),
        UnitVariant::Optional => (
            quote!(#krate::optics::OptionalLens<S, #target>),
            quote!(::core::option::Option<#target>),
            quote! {
                impl<S: 'static> #krate::optics::OptionalAccessor<S, #target> for #name<S> {
                    fn from_optional(lens: #krate::optics::OptionalLens<S, #target>) -> Self {
                        Self { lens }
                    }
                }
            },
        ),
        UnitVariant::Recursive => (
            quote!(#krate::optics::OptionalLens<S, #target>),
            quote!(::core::option::Option<#target>),
            quote! {
                impl<S: 'static> #krate::optics::Accessor<S, #target> for #name<S> {
                    fn from_lens(lens: #krate::optics::BoxedLens<S, #target>) -> Self {
                        Self { lens: #krate::optics::OptionalLens::from_required(lens) }
                    }
                }

                impl<S: 'static> #krate::optics::OptionalAccessor<S, #target> for #name<S> {
                    fn from_optional(lens: #krate::optics::OptionalLens<S, #target>) -> Self {
                        Self { lens }
                    }
                }
            },
        ),
    };

    let presence = unit.variant.is_presence_aware().then(|| {
        quote! {
            /// Whether the focused value is present in `source`.
            pub fn is_present(&self, source: &S) -> bool {
                self.lens.is_present(source)
            }
        }
    });

    Ok(quote! {
        #[doc = #doc]
        pub struct #name<S> {
            lens: #holder,
        }

        #anchors

        impl<S> ::core::clone::Clone for #name<S> {
            fn clone(&self) -> Self {
                Self { lens: ::core::clone::Clone::clone(&self.lens) }
            }
        }

        impl<S> #krate::optics::Lens<S, #focus> for #name<S> {
            fn get(&self, source: &S) -> #focus {
                #krate::optics::Lens::get(&self.lens, source)
            }

            fn set(&self, source: S, value: #focus) -> S {
                #krate::optics::Lens::set(&self.lens, source, value)
            }
        }

        impl<S: 'static> #name<S> {
            #presence
            #(#methods)*
        }
    })
}

fn render_method(
    krate: &syn::Path,
    unit: &AccessorUnit,
    target: &syn::Type,
    field: &FieldAccessor,
) -> Result<TokenStream, RenderError> {
    let method = parse_ident(&field.field)?;
    let doc = format!(" The `{}` field ({}).", field.field, field.shape);
    let (read, write) = match &field.ty {
        TypeRef::Boxed(_) => (
            quote!(::core::clone::Clone::clone(&*source.#method)),
            quote!(::std::boxed::Box::new(focus)),
        ),
        TypeRef::Optional(inner) if matches!(inner.as_ref(), TypeRef::Boxed(_)) => (
            quote!(source.#method.as_deref().cloned()),
            quote!(focus.map(::std::boxed::Box::new)),
        ),
        _ => (
            quote!(::core::clone::Clone::clone(&source.#method)),
            quote!(focus),
        ),
    };
    let getter = quote!(|source: &#target| #read);
    let setter = quote!(|mut source: #target, focus| {
        source.#method = #write;
        source
    });
    let empty = quote!(::core::default::Default::default());
    let optics = quote!(#krate::optics);
    let presence_aware = unit.variant.is_presence_aware();

    let (output, body) = match (&field.construct, presence_aware) {
        (Construct::Plain { focus }, false) => {
            let focus = parse_type_ref(focus)?;
            (
                quote!(#optics::BoxedLens<S, #focus>),
                quote!(self.lens.field(#getter, #setter)),
            )
        }
        (
            Construct::Nested { accessor, .. } | Construct::RecursiveRequired { accessor, .. },
            false,
        ) => {
            let accessor = parse_ident(accessor)?;
            (
                quote!(#accessor<S>),
                quote!(#optics::record(&self.lens, #getter, #setter)),
            )
        }
        (
            Construct::OptionalNested { accessor, .. } | Construct::RecursiveOptional { accessor, .. },
            false,
        ) => {
            let accessor = parse_ident(accessor)?;
            (
                quote!(#accessor<S>),
                quote!(#optics::optional_record(&self.lens, #getter, #setter)),
            )
        }
        (Construct::Sequence { element }, false) => {
            let element = parse_type_ref(element)?;
            (
                quote!(#optics::SeqLens<S, #element>),
                quote!(#optics::sequence(&self.lens, #getter, #setter)),
            )
        }
        (Construct::SequenceOf { element, accessor }, false) => {
            let element = parse_type(element)?;
            let accessor = parse_ident(accessor)?;
            (
                quote!(#optics::SeqOf<S, #element, #accessor<S>>),
                quote!(#optics::record_sequence(&self.lens, #getter, #setter)),
            )
        }
        (Construct::Map { map }, false) => {
            let map = parse_type_ref(map)?;
            (
                quote!(#optics::MapLens<S, #map>),
                quote!(#optics::map(&self.lens, #getter, #setter)),
            )
        }
        (Construct::MapOf { map, accessor, .. }, false) => {
            let map = parse_type_ref(map)?;
            let accessor = parse_ident(accessor)?;
            (
                quote!(#optics::MapOf<S, #map, #accessor<S>>),
                quote!(#optics::record_map(&self.lens, #getter, #setter)),
            )
        }
        (Construct::Property { focus, default }, true) => {
            let focus = parse_type_ref(focus)?;
            let default = match default {
                PropertyDefault::TypeDefault => empty,
                PropertyDefault::Absent => quote!(::core::option::Option::None),
                PropertyDefault::Expr(text) => {
                    let expr = parse_expr(text)?;
                    quote!(#expr)
                }
            };
            (
                quote!(#optics::BoxedLens<S, #focus>),
                quote!(self.lens.property(#getter, #setter, #default)),
            )
        }
        (Construct::OptionalProperty { focus }, true) => {
            let focus = parse_type_ref(focus)?;
            (
                quote!(#optics::BoxedLens<S, ::core::option::Option<#focus>>),
                quote! {
                    self.lens.property(
                        |source: &#target| ::core::option::Option::Some(#read),
                        |mut source: #target, focus: ::core::option::Option<#focus>| {
                            if let ::core::option::Option::Some(focus) = focus {
                                source.#method = #write;
                            }
                            source
                        },
                        ::core::option::Option::None,
                    )
                },
            )
        }
        (
            Construct::OptionalNested { target: child, accessor }
            | Construct::RecursiveOptional { target: child, accessor },
            true,
        ) => {
            let child = parse_type(child)?;
            let accessor = parse_ident(accessor)?;
            let step = if field.shape == FieldShape::OptionalCompositeRef {
                quote!(nested_optional)
            } else {
                quote!(nested)
            };
            (
                quote!(#accessor<S>),
                quote! {
                    self.lens.#step(
                        #getter,
                        #setter,
                        <#accessor<S> as #optics::OptionalAccessor<S, #child>>::from_optional,
                    )
                },
            )
        }
        (Construct::SelfChild, true) => (
            quote!(Self),
            quote! {
                self.lens.nested_optional(
                    #getter,
                    #setter,
                    <Self as #optics::OptionalAccessor<S, #target>>::from_optional,
                )
            },
        ),
        (Construct::Sequence { element }, true) => {
            let element = parse_type_ref(element)?;
            (
                quote!(#optics::SeqLens<S, #element>),
                quote!(#optics::SeqLens::new(self.lens.property(#getter, #setter, #empty))),
            )
        }
        (Construct::SequenceOf { element, accessor }, true) => {
            let element = parse_type(element)?;
            let accessor = parse_ident(accessor)?;
            (
                quote!(#optics::SeqOf<S, #element, #accessor<S>>),
                quote!(#optics::SeqOf::new(self.lens.property(#getter, #setter, #empty))),
            )
        }
        (Construct::Map { map }, true) => {
            let map = parse_type_ref(map)?;
            (
                quote!(#optics::MapLens<S, #map>),
                quote!(#optics::MapLens::new(self.lens.property(#getter, #setter, #empty))),
            )
        }
        (Construct::MapOf { map, accessor, .. }, true) => {
            let map = parse_type_ref(map)?;
            let accessor = parse_ident(accessor)?;
            (
                quote!(#optics::MapOf<S, #map, #accessor<S>>),
                quote!(#optics::MapOf::new(self.lens.property(#getter, #setter, #empty))),
            )
        }
        (construct, _) => {
            return Err(RenderError::Inconsistent {
                accessor: unit.accessor_name.clone(),
                field: field.field.clone(),
                construct: construct_kind(construct),
                variant: unit.variant,
            });
        }
    };

    Ok(quote! {
        #[doc = #doc]
        pub fn #method(&self) -> #output {
            #body
        }
    })
}

const fn construct_kind(construct: &Construct) -> &'static str {
    match construct {
        Construct::Plain { .. } => "Plain",
        Construct::Property { .. } => "Property",
        Construct::OptionalProperty { .. } => "OptionalProperty",
        Construct::Nested { .. } => "Nested",
        Construct::OptionalNested { .. } => "OptionalNested",
        Construct::Sequence { .. } => "Sequence",
        Construct::SequenceOf { .. } => "SequenceOf",
        Construct::Map { .. } => "Map",
        Construct::MapOf { .. } => "MapOf",
        Construct::RecursiveRequired { .. } => "RecursiveRequired",
        Construct::RecursiveOptional { .. } => "RecursiveOptional",
        Construct::SelfChild => "SelfChild",
    }
}

fn parse_type(text: &str) -> Result<syn::Type, RenderError> {
    syn::parse_str(text).map_err(|source| RenderError::InvalidType {
        text: text.to_string(),
        source,
    })
}

fn parse_type_ref(ty: &TypeRef) -> Result<syn::Type, RenderError> {
    parse_type(&ty.to_string())
}

fn parse_expr(text: &str) -> Result<syn::Expr, RenderError> {
    syn::parse_str(text).map_err(|source| RenderError::InvalidExpr {
        text: text.to_string(),
        source,
    })
}

fn parse_ident(text: &str) -> Result<Ident, RenderError> {
    syn::parse_str(text).map_err(|source| RenderError::InvalidIdent {
        text: text.to_string(),
        source,
    })
}

fn parse_path(text: &str) -> Result<syn::Path, RenderError> {
    syn::parse_str(text).map_err(|source| RenderError::InvalidPath {
        text: text.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Generator;
    use crate::schema::{CompositeType, Schema};

    #[test]
    fn test_invalid_field_name_is_reported() {
        let schema: Schema = [CompositeType::builder("Broken")
            .field("not a name", TypeRef::scalar("u8"))
            .build()]
        .into_iter()
        .collect();
        let plan = Generator::default().generate(&schema, "Broken").unwrap();

        assert!(matches!(
            render(&plan),
            Err(RenderError::InvalidIdent { text, .. }) if text == "not a name"
        ));
    }
}
