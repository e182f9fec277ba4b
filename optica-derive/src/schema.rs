//! Implementation of the `#[derive(Schema)]` macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

/// Main implementation of the Schema derive macro.
pub fn derive_schema_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    TokenStream::from(expand(&input).unwrap_or_else(syn::Error::into_compile_error))
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Schema cannot be derived for generic structs: schema types are identified by name.",
        ));
    }
    let fields = match &input.data {
        Data::Struct(data_struct) => &data_struct.fields,
        Data::Enum(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "Schema can only be derived for structs, not enums.",
            ));
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "Schema cannot be derived for unions.",
            ));
        }
    };
    let empty = syn::punctuated::Punctuated::new();
    let named = match fields {
        Fields::Named(named_fields) => &named_fields.named,
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "Schema can only be derived for structs with named fields, not tuple structs.",
            ));
        }
        Fields::Unit => &empty,
    };

    let type_name = name.to_string();
    let field_entries = named.iter().filter_map(|field| {
        let field_name = field.ident.as_ref()?.to_string();
        let field_type = &field.ty;
        Some(quote! {
            ::optica::schema::Field::new(
                #field_name,
                <#field_type as ::optica::schema::Describe>::type_ref(),
            )
        })
    });
    let field_registrations = named.iter().map(|field| {
        let field_type = &field.ty;
        quote! {
            <#field_type as ::optica::schema::Describe>::register(schema);
        }
    });

    Ok(quote! {
        impl ::optica::schema::Describe for #name {
            fn type_ref() -> ::optica::schema::TypeRef {
                ::optica::schema::TypeRef::composite(#type_name)
            }

            fn register(schema: &mut ::optica::schema::Schema) {
                let definition = ::optica::schema::CompositeType::new(
                    #type_name,
                    ::std::vec![#(#field_entries),*],
                );
                if schema.insert(definition) {
                    #(#field_registrations)*
                }
            }
        }
    })
}
