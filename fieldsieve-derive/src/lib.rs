//! Derive macro for `fieldsieve`.
//!
//! This crate generates the code behind `#[derive(Sieve)]`. It:
//! - reads `#[sieve(...)]` container and field attributes
//! - emits the per-type metadata registry entry (`Described`)
//! - emits the serialization walk (`Filterable`) and the schema description
//!   (`Schematic`)
//!
//! It does **not** evaluate filter policies. Those live in the main
//! `fieldsieve` crate and are applied at runtime.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, LitStr, Result, ext::IdentExt, parse_macro_input, spanned::Spanned};

mod attrs;
mod derive_enum;
mod derive_struct;
mod generics;
mod types;
use attrs::{ContainerOptions, FieldOptions, parse_container_options};
use derive_enum::derive_enum;
use derive_struct::derive_struct;
use generics::add_bounds;

/// Derives `fieldsieve::Described`, `fieldsieve::Filterable` and
/// `fieldsieve::Schematic` for structs and enums.
///
/// # Container Attributes
///
/// - `#[sieve(title = "...")]`: type-level title, attached to the root of the
///   type's schema.
///
/// # Field Attributes
///
/// Named struct fields accept:
///
/// - **No annotation**: the field is untagged. Exclude policies always keep it;
///   include policies always drop it.
/// - `#[sieve(tags("a", "b"))]`: tags consulted by filter policies.
/// - `#[sieve(title = "...")]`: title of the field's schema property.
/// - `#[sieve(client_cache)]`: marks the field as client-cacheable.
/// - `#[sieve(serde)]`: renders the field through `serde::Serialize` instead
///   of `Filterable`. Its schema property is unconstrained.
/// - `#[sieve(skip)]`: leaves the field out of rendering, schema and metadata.
///
/// Options can be combined in one attribute or spread over several, except
/// `skip`, which stands alone.
///
/// # Shapes
///
/// - Named fields render as an object with keys in alphabetical order; the
///   schema lists properties in declaration order.
/// - A tuple struct with one field is transparent. Other tuple structs render
///   as arrays.
/// - Unit structs render as `{}`.
/// - Enum unit variants render as their name; other variants are externally
///   tagged (`{"Variant": ...}`).
/// - `PhantomData` fields are ignored.
///
/// `#[sieve]` on tuple struct fields, enum variants or their fields is a
/// compile error, as are unions.
#[proc_macro_derive(Sieve, attributes(sieve))]
pub fn derive_sieve(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the fieldsieve crate root.
///
/// Handles crate renaming (e.g., `sieve = { package = "fieldsieve", ... }`).
/// Inside fieldsieve itself the root is reached through its
/// `extern crate self as fieldsieve` alias.
fn crate_root() -> TokenStream {
    match crate_name("fieldsieve") {
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Ok(FoundCrate::Itself) | Err(_) => quote! { ::fieldsieve },
    }
}

/// The JSON key of a field or variant.
fn key_of(ident: &Ident) -> LitStr {
    LitStr::new(&ident.unraw().to_string(), ident.span())
}

/// Builds the `FieldMetadata` expression for one field.
fn field_metadata(options: &FieldOptions, crate_root: &TokenStream) -> TokenStream {
    let mut tokens = quote! { #crate_root::FieldMetadata::new() };
    if !options.tags.is_empty() {
        let tags = &options.tags;
        tokens = quote! { #tokens.with_tags([#(#tags),*]) };
    }
    if let Some(title) = &options.title {
        tokens = quote! { #tokens.with_title(#title) };
    }
    if options.client_cache {
        tokens = quote! { #tokens.client_cacheable() };
    }
    tokens
}

struct DeriveOutput {
    /// `.with_field(..)` calls, in declaration order.
    field_decls: Vec<TokenStream>,
    filter_body: TokenStream,
    schema_body: TokenStream,
    /// Generics of fields rendered through `Filterable`.
    filter_generics: Vec<Ident>,
    /// Generics of fields rendered through `serde`.
    serde_generics: Vec<Ident>,
    /// Generics of fields described through `Schematic`.
    schema_generics: Vec<Ident>,
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let ContainerOptions { title } = parse_container_options(&attrs)?;

    let output = match &data {
        Data::Struct(data) => derive_struct(data, &generics)?,
        Data::Enum(data) => derive_enum(data, &generics)?,
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Sieve` cannot be derived for unions",
            ));
        }
    };

    let crate_root = crate_root();
    let type_name = key_of(&ident);
    let title = title.map(|title| quote! { .with_title(#title) });
    let DeriveOutput {
        field_decls,
        filter_body,
        schema_body,
        filter_generics,
        serde_generics,
        schema_generics,
    } = output;

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let described_impl = quote! {
        impl #impl_generics #crate_root::Described for #ident #ty_generics #where_clause {
            fn type_info() -> &'static #crate_root::TypeInfo {
                static INFO: #crate_root::TypeInfoCell = #crate_root::TypeInfoCell::new();
                INFO.get_or_init(|| {
                    #crate_root::TypeInfo::new(#type_name)
                        #title
                        #(#field_decls)*
                })
            }
        }
    };

    let filterable_bound = quote! { #crate_root::Filterable };
    let serialize_bound = quote! { #crate_root::__private::Serialize };
    let filter_generics = add_bounds(generics.clone(), &filter_generics, &filterable_bound);
    let filter_generics = add_bounds(filter_generics, &serde_generics, &serialize_bound);
    let (filter_impl_generics, filter_ty_generics, filter_where_clause) =
        filter_generics.split_for_impl();
    let filterable_impl = quote! {
        impl #filter_impl_generics #crate_root::Filterable for #ident #filter_ty_generics #filter_where_clause {
            fn filter_with(
                &self,
                walker: &mut #crate_root::walk::FilterWalker<'_>,
            ) -> ::core::result::Result<
                ::core::option::Option<#crate_root::__private::Value>,
                #crate_root::SerializationError,
            > {
                #filter_body
            }
        }
    };

    let schematic_bound = quote! { #crate_root::Schematic };
    let schema_generics = add_bounds(generics.clone(), &schema_generics, &schematic_bound);
    let (schema_impl_generics, schema_ty_generics, schema_where_clause) =
        schema_generics.split_for_impl();
    let schematic_impl = quote! {
        impl #schema_impl_generics #crate_root::Schematic for #ident #schema_ty_generics #schema_where_clause {
            fn structure(
                walker: &mut #crate_root::schema::SchemaWalker,
            ) -> ::core::result::Result<#crate_root::SchemaNode, #crate_root::SchemaError> {
                #schema_body
            }
        }
    };

    Ok(quote! {
        #described_impl
        #filterable_impl
        #schematic_impl
    })
}
