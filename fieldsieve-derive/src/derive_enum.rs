//! Enum-specific derivation.
//!
//! Unit variants render as their name and every other variant is externally
//! tagged. Enums with only unit variants describe as a string enumeration;
//! the rest describe as a union of their variant shapes.

use proc_macro2::TokenStream;
use quote::{format_ident, quote, quote_spanned};
use syn::{DataEnum, Fields, Result, Variant, spanned::Spanned};

use crate::{
    DeriveOutput, attrs::reject_attrs, crate_root, generics::collect_generics_from_type, key_of,
    types::is_phantom_data,
};

/// A variant field that takes part in rendering.
struct VariantField<'a> {
    /// JSON key for named fields.
    key: Option<syn::LitStr>,
    binding: syn::Ident,
    ty: &'a syn::Type,
}

struct VariantArms {
    filter: TokenStream,
    schema: TokenStream,
}

pub(crate) fn derive_enum(data: &DataEnum, generics: &syn::Generics) -> Result<DeriveOutput> {
    let mut used_generics = Vec::new();
    let mut filter_arms = Vec::new();
    let mut schema_steps = Vec::new();
    let mut unit_names = Vec::new();
    let mut all_unit = true;

    for variant in &data.variants {
        reject_attrs(&variant.attrs, "enum variants")?;
        for field in &variant.fields {
            reject_attrs(&field.attrs, "enum variant fields")?;
            if !is_phantom_data(&field.ty) {
                collect_generics_from_type(&field.ty, generics, &mut used_generics);
            }
        }
        if matches!(variant.fields, Fields::Unit) {
            unit_names.push(key_of(&variant.ident));
        } else {
            all_unit = false;
        }
        let arms = derive_variant(variant);
        filter_arms.push(arms.filter);
        schema_steps.push(arms.schema);
    }

    let filter_body = if data.variants.is_empty() {
        quote! {
            let _ = walker;
            match *self {}
        }
    } else {
        quote! {
            match self {
                #(#filter_arms)*
            }
        }
    };

    let schema_body = if all_unit {
        quote! { walker.enumeration::<Self>(&[#(#unit_names),*]) }
    } else {
        quote! {
            walker.union::<Self, _>(|variants| {
                #(#schema_steps)*
                ::core::result::Result::Ok(())
            })
        }
    };

    Ok(DeriveOutput {
        field_decls: Vec::new(),
        filter_body,
        schema_body,
        filter_generics: used_generics.clone(),
        serde_generics: Vec::new(),
        schema_generics: used_generics,
    })
}

fn derive_variant(variant: &Variant) -> VariantArms {
    let crate_root = crate_root();
    let ident = &variant.ident;
    let name = key_of(ident);

    match &variant.fields {
        Fields::Unit => VariantArms {
            filter: quote! { Self::#ident => walker.unit_variant(#name), },
            schema: quote! { variants.unit(#name); },
        },
        Fields::Named(fields) => {
            let mut kept = Vec::new();
            for (index, field) in fields.named.iter().enumerate() {
                if is_phantom_data(&field.ty) {
                    continue;
                }
                if let Some(field_ident) = &field.ident {
                    kept.push((
                        field_ident,
                        VariantField {
                            key: Some(key_of(field_ident)),
                            binding: format_ident!("__sieve_{}", index),
                            ty: &field.ty,
                        },
                    ));
                }
            }
            let pattern_fields: Vec<TokenStream> = kept
                .iter()
                .map(|(field_ident, field)| {
                    let binding = &field.binding;
                    quote! { #field_ident: #binding }
                })
                .collect();
            let mut fields: Vec<VariantField<'_>> = kept.into_iter().map(|(_, field)| field).collect();

            let properties: Vec<TokenStream> = fields
                .iter()
                .map(|field| {
                    let VariantField { key, ty, .. } = field;
                    quote_spanned! { ty.span() => object.property::<#ty>(#key)?; }
                })
                .collect();
            let schema = if properties.is_empty() {
                quote! { variants.object(#name, |_| ::core::result::Result::Ok(()))?; }
            } else {
                quote! {
                    variants.object(#name, |object| {
                        #(#properties)*
                        ::core::result::Result::Ok(())
                    })?;
                }
            };

            fields.sort_by_key(|field| field.key.as_ref().map(syn::LitStr::value));
            let field_calls = fields.iter().map(|field| {
                let VariantField { key, binding, ty } = field;
                quote_spanned! { ty.span() => object.field(#key, #binding)?; }
            });
            let filter = quote! {
                Self::#ident { #(#pattern_fields,)* .. } => {
                    let info = <Self as #crate_root::Described>::type_info();
                    #[allow(unused_mut)]
                    let mut object = walker.struct_variant(info, #name);
                    #(#field_calls)*
                    ::core::result::Result::Ok(::core::option::Option::Some(object.finish()))
                }
            };
            VariantArms { filter, schema }
        }
        Fields::Unnamed(fields) => {
            let mut patterns = Vec::new();
            let mut kept = Vec::new();
            for (index, field) in fields.unnamed.iter().enumerate() {
                if is_phantom_data(&field.ty) {
                    patterns.push(quote! { _ });
                    continue;
                }
                let binding = format_ident!("__sieve_{}", index);
                patterns.push(quote! { #binding });
                kept.push(VariantField {
                    key: None,
                    binding,
                    ty: &field.ty,
                });
            }

            if let [field] = kept.as_slice() {
                let VariantField { binding, ty, .. } = field;
                return VariantArms {
                    filter: quote_spanned! { ty.span() =>
                        Self::#ident(#(#patterns),*) => walker.newtype_variant(#name, #binding),
                    },
                    schema: quote_spanned! { ty.span() =>
                        variants.newtype::<#ty>(#name)?;
                    },
                };
            }

            let elements = kept.iter().map(|VariantField { binding, ty, .. }| {
                quote_spanned! { ty.span() => tuple.element(#binding)?; }
            });
            let element_types = kept.iter().map(|VariantField { ty, .. }| {
                quote_spanned! { ty.span() => tuple.element::<#ty>()?; }
            });
            let schema = if kept.is_empty() {
                quote! { variants.tuple(#name, |_| ::core::result::Result::Ok(()))?; }
            } else {
                quote! {
                    variants.tuple(#name, |tuple| {
                        #(#element_types)*
                        ::core::result::Result::Ok(())
                    })?;
                }
            };
            let filter = quote! {
                Self::#ident(#(#patterns),*) => {
                    #[allow(unused_mut)]
                    let mut tuple = walker.tuple_variant(#name);
                    #(#elements)*
                    ::core::result::Result::Ok(::core::option::Option::Some(tuple.finish()))
                }
            };
            VariantArms { filter, schema }
        }
    }
}
