//! Struct-specific derivation.
//!
//! Named fields produce metadata declarations, an object walk in
//! alphabetical key order and an object schema in declaration order. Tuple
//! structs with one field are transparent; other tuple structs walk and
//! describe as positional arrays.

use proc_macro2::{Ident, TokenStream};
use quote::{quote, quote_spanned};
use syn::{DataStruct, Fields, FieldsNamed, FieldsUnnamed, LitStr, Result, spanned::Spanned};

use crate::{
    DeriveOutput,
    attrs::{parse_field_options, reject_attrs},
    crate_root, field_metadata,
    generics::collect_generics_from_type,
    key_of,
    types::is_phantom_data,
};

pub(crate) fn derive_struct(data: &DataStruct, generics: &syn::Generics) -> Result<DeriveOutput> {
    match &data.fields {
        Fields::Named(fields) => derive_named_struct(fields, generics),
        Fields::Unnamed(fields) => derive_unnamed_struct(fields, generics),
        Fields::Unit => Ok(derive_unit_struct()),
    }
}

fn derive_unit_struct() -> DeriveOutput {
    let crate_root = crate_root();
    DeriveOutput {
        field_decls: Vec::new(),
        filter_body: quote! {
            let info = <Self as #crate_root::Described>::type_info();
            ::core::result::Result::Ok(::core::option::Option::Some(walker.object(info).finish()))
        },
        schema_body: quote! {
            walker.object::<Self, _>(|_| ::core::result::Result::Ok(()))
        },
        filter_generics: Vec::new(),
        serde_generics: Vec::new(),
        schema_generics: Vec::new(),
    }
}

struct NamedField<'a> {
    key: LitStr,
    ident: &'a Ident,
    ty: &'a syn::Type,
    serde: bool,
}

fn derive_named_struct(fields: &FieldsNamed, generics: &syn::Generics) -> Result<DeriveOutput> {
    let crate_root = crate_root();
    let mut kept = Vec::new();
    let mut field_decls = Vec::new();
    let mut filter_generics = Vec::new();
    let mut serde_generics = Vec::new();
    let mut schema_generics = Vec::new();

    for field in &fields.named {
        let options = parse_field_options(&field.attrs)?;
        if options.skip || is_phantom_data(&field.ty) {
            continue;
        }
        let Some(ident) = field.ident.as_ref() else {
            return Err(syn::Error::new(field.span(), "named field has no identifier"));
        };
        let key = key_of(ident);

        let metadata = field_metadata(&options, &crate_root);
        field_decls.push(quote! { .with_field(#key, #metadata) });

        if options.serde {
            collect_generics_from_type(&field.ty, generics, &mut serde_generics);
        } else {
            collect_generics_from_type(&field.ty, generics, &mut filter_generics);
            collect_generics_from_type(&field.ty, generics, &mut schema_generics);
        }

        kept.push(NamedField {
            key,
            ident,
            ty: &field.ty,
            serde: options.serde,
        });
    }

    let properties: Vec<TokenStream> = kept.iter().map(schema_property).collect();

    kept.sort_by_key(|field| field.key.value());
    let field_calls = kept.iter().map(|field| {
        let NamedField { key, ident, ty, .. } = field;
        if field.serde {
            quote_spanned! { ty.span() =>
                object.serde_field(#key, &self.#ident)?;
            }
        } else {
            quote_spanned! { ty.span() =>
                object.field(#key, &self.#ident)?;
            }
        }
    });

    let schema_body = if properties.is_empty() {
        quote! { walker.object::<Self, _>(|_| ::core::result::Result::Ok(())) }
    } else {
        quote! {
            walker.object::<Self, _>(|object| {
                #(#properties)*
                ::core::result::Result::Ok(())
            })
        }
    };

    Ok(DeriveOutput {
        field_decls,
        filter_body: quote! {
            let info = <Self as #crate_root::Described>::type_info();
            #[allow(unused_mut)]
            let mut object = walker.object(info);
            #(#field_calls)*
            ::core::result::Result::Ok(::core::option::Option::Some(object.finish()))
        },
        schema_body,
        filter_generics,
        serde_generics,
        schema_generics,
    })
}

fn schema_property(field: &NamedField<'_>) -> TokenStream {
    let NamedField { key, ty, .. } = field;
    if field.serde {
        quote! { object.any_property(#key); }
    } else {
        quote_spanned! { ty.span() =>
            object.property::<#ty>(#key)?;
        }
    }
}

fn derive_unnamed_struct(fields: &FieldsUnnamed, generics: &syn::Generics) -> Result<DeriveOutput> {
    let crate_root = crate_root();
    let mut kept = Vec::new();
    let mut used_generics = Vec::new();

    for (index, field) in fields.unnamed.iter().enumerate() {
        reject_attrs(&field.attrs, "tuple struct fields")?;
        if is_phantom_data(&field.ty) {
            continue;
        }
        collect_generics_from_type(&field.ty, generics, &mut used_generics);
        kept.push((syn::Index::from(index), &field.ty));
    }

    let (filter_body, schema_body) = if let [(index, ty)] = kept.as_slice() {
        (
            quote_spanned! { ty.span() =>
                #crate_root::Filterable::filter_with(&self.#index, walker)
            },
            quote_spanned! { ty.span() =>
                walker.transparent::<Self, #ty>()
            },
        )
    } else {
        let elements = kept.iter().map(|(index, ty)| {
            quote_spanned! { ty.span() =>
                tuple.element(&self.#index)?;
            }
        });
        let element_types = kept.iter().map(|(_, ty)| {
            quote_spanned! { ty.span() =>
                tuple.element::<#ty>()?;
            }
        });
        let schema_body = if kept.is_empty() {
            quote! { walker.tuple::<Self, _>(|_| ::core::result::Result::Ok(())) }
        } else {
            quote! {
                walker.tuple::<Self, _>(|tuple| {
                    #(#element_types)*
                    ::core::result::Result::Ok(())
                })
            }
        };
        (
            quote! {
                #[allow(unused_mut)]
                let mut tuple = walker.tuple();
                #(#elements)*
                ::core::result::Result::Ok(::core::option::Option::Some(tuple.finish()))
            },
            schema_body,
        )
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
