//! Parsing of `#[sieve(...)]` container and field attributes.
//!
//! This module maps attribute syntax to declarations and produces structured
//! errors for invalid forms.
//!
//! | Position  | Option                   | Meaning                                   |
//! |-----------|--------------------------|-------------------------------------------|
//! | container | `title = "..."`          | Type-level title of the schema root       |
//! | field     | `tags("a", "b")`         | Tags consulted by filter policies         |
//! | field     | `title = "..."`          | Title of the field's schema property      |
//! | field     | `client_cache`           | Marks the field as client-cacheable       |
//! | field     | `serde`                  | Render through `serde::Serialize`         |
//! | field     | `skip`                   | Leave the field out of rendering and schema |

use proc_macro2::Span;
use syn::{
    Attribute, LitStr, Result, Token, meta::ParseNestedMeta, punctuated::Punctuated,
    spanned::Spanned,
};

const ATTR: &str = "sieve";

/// Options declared on the struct or enum itself.
#[derive(Debug, Default)]
pub(crate) struct ContainerOptions {
    pub(crate) title: Option<LitStr>,
}

/// Options declared on one named field.
#[derive(Debug, Default)]
pub(crate) struct FieldOptions {
    pub(crate) title: Option<LitStr>,
    pub(crate) tags: Vec<LitStr>,
    pub(crate) client_cache: bool,
    pub(crate) serde: bool,
    pub(crate) skip: bool,
}

fn set_once<T>(slot: &mut Option<T>, value: T, meta: &ParseNestedMeta<'_>, key: &str) -> Result<()> {
    if slot.is_some() {
        return Err(meta.error(format!("duplicate `{key}` option")));
    }
    *slot = Some(value);
    Ok(())
}

fn set_flag(flag: &mut bool, meta: &ParseNestedMeta<'_>, key: &str) -> Result<()> {
    if *flag {
        return Err(meta.error(format!("duplicate `{key}` option")));
    }
    if !meta.input.is_empty() && !meta.input.peek(Token![,]) {
        return Err(meta.error(format!("`{key}` does not take arguments")));
    }
    *flag = true;
    Ok(())
}

fn parse_title(meta: &ParseNestedMeta<'_>) -> Result<LitStr> {
    let title: LitStr = meta.value()?.parse()?;
    if title.value().trim().is_empty() {
        return Err(syn::Error::new(title.span(), "title must not be empty"));
    }
    Ok(title)
}

fn parse_tags(meta: &ParseNestedMeta<'_>) -> Result<Vec<LitStr>> {
    let content;
    syn::parenthesized!(content in meta.input);
    let tags = Punctuated::<LitStr, Token![,]>::parse_terminated(&content).map_err(|err| {
        syn::Error::new(err.span(), "expected string literal tags, e.g. tags(\"pii\")")
    })?;
    if tags.is_empty() {
        return Err(meta.error("`tags(...)` needs at least one tag"));
    }
    for tag in &tags {
        if tag.value().is_empty() {
            return Err(syn::Error::new(tag.span(), "tags must not be empty strings"));
        }
    }
    Ok(tags.into_iter().collect())
}

pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident(ATTR)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("title") {
                let title = parse_title(&meta)?;
                set_once(&mut options.title, title, &meta, "title")
            } else {
                Err(meta.error("unknown container option; expected `title = \"...\"`"))
            }
        })?;
    }
    Ok(options)
}

pub(crate) fn parse_field_options(attrs: &[Attribute]) -> Result<FieldOptions> {
    let mut options = FieldOptions::default();
    let mut tags: Option<Vec<LitStr>> = None;
    let mut skip_span: Option<Span> = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident(ATTR)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("title") {
                let title = parse_title(&meta)?;
                set_once(&mut options.title, title, &meta, "title")
            } else if meta.path.is_ident("tags") {
                let parsed = parse_tags(&meta)?;
                set_once(&mut tags, parsed, &meta, "tags")
            } else if meta.path.is_ident("client_cache") {
                set_flag(&mut options.client_cache, &meta, "client_cache")
            } else if meta.path.is_ident("serde") {
                set_flag(&mut options.serde, &meta, "serde")
            } else if meta.path.is_ident("skip") {
                skip_span = Some(meta.path.span());
                set_flag(&mut options.skip, &meta, "skip")
            } else {
                Err(meta.error(
                    "unknown field option; expected one of `tags(...)`, `title = \"...\"`, \
                     `client_cache`, `serde`, `skip`",
                ))
            }
        })?;
    }

    options.tags = tags.unwrap_or_default();
    if let Some(span) = skip_span {
        let combined = options.title.is_some()
            || !options.tags.is_empty()
            || options.client_cache
            || options.serde;
        if combined {
            return Err(syn::Error::new(
                span,
                "`skip` cannot be combined with other `#[sieve]` options",
            ));
        }
    }
    Ok(options)
}

/// Rejects `#[sieve]` on positions that carry no declarations.
pub(crate) fn reject_attrs(attrs: &[Attribute], position: &str) -> Result<()> {
    if let Some(attr) = attrs.iter().find(|attr| attr.path().is_ident(ATTR)) {
        return Err(syn::Error::new(
            attr.span(),
            format!("`#[sieve]` is not supported on {position}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::DeriveInput;

    use super::*;

    fn parse_attrs(tokens: proc_macro2::TokenStream) -> Vec<Attribute> {
        let input: DeriveInput = syn::parse2(quote! {
            #tokens
            struct Dummy;
        })
        .expect("should parse as DeriveInput");
        input.attrs
    }

    fn field_error(tokens: proc_macro2::TokenStream) -> String {
        parse_field_options(&parse_attrs(tokens))
            .unwrap_err()
            .to_string()
    }

    #[test]
    fn no_attribute_is_untagged() {
        let options = parse_field_options(&parse_attrs(quote! {})).unwrap();
        assert!(options.tags.is_empty());
        assert!(options.title.is_none());
        assert!(!options.client_cache && !options.serde && !options.skip);
    }

    #[test]
    fn other_attributes_are_ignored() {
        let options = parse_field_options(&parse_attrs(quote! { #[serde(rename = "x")] })).unwrap();
        assert!(options.tags.is_empty());
    }

    #[test]
    fn parses_all_field_options() {
        let attrs = parse_attrs(quote! {
            #[sieve(tags("pii", "internal"), title = "Full Name")]
            #[sieve(client_cache, serde)]
        });
        let options = parse_field_options(&attrs).unwrap();
        let tags: Vec<String> = options.tags.iter().map(LitStr::value).collect();
        assert_eq!(tags, ["pii", "internal"]);
        assert_eq!(options.title.unwrap().value(), "Full Name");
        assert!(options.client_cache);
        assert!(options.serde);
        assert!(!options.skip);
    }

    #[test]
    fn skip_alone_is_accepted() {
        let options = parse_field_options(&parse_attrs(quote! { #[sieve(skip)] })).unwrap();
        assert!(options.skip);
    }

    #[test]
    fn skip_with_other_options_errors() {
        let err = field_error(quote! { #[sieve(skip, tags("pii"))] });
        assert!(err.contains("cannot be combined"));
    }

    #[test]
    fn unknown_field_option_errors() {
        let err = field_error(quote! { #[sieve(hidden)] });
        assert!(err.contains("unknown field option"));
    }

    #[test]
    fn duplicate_title_errors() {
        let err = field_error(quote! { #[sieve(title = "A")] #[sieve(title = "B")] });
        assert!(err.contains("duplicate `title`"));
    }

    #[test]
    fn duplicate_tags_errors() {
        let err = field_error(quote! { #[sieve(tags("a"), tags("b"))] });
        assert!(err.contains("duplicate `tags`"));
    }

    #[test]
    fn non_string_tags_error() {
        let err = field_error(quote! { #[sieve(tags(pii))] });
        assert!(err.contains("expected string literal tags"));
    }

    #[test]
    fn empty_tag_list_errors() {
        let err = field_error(quote! { #[sieve(tags())] });
        assert!(err.contains("at least one tag"));
    }

    #[test]
    fn empty_tag_string_errors() {
        let err = field_error(quote! { #[sieve(tags(""))] });
        assert!(err.contains("must not be empty"));
    }

    #[test]
    fn flag_with_value_errors() {
        let err = field_error(quote! { #[sieve(client_cache = true)] });
        assert!(err.contains("does not take arguments"));
    }

    #[test]
    fn container_title_parses() {
        let options = parse_container_options(&parse_attrs(quote! {
            #[sieve(title = "User Profile")]
        }))
        .unwrap();
        assert_eq!(options.title.unwrap().value(), "User Profile");
    }

    #[test]
    fn container_rejects_field_options() {
        let err = parse_container_options(&parse_attrs(quote! { #[sieve(tags("pii"))] }))
            .unwrap_err()
            .to_string();
        assert!(err.contains("unknown container option"));
    }

    #[test]
    fn reject_attrs_names_position() {
        let err = reject_attrs(&parse_attrs(quote! { #[sieve(skip)] }), "enum variant fields")
            .unwrap_err()
            .to_string();
        assert!(err.contains("enum variant fields"));
        assert!(reject_attrs(&parse_attrs(quote! { #[doc = "x"] }), "enum variants").is_ok());
    }
}
