//! Parsing utilities for the `FreeBuilder` derive macro.
//!
//! Struct and field attributes share the `#[builder(...)]` namespace.
//! Unknown keys are discarded so older macro versions keep accepting input
//! written for newer ones; malformed values of known keys are rejected with
//! a spanned error.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::parenthesized;
use syn::{Attribute, Token};

mod descriptor;
mod input;
mod literals;
#[cfg(test)]
mod tests;
mod type_utils;

#[cfg(test)]
pub(crate) use descriptor::NullableMarker;
pub(crate) use descriptor::{DefaultValue, PropertyDescriptor, TypeRef, TypeShape};
pub(crate) use input::{ParsedInput, parse_input};
use literals::{flag, lit_str};

use super::registry::CollectionLibrary;

/// Struct-level attributes recognised by `#[derive(FreeBuilder)]`.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[builder(crate = "my_alias")]`, generated code
    /// references types through `my_alias::` instead of `::freebuilder::`.
    pub crate_path: Option<syn::Path>,
    /// `Some(false)` when `#[builder(mappers = false)]` disables `map_*`.
    pub mappers: Option<bool>,
    pub collections: Option<CollectionLibrary>,
}

impl StructAttrs {
    /// Path prefixing every runtime item in generated code.
    ///
    /// `::freebuilder` unless `crate = "..."` names an alias, in which case
    /// the alias is used verbatim so it resolves at the derive site.
    pub(crate) fn runtime_crate(&self) -> TokenStream {
        self.crate_path
            .as_ref()
            .map_or_else(|| quote! { ::freebuilder }, |path| quote! { #path })
    }
}

/// Field-level attributes recognised by `#[derive(FreeBuilder)]`.
///
/// - `default` / `default = expr` makes a plain value has-default.
/// - `nullable` marks an `Option` field as optional; its span is kept so
///   misuse on other types can be reported precisely.
/// - `check` requests a validation hook.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub default: Option<DefaultValue>,
    pub default_span: Option<Span>,
    pub nullable: Option<Span>,
    pub check: bool,
}

/// Iterate all `#[builder(...)]` attributes once and apply a callback.
fn parse_builder_attrs<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("builder")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

/// Extracts `#[builder(...)]` metadata applied to a struct.
///
/// Recognised keys are `crate`, `mappers` and `collections`.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> Result<StructAttrs, syn::Error> {
    let mut out = StructAttrs::default();
    parse_builder_attrs(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("crate") => {
                let s = lit_str(meta, "crate")?;
                let path: syn::Path =
                    syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
                out.crate_path = Some(path);
                Ok(())
            }
            Some("mappers") => {
                out.mappers = Some(flag(meta, "mappers")?);
                Ok(())
            }
            Some("collections") => {
                let s = lit_str(meta, "collections")?;
                out.collections = Some(CollectionLibrary::parse(&s.value(), s.span())?);
                Ok(())
            }
            _ => discard_unknown(meta),
        }
    })?;
    Ok(out)
}

/// Applies a recognised field attribute, returning `true` if handled.
fn apply_field_attr(meta: &ParseNestedMeta, out: &mut FieldAttrs) -> Result<bool, syn::Error> {
    let Some(ident) = meta.path.get_ident() else {
        return Ok(false);
    };
    match ident.to_string().as_str() {
        "default" => {
            let value = if meta.input.peek(Token![=]) {
                DefaultValue::Expr(meta.value()?.parse()?)
            } else {
                DefaultValue::Implicit
            };
            out.default = Some(value);
            out.default_span = Some(ident.span());
            Ok(true)
        }
        "nullable" => {
            if flag(meta, "nullable")? {
                out.nullable = Some(ident.span());
            }
            Ok(true)
        }
        "check" => {
            out.check = flag(meta, "check")?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Parses field-level `#[builder(...)]` attributes.
///
/// Recognised keys are `default`, `nullable` and `check`. Unknown keys are
/// ignored, matching [`parse_struct_attrs`].
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> Result<FieldAttrs, syn::Error> {
    let mut out = FieldAttrs::default();
    parse_builder_attrs(attrs, |meta| {
        if !apply_field_attr(meta, &mut out)? {
            discard_unknown(meta)?;
        }
        Ok(())
    })?;
    Ok(out)
}
