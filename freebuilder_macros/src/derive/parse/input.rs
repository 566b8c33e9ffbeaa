//! Input parsing for the `FreeBuilder` derive macro.
//!
//! This module gathers the struct identifier, generics, attribute metadata
//! and one property descriptor per field in a single pass so expansion can
//! fail fast with useful errors.

use std::collections::HashMap;

use quote::format_ident;
use syn::{Data, DeriveInput, Fields, Generics, Ident, Visibility};

use super::{PropertyDescriptor, StructAttrs, parse_field_attrs, parse_struct_attrs};

/// The parts of a derive input that code generation consumes.
pub(crate) struct ParsedInput {
    pub ident: Ident,
    pub vis: Visibility,
    pub generics: Generics,
    pub struct_attrs: StructAttrs,
    /// Descriptors in field declaration order.
    pub properties: Vec<PropertyDescriptor>,
}

/// Gathers information from the user-provided struct.
///
/// Only structs with named fields are accepted. Every field becomes one
/// property, in declaration order.
pub(crate) fn parse_input(input: &DeriveInput) -> Result<ParsedInput, syn::Error> {
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "FreeBuilder requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "FreeBuilder can only be derived for structs",
            ));
        }
    };

    let mut properties = fields
        .iter()
        .map(|field| {
            let attrs = parse_field_attrs(&field.attrs)?;
            PropertyDescriptor::from_field(field, attrs)
        })
        .collect::<syn::Result<Vec<_>>>()?;
    disambiguate_markers(&mut properties);

    Ok(ParsedInput {
        ident: input.ident.clone(),
        vis: input.vis.clone(),
        generics: input.generics.clone(),
        struct_attrs,
        properties,
    })
}

/// Gives every property a distinct marker variant.
///
/// Distinct field names such as `line_1` and `line1` share an upper camel
/// case form. Each clashing variant gains an `_<index>` suffix; camel case
/// names never contain underscores, so suffixed names cannot clash with
/// the rest.
fn disambiguate_markers(properties: &mut [PropertyDescriptor]) {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for property in &*properties {
        *counts
            .entry(property.capitalized_name.to_string())
            .or_default() += 1;
    }
    for (index, property) in properties.iter_mut().enumerate() {
        let name = property.capitalized_name.to_string();
        if counts.get(&name).is_some_and(|count| *count > 1) {
            property.capitalized_name = format_ident!("{}_{}", name, index);
        }
    }
}
