//! Builder assembly.
//!
//! Selects a strategy for every property, then stitches the strategies'
//! fragments into the builder struct, the property marker enum, the
//! inherent `impl`, the optional checks trait and the `Type::builder()`
//! entry point. Per-property fragments are emitted in declaration order.

use std::collections::BTreeSet;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Generics, Ident, TypeGenerics, parse_quote};

use super::parse::{ParsedInput, PropertyDescriptor};
use super::registry::{CollectionLibrary, Config, FeatureSet, select};
use super::strategy::{EmitContext, PropertyKind, StaticHelper, Strategy};

mod helpers;
#[cfg(test)]
mod tests;

use helpers::emit_helpers;

/// Identifiers of the items generated for one value type.
struct Names {
    value: Ident,
    builder: Ident,
    property_enum: Ident,
    checks_trait: Ident,
    type_name: String,
}

impl Names {
    fn new(value: &Ident) -> Self {
        Self {
            value: value.clone(),
            builder: format_ident!("{}Builder", value),
            property_enum: format_ident!("__{}Property", value),
            checks_trait: format_ident!("{}BuilderChecks", value),
            type_name: value.unraw().to_string(),
        }
    }
}

/// Resolves struct attributes into the features generated code may use.
fn feature_set(parsed: &ParsedInput) -> FeatureSet {
    let attrs = &parsed.struct_attrs;
    FeatureSet {
        mappers: attrs.mappers.unwrap_or(true),
        collections: attrs
            .collections
            .unwrap_or_else(CollectionLibrary::detected),
    }
}

/// Setters the generated `new()` effectively invokes: those of properties
/// declaring a default.
fn methods_invoked_in_constructor(properties: &[PropertyDescriptor]) -> BTreeSet<String> {
    properties
        .iter()
        .filter(|property| property.default.is_some())
        .map(|property| property.setter_name().to_string())
        .collect()
}

/// Selects one strategy per property, preserving declaration order.
fn select_strategies(parsed: &ParsedInput) -> Vec<Strategy> {
    let features = feature_set(parsed);
    let invoked = methods_invoked_in_constructor(&parsed.properties);
    parsed
        .properties
        .iter()
        .map(|property| {
            select(&Config {
                property,
                features,
                methods_invoked_in_constructor: &invoked,
            })
        })
        .collect()
}

/// Generics for `impl` blocks: the struct's own, plus a bound requiring the
/// builder to implement its checks trait when any property has a hook.
fn impl_generics_with_checks(parsed: &ParsedInput, names: &Names, has_checks: bool) -> Generics {
    let mut generics = parsed.generics.clone();
    if has_checks {
        let (_, ty_generics, _) = parsed.generics.split_for_impl();
        let builder = &names.builder;
        let checks_trait = &names.checks_trait;
        generics
            .make_where_clause()
            .predicates
            .push(parse_quote!(#builder #ty_generics: #checks_trait #ty_generics));
    }
    generics
}

fn marker_enum_tokens(names: &Names, strategies: &[Strategy], krate: &TokenStream) -> TokenStream {
    let property_enum = &names.property_enum;
    let variants: Vec<&Ident> = strategies
        .iter()
        .map(|strategy| &strategy.emitter().property().capitalized_name)
        .collect();
    let field_names: Vec<String> = strategies
        .iter()
        .map(|strategy| strategy.emitter().property().base_name())
        .collect();
    quote! {
        #[doc(hidden)]
        #[allow(dead_code, non_camel_case_types)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        enum #property_enum {
            #(#variants,)*
        }

        impl #krate::PropertyMarker for #property_enum {
            fn name(self) -> &'static str {
                match self {
                    #(Self::#variants => #field_names,)*
                }
            }
        }
    }
}

fn builder_struct_tokens(
    parsed: &ParsedInput,
    names: &Names,
    strategies: &[Strategy],
    ctx: &EmitContext<'_>,
) -> TokenStream {
    let vis = &parsed.vis;
    let builder = &names.builder;
    let property_enum = &names.property_enum;
    let krate = ctx.krate;
    let (decl_generics, _, where_clause) = parsed.generics.split_for_impl();
    let fields = strategies.iter().map(|strategy| strategy.emitter().field_decl(ctx));
    let doc = format!(
        "Builder for [`{}`].\n\nCreate one with `{}::builder()`, set its properties, then call `build()`.",
        names.type_name, names.type_name
    );
    quote! {
        #[doc = #doc]
        #[derive(Clone)]
        #vis struct #builder #decl_generics #where_clause {
            #(#fields,)*
            __unset: #krate::UnsetProperties<#property_enum>,
        }
    }
}

fn checks_trait_tokens(
    parsed: &ParsedInput,
    names: &Names,
    strategies: &[Strategy],
    ctx: &EmitContext<'_>,
) -> TokenStream {
    let vis = &parsed.vis;
    let checks_trait = &names.checks_trait;
    let (decl_generics, _, where_clause) = parsed.generics.split_for_impl();
    let hooks = strategies
        .iter()
        .map(Strategy::emitter)
        .filter(|emitter| emitter.property().check)
        .map(|emitter| emitter.check_hook(ctx));
    let doc = format!(
        "Validation hooks for [`{}`].\n\nImplement this trait for the builder and override the \
         checks you need. A hook returning an error aborts the mutation that triggered it and \
         leaves the builder unchanged.",
        names.builder
    );
    quote! {
        #[doc = #doc]
        #vis trait #checks_trait #decl_generics #where_clause {
            #(#hooks)*
        }
    }
}

/// `new()`, `build()` and the other whole-builder operations.
fn lifecycle_methods(
    names: &Names,
    ty_generics: &TypeGenerics<'_>,
    strategies: &[Strategy],
    ctx: &EmitContext<'_>,
) -> TokenStream {
    let krate = ctx.krate;
    let value = &names.value;
    let type_name = &names.type_name;
    let emitters: Vec<_> = strategies.iter().map(Strategy::emitter).collect();
    let inits = emitters.iter().map(|emitter| emitter.field_init(ctx));
    let required = emitters
        .iter()
        .filter(|emitter| emitter.kind() == PropertyKind::Required)
        .map(|emitter| ctx.marker(emitter.property()));
    let finals = emitters.iter().map(|emitter| emitter.finalize(ctx));
    let source = format_ident!("value");
    let merges = emitters
        .iter()
        .map(|emitter| emitter.merge_from_value(ctx, &source));
    let other = format_ident!("other");
    let builder_merges = emitters
        .iter()
        .map(|emitter| emitter.merge_from_builder(ctx, &other));
    let template = format_ident!("template");
    let clears = emitters.iter().map(|emitter| emitter.clear(ctx, &template));
    let partial_clears = emitters.iter().map(|emitter| emitter.partial_clear(ctx));
    let property_enum = ctx.property_enum;
    let build_doc = format!("Builds a [`{type_name}`] from the current state.");
    quote! {
        /// Creates a builder with every property at its initial value.
        #[must_use]
        pub fn new() -> Self {
            Self {
                #(#inits,)*
                __unset: #krate::UnsetProperties::<#property_enum>::new([#(#required),*]),
            }
        }

        #[doc = #build_doc]
        ///
        /// # Errors
        ///
        /// Returns `BuilderError::Incomplete` listing every required property
        /// that has not been set, in declaration order.
        pub fn build(&self) -> #krate::BuilderResult<#value #ty_generics> {
            self.__unset.ensure_complete(#type_name)?;
            ::core::result::Result::Ok(#value {
                #(#finals,)*
            })
        }

        /// Sets every property from `value`.
        ///
        /// Plain and optional properties are overwritten; collections gain
        /// `value`'s elements.
        ///
        /// # Errors
        ///
        /// Propagates the first error raised while merging, such as a
        /// duplicate map key or a failed check.
        pub fn merge_from(&mut self, value: &#value #ty_generics) -> #krate::BuilderResult<&mut Self> {
            #(#merges)*
            ::core::result::Result::Ok(self)
        }

        /// Copies every property set on `other` into this builder.
        ///
        /// # Errors
        ///
        /// Propagates the first error raised while merging, such as a
        /// duplicate map key or a failed check.
        pub fn merge_from_builder(&mut self, other: &Self) -> #krate::BuilderResult<&mut Self> {
            #(#builder_merges)*
            ::core::result::Result::Ok(self)
        }

        /// Creates a builder initialised from `value`.
        ///
        /// # Errors
        ///
        /// Propagates any error raised by a check hook.
        pub fn from_value(value: &#value #ty_generics) -> #krate::BuilderResult<Self> {
            let mut builder = Self::new();
            builder.merge_from(value)?;
            ::core::result::Result::Ok(builder)
        }

        /// Resets every property to its initial value.
        pub fn clear(&mut self) -> &mut Self {
            let template = Self::new();
            #(#clears)*
            self.__unset = template.__unset;
            self
        }

        /// Unsets optional properties and empties collections so the
        /// builder can be reused. Plain values keep their current state.
        pub fn clear_partial(&mut self) -> &mut Self {
            #(#partial_clears)*
            self
        }
    }
}

/// Expands the builder for a parsed input.
pub(crate) fn generate_builder(parsed: &ParsedInput) -> TokenStream {
    let names = Names::new(&parsed.ident);
    let krate = parsed.struct_attrs.runtime_crate();
    let strategies = select_strategies(parsed);
    let has_checks = parsed.properties.iter().any(|property| property.check);

    let (_, ty_generics, _) = parsed.generics.split_for_impl();
    let checks_trait = &names.checks_trait;
    let checks = quote! { <Self as #checks_trait #ty_generics> };
    let ctx = EmitContext {
        krate: &krate,
        type_name: &names.type_name,
        property_enum: &names.property_enum,
        checks: &checks,
    };

    let marker_enum = marker_enum_tokens(&names, &strategies, &krate);
    let builder_struct = builder_struct_tokens(parsed, &names, &strategies, &ctx);
    let checks_decl = if has_checks {
        checks_trait_tokens(parsed, &names, &strategies, &ctx)
    } else {
        TokenStream::new()
    };

    let generics = impl_generics_with_checks(parsed, &names, has_checks);
    let (impl_generics, _, where_clause) = generics.split_for_impl();
    let builder = &names.builder;
    let value = &names.value;
    let accessors = strategies
        .iter()
        .map(|strategy| strategy.emitter().accessors(&ctx));
    let lifecycle = lifecycle_methods(&names, &ty_generics, &strategies, &ctx);
    let requested: BTreeSet<StaticHelper> = strategies
        .iter()
        .flat_map(|strategy| strategy.emitter().static_helpers())
        .collect();
    let helpers = emit_helpers(&requested);

    quote! {
        #marker_enum
        #builder_struct
        #checks_decl

        impl #impl_generics #builder #ty_generics #where_clause {
            #lifecycle
            #(#accessors)*
            #helpers
        }

        impl #impl_generics ::core::default::Default for #builder #ty_generics #where_clause {
            fn default() -> Self {
                Self::new()
            }
        }

        impl #impl_generics #value #ty_generics #where_clause {
            /// Returns a new builder for this type.
            #[must_use]
            pub fn builder() -> #builder #ty_generics {
                #builder::new()
            }
        }
    }
}
