//! Aggregation strategies.
//!
//! A strategy is bound to one property and owns every fragment of generated
//! code that touches it: the builder field, its initial value, the mutators
//! and getters, the validation hook declaration, the expression that copies
//! it into the built value, merges and resets. Strategies never see each
//! other; the coordinator in `generate` stitches their fragments together.

use std::collections::BTreeSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

use super::parse::{PropertyDescriptor, TypeRef};

mod collection;
mod map;
mod optional;
mod scalar;

pub(crate) use collection::{CollectionKind, CollectionStrategy};
pub(crate) use map::MapStrategy;
pub(crate) use optional::OptionalStrategy;
pub(crate) use scalar::ScalarStrategy;

/// How a property participates in completeness tracking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PropertyKind {
    /// Must be set before `build()`; tracked by a marker.
    Required,
    /// May be left unset; reads as `None`.
    Optional,
    /// Starts from a value supplied by the constructor.
    HasDefault,
}

/// Private associated functions a strategy needs emitted once per builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum StaticHelper {
    /// `__immutable_map`: copies fallback map storage into the declared type.
    ImmutableMap,
    /// `__immutable_collection`: copies fallback set or list storage into the
    /// declared type.
    ImmutableCollection,
}

impl StaticHelper {
    pub(crate) fn ident(self) -> Ident {
        let name = match self {
            Self::ImmutableMap => "__immutable_map",
            Self::ImmutableCollection => "__immutable_collection",
        };
        Ident::new(name, proc_macro2::Span::call_site())
    }
}

/// Names shared by every strategy of one generated builder.
pub(crate) struct EmitContext<'a> {
    /// Path of the runtime crate.
    pub krate: &'a TokenStream,
    /// Name of the value type, as reported in errors.
    pub type_name: &'a str,
    /// The generated property marker enum.
    pub property_enum: &'a Ident,
    /// Qualified path of the checks trait as implemented by the builder,
    /// e.g. `<Self as PersonBuilderChecks>`.
    pub checks: &'a TokenStream,
}

impl EmitContext<'_> {
    /// Path of the marker variant for `property`.
    pub(crate) fn marker(&self, property: &PropertyDescriptor) -> TokenStream {
        let property_enum = self.property_enum;
        let variant = &property.capitalized_name;
        quote! { #property_enum::#variant }
    }

    /// Statement running `property`'s check hook over `args`, or nothing
    /// when the property has no hook.
    pub(crate) fn check(&self, property: &PropertyDescriptor, args: &TokenStream) -> TokenStream {
        if !property.check {
            return TokenStream::new();
        }
        let checks = self.checks;
        let hook = property.method("check");
        quote! { #checks::#hook(&*self, #args)?; }
    }

    /// Return type of a mutator that runs `property`'s check hook.
    pub(crate) fn mutator_return(&self, property: &PropertyDescriptor) -> TokenStream {
        let krate = self.krate;
        if property.check {
            quote! { #krate::BuilderResult<&mut Self> }
        } else {
            quote! { &mut Self }
        }
    }

    /// Final expression of a mutator declared with [`Self::mutator_return`].
    pub(crate) fn mutator_ok(property: &PropertyDescriptor) -> TokenStream {
        if property.check {
            quote! { ::core::result::Result::Ok(self) }
        } else {
            quote! { self }
        }
    }

    /// Statement invoking a mutator from a method returning `BuilderResult`.
    pub(crate) fn call_mutator(
        property: &PropertyDescriptor,
        method: &Ident,
        args: &TokenStream,
    ) -> TokenStream {
        if property.check {
            quote! { self.#method(#args)?; }
        } else {
            quote! { self.#method(#args); }
        }
    }

    /// Signature of the check hook for `property`, with a default body that
    /// accepts every value. `caveat` becomes a second doc paragraph.
    pub(crate) fn hook_decl(
        &self,
        property: &PropertyDescriptor,
        params: &TokenStream,
        subject: &str,
        caveat: Option<&str>,
    ) -> TokenStream {
        let krate = self.krate;
        let hook = property.method("check");
        let doc = format!(
            "Validates {subject} before it is stored in `{}`. Accepts everything by default.",
            property.base_name()
        );
        let caveat = caveat.map(|text| quote! { #[doc = ""] #[doc = #text] });
        quote! {
            #[doc = #doc]
            #caveat
            fn #hook(&self, #params) -> #krate::BuilderResult<()> {
                ::core::result::Result::Ok(())
            }
        }
    }
}

/// Parameter type accepting values for `ty`.
///
/// Primitives are taken by value so integer literals infer; everything else
/// accepts `impl Into<T>`.
pub(crate) fn param_type(ty: &TypeRef) -> TokenStream {
    let inner = &ty.ty;
    if ty.primitive {
        quote! { #inner }
    } else {
        quote! { impl ::core::convert::Into<#inner> }
    }
}

/// Statement converting the parameter `ident` declared with [`param_type`]
/// into `ty`.
pub(crate) fn convert_param(ident: &Ident, ty: &TypeRef) -> TokenStream {
    if ty.primitive {
        return TokenStream::new();
    }
    let inner = &ty.ty;
    quote! { let #ident = ::core::convert::Into::<#inner>::into(#ident); }
}

/// The code-generation contract every strategy satisfies.
pub(crate) trait EmitProperty {
    /// The property this strategy is bound to.
    fn property(&self) -> &PropertyDescriptor;

    fn kind(&self) -> PropertyKind;

    /// Builder field declaration, `name: Storage`.
    fn field_decl(&self, ctx: &EmitContext<'_>) -> TokenStream;

    /// Field initialiser used by `new()`, `name: expr`.
    fn field_init(&self, ctx: &EmitContext<'_>) -> TokenStream;

    /// Public mutators and getters.
    fn accessors(&self, ctx: &EmitContext<'_>) -> TokenStream;

    /// Method declared on the checks trait when the property has a hook.
    fn check_hook(&self, ctx: &EmitContext<'_>) -> TokenStream;

    /// Field initialiser of the built value, `name: expr`.
    fn finalize(&self, ctx: &EmitContext<'_>) -> TokenStream;

    /// Statements copying the property out of the value bound to `value`.
    fn merge_from_value(&self, ctx: &EmitContext<'_>, value: &Ident) -> TokenStream;

    /// Statements copying the property out of the builder bound to `builder`.
    fn merge_from_builder(&self, ctx: &EmitContext<'_>, builder: &Ident) -> TokenStream;

    /// Statements restoring the property from the fresh builder `template`.
    fn clear(&self, ctx: &EmitContext<'_>, template: &Ident) -> TokenStream;

    /// Statements resetting the property for builder reuse.
    fn partial_clear(&self, ctx: &EmitContext<'_>) -> TokenStream;

    /// Static helpers the generated code for this property calls.
    fn static_helpers(&self) -> BTreeSet<StaticHelper> {
        BTreeSet::new()
    }
}

/// The strategy chosen for one property.
pub(crate) enum Strategy {
    Scalar(ScalarStrategy),
    Optional(OptionalStrategy),
    Map(MapStrategy),
    Collection(CollectionStrategy),
}

impl Strategy {
    pub(crate) fn emitter(&self) -> &dyn EmitProperty {
        match self {
            Self::Scalar(strategy) => strategy,
            Self::Optional(strategy) => strategy,
            Self::Map(strategy) => strategy,
            Self::Collection(strategy) => strategy,
        }
    }
}
