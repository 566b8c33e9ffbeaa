//! `Option<T>` properties, which may be left unset.

use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

use super::scalar::check_errors_doc;
use super::{EmitContext, EmitProperty, PropertyKind};
use crate::derive::parse::{DefaultValue, PropertyDescriptor, TypeRef};
use crate::derive::registry::FeatureSet;

pub(crate) struct OptionalStrategy {
    property: PropertyDescriptor,
    inner: TypeRef,
    features: FeatureSet,
}

impl OptionalStrategy {
    pub(crate) const fn new(
        property: PropertyDescriptor,
        inner: TypeRef,
        features: FeatureSet,
    ) -> Self {
        Self {
            property,
            inner,
            features,
        }
    }

    fn storage(&self) -> TokenStream {
        let inner = &self.inner.ty;
        quote! { ::core::option::Option<#inner> }
    }

    fn setter(&self, ctx: &EmitContext<'_>) -> TokenStream {
        let property = &self.property;
        let name = &property.name;
        let setter = property.setter_name();
        let storage = self.storage();
        let param = if self.inner.primitive {
            storage.clone()
        } else {
            quote! { impl ::core::convert::Into<#storage> }
        };
        let check = ctx.check(property, &quote! { candidate });
        let checked = if check.is_empty() {
            TokenStream::new()
        } else {
            quote! {
                if let ::core::option::Option::Some(candidate) = &value {
                    #check
                }
            }
        };
        let ret = ctx.mutator_return(property);
        let ok = EmitContext::mutator_ok(property);
        let errors = check_errors_doc(property);
        let doc = format!(
            "Sets the value of `{}`. Passing `None` unsets it.",
            property.base_name()
        );
        quote! {
            #[doc = #doc]
            #errors
            pub fn #setter(&mut self, value: #param) -> #ret {
                let value = ::core::convert::Into::<#storage>::into(value);
                #checked
                self.#name = value;
                #ok
            }
        }
    }

    fn mapper(&self, ctx: &EmitContext<'_>) -> TokenStream {
        if !self.features.mappers {
            return TokenStream::new();
        }
        let property = &self.property;
        let name = &property.name;
        let inner = &self.inner.ty;
        let setter = property.setter_name();
        let mapper = property.method("map");
        let ret = ctx.mutator_return(property);
        let ok = EmitContext::mutator_ok(property);
        let errors = check_errors_doc(property);
        let doc = format!(
            "If `{}` is set, replaces it with the result of applying `mapper` to it.",
            property.base_name()
        );
        quote! {
            #[doc = #doc]
            #errors
            pub fn #mapper(&mut self, mapper: impl ::core::ops::FnOnce(#inner) -> #inner) -> #ret {
                if let ::core::option::Option::Some(current) =
                    ::core::clone::Clone::clone(&self.#name)
                {
                    return self.#setter(::core::option::Option::Some(mapper(current)));
                }
                #ok
            }
        }
    }
}

impl EmitProperty for OptionalStrategy {
    fn property(&self) -> &PropertyDescriptor {
        &self.property
    }

    fn kind(&self) -> PropertyKind {
        PropertyKind::Optional
    }

    fn field_decl(&self, _ctx: &EmitContext<'_>) -> TokenStream {
        let name = &self.property.name;
        let storage = self.storage();
        quote! { #name: #storage }
    }

    fn field_init(&self, _ctx: &EmitContext<'_>) -> TokenStream {
        let name = &self.property.name;
        match &self.property.default {
            Some(DefaultValue::Expr(expr)) => quote! { #name: #expr },
            Some(DefaultValue::Implicit) | None => quote! { #name: ::core::option::Option::None },
        }
    }

    fn accessors(&self, ctx: &EmitContext<'_>) -> TokenStream {
        let name = &self.property.name;
        let getter = self.property.getter_name();
        let inner = &self.inner.ty;
        let doc = format!(
            "Returns the current value of `{}`, or `None` if unset.",
            self.property.base_name()
        );
        let setter = self.setter(ctx);
        let mapper = self.mapper(ctx);
        quote! {
            #setter
            #mapper
            #[doc = #doc]
            pub fn #getter(&self) -> ::core::option::Option<&#inner> {
                self.#name.as_ref()
            }
        }
    }

    fn check_hook(&self, ctx: &EmitContext<'_>) -> TokenStream {
        let inner = &self.inner.ty;
        ctx.hook_decl(&self.property, &quote! { _value: &#inner }, "a present value", None)
    }

    fn finalize(&self, _ctx: &EmitContext<'_>) -> TokenStream {
        let name = &self.property.name;
        quote! { #name: ::core::clone::Clone::clone(&self.#name) }
    }

    fn merge_from_value(&self, _ctx: &EmitContext<'_>, value: &Ident) -> TokenStream {
        let name = &self.property.name;
        let setter = self.property.setter_name();
        EmitContext::call_mutator(
            &self.property,
            &setter,
            &quote! { ::core::clone::Clone::clone(&#value.#name) },
        )
    }

    fn merge_from_builder(&self, _ctx: &EmitContext<'_>, builder: &Ident) -> TokenStream {
        let name = &self.property.name;
        let setter = self.property.setter_name();
        EmitContext::call_mutator(
            &self.property,
            &setter,
            &quote! { ::core::clone::Clone::clone(&#builder.#name) },
        )
    }

    fn clear(&self, _ctx: &EmitContext<'_>, template: &Ident) -> TokenStream {
        let name = &self.property.name;
        quote! { self.#name = #template.#name; }
    }

    fn partial_clear(&self, _ctx: &EmitContext<'_>) -> TokenStream {
        let name = &self.property.name;
        quote! { self.#name = ::core::option::Option::None; }
    }
}
