//! Plain-value properties: required, or has-default when the constructor
//! supplies a starting value.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::Ident;

use super::{EmitContext, EmitProperty, PropertyKind, convert_param, param_type};
use crate::derive::parse::{DefaultValue, PropertyDescriptor};
use crate::derive::registry::FeatureSet;

pub(crate) struct ScalarStrategy {
    property: PropertyDescriptor,
    has_default: bool,
    features: FeatureSet,
}

impl ScalarStrategy {
    pub(crate) const fn new(
        property: PropertyDescriptor,
        has_default: bool,
        features: FeatureSet,
    ) -> Self {
        Self {
            property,
            has_default,
            features,
        }
    }

    fn setter(&self, ctx: &EmitContext<'_>) -> TokenStream {
        let property = &self.property;
        let name = &property.name;
        let setter = property.setter_name();
        let param = param_type(&property.ty);
        let convert = convert_param(&format_ident!("value"), &property.ty);
        let check = ctx.check(property, &quote! { &value });
        let ret = ctx.mutator_return(property);
        let ok = EmitContext::mutator_ok(property);
        let doc = format!("Sets the value of `{}`.", property.base_name());
        let store = if self.has_default {
            quote! { self.#name = value; }
        } else {
            let marker = ctx.marker(property);
            quote! {
                self.#name = ::core::option::Option::Some(value);
                self.__unset.remove(#marker);
            }
        };
        let errors = check_errors_doc(property);
        quote! {
            #[doc = #doc]
            #errors
            pub fn #setter(&mut self, value: #param) -> #ret {
                #convert
                #check
                #store
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
        let ty = &property.ty.ty;
        let setter = property.setter_name();
        let mapper = property.method("map");
        let doc = format!(
            "Replaces the value of `{}` with the result of applying `mapper` to it.",
            property.base_name()
        );
        if self.has_default {
            let ret = ctx.mutator_return(property);
            let errors = check_errors_doc(property);
            return quote! {
                #[doc = #doc]
                #errors
                pub fn #mapper(&mut self, mapper: impl ::core::ops::FnOnce(#ty) -> #ty) -> #ret {
                    let current = ::core::clone::Clone::clone(&self.#name);
                    self.#setter(mapper(current))
                }
            };
        }
        let krate = ctx.krate;
        let apply = if property.check {
            quote! { self.#setter(mapper(current)) }
        } else {
            quote! { ::core::result::Result::Ok(self.#setter(mapper(current))) }
        };
        quote! {
            #[doc = #doc]
            ///
            /// # Errors
            ///
            /// Returns `BuilderError::Incomplete` if the property has not been
            /// set, or any error raised by its check hook.
            pub fn #mapper(
                &mut self,
                mapper: impl ::core::ops::FnOnce(#ty) -> #ty,
            ) -> #krate::BuilderResult<&mut Self> {
                let current = ::core::clone::Clone::clone(self.#name()?);
                #apply
            }
        }
    }

    fn getter(&self, ctx: &EmitContext<'_>) -> TokenStream {
        let property = &self.property;
        let name = &property.name;
        let getter = property.getter_name();
        let ty = &property.ty.ty;
        let doc = format!("Returns the current value of `{}`.", property.base_name());
        if self.has_default {
            return quote! {
                #[doc = #doc]
                pub fn #getter(&self) -> &#ty {
                    &self.#name
                }
            };
        }
        let krate = ctx.krate;
        let type_name = ctx.type_name;
        let field_name = property.base_name();
        let marker = ctx.marker(property);
        quote! {
            #[doc = #doc]
            ///
            /// # Errors
            ///
            /// Returns `BuilderError::Incomplete` if the property has not been
            /// set.
            pub fn #getter(&self) -> #krate::BuilderResult<&#ty> {
                self.__unset.check_set(#type_name, #marker)?;
                self.#name
                    .as_ref()
                    .ok_or_else(|| #krate::BuilderError::unset(#type_name, #field_name))
            }
        }
    }
}

/// `# Errors` section for mutators that run a check hook.
pub(super) fn check_errors_doc(property: &PropertyDescriptor) -> TokenStream {
    if !property.check {
        return TokenStream::new();
    }
    quote! {
        ///
        /// # Errors
        ///
        /// Returns any error raised by the property's check hook. The
        /// builder is left unchanged in that case.
    }
}

impl EmitProperty for ScalarStrategy {
    fn property(&self) -> &PropertyDescriptor {
        &self.property
    }

    fn kind(&self) -> PropertyKind {
        if self.has_default {
            PropertyKind::HasDefault
        } else {
            PropertyKind::Required
        }
    }

    fn field_decl(&self, _ctx: &EmitContext<'_>) -> TokenStream {
        let name = &self.property.name;
        let ty = &self.property.ty.ty;
        if self.has_default {
            quote! { #name: #ty }
        } else {
            quote! { #name: ::core::option::Option<#ty> }
        }
    }

    fn field_init(&self, _ctx: &EmitContext<'_>) -> TokenStream {
        let name = &self.property.name;
        let ty = &self.property.ty.ty;
        if !self.has_default {
            return quote! { #name: ::core::option::Option::None };
        }
        match &self.property.default {
            Some(DefaultValue::Expr(expr)) if self.property.ty.primitive => quote! { #name: #expr },
            Some(DefaultValue::Expr(expr)) => {
                quote! { #name: ::core::convert::Into::<#ty>::into(#expr) }
            }
            Some(DefaultValue::Implicit) | None => {
                quote! { #name: ::core::default::Default::default() }
            }
        }
    }

    fn accessors(&self, ctx: &EmitContext<'_>) -> TokenStream {
        let setter = self.setter(ctx);
        let mapper = self.mapper(ctx);
        let getter = self.getter(ctx);
        quote! { #setter #mapper #getter }
    }

    fn check_hook(&self, ctx: &EmitContext<'_>) -> TokenStream {
        let ty = &self.property.ty.ty;
        let caveat = self
            .has_default
            .then_some("The declared default is stored by `new()` without running this check.");
        ctx.hook_decl(&self.property, &quote! { _value: &#ty }, "a value", caveat)
    }

    fn finalize(&self, _ctx: &EmitContext<'_>) -> TokenStream {
        let name = &self.property.name;
        if self.has_default {
            quote! { #name: ::core::clone::Clone::clone(&self.#name) }
        } else {
            quote! { #name: ::core::clone::Clone::clone(self.#name()?) }
        }
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
        if self.has_default {
            return EmitContext::call_mutator(
                &self.property,
                &setter,
                &quote! { ::core::clone::Clone::clone(&#builder.#name) },
            );
        }
        let call = EmitContext::call_mutator(
            &self.property,
            &setter,
            &quote! { ::core::clone::Clone::clone(source) },
        );
        quote! {
            if let ::core::result::Result::Ok(source) = #builder.#name() {
                #call
            }
        }
    }

    fn clear(&self, _ctx: &EmitContext<'_>, template: &Ident) -> TokenStream {
        let name = &self.property.name;
        quote! { self.#name = #template.#name; }
    }

    fn partial_clear(&self, _ctx: &EmitContext<'_>) -> TokenStream {
        TokenStream::new()
    }
}
