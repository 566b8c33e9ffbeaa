//! Set and list properties.
//!
//! Sets ignore duplicate elements and keep first-insertion order; lists
//! append every element.

use std::collections::BTreeSet;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::Ident;

use super::scalar::check_errors_doc;
use super::{
    EmitContext, EmitProperty, PropertyKind, StaticHelper, convert_param, param_type,
};
use crate::derive::parse::{PropertyDescriptor, TypeRef};
use crate::derive::registry::{CollectionLibrary, FeatureSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CollectionKind {
    Set,
    List,
}

pub(crate) struct CollectionStrategy {
    property: PropertyDescriptor,
    element: TypeRef,
    kind: CollectionKind,
    features: FeatureSet,
}

impl CollectionStrategy {
    pub(crate) const fn new(
        property: PropertyDescriptor,
        element: TypeRef,
        kind: CollectionKind,
        features: FeatureSet,
    ) -> Self {
        Self {
            property,
            element,
            kind,
            features,
        }
    }

    pub(crate) const fn collection_kind(&self) -> CollectionKind {
        self.kind
    }

    fn storage(&self, ctx: &EmitContext<'_>) -> TokenStream {
        let krate = ctx.krate;
        let element = &self.element.ty;
        match (self.kind, self.features.collections) {
            (CollectionKind::List, _) => quote! { ::std::vec::Vec<#element> },
            (CollectionKind::Set, CollectionLibrary::IndexMap) => {
                quote! { #krate::__private::IndexSet<#element> }
            }
            (CollectionKind::Set, CollectionLibrary::Fallback) => {
                quote! { #krate::__private::OrderedSet<#element> }
            }
        }
    }

    fn add(&self, ctx: &EmitContext<'_>) -> TokenStream {
        let property = &self.property;
        let name = &property.name;
        let add = property.method("add");
        let param = param_type(&self.element);
        let convert = convert_param(&format_ident!("element"), &self.element);
        let check = ctx.check(property, &quote! { &element });
        let ret = ctx.mutator_return(property);
        let ok = EmitContext::mutator_ok(property);
        let errors = check_errors_doc(property);
        let (store, doc) = match self.kind {
            CollectionKind::Set => (
                quote! { self.#name.insert(element); },
                format!(
                    "Adds `element` to `{}`. Duplicate elements are ignored.",
                    property.base_name()
                ),
            ),
            CollectionKind::List => (
                quote! { self.#name.push(element); },
                format!("Appends `element` to `{}`.", property.base_name()),
            ),
        };
        quote! {
            #[doc = #doc]
            #errors
            pub fn #add(&mut self, element: #param) -> #ret {
                #convert
                #check
                #store
                #ok
            }
        }
    }

    fn add_all(&self, ctx: &EmitContext<'_>) -> TokenStream {
        let property = &self.property;
        let name = &property.name;
        let add_all = property.method("add_all");
        let element = &self.element.ty;
        let param = param_type(&self.element);
        let ret = ctx.mutator_return(property);
        let ok = EmitContext::mutator_ok(property);
        let errors = check_errors_doc(property);
        let converted = if self.element.primitive {
            quote! { elements.into_iter() }
        } else {
            quote! { elements.into_iter().map(::core::convert::Into::<#element>::into) }
        };
        let body = if property.check {
            let check = ctx.check(property, &quote! { element });
            quote! {
                let staged: ::std::vec::Vec<#element> = #converted.collect();
                for element in &staged {
                    #check
                }
                self.#name.extend(staged);
            }
        } else {
            quote! { self.#name.extend(#converted); }
        };
        let doc = format!(
            "Adds each element of `elements` to `{}`, iterating it once.",
            property.base_name()
        );
        quote! {
            #[doc = #doc]
            #errors
            pub fn #add_all(
                &mut self,
                elements: impl ::core::iter::IntoIterator<Item = #param>,
            ) -> #ret {
                #body
                #ok
            }
        }
    }

    fn remove(&self) -> TokenStream {
        let property = &self.property;
        let name = &property.name;
        let remove = property.method("remove");
        let element = &self.element.ty;
        let (body, doc) = match self.kind {
            CollectionKind::Set => (
                quote! { self.#name.shift_remove(element); },
                format!(
                    "Removes `element` from `{}` if present.",
                    property.base_name()
                ),
            ),
            CollectionKind::List => (
                quote! {
                    if let ::core::option::Option::Some(index) =
                        self.#name.iter().position(|existing| existing == element)
                    {
                        self.#name.remove(index);
                    }
                },
                format!(
                    "Removes the first occurrence of `element` from `{}`, if any.",
                    property.base_name()
                ),
            ),
        };
        quote! {
            #[doc = #doc]
            pub fn #remove(&mut self, element: &#element) -> &mut Self {
                #body
                self
            }
        }
    }

    fn merge_elements(&self, owner: &Ident) -> TokenStream {
        let name = &self.property.name;
        let add_all = self.property.method("add_all");
        EmitContext::call_mutator(
            &self.property,
            &add_all,
            &quote! { #owner.#name.iter().cloned() },
        )
    }
}

impl EmitProperty for CollectionStrategy {
    fn property(&self) -> &PropertyDescriptor {
        &self.property
    }

    fn kind(&self) -> PropertyKind {
        PropertyKind::HasDefault
    }

    fn field_decl(&self, ctx: &EmitContext<'_>) -> TokenStream {
        let name = &self.property.name;
        let storage = self.storage(ctx);
        quote! { #name: #storage }
    }

    fn field_init(&self, _ctx: &EmitContext<'_>) -> TokenStream {
        let name = &self.property.name;
        quote! { #name: ::core::default::Default::default() }
    }

    fn accessors(&self, ctx: &EmitContext<'_>) -> TokenStream {
        let name = &self.property.name;
        let field_name = self.property.base_name();
        let getter = self.property.getter_name();
        let clear = self.property.method("clear");
        let add = self.add(ctx);
        let add_all = self.add_all(ctx);
        let remove = self.remove();
        let view = match self.kind {
            CollectionKind::Set => self.storage(ctx),
            CollectionKind::List => {
                let element = &self.element.ty;
                quote! { [#element] }
            }
        };
        let clear_doc = format!("Removes every element from `{field_name}`.");
        let getter_doc = format!("Returns a read-only view of `{field_name}`.");
        quote! {
            #add
            #add_all
            #remove
            #[doc = #clear_doc]
            pub fn #clear(&mut self) -> &mut Self {
                self.#name.clear();
                self
            }
            #[doc = #getter_doc]
            pub fn #getter(&self) -> &#view {
                &self.#name
            }
        }
    }

    fn check_hook(&self, ctx: &EmitContext<'_>) -> TokenStream {
        let element = &self.element.ty;
        ctx.hook_decl(&self.property, &quote! { _element: &#element }, "an element", None)
    }

    fn finalize(&self, _ctx: &EmitContext<'_>) -> TokenStream {
        let name = &self.property.name;
        match self.features.collections {
            CollectionLibrary::IndexMap => quote! { #name: self.#name.iter().cloned().collect() },
            CollectionLibrary::Fallback => {
                let helper = StaticHelper::ImmutableCollection.ident();
                quote! { #name: Self::#helper(self.#name.as_slice()) }
            }
        }
    }

    fn merge_from_value(&self, _ctx: &EmitContext<'_>, value: &Ident) -> TokenStream {
        self.merge_elements(value)
    }

    fn merge_from_builder(&self, _ctx: &EmitContext<'_>, builder: &Ident) -> TokenStream {
        self.merge_elements(builder)
    }

    fn clear(&self, _ctx: &EmitContext<'_>, _template: &Ident) -> TokenStream {
        let name = &self.property.name;
        quote! { self.#name.clear(); }
    }

    fn partial_clear(&self, _ctx: &EmitContext<'_>) -> TokenStream {
        let name = &self.property.name;
        quote! { self.#name.clear(); }
    }

    fn static_helpers(&self) -> BTreeSet<StaticHelper> {
        match self.features.collections {
            CollectionLibrary::IndexMap => BTreeSet::new(),
            CollectionLibrary::Fallback => BTreeSet::from([StaticHelper::ImmutableCollection]),
        }
    }
}
