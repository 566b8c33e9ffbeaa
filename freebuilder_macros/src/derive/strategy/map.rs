//! Append-only map properties.
//!
//! Keys are unique: inserting a present key fails rather than overwriting.
//! Entries keep their insertion order while building.

use std::collections::BTreeSet;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::Ident;

use super::{
    EmitContext, EmitProperty, PropertyKind, StaticHelper, convert_param, param_type,
};
use crate::derive::parse::{PropertyDescriptor, TypeRef};
use crate::derive::registry::{CollectionLibrary, FeatureSet};

pub(crate) struct MapStrategy {
    property: PropertyDescriptor,
    key: TypeRef,
    value: TypeRef,
    features: FeatureSet,
}

impl MapStrategy {
    pub(crate) const fn new(
        property: PropertyDescriptor,
        key: TypeRef,
        value: TypeRef,
        features: FeatureSet,
    ) -> Self {
        Self {
            property,
            key,
            value,
            features,
        }
    }

    fn storage(&self, ctx: &EmitContext<'_>) -> TokenStream {
        let krate = ctx.krate;
        let (key, value) = (&self.key.ty, &self.value.ty);
        match self.features.collections {
            CollectionLibrary::IndexMap => quote! { #krate::__private::IndexMap<#key, #value> },
            CollectionLibrary::Fallback => quote! { #krate::__private::OrderedMap<#key, #value> },
        }
    }

    /// Statements converting `key`/`value` parameters, running the check
    /// hook and rejecting keys already present in `self.<name>` or any of
    /// `also`.
    fn validate_entry(&self, ctx: &EmitContext<'_>, also: Option<&Ident>) -> TokenStream {
        let krate = ctx.krate;
        let name = &self.property.name;
        let field_name = self.property.base_name();
        let convert_key = convert_param(&format_ident!("key"), &self.key);
        let convert_value = convert_param(&format_ident!("value"), &self.value);
        let check = ctx.check(&self.property, &quote! { &key, &value });
        let staged = also.map(|staged| quote! { || #staged.contains_key(&key) });
        quote! {
            #convert_key
            #convert_value
            #check
            if self.#name.contains_key(&key) #staged {
                return ::core::result::Result::Err(
                    #krate::BuilderError::duplicate_key(#field_name, &key),
                );
            }
        }
    }

    fn put(&self, ctx: &EmitContext<'_>) -> TokenStream {
        let krate = ctx.krate;
        let name = &self.property.name;
        let put = self.property.method("put");
        let key_param = param_type(&self.key);
        let value_param = param_type(&self.value);
        let validate = self.validate_entry(ctx, None);
        let doc = format!("Associates `key` with `value` in `{}`.", self.property.base_name());
        quote! {
            #[doc = #doc]
            ///
            /// # Errors
            ///
            /// Returns `BuilderError::DuplicateKey` if `key` is already present,
            /// or any error raised by the property's check hook. The builder is
            /// left unchanged on error.
            pub fn #put(
                &mut self,
                key: #key_param,
                value: #value_param,
            ) -> #krate::BuilderResult<&mut Self> {
                #validate
                self.#name.insert(key, value);
                ::core::result::Result::Ok(self)
            }
        }
    }

    fn put_all(&self, ctx: &EmitContext<'_>) -> TokenStream {
        let krate = ctx.krate;
        let name = &self.property.name;
        let put_all = self.property.method("put_all");
        let storage = self.storage(ctx);
        let key_param = param_type(&self.key);
        let value_param = param_type(&self.value);
        let staged = format_ident!("staged");
        let validate = self.validate_entry(ctx, Some(&staged));
        let doc = format!(
            "Associates every key with its value in `{}`.",
            self.property.base_name()
        );
        quote! {
            #[doc = #doc]
            ///
            /// `entries` is iterated once. Every entry is validated before any
            /// is inserted, so a failed batch leaves the builder unchanged,
            /// unlike a sequence of `put` calls, which keeps the entries
            /// stored before the failing one.
            ///
            /// # Errors
            ///
            /// Returns `BuilderError::DuplicateKey` if a key is already present
            /// or repeats within `entries`, or any error raised by the
            /// property's check hook.
            pub fn #put_all(
                &mut self,
                entries: impl ::core::iter::IntoIterator<Item = (#key_param, #value_param)>,
            ) -> #krate::BuilderResult<&mut Self> {
                let mut #staged = <#storage as ::core::default::Default>::default();
                for (key, value) in entries {
                    #validate
                    #staged.insert(key, value);
                }
                self.#name.extend(#staged);
                ::core::result::Result::Ok(self)
            }
        }
    }

    fn remove(&self, ctx: &EmitContext<'_>) -> TokenStream {
        let krate = ctx.krate;
        let name = &self.property.name;
        let field_name = self.property.base_name();
        let remove = self.property.method("remove");
        let key = &self.key.ty;
        let doc = format!("Removes the mapping for `key` from `{field_name}`.");
        quote! {
            #[doc = #doc]
            ///
            /// # Errors
            ///
            /// Returns `BuilderError::MissingKey` if `key` is not present.
            pub fn #remove(&mut self, key: &#key) -> #krate::BuilderResult<&mut Self> {
                if self.#name.shift_remove(key).is_none() {
                    return ::core::result::Result::Err(
                        #krate::BuilderError::missing_key(#field_name, key),
                    );
                }
                ::core::result::Result::Ok(self)
            }
        }
    }

    fn entries_of(owner: &Ident, name: &Ident) -> TokenStream {
        quote! {
            #owner.#name.iter().map(|(k, v)| {
                (::core::clone::Clone::clone(k), ::core::clone::Clone::clone(v))
            })
        }
    }

    fn merge_entries(&self, owner: &Ident) -> TokenStream {
        let put_all = self.property.method("put_all");
        let entries = Self::entries_of(owner, &self.property.name);
        quote! { self.#put_all(#entries)?; }
    }
}

impl EmitProperty for MapStrategy {
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
        let storage = self.storage(ctx);
        let put = self.put(ctx);
        let put_all = self.put_all(ctx);
        let remove = self.remove(ctx);
        let clear_doc = format!("Removes every mapping from `{field_name}`.");
        let getter_doc = format!("Returns a read-only view of `{field_name}` in insertion order.");
        quote! {
            #put
            #put_all
            #remove
            #[doc = #clear_doc]
            pub fn #clear(&mut self) -> &mut Self {
                self.#name.clear();
                self
            }
            #[doc = #getter_doc]
            pub fn #getter(&self) -> &#storage {
                &self.#name
            }
        }
    }

    fn check_hook(&self, ctx: &EmitContext<'_>) -> TokenStream {
        let (key, value) = (&self.key.ty, &self.value.ty);
        ctx.hook_decl(
            &self.property,
            &quote! { _key: &#key, _value: &#value },
            "an entry",
            None,
        )
    }

    fn finalize(&self, _ctx: &EmitContext<'_>) -> TokenStream {
        let name = &self.property.name;
        match self.features.collections {
            CollectionLibrary::IndexMap => {
                let entries = Self::entries_of(&format_ident!("self"), name);
                quote! { #name: #entries.collect() }
            }
            CollectionLibrary::Fallback => {
                let helper = StaticHelper::ImmutableMap.ident();
                quote! { #name: Self::#helper(self.#name.as_slice()) }
            }
        }
    }

    fn merge_from_value(&self, _ctx: &EmitContext<'_>, value: &Ident) -> TokenStream {
        self.merge_entries(value)
    }

    fn merge_from_builder(&self, _ctx: &EmitContext<'_>, builder: &Ident) -> TokenStream {
        self.merge_entries(builder)
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
            CollectionLibrary::Fallback => BTreeSet::from([StaticHelper::ImmutableMap]),
        }
    }
}
