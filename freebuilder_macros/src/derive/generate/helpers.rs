//! Static helpers shared by every property of one builder.
//!
//! Fallback collection storage is copied into the declared field type
//! through these generic private functions. Each helper is emitted at most
//! once per builder however many properties request it.

use std::collections::BTreeSet;

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive::strategy::StaticHelper;

fn helper_tokens(helper: StaticHelper) -> TokenStream {
    let ident = helper.ident();
    match helper {
        StaticHelper::ImmutableMap => quote! {
            fn #ident<__K, __V, __M>(entries: &[(__K, __V)]) -> __M
            where
                __K: ::core::clone::Clone,
                __V: ::core::clone::Clone,
                __M: ::core::default::Default + ::core::iter::FromIterator<(__K, __V)>,
            {
                if entries.is_empty() {
                    return <__M as ::core::default::Default>::default();
                }
                entries.iter().cloned().collect()
            }
        },
        StaticHelper::ImmutableCollection => quote! {
            fn #ident<__T, __C>(elements: &[__T]) -> __C
            where
                __T: ::core::clone::Clone,
                __C: ::core::default::Default + ::core::iter::FromIterator<__T>,
            {
                if elements.is_empty() {
                    return <__C as ::core::default::Default>::default();
                }
                elements.iter().cloned().collect()
            }
        },
    }
}

/// Emits each requested helper once, in a stable order.
pub(crate) fn emit_helpers(helpers: &BTreeSet<StaticHelper>) -> TokenStream {
    helpers.iter().copied().map(helper_tokens).collect()
}
