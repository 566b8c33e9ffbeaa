//! Implementation of `#[derive(FreeBuilder)]`.
//!
//! Expansion runs in three stages: `parse` turns the input struct into
//! property descriptors, `registry` picks one strategy per descriptor, and
//! `generate` assembles the strategies' fragments into the builder.

use proc_macro2::TokenStream;
use syn::DeriveInput;

mod generate;
mod parse;
mod registry;
mod strategy;

/// Expands the derive for `input`, or reports why it cannot be expanded.
pub(crate) fn derive_free_builder(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    Ok(generate::generate_builder(&parsed))
}
