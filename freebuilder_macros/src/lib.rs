//! Procedural macros for `freebuilder`.
//!
//! [`FreeBuilder`] generates a `<Type>Builder` for a struct with named
//! fields. Each field is classified by its type shape and handled by one
//! aggregation strategy: plain values, `Option`s, maps, sets and lists all
//! receive their own mutators, merge semantics and build-time checks.
//! Generated code refers to the runtime crate through `::freebuilder` unless
//! `#[builder(crate = "...")]` names an alias.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro generating a builder for the annotated struct.
///
/// Struct attributes:
///
/// - `#[builder(crate = "path")]` names the runtime crate when it is renamed
///   in `Cargo.toml`.
/// - `#[builder(mappers = false)]` omits the `map_<field>` methods.
/// - `#[builder(collections = "indexmap" | "fallback")]` selects the
///   storage used for map and set properties while building.
///
/// Field attributes:
///
/// - `#[builder(default)]` and `#[builder(default = expr)]` make a plain
///   value optional to set, starting from `Default::default()` or `expr`.
/// - `#[builder(nullable)]` documents that an `Option` field may be left
///   unset. `Option` fields are always treated this way.
/// - `#[builder(check)]` adds a validation hook to the generated
///   `<Type>BuilderChecks` trait.
#[proc_macro_derive(FreeBuilder, attributes(builder))]
pub fn derive_free_builder(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive::derive_free_builder(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
