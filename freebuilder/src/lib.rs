//! Runtime support for builders generated by `#[derive(FreeBuilder)]`.
//!
//! The derive macro lives in the companion `freebuilder_macros` crate. It
//! inspects every named field of a struct and picks an aggregation strategy
//! from the field's type shape:
//!
//! - `Option<T>` fields are optional and may be left unset.
//! - `HashMap`, `BTreeMap` and `IndexMap` fields are append-only maps that
//!   reject duplicate keys.
//! - `HashSet`, `BTreeSet` and `IndexSet` fields collect unique elements in
//!   first-insertion order.
//!
//! While building, hashed maps and sets live in `indexmap` collections.
//! `BTreeMap` and `BTreeSet` fields, and every map and set when the
//! `indexmap` feature is off, use [`collections::OrderedMap`] and
//! [`collections::OrderedSet`], which need only `PartialEq` keys.
//! - `Vec` and `VecDeque` fields collect elements in insertion order.
//! - Every other field is a plain value. It is required unless it carries
//!   `#[builder(default)]` or `#[builder(default = expr)]`.
//!
//! Generated builders report failures through [`BuilderError`] and track
//! required properties with [`UnsetProperties`].
//!
//! # Examples
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! use freebuilder::{BuilderError, FreeBuilder};
//!
//! #[derive(Clone, Debug, FreeBuilder)]
//! struct Example {
//!     x: String,
//!     entries: BTreeMap<String, i32>,
//! }
//!
//! # fn main() -> Result<(), BuilderError> {
//! let value = Example::builder()
//!     .set_x("a")
//!     .put_entries("k", 1)?
//!     .build()?;
//! assert_eq!(value.x, "a");
//! assert_eq!(value.entries.get("k"), Some(&1));
//!
//! let missing = Example::builder().build();
//! assert!(matches!(missing, Err(BuilderError::Incomplete { .. })));
//! # Ok(())
//! # }
//! ```

pub use freebuilder_macros::FreeBuilder;

pub mod collections;
mod error;
mod tracker;

pub use error::{BuilderError, BuilderResult};
pub use tracker::{PropertyMarker, UnsetProperties};

/// The collection library backing hashed map and set properties, so callers
/// can name the types their getters return.
#[cfg(feature = "indexmap")]
pub use indexmap;

/// Items referenced by generated code. Not part of the public API.
#[doc(hidden)]
pub mod __private {
    pub use crate::collections::{OrderedMap, OrderedSet};
    #[cfg(feature = "indexmap")]
    pub use indexmap::{IndexMap, IndexSet};
}
