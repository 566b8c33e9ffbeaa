//! Test helpers shared across crates.
//!
//! - [`text`] compares generated token streams without caring about the
//!   spacing `proc_macro2` inserts when rendering them.
//! - [`iter`] provides iterators that record how they were consumed.

pub mod iter;
pub mod text;
