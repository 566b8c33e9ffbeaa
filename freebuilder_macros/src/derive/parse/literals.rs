//! Literal parsing helpers for `#[builder(...)]` attributes.

use syn::meta::ParseNestedMeta;
use syn::{Lit, LitBool, LitStr};

/// Parses the literal assigned to `key` using `extractor`.
///
/// `expected` names the literal kind in the error raised when the extractor
/// declines.
///
/// # Examples
///
/// ```ignore
/// # use syn::meta::ParseNestedMeta;
/// # use syn::{Lit, LitStr};
/// # fn demo(meta: &ParseNestedMeta) -> syn::Result<()> {
/// let s: LitStr = parse_lit(meta, "crate", "string", |lit| match lit {
///     Lit::Str(s) => Some(s),
///     _ => None,
/// })?;
/// # Ok(())
/// # }
/// ```
fn parse_lit<T, F>(
    meta: &ParseNestedMeta,
    key: &str,
    expected: &str,
    extractor: F,
) -> Result<T, syn::Error>
where
    F: FnOnce(Lit) -> Option<T>,
{
    let literal = meta.value()?.parse::<Lit>()?;
    let span = literal.span();
    extractor(literal).ok_or_else(|| syn::Error::new(span, format!("{key} must be a {expected}")))
}

/// Parses a string literal assigned to `key`.
pub(crate) fn lit_str(meta: &ParseNestedMeta, key: &str) -> Result<LitStr, syn::Error> {
    parse_lit(meta, key, "string", |lit| match lit {
        Lit::Str(s) => Some(s),
        _ => None,
    })
}

/// Parses a boolean flag that may appear bare (`key`) or assigned
/// (`key = false`).
pub(crate) fn flag(meta: &ParseNestedMeta, key: &str) -> Result<bool, syn::Error> {
    if !meta.input.peek(syn::Token![=]) {
        return Ok(true);
    }
    parse_lit(meta, key, "boolean", |lit| match lit {
        Lit::Bool(LitBool { value, .. }) => Some(value),
        _ => None,
    })
}
