//! Token text normalisation for macro expansion tests.

use anyhow::{Result, ensure};

/// Removes every whitespace character from rendered tokens.
///
/// `proc_macro2` renders `a::b` as `a :: b` and `&self` as `& self`, so
/// comparisons against hand-written snippets are only stable once spacing is
/// gone.
///
/// # Examples
///
/// ```
/// use freebuilder_test_helpers::text::normalize_tokens;
///
/// assert_eq!(normalize_tokens("fn set_x (& mut self)"), "fnset_x(&mutself)");
/// ```
#[must_use]
pub fn normalize_tokens(rendered: &str) -> String {
    rendered.chars().filter(|ch| !ch.is_whitespace()).collect()
}

/// Fails unless the normalised `haystack` contains the normalised `needle`.
///
/// # Errors
///
/// Returns an error quoting the needle when it is absent.
pub fn ensure_contains(haystack: &str, needle: &str) -> Result<()> {
    let normalised = normalize_tokens(needle);
    ensure!(
        normalize_tokens(haystack).contains(&normalised),
        "expected expansion to contain `{needle}`"
    );
    Ok(())
}

/// Fails if the normalised `haystack` contains the normalised `needle`.
///
/// # Errors
///
/// Returns an error quoting the needle when it is present.
pub fn ensure_lacks(haystack: &str, needle: &str) -> Result<()> {
    let normalised = normalize_tokens(needle);
    ensure!(
        !normalize_tokens(haystack).contains(&normalised),
        "expected expansion not to contain `{needle}`"
    );
    Ok(())
}

/// Number of non-overlapping occurrences of `needle` after normalisation.
#[must_use]
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    normalize_tokens(haystack)
        .matches(&normalize_tokens(needle))
        .count()
}
