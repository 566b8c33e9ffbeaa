//! Trybuild fixture verifying `#[builder(crate = "...")]` works with a
//! genuine rename via `use ... as`.

use freebuilder as fb;
use fb::FreeBuilder;

/// Verifies that `#[builder(crate = "fb")]` generates code that references
/// runtime items through the aliased name rather than `freebuilder`.
#[derive(Debug, FreeBuilder)]
#[builder(crate = "fb", collections = "fallback")]
struct AliasedValue {
    name: String,
    #[builder(check)]
    tags: Vec<String>,
    aliases: std::collections::BTreeSet<String>,
}

impl AliasedValueBuilderChecks for AliasedValueBuilder {}

fn main() {
    let mut builder = AliasedValue::builder();
    builder.set_name("x");
    let added: fb::BuilderResult<&mut AliasedValueBuilder> = builder.add_tags("t");
    let _ = added.map(|b| b.add_aliases("a").build());
}
