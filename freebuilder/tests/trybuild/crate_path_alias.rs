use std::collections::HashMap;

use freebuilder::FreeBuilder;

/// Verifies that `#[builder(crate = "freebuilder")]` is accepted. Uses the
/// real crate name so no workspace reconfiguration is needed.
#[derive(Debug, FreeBuilder)]
#[builder(crate = "freebuilder")]
struct CratePathValue {
    value: String,
    counts: HashMap<String, u32>,
}

fn main() {
    let mut builder = CratePathValue::builder();
    builder.set_value("hello");
    let result: freebuilder::BuilderResult<CratePathValue> = builder.build();
    let _ = result;
}
