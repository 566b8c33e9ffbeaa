//! trybuild coverage for `#[builder(crate = "...")]` support.
//!
//! Ensures generated code resolves runtime items through an aliased crate
//! path.

#[test]
fn crate_path_alias_compiles() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/crate_path_alias.rs");
    t.pass("tests/trybuild/crate_path_alias_renamed.rs");
}
