//! Builders for generic value types.

use std::collections::BTreeMap;

use anyhow::{Result, ensure};
use freebuilder::FreeBuilder;
use rstest::rstest;

#[derive(Clone, Debug, PartialEq, Eq, FreeBuilder)]
struct Pair<T>
where
    T: Clone + PartialEq + Ord + std::hash::Hash + std::fmt::Debug,
{
    left: T,
    right: Option<T>,
    history: Vec<T>,
    index: BTreeMap<T, usize>,
}

#[rstest]
fn builds_generic_values() -> Result<()> {
    let mut builder = Pair::<String>::builder();
    builder
        .set_left("l")
        .set_right(String::from("r"))
        .add_history("a")
        .put_index("l", 0)?;
    let pair = builder.build()?;
    ensure!(pair.left == "l", "got {pair:?}");
    ensure!(pair.right.as_deref() == Some("r"), "got {pair:?}");
    ensure!(pair.history == ["a"], "got {pair:?}");
    ensure!(pair.index.get("l") == Some(&0), "got {pair:?}");
    Ok(())
}

#[rstest]
fn generic_required_property_is_tracked() -> Result<()> {
    let result = Pair::<u32>::builder().build();
    ensure!(
        result.is_err_and(|err| err.missing_properties() == ["left"]),
        "left should be reported"
    );
    Ok(())
}

#[rstest]
fn generic_mapper_and_merge() -> Result<()> {
    let mut builder = PairBuilder::<u32>::new();
    builder.set_left(1_u32).map_left(|left| left * 10)?;
    let value = builder.build()?;
    let mut copy = PairBuilder::from_value(&value)?;
    copy.add_history(5_u32);
    let merged = copy.build()?;
    ensure!(merged.left == 10 && merged.history == [5], "got {merged:?}");
    Ok(())
}
