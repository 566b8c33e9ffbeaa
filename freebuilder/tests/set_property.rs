//! Set properties collect unique elements in first-insertion order.

use std::collections::{BTreeSet, HashSet};

use anyhow::{Result, ensure};
use freebuilder::FreeBuilder;
use rstest::{fixture, rstest};
use test_helpers::iter::Tracked;

#[derive(Clone, Debug, PartialEq, Eq, FreeBuilder)]
struct Tagged {
    tags: BTreeSet<String>,
    ports: HashSet<u16>,
}

#[fixture]
fn builder() -> TaggedBuilder {
    Tagged::builder()
}

fn tags(builder: &TaggedBuilder) -> Vec<&str> {
    builder.tags().iter().map(String::as_str).collect()
}

#[rstest]
fn empty_sets_build_without_setters(builder: TaggedBuilder) -> Result<()> {
    let value = builder.build()?;
    ensure!(value.tags.is_empty() && value.ports.is_empty(), "got {value:?}");
    Ok(())
}

#[rstest]
fn duplicates_are_ignored(mut builder: TaggedBuilder) -> Result<()> {
    builder.add_tags("b").add_tags("a").add_tags("b");
    ensure!(tags(&builder) == ["b", "a"], "got {:?}", tags(&builder));
    let value = builder.build()?;
    ensure!(
        value.tags == BTreeSet::from(["a".to_owned(), "b".to_owned()]),
        "got {:?}",
        value.tags
    );
    Ok(())
}

#[rstest]
fn remove_is_a_no_op_for_absent_elements(mut builder: TaggedBuilder) -> Result<()> {
    builder.add_ports(80).add_ports(443);
    builder.remove_ports(&8080).remove_ports(&80);
    let value = builder.build()?;
    ensure!(value.ports == HashSet::from([443]), "got {:?}", value.ports);
    Ok(())
}

#[rstest]
fn add_all_iterates_its_source_once(mut builder: TaggedBuilder) -> Result<()> {
    let (source, pulls) = Tracked::new(["x", "y", "x", "z"]);
    builder.add_all_tags(source);
    ensure!(pulls.count() == 4, "expected four pulls, got {}", pulls.count());
    ensure!(tags(&builder) == ["x", "y", "z"], "got {:?}", tags(&builder));
    Ok(())
}

#[rstest]
fn clear_and_merge(mut builder: TaggedBuilder) -> Result<()> {
    builder.add_tags("keep");
    let value = builder.build()?;
    builder.clear_tags().add_tags("fresh");
    builder.merge_from(&value)?;
    ensure!(tags(&builder) == ["fresh", "keep"], "got {:?}", tags(&builder));
    builder.merge_from(&value)?;
    ensure!(builder.tags().len() == 2, "merging again adds nothing");
    Ok(())
}
