//! Builders can store collections in `freebuilder::collections` instead of
//! `indexmap`, copying them into the declared types on `build()`.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use anyhow::{Result, ensure};
use freebuilder::FreeBuilder;
use freebuilder::collections::{OrderedMap, OrderedSet};
use rstest::{fixture, rstest};

/// Keys need only `PartialEq` and `Debug` with fallback storage.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Code(&'static str);

#[derive(Clone, Debug, PartialEq, Eq, FreeBuilder)]
#[builder(collections = "fallback")]
struct Catalogue {
    names: BTreeMap<u32, String>,
    codes: HashMap<Code, u8>,
    labels: HashSet<String>,
    queue: VecDeque<u8>,
}

#[fixture]
fn builder() -> CatalogueBuilder {
    Catalogue::builder()
}

#[rstest]
fn empty_collections_build(builder: CatalogueBuilder) -> Result<()> {
    let value = builder.build()?;
    ensure!(
        value.names.is_empty()
            && value.codes.is_empty()
            && value.labels.is_empty()
            && value.queue.is_empty(),
        "got {value:?}"
    );
    Ok(())
}

#[rstest]
fn builder_views_use_ordered_storage(mut builder: CatalogueBuilder) -> Result<()> {
    builder.put_names(2, "two")?.put_names(1, "one")?;
    builder.add_labels("b").add_labels("a").add_labels("b");
    let names: &OrderedMap<u32, String> = builder.names();
    ensure!(
        names.as_slice() == [(2, "two".to_owned()), (1, "one".to_owned())],
        "got {names:?}"
    );
    let labels: &OrderedSet<String> = builder.labels();
    ensure!(labels.as_slice() == ["b", "a"], "got {labels:?}");
    Ok(())
}

#[rstest]
fn build_copies_into_declared_types(mut builder: CatalogueBuilder) -> Result<()> {
    builder
        .put_codes(Code("x"), 1)?
        .put_names(9, "nine")?
        .add_all_queue([3, 1, 2]);
    let value = builder.build()?;
    ensure!(value.codes.get(&Code("x")) == Some(&1), "got {:?}", value.codes);
    ensure!(value.names.get(&9).map(String::as_str) == Some("nine"), "got {value:?}");
    ensure!(value.queue == VecDeque::from([3, 1, 2]), "got {:?}", value.queue);
    Ok(())
}

#[rstest]
fn duplicate_keys_are_still_rejected(mut builder: CatalogueBuilder) -> Result<()> {
    builder.put_codes(Code("x"), 1)?;
    ensure!(builder.put_codes(Code("x"), 2).is_err(), "duplicate key");
    builder.remove_codes(&Code("x"))?;
    ensure!(builder.remove_codes(&Code("x")).is_err(), "missing key");
    Ok(())
}
