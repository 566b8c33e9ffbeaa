//! Merging from built values and from other builders.

use std::collections::BTreeSet;

use anyhow::{Result, ensure};
use freebuilder::FreeBuilder;
use rstest::{fixture, rstest};

#[derive(Clone, Debug, PartialEq, Eq, FreeBuilder)]
struct Order {
    id: u64,
    note: Option<String>,
    tags: BTreeSet<String>,
    #[builder(default = 1)]
    quantity: u32,
}

#[fixture]
fn order() -> Order {
    Order {
        id: 42,
        note: Some("fragile".to_owned()),
        tags: BTreeSet::from(["gift".to_owned()]),
        quantity: 2,
    }
}

#[rstest]
fn from_value_round_trips(order: Order) -> Result<()> {
    let rebuilt = OrderBuilder::from_value(&order)?.build()?;
    ensure!(rebuilt == order, "got {rebuilt:?}");
    Ok(())
}

#[rstest]
fn merging_a_built_value_is_idempotent(order: Order) -> Result<()> {
    let mut builder = OrderBuilder::from_value(&order)?;
    let built = builder.build()?;
    builder.merge_from(&built)?;
    ensure!(builder.build()? == order, "state changed after re-merge");
    Ok(())
}

#[rstest]
fn merge_from_builder_skips_unset_required_properties() -> Result<()> {
    let mut target = Order::builder();
    target.set_id(7);
    let mut source = Order::builder();
    source.set_quantity(5).add_tags("rush");
    target.merge_from_builder(&source)?;
    let merged = target.build()?;
    ensure!(merged.id == 7, "unset source id must not clear the target");
    ensure!(merged.quantity == 5, "has-default values are copied");
    ensure!(merged.tags.contains("rush"), "elements are copied");
    Ok(())
}

#[rstest]
fn merge_from_builder_copies_set_required_properties() -> Result<()> {
    let mut target = Order::builder();
    target.set_id(7);
    let mut source = Order::builder();
    source.set_id(8);
    target.merge_from_builder(&source)?;
    ensure!(*target.id()? == 8, "set source id overwrites");
    Ok(())
}

#[rstest]
fn merging_marks_required_properties_set(order: Order) -> Result<()> {
    let mut builder = Order::builder();
    builder.merge_from(&order)?;
    ensure!(builder.build().is_ok(), "merge should satisfy required properties");
    Ok(())
}

#[rstest]
fn merged_none_overwrites_optional(order: Order) -> Result<()> {
    let mut builder = OrderBuilder::from_value(&order)?;
    let mut blank = Order::builder();
    blank.set_id(1);
    builder.merge_from_builder(&blank)?;
    ensure!(builder.note().is_none(), "optional values are copied as-is");
    ensure!(
        builder.tags().len() == 1,
        "collections gain elements rather than being replaced"
    );
    Ok(())
}
