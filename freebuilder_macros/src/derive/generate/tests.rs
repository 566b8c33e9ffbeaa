//! Expansion tests for the builder coordinator.

use super::generate_builder;
use crate::derive::parse::parse_input;
use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{DeriveInput, parse_quote};
use test_helpers::text::{count_occurrences, ensure_contains, ensure_lacks};

fn expand(input: &DeriveInput) -> Result<String> {
    let parsed = parse_input(input).map_err(|err| anyhow!(err))?;
    Ok(generate_builder(&parsed).to_string())
}

#[test]
fn only_plain_values_without_defaults_are_tracked() -> Result<()> {
    let out = expand(&parse_quote! {
        struct Person {
            name: String,
            #[builder(default = 3)]
            retries: u32,
            nickname: Option<String>,
            tags: Vec<String>,
            scores: BTreeMap<String, u32>,
        }
    })?;
    ensure_contains(
        &out,
        "::freebuilder::UnsetProperties::<__PersonProperty>::new([__PersonProperty::Name])",
    )?;
    ensure_contains(&out, "retries: 3")?;
    ensure_contains(&out, "self.__unset.ensure_complete(\"Person\")?;")
}

#[test]
fn marker_enum_names_every_property() -> Result<()> {
    let out = expand(&parse_quote! {
        pub struct Token {
            r#type: String,
            line_number: u32,
        }
    })?;
    ensure_contains(&out, "enum __TokenProperty { Type, LineNumber, }")?;
    ensure_contains(&out, "Self::Type => \"type\"")?;
    ensure_contains(&out, "Self::LineNumber => \"line_number\"")?;
    ensure_contains(&out, "pub fn set_type(")
}

#[test]
fn checks_trait_is_emitted_only_when_requested() -> Result<()> {
    let plain = expand(&parse_quote! {
        struct Account { id: u64 }
    })?;
    ensure_lacks(&plain, "trait AccountBuilderChecks")?;

    let checked = expand(&parse_quote! {
        pub struct Account {
            #[builder(check)]
            id: u64,
            label: String,
        }
    })?;
    ensure_contains(&checked, "pub trait AccountBuilderChecks {")?;
    ensure_contains(
        &checked,
        "fn check_id(&self, _value: &u64) -> ::freebuilder::BuilderResult<()>",
    )?;
    ensure_contains(&checked, "where AccountBuilder: AccountBuilderChecks")?;
    ensure_lacks(&checked, "fn check_label")
}

#[rstest]
#[case::fallback("fallback", 1)]
#[case::indexmap("indexmap", 0)]
fn static_helpers_are_deduplicated(
    #[case] collections: &str,
    #[case] expected: usize,
) -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[builder(collections = #collections)]
        struct Index {
            by_name: HashMap<String, u32>,
            by_id: IndexMap<u32, String>,
            tags: IndexSet<String>,
            aliases: HashSet<String>,
        }
    };
    let out = expand(&input)?;
    let maps = count_occurrences(&out, "fn __immutable_map");
    let sets = count_occurrences(&out, "fn __immutable_collection");
    ensure!(
        maps == expected && sets == expected,
        "expected {expected} of each helper, got {maps} map and {sets} collection helpers"
    );
    Ok(())
}

#[test]
fn sorted_containers_use_fallback_storage() -> Result<()> {
    let out = expand(&parse_quote! {
        #[builder(collections = "indexmap")]
        struct Ladder {
            by_rank: BTreeMap<Rank, String>,
            ranks: BTreeSet<Rank>,
            by_name: HashMap<String, Rank>,
        }
    })?;
    ensure_contains(&out, "by_rank: ::freebuilder::__private::OrderedMap<Rank, String>")?;
    ensure_contains(&out, "ranks: ::freebuilder::__private::OrderedSet<Rank>")?;
    ensure_contains(&out, "by_name: ::freebuilder::__private::IndexMap<String, Rank>")?;
    ensure_contains(&out, "by_rank: Self::__immutable_map(self.by_rank.as_slice())")?;
    ensure_contains(&out, "ranks: Self::__immutable_collection(self.ranks.as_slice())")
}

#[test]
fn lists_never_need_a_helper() -> Result<()> {
    let out = expand(&parse_quote! {
        #[builder(collections = "fallback")]
        struct Queue { items: Vec<u32> }
    })?;
    ensure_contains(&out, "items: ::std::vec::Vec<u32>")?;
    ensure_contains(&out, "Self::__immutable_collection(self.items.as_slice())")
}

#[test]
fn crate_alias_is_used_throughout() -> Result<()> {
    let out = expand(&parse_quote! {
        #[builder(crate = "fb")]
        struct Aliased {
            name: String,
            entries: HashMap<String, u32>,
        }
    })?;
    ensure_contains(&out, "fb::UnsetProperties<__AliasedProperty>")?;
    ensure_contains(&out, "fb::BuilderResult<Aliased>")?;
    ensure_lacks(&out, "::freebuilder::")
}

#[test]
fn generic_structs_keep_their_parameters() -> Result<()> {
    let out = expand(&parse_quote! {
        pub struct Pair<T: Clone> where T: Default {
            left: T,
            right: Option<T>,
        }
    })?;
    ensure_contains(&out, "pub struct PairBuilder<T: Clone> where T: Default {")?;
    ensure_contains(&out, "impl<T: Clone> PairBuilder<T> where T: Default {")?;
    ensure_contains(&out, "pub fn builder() -> PairBuilder<T>")?;
    ensure_contains(&out, "pub fn build(&self) -> ::freebuilder::BuilderResult<Pair<T>>")
}

#[test]
fn clear_restores_the_fresh_tracker() -> Result<()> {
    let out = expand(&parse_quote! {
        struct Job {
            name: String,
            note: Option<String>,
        }
    })?;
    ensure_contains(
        &out,
        "let template = Self::new(); self.name = template.name; self.note = template.note; \
         self.__unset = template.__unset;",
    )?;
    ensure_contains(
        &out,
        "pub fn clear_partial(&mut self) -> &mut Self { self.note = ::core::option::Option::None; self }",
    )
}

#[test]
fn merges_visit_properties_in_declaration_order() -> Result<()> {
    let out = expand(&parse_quote! {
        struct Ordered {
            first: String,
            second: Vec<u8>,
        }
    })?;
    let normalised = test_helpers::text::normalize_tokens(&out);
    let first = normalised
        .find("self.set_first(::core::clone::Clone::clone(&value.first));")
        .ok_or_else(|| anyhow!("missing first merge"))?;
    let second = normalised
        .find("self.add_all_second(value.second.iter().cloned());")
        .ok_or_else(|| anyhow!("missing second merge"))?;
    ensure!(first < second, "merge statements out of order");
    Ok(())
}
