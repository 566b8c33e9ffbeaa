//! Tests for type introspection helpers.

use super::super::type_utils::{classify, is_primitive, option_inner};
use super::super::{TypeRef, TypeShape};
use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{Type, parse_quote};

#[rstest]
#[case(parse_quote!(Option<u32>))]
#[case(parse_quote!(std::option::Option<u32>))]
#[case(parse_quote!(core::option::Option<u32>))]
fn option_inner_matches_various_prefixes(#[case] ty: Type) -> Result<()> {
    let expected: Type = parse_quote!(u32);
    let inner = option_inner(&ty).ok_or_else(|| anyhow!("expected Option"))?;
    ensure!(inner == &expected, "expected {expected:?}, got {inner:?}");
    Ok(())
}

#[rstest]
#[case::hash_map(parse_quote!(HashMap<String, i32>), false)]
#[case::btree_map(parse_quote!(std::collections::BTreeMap<String, i32>), true)]
#[case::index_map(parse_quote!(indexmap::IndexMap<String, i32>), false)]
#[case::custom_hasher(parse_quote!(HashMap<String, i32, MyHasher>), false)]
fn maps_classify_with_key_and_value(#[case] ty: Type, #[case] sorted: bool) -> Result<()> {
    let shape = classify(&ty);
    let expected = TypeShape::Map {
        key: TypeRef::new(&parse_quote!(String)),
        value: TypeRef::new(&parse_quote!(i32)),
        sorted,
    };
    ensure!(shape == expected, "unexpected shape {shape:?}");
    Ok(())
}

#[rstest]
#[case::hash_set(parse_quote!(HashSet<u8>), Some(false))]
#[case::btree_set(parse_quote!(BTreeSet<u8>), Some(true))]
#[case::index_set(parse_quote!(IndexSet<u8>), Some(false))]
#[case::vec(parse_quote!(Vec<u8>), None)]
#[case::vec_deque(parse_quote!(std::collections::VecDeque<u8>), None)]
fn collections_classify_as_set_or_list(
    #[case] ty: Type,
    #[case] set_sorted: Option<bool>,
) -> Result<()> {
    let element = TypeRef::new(&parse_quote!(u8));
    let expected = match set_sorted {
        Some(sorted) => TypeShape::Set { element, sorted },
        None => TypeShape::List(element),
    };
    let shape = classify(&ty);
    ensure!(shape == expected, "unexpected shape {shape:?}");
    Ok(())
}

#[rstest]
#[case::string(parse_quote!(String))]
#[case::generic(parse_quote!(T))]
#[case::reference(parse_quote!(&'static str))]
#[case::tuple(parse_quote!((u8, u8)))]
fn other_types_are_scalar(#[case] ty: Type) -> Result<()> {
    ensure!(classify(&ty) == TypeShape::Scalar, "expected scalar for {ty:?}");
    Ok(())
}

#[test]
fn optional_shape_is_shallow() -> Result<()> {
    let shape = classify(&parse_quote!(Option<Vec<String>>));
    let expected = TypeShape::Optional(TypeRef::new(&parse_quote!(Vec<String>)));
    ensure!(shape == expected, "unexpected shape {shape:?}");
    Ok(())
}

#[rstest]
#[case(parse_quote!(u32), true)]
#[case(parse_quote!(bool), true)]
#[case(parse_quote!(f64), true)]
#[case(parse_quote!(String), false)]
#[case(parse_quote!(std::primitive::u32), false)]
#[case(parse_quote!(Option<u32>), false)]
fn primitive_detection(#[case] ty: Type, #[case] expected: bool) -> Result<()> {
    ensure!(is_primitive(&ty) == expected, "wrong primitive verdict for {ty:?}");
    Ok(())
}
