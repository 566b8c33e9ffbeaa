//! Type introspection helpers.
//!
//! These utilities perform shallow inspection of `syn::Type` values to
//! recognise `Option<T>` and the standard map, set and list containers. Only
//! the final path segment is compared, so `std::collections::HashMap<K, V>`
//! and a bare `HashMap<K, V>` classify alike.

use syn::{GenericArgument, PathArguments, Type};

use super::descriptor::{TypeRef, TypeShape};

const MAP_WRAPPERS: [&str; 3] = ["HashMap", "BTreeMap", "IndexMap"];
const SET_WRAPPERS: [&str; 3] = ["HashSet", "BTreeSet", "IndexSet"];
const LIST_WRAPPERS: [&str; 2] = ["Vec", "VecDeque"];
const SORTED_WRAPPERS: [&str; 2] = ["BTreeMap", "BTreeSet"];

const PRIMITIVES: [&str; 16] = [
    "bool", "char", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64",
    "u128", "usize", "f32", "f64",
];

/// Iterates the type arguments of the final path segment of `ty` when that
/// segment is named `wrapper`.
fn type_arguments<'a>(ty: &'a Type, wrapper: &str) -> Option<impl Iterator<Item = &'a Type>> {
    let Type::Path(p) = ty else {
        return None;
    };
    if p.qself.is_some() {
        return None;
    }
    let last = p.path.segments.last()?;
    if last.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    Some(args.args.iter().filter_map(|arg| match arg {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }))
}

/// Returns the generic parameter if `ty` is the provided wrapper.
///
/// The check is shallow and not recursive: `Option<Vec<T>>` yields `Vec<T>`.
fn type_inner<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    type_arguments(ty, wrapper)?.next()
}

/// Extracts the key and value types if `ty` is the map `wrapper`.
///
/// Extra type arguments such as a hasher are ignored.
fn map_inner<'a>(ty: &'a Type, wrapper: &str) -> Option<(&'a Type, &'a Type)> {
    let mut args = type_arguments(ty, wrapper)?;
    Some((args.next()?, args.next()?))
}

/// Returns the inner type if `ty` is `Option<T>`.
pub(crate) fn option_inner(ty: &Type) -> Option<&Type> {
    type_inner(ty, "Option")
}

/// Returns the key and value types if `ty` is a supported map container.
pub(crate) fn any_map_inner(ty: &Type) -> Option<(&Type, &Type)> {
    MAP_WRAPPERS
        .iter()
        .find_map(|wrapper| map_inner(ty, wrapper))
}

/// Returns the element type if `ty` is a supported set container.
pub(crate) fn any_set_inner(ty: &Type) -> Option<&Type> {
    SET_WRAPPERS
        .iter()
        .find_map(|wrapper| type_inner(ty, wrapper))
}

/// Returns the element type if `ty` is a supported list container.
pub(crate) fn any_list_inner(ty: &Type) -> Option<&Type> {
    LIST_WRAPPERS
        .iter()
        .find_map(|wrapper| type_inner(ty, wrapper))
}

/// Returns `true` if the final path segment of `ty` names a sorted
/// container.
fn is_sorted_container(ty: &Type) -> bool {
    let Type::Path(p) = ty else {
        return false;
    };
    p.path
        .segments
        .last()
        .is_some_and(|last| SORTED_WRAPPERS.iter().any(|name| last.ident == name))
}

/// Returns `true` for the built-in scalar types that are taken by value
/// rather than through `impl Into<T>`.
///
/// Integer literals do not infer through `Into`, so setters for these types
/// accept the type itself.
pub(crate) fn is_primitive(ty: &Type) -> bool {
    let Type::Path(p) = ty else {
        return false;
    };
    if p.qself.is_some() || p.path.leading_colon.is_some() || p.path.segments.len() != 1 {
        return false;
    }
    p.path.segments.first().is_some_and(|segment| {
        segment.arguments.is_none() && PRIMITIVES.iter().any(|name| segment.ident == name)
    })
}

/// Classifies the declared type of a property by its outermost container.
pub(crate) fn classify(ty: &Type) -> TypeShape {
    if let Some(inner) = option_inner(ty) {
        return TypeShape::Optional(TypeRef::new(inner));
    }
    if let Some((key, value)) = any_map_inner(ty) {
        return TypeShape::Map {
            key: TypeRef::new(key),
            value: TypeRef::new(value),
            sorted: is_sorted_container(ty),
        };
    }
    if let Some(element) = any_set_inner(ty) {
        return TypeShape::Set {
            element: TypeRef::new(element),
            sorted: is_sorted_container(ty),
        };
    }
    any_list_inner(ty).map_or(TypeShape::Scalar, |element| {
        TypeShape::List(TypeRef::new(element))
    })
}
