//! Property descriptors: the normalised shape of one builder property.

use heck::ToUpperCamelCase;
use proc_macro2::Span;
use quote::format_ident;
use syn::ext::IdentExt;
use syn::{Expr, Ident, Type};

use super::FieldAttrs;
use super::type_utils::{classify, is_primitive};

/// Builder methods generated for every type. A property named after one of
/// them would collide with its getter.
const RESERVED_NAMES: [&str; 7] = [
    "new",
    "build",
    "merge_from",
    "merge_from_builder",
    "from_value",
    "clear",
    "clear_partial",
];

/// Upper camel case form of a field name, usable as an enum variant.
///
/// Names that would not start with a letter, or that would read `Self`,
/// gain a `P` prefix.
fn marker_name(base: &str) -> String {
    let camel = base.to_upper_camel_case();
    if camel == "Self" || !camel.starts_with(char::is_alphabetic) {
        return format!("P{camel}");
    }
    camel
}

/// A declared type together with whether it is a built-in scalar.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TypeRef {
    pub ty: Type,
    pub primitive: bool,
}

impl TypeRef {
    pub(crate) fn new(ty: &Type) -> Self {
        Self {
            ty: ty.clone(),
            primitive: is_primitive(ty),
        }
    }
}

/// Structural shape of a declared type, judged by its outermost container.
///
/// `sorted` marks `BTreeMap` and `BTreeSet`, whose keys need only `Ord`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum TypeShape {
    Scalar,
    Optional(TypeRef),
    Map {
        key: TypeRef,
        value: TypeRef,
        sorted: bool,
    },
    Set {
        element: TypeRef,
        sorted: bool,
    },
    List(TypeRef),
}

impl TypeShape {
    pub(crate) const fn is_container(&self) -> bool {
        matches!(self, Self::Map { .. } | Self::Set { .. } | Self::List(_))
    }
}

/// A source requesting optional semantics for a property.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NullableMarker {
    /// The declared type is `Option<T>`.
    OptionType,
    /// The field carries `#[builder(nullable)]`.
    Attribute,
}

/// Where a has-default property takes its initial value from.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum DefaultValue {
    /// `#[builder(default)]`: `Default::default()`.
    Implicit,
    /// `#[builder(default = expr)]`.
    Expr(Expr),
}

/// Everything the registry and the strategies need to know about one field.
#[derive(Clone, Debug)]
pub(crate) struct PropertyDescriptor {
    pub name: Ident,
    pub capitalized_name: Ident,
    pub ty: TypeRef,
    pub shape: TypeShape,
    pub nullable_markers: Vec<NullableMarker>,
    pub check: bool,
    pub default: Option<DefaultValue>,
}

impl PropertyDescriptor {
    /// Builds the descriptor for a named field, rejecting attribute
    /// combinations that no strategy can honour.
    pub(crate) fn from_field(field: &syn::Field, attrs: FieldAttrs) -> syn::Result<Self> {
        let Some(name) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "FreeBuilder requires named fields"));
        };
        let base = name.unraw().to_string();
        if RESERVED_NAMES.contains(&base.as_str()) {
            return Err(syn::Error::new_spanned(
                &name,
                format!("`{base}` clashes with a generated builder method; rename the field"),
            ));
        }

        let ty = TypeRef::new(&field.ty);
        let shape = classify(&field.ty);
        let mut nullable_markers = Vec::new();
        if matches!(shape, TypeShape::Optional(_)) {
            nullable_markers.push(NullableMarker::OptionType);
        }
        if let Some(span) = attrs.nullable {
            if nullable_markers.is_empty() {
                return Err(syn::Error::new(
                    span,
                    "`nullable` requires an `Option<_>` field type",
                ));
            }
            nullable_markers.push(NullableMarker::Attribute);
        }
        if let (Some(span), true) = (attrs.default_span, shape.is_container()) {
            return Err(syn::Error::new(
                span,
                "`default` is not supported on collection properties; they start empty",
            ));
        }

        Ok(Self {
            capitalized_name: Ident::new(&marker_name(&base), Span::call_site()),
            name,
            ty,
            shape,
            nullable_markers,
            check: attrs.check,
            default: attrs.default,
        })
    }

    /// Field name without any `r#` prefix.
    pub(crate) fn base_name(&self) -> String {
        self.name.unraw().to_string()
    }

    /// Method identifier `<prefix>_<name>`.
    pub(crate) fn method(&self, prefix: &str) -> Ident {
        format_ident!("{}_{}", prefix, self.base_name())
    }

    pub(crate) fn setter_name(&self) -> Ident {
        self.method("set")
    }

    pub(crate) fn getter_name(&self) -> &Ident {
        &self.name
    }
}
