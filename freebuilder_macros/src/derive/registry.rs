//! Strategy selection.
//!
//! Factories are consulted in a fixed order and the first one that claims a
//! property wins. The default factory never declines, so selection is total.

use std::collections::BTreeSet;

use proc_macro2::Span;

use super::parse::{PropertyDescriptor, TypeShape};
use super::strategy::{
    CollectionKind, CollectionStrategy, MapStrategy, OptionalStrategy, ScalarStrategy, Strategy,
};

/// Collection library backing map and set properties while building.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CollectionLibrary {
    /// `indexmap::IndexMap` / `indexmap::IndexSet`.
    IndexMap,
    /// `freebuilder::collections::OrderedMap` / `OrderedSet`, finalised
    /// through the generated static helpers.
    Fallback,
}

impl CollectionLibrary {
    pub(crate) fn parse(s: &str, span: Span) -> Result<Self, syn::Error> {
        match s {
            "indexmap" => Ok(Self::IndexMap),
            "fallback" => Ok(Self::Fallback),
            _ => Err(syn::Error::new(
                span,
                format!("unknown collections '{s}'; expected \"indexmap\" or \"fallback\""),
            )),
        }
    }

    /// The library available to this build of the macro.
    pub(crate) const fn detected() -> Self {
        if cfg!(feature = "indexmap") {
            Self::IndexMap
        } else {
            Self::Fallback
        }
    }
}

/// Features the generated code may rely on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FeatureSet {
    /// Emit `map_<name>` methods.
    pub mappers: bool,
    pub collections: CollectionLibrary,
}

impl FeatureSet {
    /// Features for a map or set property. Sorted containers are always
    /// backed by the fallback collections, which need no `Hash` bound.
    pub(crate) const fn for_container(self, sorted: bool) -> Self {
        if sorted {
            Self {
                collections: CollectionLibrary::Fallback,
                ..self
            }
        } else {
            self
        }
    }
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self {
            mappers: true,
            collections: CollectionLibrary::detected(),
        }
    }
}

/// Everything a factory may inspect when deciding whether to claim a
/// property.
pub(crate) struct Config<'a> {
    pub property: &'a PropertyDescriptor,
    pub features: FeatureSet,
    /// Names of setters invoked by the generated constructor.
    pub methods_invoked_in_constructor: &'a BTreeSet<String>,
}

impl Config<'_> {
    fn has_nullable_marker(&self) -> bool {
        !self.property.nullable_markers.is_empty()
    }
}

/// Strategy factories in consultation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Factory {
    Nullable,
    Map,
    Set,
    List,
    Default,
}

impl Factory {
    /// The specific factories, tried before [`Factory::Default`].
    pub(crate) const ORDER: [Self; 4] = [Self::Nullable, Self::Map, Self::Set, Self::List];

    /// Returns a strategy bound to the configured property, or `None` if
    /// this factory declines it.
    pub(crate) fn create(self, config: &Config<'_>) -> Option<Strategy> {
        let property = config.property;
        let nullable = config.has_nullable_marker();
        let features = config.features;
        match (self, &property.shape) {
            (Self::Nullable, TypeShape::Optional(inner)) if nullable => Some(Strategy::Optional(
                OptionalStrategy::new(property.clone(), inner.clone(), features),
            )),
            (Self::Map, TypeShape::Map { key, value, sorted }) if !nullable => {
                Some(Strategy::Map(MapStrategy::new(
                    property.clone(),
                    key.clone(),
                    value.clone(),
                    features.for_container(*sorted),
                )))
            }
            (Self::Set, TypeShape::Set { element, sorted }) if !nullable => {
                Some(Strategy::Collection(CollectionStrategy::new(
                    property.clone(),
                    element.clone(),
                    CollectionKind::Set,
                    features.for_container(*sorted),
                )))
            }
            (Self::List, TypeShape::List(element)) if !nullable => {
                Some(Strategy::Collection(CollectionStrategy::new(
                    property.clone(),
                    element.clone(),
                    CollectionKind::List,
                    features,
                )))
            }
            (Self::Default, _) => Some(default_strategy(config)),
            _ => None,
        }
    }
}

/// The catch-all strategy: required unless the constructor sets the property.
fn default_strategy(config: &Config<'_>) -> Strategy {
    let setter = config.property.setter_name().to_string();
    let has_default = config.methods_invoked_in_constructor.contains(&setter);
    Strategy::Scalar(ScalarStrategy::new(
        config.property.clone(),
        has_default,
        config.features,
    ))
}

/// Selects the strategy for one property.
///
/// The specific factories are tried in [`Factory::ORDER`], then
/// [`Factory::Default`], which always claims.
pub(crate) fn select(config: &Config<'_>) -> Strategy {
    Factory::ORDER
        .iter()
        .chain([&Factory::Default])
        .find_map(|factory| factory.create(config))
        .unwrap_or_else(|| default_strategy(config))
}
