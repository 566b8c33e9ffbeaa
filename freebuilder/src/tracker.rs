//! Completeness tracking for required builder properties.
//!
//! Generated builders declare one marker per property and keep the markers of
//! required properties in an [`UnsetProperties`] set. A marker leaves the set
//! the first time the property's setter succeeds; `build()` refuses to run
//! while any marker remains.

use std::collections::BTreeSet;

use crate::{BuilderError, BuilderResult};

/// Marker identifying one property of a generated builder.
///
/// The derive macro implements this trait for a private enum with one variant
/// per property. The ordering of the variants follows declaration order, so
/// errors list missing properties in the order they were declared.
pub trait PropertyMarker: Copy + Ord {
    /// Returns the field name of the property.
    fn name(self) -> &'static str;
}

/// The set of required properties that have not been set yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsetProperties<P: PropertyMarker> {
    markers: BTreeSet<P>,
}

impl<P: PropertyMarker> UnsetProperties<P> {
    /// Creates a tracker holding every marker in `required`.
    pub fn new<I>(required: I) -> Self
    where
        I: IntoIterator<Item = P>,
    {
        Self {
            markers: required.into_iter().collect(),
        }
    }

    /// Returns `true` while `property` has not been set.
    #[must_use]
    pub fn contains(&self, property: P) -> bool {
        self.markers.contains(&property)
    }

    /// Marks `property` as set. Returns `true` if it was previously unset.
    pub fn remove(&mut self, property: P) -> bool {
        self.markers.remove(&property)
    }

    /// Marks `property` as unset again.
    pub fn insert(&mut self, property: P) -> bool {
        self.markers.insert(property)
    }

    /// Returns `true` when every required property has been set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Names of the unset properties in declaration order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.markers.iter().map(|marker| marker.name()).collect()
    }

    /// Fails with [`BuilderError::Incomplete`] if `property` is still unset.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::Incomplete`] naming `property` when its marker
    /// is present.
    pub fn check_set(&self, type_name: &'static str, property: P) -> BuilderResult<()> {
        if self.contains(property) {
            return Err(BuilderError::unset(type_name, property.name()));
        }
        Ok(())
    }

    /// Fails with [`BuilderError::Incomplete`] if any marker remains.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::Incomplete`] listing every unset property.
    pub fn ensure_complete(&self, type_name: &'static str) -> BuilderResult<()> {
        if self.is_empty() {
            return Ok(());
        }
        let missing = self.names();
        tracing::debug!(type_name, ?missing, "build rejected: required properties not set");
        Err(BuilderError::Incomplete { type_name, missing })
    }
}
