//! Errors reported by generated builders.

use std::fmt::Debug;

use thiserror::Error;

/// Result alias used by every fallible builder operation.
pub type BuilderResult<T> = Result<T, BuilderError>;

/// Errors raised by generated builder methods.
///
/// Every check runs before the builder is mutated, so a failed call leaves
/// the builder exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BuilderError {
    /// One or more required properties have not been set.
    #[error("{type_name}: not set: [{}]", .missing.join(", "))]
    Incomplete {
        /// Name of the value type being built.
        type_name: &'static str,
        /// Required properties that are still unset, in declaration order.
        missing: Vec<&'static str>,
    },

    /// A map property already holds the key being inserted.
    #[error("Key already present in {property}: {key}")]
    DuplicateKey {
        /// Map property that rejected the key.
        property: &'static str,
        /// `Debug` rendering of the rejected key.
        key: String,
    },

    /// A map property does not hold the key being removed.
    #[error("Key not present in {property}: {key}")]
    MissingKey {
        /// Map property that was asked to remove the key.
        property: &'static str,
        /// `Debug` rendering of the missing key.
        key: String,
    },

    /// A user-supplied check hook rejected a value.
    #[error("Validation failed for '{property}': {message}")]
    Validation {
        /// Property whose check hook failed.
        property: &'static str,
        /// Human-readable explanation supplied by the hook.
        message: String,
    },
}

impl BuilderError {
    /// Construct an [`BuilderError::Incomplete`] error for a single property.
    ///
    /// Generated getters use this when a required property is read before
    /// its setter has been called.
    ///
    /// # Examples
    ///
    /// ```
    /// use freebuilder::BuilderError;
    /// let err = BuilderError::unset("Person", "name");
    /// assert_eq!(err.to_string(), "Person: not set: [name]");
    /// ```
    #[must_use]
    pub fn unset(type_name: &'static str, property: &'static str) -> Self {
        Self::Incomplete {
            type_name,
            missing: vec![property],
        }
    }

    /// Construct a [`BuilderError::DuplicateKey`] error.
    ///
    /// # Examples
    ///
    /// ```
    /// use freebuilder::BuilderError;
    /// let err = BuilderError::duplicate_key("entries", &"k");
    /// assert_eq!(err.to_string(), "Key already present in entries: \"k\"");
    /// ```
    #[must_use]
    pub fn duplicate_key<K: Debug + ?Sized>(property: &'static str, key: &K) -> Self {
        let rendered = format!("{key:?}");
        tracing::trace!(property, key = %rendered, "rejected duplicate map key");
        Self::DuplicateKey {
            property,
            key: rendered,
        }
    }

    /// Construct a [`BuilderError::MissingKey`] error.
    #[must_use]
    pub fn missing_key<K: Debug + ?Sized>(property: &'static str, key: &K) -> Self {
        let rendered = format!("{key:?}");
        tracing::trace!(property, key = %rendered, "rejected removal of absent map key");
        Self::MissingKey {
            property,
            key: rendered,
        }
    }

    /// Construct a [`BuilderError::Validation`] error.
    ///
    /// Check hooks call this to reject a value.
    ///
    /// # Examples
    ///
    /// ```
    /// use freebuilder::BuilderError;
    /// let err = BuilderError::validation("items", "Cannot add empty string");
    /// assert!(matches!(err, BuilderError::Validation { property: "items", .. }));
    /// ```
    #[must_use]
    pub fn validation(property: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            property,
            message: message.into(),
        }
    }

    /// Returns the property names an [`BuilderError::Incomplete`] error
    /// reports, or an empty slice for every other variant.
    #[must_use]
    pub fn missing_properties(&self) -> &[&'static str] {
        match self {
            Self::Incomplete { missing, .. } => missing.as_slice(),
            _ => &[],
        }
    }
}
