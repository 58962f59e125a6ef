//! Identifier and validated-name types for the host catalog.

use super::HostCatalogDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Maximum length for a model identifier, matching `VARCHAR(255)`.
const MAX_MODEL_ID_LENGTH: usize = 255;

/// Maximum length for a source set name, matching `VARCHAR(100)`.
const MAX_SOURCE_SET_NAME_LENGTH: usize = 100;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the wrapped UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(formatter, "{}", self.0)
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a catalog source.
    SourceId
);

uuid_id!(
    /// Identifier of the user acting on a routing request.
    UserId
);

/// Model identifier as registered in the catalog.
///
/// Catalog identifiers keep their original spelling; fuzzy comparison is the
/// discovery matcher's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    /// Creates a validated model identifier.
    ///
    /// # Errors
    ///
    /// Returns [`HostCatalogDomainError`] when the trimmed value is empty or
    /// too long.
    pub fn new(value: impl Into<String>) -> Result<Self, HostCatalogDomainError> {
        let trimmed = value.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(HostCatalogDomainError::EmptyModelId);
        }
        if trimmed.len() > MAX_MODEL_ID_LENGTH {
            return Err(HostCatalogDomainError::ModelIdTooLong(trimmed));
        }
        Ok(Self(trimmed))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ModelId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Name of a set of sources sharing a model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceSetName(String);

impl SourceSetName {
    /// Creates a validated source set name.
    ///
    /// # Errors
    ///
    /// Returns [`HostCatalogDomainError`] when the trimmed value is empty or
    /// too long.
    pub fn new(value: impl Into<String>) -> Result<Self, HostCatalogDomainError> {
        let trimmed = value.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(HostCatalogDomainError::EmptySourceSetName);
        }
        if trimmed.len() > MAX_SOURCE_SET_NAME_LENGTH {
            return Err(HostCatalogDomainError::SourceSetNameTooLong(trimmed));
        }
        Ok(Self(trimmed))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SourceSetName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SourceSetName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
