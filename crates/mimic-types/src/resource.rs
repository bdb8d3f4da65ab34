//! Prefix-checked resource keys.
//!
//! Every keyed collection in the simulations uses a fixed key prefix
//! (`people/`, `contactGroups/`, `otherContacts/`, …). A key missing its
//! prefix is a caller input error, never data corruption, so the check runs
//! at the operation boundary before any collection access.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TypeError};

/// A collection-scoped resource identifier such as `people/c42`.
///
/// Construction via [`ResourceKey::checked`] guarantees the prefix; the inner
/// string keeps the full form so it can be used directly as a map key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceKey(String);

impl ResourceKey {
    /// Validate that `raw` carries `prefix` (e.g. `"people/"`).
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::BadResourcePrefix`] when the prefix is missing.
    /// The message names the expected prefix, matching the upstream contract.
    pub fn checked(raw: &str, prefix: &str) -> Result<Self> {
        if raw.starts_with(prefix) {
            Ok(Self(raw.to_string()))
        } else {
            Err(TypeError::BadResourcePrefix {
                prefix: prefix.to_string(),
            })
        }
    }

    /// Build a key from a prefix and a sequence number, e.g. `people/c7`.
    pub fn numbered(prefix: &str, tag: &str, seq: u64) -> Self {
        Self(format!("{prefix}{tag}{seq}"))
    }

    /// The full key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ResourceKey> for String {
    fn from(key: ResourceKey) -> Self {
        key.0
    }
}
