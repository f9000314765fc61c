//! Identifier tokens for elements and groups.
//!
//! Excalidraw treats ids as opaque strings. Callers may supply their own
//! ([`ElementId::new`]); otherwise a UUID v4 is generated from the random
//! source handed in, so a seeded source yields reproducible ids.

use std::fmt;

use rand::RngCore;
use serde::Serialize;
use uuid::{Builder, Uuid};

fn random_uuid(rng: &mut impl RngCore) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    Builder::from_random_bytes(bytes).into_uuid()
}

/// Identity of one element within a document.
///
/// # Examples
///
/// ```
/// use scribble_core::identifier::ElementId;
///
/// let id = ElementId::new("start-node");
/// assert_eq!(id, "start-node");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Wraps a caller-chosen id verbatim.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh UUID v4 id.
    pub fn generate(rng: &mut impl RngCore) -> Self {
        Self(random_uuid(rng).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for ElementId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ElementId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Token shared by every member of a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    /// Wraps a caller-chosen group token verbatim.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh UUID v4 token.
    pub fn generate(rng: &mut impl RngCore) -> Self {
        Self(random_uuid(rng).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
