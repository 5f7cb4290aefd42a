//! Newtype domain identifiers.
//!
//! Every identity carried by a webhook payload is represented as a distinct
//! newtype wrapping a primitive. This prevents accidentally interchanging, for
//! example, a [`StoryId`] with an [`AssetId`] even though both are `u64` under
//! the hood.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::InvalidAssetPath;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new(), as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps the value exactly as it appeared in the payload.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Macro for u64-wrapped newtypes (Storyblok-assigned integers).
// Generates: struct (Copy), new(), as_u64(), Display.
// ---------------------------------------------------------------------------
macro_rules! u64_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new identifier from a raw integer.
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the underlying integer value.
            pub fn as_u64(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — Storyblok-integer-backed
// ---------------------------------------------------------------------------

u64_id! {
    /// Identifies the Storyblok space a webhook was sent for.
    ///
    /// Every payload carries a `space_id`; payloads for any space other than
    /// the configured one are ignored.
    SpaceId
}

u64_id! {
    /// Identifies an asset in the Storyblok asset library.
    AssetId
}

u64_id! {
    /// Identifies a story (a content entry).
    StoryId
}

u64_id! {
    /// Identifies a pipeline branch that was deployed.
    BranchId
}

u64_id! {
    /// Identifies a collaborator of the space.
    UserId
}

u64_id! {
    /// Identifies a release that was merged.
    ReleaseId
}

// ---------------------------------------------------------------------------
// Identifiers — String-backed
// ---------------------------------------------------------------------------

string_id! {
    /// The full slug of a story (e.g. `"en/blog/my-post"`).
    FullSlug
}

string_id! {
    /// The slug of a datasource whose entries were updated.
    DatasourceSlug
}

string_id! {
    /// The name of the workflow a story moved through.
    WorkflowName
}

string_id! {
    /// The name of the workflow stage a story was moved into.
    WorkflowStageName
}

// ---------------------------------------------------------------------------
// Asset storage path
// ---------------------------------------------------------------------------

/// Prefix of every file served from the Storyblok asset CDN.
const ASSET_CDN_PREFIX: &str = "https://a.storyblok.com/f/";

/// Path of an asset relative to the space's asset root (e.g.
/// `"1920x1080/0a1b2c3d4e/hero.jpg"`).
///
/// This is the key under which an asset cache stores the file locally, so it
/// is always relative and never contains `.`, `..`, empty or backslashed
/// segments. Deserialisation applies the same checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetPath(String);

impl AssetPath {
    /// Creates an asset path, returning `None` if the value is empty or has a
    /// segment that could escape the storage root.
    ///
    /// Leading slashes are stripped so the path is always relative.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        let trimmed = v.trim_start_matches('/');
        if trimmed.is_empty() || !trimmed.split('/').all(is_plain_segment) {
            return None;
        }
        if trimmed.len() == v.len() {
            Some(Self(v))
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Derives the storage path from a Storyblok CDN URL of the form
    /// `https://a.storyblok.com/f/<space id>/<path>`.
    ///
    /// The query string and fragment (e.g. `?cv=1700000000`) are not part of
    /// the path. Returns `None` for any other URL.
    pub fn from_asset_url(url: &str) -> Option<Self> {
        let rest = url.strip_prefix(ASSET_CDN_PREFIX)?;
        let rest = rest
            .split(|c: char| c == '?' || c == '#')
            .next()
            .unwrap_or_default();
        let (space, path) = rest.split_once('/')?;
        if space.is_empty() || !space.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Self::new(path)
    }

    /// Returns the directory that holds the stored file, or `None` when the
    /// path has no directory component.
    pub fn directory(&self) -> Option<&str> {
        self.0.rsplit_once('/').map(|(dir, _)| dir)
    }

    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_plain_segment(segment: &str) -> bool {
    !matches!(segment, "" | "." | "..") && !segment.contains('\\')
}

impl TryFrom<String> for AssetPath {
    type Error = InvalidAssetPath;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match Self::new(value.as_str()) {
            Some(path) => Ok(path),
            None => Err(InvalidAssetPath(value)),
        }
    }
}

impl From<AssetPath> for String {
    fn from(path: AssetPath) -> Self {
        path.0
    }
}

impl std::fmt::Display for AssetPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single inbound webhook delivery.
///
/// Generated fresh for every request the endpoint receives; attached to the
/// spans and events of that request so all of its activity can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeliveryId(Uuid);

impl DeliveryId {
    /// Generates a new random delivery identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a [`DeliveryId`] from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[path = "identifiers_tests.rs"]
mod tests;
