//! Data models for docli
//!
//! Defines the core data structures: `DocMeta` (one document to keep in
//! sync), `DocSpec` (the whole configuration) and `Platform` (the publishing
//! targets docli knows about).
//!
//! These models serialize directly to the canonical `spec.json` layout.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::id;

/// Metadata for a single document kept in sync
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocMeta {
    /// Short generated identifier, used as the delete key
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Display title
    pub name: String,
    /// Optional description, never written when empty
    #[serde(
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "is_blank"
    )]
    pub description: Option<String>,
    /// Files or folders holding relevant content for this document
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_hints: Vec<String>,
}

impl DocMeta {
    /// Create a new entry with a freshly generated ID
    ///
    /// An empty description is stored as `None`.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        file_hints: Vec<String>,
    ) -> Self {
        Self::with_id(id::generate(), name, description, file_hints)
    }

    /// Create an entry with a specific ID (for loading or deterministic tests)
    pub fn with_id(
        id: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
        file_hints: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.filter(|d| !d.is_empty()),
            file_hints,
        }
    }

    /// Description if present and non-empty
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

fn is_blank(description: &Option<String>) -> bool {
    description.as_deref().map_or(true, str::is_empty)
}

/// Read `""` as an absent description
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|d| !d.is_empty()))
}

/// The complete documentation configuration
///
/// Both keys are always written, even when empty. Missing keys read as empty
/// so files written by older versions still load.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocSpec {
    /// Target platforms, in order of first selection
    #[serde(default)]
    pub platforms: Vec<String>,
    /// Documents, in insertion order
    #[serde(default)]
    pub docmeta: Vec<DocMeta>,
}

impl DocSpec {
    /// Create an empty configuration targeting the given platforms
    ///
    /// Duplicate platforms are collapsed, keeping the first occurrence.
    pub fn new<I, S>(platforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut spec = Self::default();
        for platform in platforms {
            spec.add_platform(platform);
        }
        spec
    }

    /// Add a platform unless it is already present
    ///
    /// Returns true if the platform was added.
    pub fn add_platform(&mut self, platform: impl Into<String>) -> bool {
        let platform = platform.into();
        if self.platforms.contains(&platform) {
            return false;
        }
        self.platforms.push(platform);
        true
    }

    /// Remove a platform, returning false if it was not present
    pub fn remove_platform(&mut self, platform: &str) -> bool {
        match self.platforms.iter().position(|p| p == platform) {
            Some(pos) => {
                self.platforms.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Find a document by ID
    pub fn get_doc_meta(&self, id: &str) -> Option<&DocMeta> {
        self.docmeta.iter().find(|d| d.id == id)
    }

    /// Check whether an ID is already used by a document
    pub fn contains_id(&self, id: &str) -> bool {
        self.get_doc_meta(id).is_some()
    }

    /// Remove the first document with the given ID
    ///
    /// The relative order of the remaining documents is preserved.
    pub fn remove_doc_meta(&mut self, id: &str) -> Option<DocMeta> {
        let pos = self.docmeta.iter().position(|d| d.id == id)?;
        Some(self.docmeta.remove(pos))
    }
}

/// Publishing targets docli recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Confluence,
    Readme,
}

impl Platform {
    /// All platforms, in menu order
    pub const ALL: [Platform; 2] = [Platform::Confluence, Platform::Readme];

    /// Token stored in `spec.json`
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Confluence => "confluence",
            Platform::Readme => "readme",
        }
    }

    /// Human-facing label
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Confluence => "Confluence",
            Platform::Readme => "README",
        }
    }

    /// 1-based position in the selection menu
    pub fn menu_number(&self) -> usize {
        match self {
            Platform::Confluence => 1,
            Platform::Readme => 2,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a platform name is not recognized
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown platform '{0}'. Valid platforms: confluence (1), readme (2)")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    /// Accepts the token (any case) or the menu number
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "confluence" | "1" => Ok(Platform::Confluence),
            "readme" | "2" => Ok(Platform::Readme),
            _ => Err(UnknownPlatform(trimmed.to_string())),
        }
    }
}
