//! Data types for the sync pass.
//!
//! Inputs come from the indexing engine ([`IndexStats`]), the target set is
//! fixed data ([`SYNC_TARGETS`]), and the outputs are [`SyncOutcome`] per
//! target plus one [`SyncReport`] per pass.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Result;

/// Counts produced by one indexing pass of the code graph.
///
/// All fields default to zero when absent, so a partially populated payload
/// still renders a complete document. Values are not validated; whatever
/// the engine reports is rendered verbatim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexStats {
    /// Files indexed.
    pub files: i64,
    /// Symbols extracted. Older engines report this field as `nodes`.
    #[serde(alias = "nodes")]
    pub symbols: i64,
    /// Relationships between symbols.
    pub relationships: i64,
    /// Module clusters detected.
    pub clusters: i64,
    /// Data flows traced.
    pub flows: i64,
}

/// One shadow file kept pointing at the rules document.
///
/// The target set is data, not code: adding an IDE integration is a new
/// entry in [`SYNC_TARGETS`], not a new branch in the synchronizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncTarget {
    /// Path relative to the repository root.
    pub rel_path: &'static str,
    /// Name reported back to the caller when this target is modified.
    pub display_name: &'static str,
}

/// Shadow files synchronized on every pass, in processing order.
pub const SYNC_TARGETS: &[SyncTarget] = &[
    SyncTarget {
        rel_path: "AGENTS.md",
        display_name: "AGENTS.md",
    },
    SyncTarget {
        rel_path: ".cursorrules",
        display_name: ".cursorrules",
    },
    SyncTarget {
        rel_path: ".windsurfrules",
        display_name: ".windsurfrules",
    },
];

/// Result of applying the idempotency policy to one target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOutcome {
    /// The file did not exist and was written with the pointer text.
    Created,
    /// The file existed without the marker; the pointer text was appended.
    Appended,
    /// The file already contains the marker and was left untouched.
    Unchanged,
}

impl SyncOutcome {
    /// Lowercase outcome name for logs and reports.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Created => "created",
            Self::Appended => "appended",
            Self::Unchanged => "unchanged",
        }
    }

    /// Whether this outcome modified the target file.
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Summary of one full sync pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    /// Resolved path of the rules document.
    pub rules_path: PathBuf,
    /// SHA256 hex digest of the freshly rendered document.
    pub rules_hash: String,
    /// ISO8601 timestamp when the pass completed.
    pub synced_at: String,
    /// Display names of shadow targets that were created or appended to.
    /// Untouched targets are excluded.
    pub modified: Vec<String>,
}

impl SyncReport {
    /// Structured JSON for the calling tool.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be serialized.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
