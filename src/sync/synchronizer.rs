//! Sync pass orchestration and the per-file idempotency policy.
//!
//! One pass = regenerate the rules document, then bring each shadow pointer
//! file up to date. Targets are processed sequentially in the fixed order of
//! [`SYNC_TARGETS`]; the first failure aborts the pass. A later re-run
//! converges, because work already done is protected by the marker check.

use std::path::Path;

use chrono::Utc;
use tracing::{debug, warn};

use crate::config::{RULES_FILE_NAME, RULES_POINTER_PATH};
use crate::error::{Error, Result};
use crate::model::{IndexStats, SyncOutcome, SyncReport, SYNC_TARGETS};
use crate::render::{pointer_text, render_rules_document};
use crate::sync::hash::{content_hash, has_changed};
use crate::sync::store::{DiskStore, FileStore, Presence};

/// Drives one sync pass over a repository.
///
/// Stateless apart from the injected store: every pass re-derives its
/// decisions from the files it finds.
#[derive(Debug, Default)]
pub struct Synchronizer<S = DiskStore> {
    store: S,
}

impl Synchronizer<DiskStore> {
    /// Synchronizer backed by the local filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self { store: DiskStore }
    }
}

impl<S: FileStore> Synchronizer<S> {
    /// Synchronizer backed by a custom store.
    #[must_use]
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    /// Run one full sync pass.
    ///
    /// Regenerates the rules document at `<store_root>/RULES.md`, then
    /// applies the create/append/no-op policy to every target in
    /// [`SYNC_TARGETS`] under `repo_root`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RulesWrite`] if the rules document cannot be
    /// written (nothing else is touched in that case), or
    /// [`Error::PointerRead`]/[`Error::PointerWrite`] for the first failing
    /// shadow target.
    pub fn synchronize(
        &self,
        repo_root: &Path,
        store_root: &Path,
        project_name: &str,
        stats: &IndexStats,
    ) -> Result<SyncReport> {
        let rules_path = store_root.join(RULES_FILE_NAME);
        let document = render_rules_document(project_name, stats);
        let rules_hash = content_hash(&document);

        // Change status only informs the log line below. The write itself
        // is unconditional: the pass is the authoritative regeneration of
        // the single source of truth.
        let previous_hash = match self.store.probe(&rules_path) {
            Presence::Present => self
                .store
                .read(&rules_path)
                .ok()
                .map(|old| content_hash(&old)),
            Presence::Absent | Presence::Inaccessible(_) => None,
        };
        let changed = has_changed(&rules_hash, previous_hash.as_deref());

        self.store
            .write(&rules_path, &document)
            .map_err(|source| Error::RulesWrite {
                path: rules_path.clone(),
                source,
            })?;
        debug!(path = %rules_path.display(), changed, "rules document regenerated");

        let pointer = pointer_text();
        let mut modified = Vec::new();
        for target in SYNC_TARGETS {
            let path = repo_root.join(target.rel_path);
            let outcome = self.sync_pointer_file(&path, pointer, RULES_POINTER_PATH)?;
            debug!(
                target = target.display_name,
                outcome = outcome.as_str(),
                "pointer file processed"
            );
            if outcome.is_modified() {
                modified.push(target.display_name.to_string());
            }
        }

        Ok(SyncReport {
            rules_path,
            rules_hash,
            synced_at: Utc::now().to_rfc3339(),
            modified,
        })
    }

    /// Apply the create/append/no-op policy to one pointer file.
    ///
    /// - Absent: write `content` as the full body, report `Created`.
    /// - Present with `marker` anywhere in its text: no write, report
    ///   `Unchanged`.
    /// - Present without `marker`: rewrite as the trimmed existing text,
    ///   one blank line, then `content`; report `Appended`.
    ///
    /// An inaccessible probe is collapsed to "absent". If the path was
    /// actually present but unreadable, the subsequent write fails loudly
    /// instead of the probe.
    fn sync_pointer_file(&self, path: &Path, content: &str, marker: &str) -> Result<SyncOutcome> {
        let present = match self.store.probe(path) {
            Presence::Present => true,
            Presence::Absent => false,
            Presence::Inaccessible(source) => {
                warn!(
                    path = %path.display(),
                    error = %source,
                    "existence probe failed; treating as absent"
                );
                false
            }
        };

        if !present {
            self.store
                .write(path, content)
                .map_err(|source| Error::PointerWrite {
                    path: path.to_path_buf(),
                    source,
                })?;
            return Ok(SyncOutcome::Created);
        }

        let existing = self
            .store
            .read(path)
            .map_err(|source| Error::PointerRead {
                path: path.to_path_buf(),
                source,
            })?;

        if existing.contains(marker) {
            return Ok(SyncOutcome::Unchanged);
        }

        let merged = format!("{}\n\n{}", existing.trim(), content);
        self.store
            .write(path, &merged)
            .map_err(|source| Error::PointerWrite {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(SyncOutcome::Appended)
    }
}

/// Run one sync pass against the local filesystem.
///
/// Convenience wrapper over [`Synchronizer::new`] for callers that do not
/// inject a store.
///
/// # Errors
///
/// Propagates the first failure of the pass; see
/// [`Synchronizer::synchronize`].
pub fn synchronize(
    repo_root: &Path,
    store_root: &Path,
    project_name: &str,
    stats: &IndexStats,
) -> Result<SyncReport> {
    Synchronizer::new().synchronize(repo_root, store_root, project_name, stats)
}
