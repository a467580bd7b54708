//! Fixed filesystem layout and repository discovery.
//!
//! The sync core writes to a fixed, non-configurable layout: the rules
//! document lives inside the store directory, the pointer files sit at the
//! repository root. Callers locate the repository; this module provides the
//! constants and the discovery helpers.

use std::path::{Path, PathBuf};

/// Directory under the repository root holding index state.
pub const STORE_DIR_NAME: &str = ".store";

/// File name of the canonical rules document inside the store directory.
pub const RULES_FILE_NAME: &str = "RULES.md";

/// Repo-relative location of the rules document.
///
/// Used verbatim as the marker substring proving that a pointer file
/// already references the rules document. Must stay in lockstep with
/// [`STORE_DIR_NAME`] and [`RULES_FILE_NAME`] and with the pointer template
/// in [`crate::render`].
pub const RULES_POINTER_PATH: &str = ".store/RULES.md";

/// Conventional store root for a repository.
#[must_use]
pub fn default_store_root(repo_root: &Path) -> PathBuf {
    repo_root.join(STORE_DIR_NAME)
}

/// Discover the repository root for the current process.
///
/// Resolution strategy:
/// 1. Ask git for the toplevel. This prevents subdirectory store dirs from
///    shadowing the real project root in monorepos.
/// 2. Walk up from the current directory looking for an existing store
///    directory (non-git projects).
///
/// # Returns
///
/// The repository root, or `None` if neither strategy finds one.
#[must_use]
pub fn discover_repo_root() -> Option<PathBuf> {
    if let Some(root) = git_toplevel() {
        return Some(root);
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        loop {
            if dir.join(STORE_DIR_NAME).is_dir() {
                return Some(dir.to_path_buf());
            }

            match dir.parent() {
                Some(parent) => dir = parent,
                None => break,
            }
        }
    }
    None
}

/// Get the git repository root directory.
fn git_toplevel() -> Option<PathBuf> {
    std::process::Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| PathBuf::from(String::from_utf8_lossy(&o.stdout).trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_store_root() {
        let root = default_store_root(Path::new("/repo"));
        assert_eq!(root, PathBuf::from("/repo/.store"));
    }

    #[test]
    fn test_marker_matches_layout_constants() {
        assert_eq!(
            RULES_POINTER_PATH,
            format!("{STORE_DIR_NAME}/{RULES_FILE_NAME}")
        );
    }
}
