//! Storage capability for sync operations.
//!
//! The synchronizer never touches the filesystem directly; it goes through
//! [`FileStore`], which covers exactly the operations the policy needs:
//! existence probe, full-text read, full-text write.
//!
//! [`DiskStore`] writes atomically: content goes to a temp file, is synced
//! to disk, then renamed over the target. If any step fails, the original
//! file (if any) remains untouched.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Result of a non-destructive existence probe.
///
/// `Inaccessible` keeps permission and traversal failures distinguishable
/// from plain absence. The sync policy collapses both to "absent" for
/// compatibility, deferring the real failure to the write attempt.
#[derive(Debug)]
pub enum Presence {
    /// The path exists.
    Present,
    /// The path does not exist.
    Absent,
    /// The probe itself failed; existence is unknown.
    Inaccessible(io::Error),
}

/// Capability for the file operations the synchronizer needs.
pub trait FileStore {
    /// Probe whether `path` currently exists.
    fn probe(&self, path: &Path) -> Presence;

    /// Read the full text of `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    fn read(&self, path: &Path) -> io::Result<String>;

    /// Replace the full contents of `path`, all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the content could not be fully written.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;
}

impl<S: FileStore + ?Sized> FileStore for &S {
    fn probe(&self, path: &Path) -> Presence {
        (**self).probe(path)
    }

    fn read(&self, path: &Path) -> io::Result<String> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        (**self).write(path, content)
    }
}

/// Production store backed by the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskStore;

impl FileStore for DiskStore {
    fn probe(&self, path: &Path) -> Presence {
        match fs::metadata(path) {
            Ok(_) => Presence::Present,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Presence::Absent,
            Err(e) => Presence::Inaccessible(e),
        }
    }

    fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    /// Atomic write: temp file in the same directory, fsync, rename.
    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        let mut temp_name = path.file_name().map(OsString::from).unwrap_or_default();
        temp_name.push(".tmp");
        let temp_path = path.with_file_name(temp_name);

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write to temp file, sync to disk before rename
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes())?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }

        fs::rename(&temp_path, path)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory store double for policy tests.

    use super::{FileStore, Presence};
    use std::cell::RefCell;
    use std::collections::{BTreeMap, BTreeSet};
    use std::io;
    use std::path::{Path, PathBuf};

    /// In-memory [`FileStore`] with injectable probe and write failures.
    #[derive(Debug, Default)]
    pub struct MemoryFiles {
        files: RefCell<BTreeMap<PathBuf, String>>,
        probe_denied: BTreeSet<PathBuf>,
        write_denied: BTreeSet<PathBuf>,
    }

    impl MemoryFiles {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn insert(&self, path: impl Into<PathBuf>, content: &str) {
            self.files
                .borrow_mut()
                .insert(path.into(), content.to_string());
        }

        pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
            self.files.borrow().get(path.as_ref()).cloned()
        }

        /// Make the existence probe fail for `path`.
        pub fn deny_probe(&mut self, path: impl Into<PathBuf>) {
            self.probe_denied.insert(path.into());
        }

        /// Make writes to `path` fail.
        pub fn deny_write(&mut self, path: impl Into<PathBuf>) {
            self.write_denied.insert(path.into());
        }
    }

    impl FileStore for MemoryFiles {
        fn probe(&self, path: &Path) -> Presence {
            if self.probe_denied.contains(path) {
                return Presence::Inaccessible(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "probe denied",
                ));
            }
            if self.files.borrow().contains_key(path) {
                Presence::Present
            } else {
                Presence::Absent
            }
        }

        fn read(&self, path: &Path) -> io::Result<String> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "no such in-memory file")
            })
        }

        fn write(&self, path: &Path, content: &str) -> io::Result<()> {
            if self.write_denied.contains(path) {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "write denied",
                ));
            }
            self.insert(path.to_path_buf(), content);
            Ok(())
        }
    }
}
