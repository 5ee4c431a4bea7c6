use std::{io, path::Path};

use super::{EntryMetadata, MkdirOptions, PathExt};

/// Filesystem operations needed by [`BaseDirs`](crate::xdg::BaseDirs).
///
/// [`OsFileSystem`] is the real thing; tests substitute an in-memory double.
pub trait FileSystem {
    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is a directory, following symlinks.
    fn is_dir(&self, path: &Path) -> bool;

    /// Metadata of the entry at `path`, without following symlinks.
    fn stat(&self, path: &Path) -> io::Result<EntryMetadata>;

    /// Create a directory with permission bits `mode`.
    fn mkdir(&self, path: &Path, mode: u32, opts: MkdirOptions) -> io::Result<()>;

    /// Remove an empty directory.
    fn rmdir(&self, path: &Path) -> io::Result<()>;

    /// Effective user id of the current process.
    fn current_uid(&self) -> u32;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn stat(&self, path: &Path) -> io::Result<EntryMetadata> {
        (**self).stat(path)
    }

    fn mkdir(&self, path: &Path, mode: u32, opts: MkdirOptions) -> io::Result<()> {
        (**self).mkdir(path, mode, opts)
    }

    fn rmdir(&self, path: &Path) -> io::Result<()> {
        (**self).rmdir(path)
    }

    fn current_uid(&self) -> u32 {
        (**self).current_uid()
    }
}

/// [`FileSystem`] backed by [`std::fs`] and [`libc`].
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn stat(&self, path: &Path) -> io::Result<EntryMetadata> {
        path.entry_metadata()
    }

    fn mkdir(&self, path: &Path, mode: u32, opts: MkdirOptions) -> io::Result<()> {
        path.mkdir(mode, opts)
    }

    fn rmdir(&self, path: &Path) -> io::Result<()> {
        path.rmdir()
    }

    #[cfg(unix)]
    fn current_uid(&self) -> u32 {
        // SAFETY: `geteuid` takes no arguments, always succeeds and touches no memory we own.
        unsafe { libc::geteuid() }
    }

    #[cfg(not(unix))]
    fn current_uid(&self) -> u32 {
        0
    }
}
