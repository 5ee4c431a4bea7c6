use std::{
    fs::{DirBuilder, remove_dir, symlink_metadata},
    io,
    path::Path,
};

use super::GROUP_OTHER_MASK;

/// Options for controlling [`PathExt::mkdir`]
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum MkdirOptions {
    /// Equivalent of `mkdir -m $mode $path`.
    WithoutParents,
    /// Equivalent of `mkdir -p -m $mode $path`.
    WithParents,
}

/// What [`PathExt::entry_metadata`] reports about a directory entry.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct EntryMetadata {
    /// Whether the entry itself (not a symlink target) is a directory.
    pub is_dir: bool,
    /// Owning user id.
    pub uid: u32,
    /// Permission bits, without the file type.
    pub mode: u32,
}

impl EntryMetadata {
    /// Returns `true` if any of group or other read/write/execute bits are set.
    pub fn grants_group_or_other(&self) -> bool {
        self.mode & GROUP_OTHER_MASK != 0
    }
}

mod sealed {
    use std::path::Path;

    pub trait Sealed {}
    impl Sealed for Path {}
}

/// Extension trait for [`Path`] with the raw directory operations used by
/// [`OsFileSystem`](super::OsFileSystem).
///
/// ```rust,no_run
/// # use xdg_basedir::fs::*;
/// # use std::path::Path;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let path = Path::new("/tmp/some-private-dir");
/// path.mkdir(PRIVATE_DIR_MODE, MkdirOptions::WithParents)?;
/// assert!(!path.entry_metadata()?.grants_group_or_other());
/// path.rmdir()?;
/// # Ok(())
/// # }
/// ```
pub trait PathExt: sealed::Sealed {
    /// Create directory at given [`Path`] with permission bits `mode`.
    ///
    /// `mode` is applied at creation time, so the process umask may still clear bits. On
    /// non-unix targets `mode` is ignored.
    ///
    /// # Returns
    /// [`Ok(())`](Ok) if created successfully, otherwise error, as reported by
    /// [`DirBuilder::create`].
    ///
    /// Note that this function will return `Ok(())`, if [`DirBuilder::create`] returns `Err` with
    /// kind [`ErrorKind::AlreadyExists`](io::ErrorKind::AlreadyExists).
    fn mkdir(&self, mode: u32, opts: MkdirOptions) -> io::Result<()>;

    /// Wrapper around [`std::fs::remove_dir`].
    fn rmdir(&self) -> io::Result<()>;

    /// `lstat` the entry: symlinks are reported as themselves, not as their targets.
    fn entry_metadata(&self) -> io::Result<EntryMetadata>;
}

impl PathExt for Path {
    fn mkdir(&self, mode: u32, opts: MkdirOptions) -> io::Result<()> {
        let mut builder = DirBuilder::new();
        builder.recursive(matches!(opts, MkdirOptions::WithParents));
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(mode);
        }
        #[cfg(not(unix))]
        let _ = mode;
        let result = builder.create(self);
        match result {
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            _ => result,
        }
    }

    fn rmdir(&self) -> io::Result<()> {
        remove_dir(self)
    }

    #[cfg(unix)]
    fn entry_metadata(&self) -> io::Result<EntryMetadata> {
        use std::os::unix::fs::MetadataExt;
        let metadata = symlink_metadata(self)?;
        Ok(EntryMetadata {
            is_dir: metadata.is_dir(),
            uid: metadata.uid(),
            mode: metadata.mode() & 0o7777,
        })
    }

    // No owners or mode bits to report; pretend the entry is private to us.
    #[cfg(not(unix))]
    fn entry_metadata(&self) -> io::Result<EntryMetadata> {
        let metadata = symlink_metadata(self)?;
        Ok(EntryMetadata {
            is_dir: metadata.is_dir(),
            uid: 0,
            mode: super::PRIVATE_DIR_MODE,
        })
    }
}
