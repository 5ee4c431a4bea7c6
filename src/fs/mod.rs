//! Filesystem collaborator.
//!
//! Provides the [`FileSystem`] trait with its OS-backed [`OsFileSystem`], built on the
//! [`PathExt`](path_ext::PathExt) extension trait for [`Path`](std::path::Path).

pub mod path_ext;
mod provider;

pub use path_ext::{EntryMetadata, MkdirOptions, PathExt};
pub use provider::{FileSystem, OsFileSystem};

/// Owner read/write/execute only, `0o700`.
pub const PRIVATE_DIR_MODE: u32 = 0o700;

/// Every group and other permission bit, `0o077`.
pub const GROUP_OTHER_MASK: u32 = 0o077;

#[cfg(unix)]
#[allow(clippy::unnecessary_cast)] // On macOS those are u16, on Linux they are u32.
const _: () = {
    assert!(PRIVATE_DIR_MODE == libc::S_IRWXU as u32, "bits mismatch");
    assert!(
        GROUP_OTHER_MASK == (libc::S_IRWXG | libc::S_IRWXO) as u32,
        "bits mismatch"
    );
};
