use std::{
    fmt,
    path::{Path, PathBuf},
};

use tracing::debug;

use super::{BaseDirs, Error, Result};
use crate::fs::{EntryMetadata, FileSystem, MkdirOptions, PRIVATE_DIR_MODE};
use crate::os::env::Environment;

/// What [`BaseDirs::runtime_dir`] does when `$XDG_RUNTIME_DIR` is unset.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Strictness {
    /// Fail with [`Error::RuntimeDirUnavailable`].
    Strict,
    /// Provision a private directory at the runtime fallback prefix followed by `$USER`.
    Fallback,
}

/// Why an existing fallback entry cannot be used as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unfit {
    NotADirectory,
    ForeignOwner { uid: u32 },
    GroupOrOtherAccess { mode: u32 },
}

impl Unfit {
    // Owner is only checked for directories, and mode only for our own directories.
    fn check(metadata: &EntryMetadata, fs: &impl FileSystem) -> Option<Self> {
        if !metadata.is_dir {
            Some(Self::NotADirectory)
        } else if metadata.uid != fs.current_uid() {
            Some(Self::ForeignOwner { uid: metadata.uid })
        } else if metadata.grants_group_or_other() {
            Some(Self::GroupOrOtherAccess {
                mode: metadata.mode,
            })
        } else {
            None
        }
    }
}

impl fmt::Display for Unfit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotADirectory => f.write_str("not a directory"),
            Self::ForeignOwner { uid } => write!(f, "owned by uid {uid}"),
            Self::GroupOrOtherAccess { mode } => write!(f, "mode {mode:#o} is too open"),
        }
    }
}

impl<E: Environment, F: FileSystem> BaseDirs<E, F> {
    /// Get proper path for `$XDG_RUNTIME_DIR`.
    ///
    /// When it is unset or empty, [`Strictness::Strict`] fails, while [`Strictness::Fallback`]
    /// makes sure that [`runtime_fallback_prefix`](Self::runtime_fallback_prefix) followed by
    /// `$USER` is a directory owned by the current user with mode `0o700`:
    ///
    /// 1. if it is not a directory yet, it is created (with parents) with mode `0o700`;
    /// 2. if it is not a directory, is owned by someone else or grants any group/other
    ///    permission, it is removed (non-recursively) and created again.
    ///
    /// The sequence is not atomic: another process running it against the same path at the
    /// same time can interleave with it. Nothing is rolled back on failure, e.g. if removal
    /// succeeds but creation fails, the directory is left absent.
    ///
    /// # Errors
    /// - [`Error::RuntimeDirUnavailable`] if unset and `strictness` is [`Strictness::Strict`].
    /// - [`Error::Io`] if stat, creation or removal of the fallback fails. A non-empty directory
    ///   or a non-directory entry at the fallback path ends up here, since removal is
    ///   non-recursive.
    pub fn runtime_dir(&self, strictness: Strictness) -> Result<PathBuf> {
        if let Some(dir) = self.var("XDG_RUNTIME_DIR") {
            return Ok(dir.into());
        }
        if strictness == Strictness::Strict {
            return Err(Error::RuntimeDirUnavailable);
        }

        let mut fallback = self.runtime_fallback_prefix.clone();
        if let Some(user) = self.env.var_os("USER") {
            fallback.push(user);
        }
        let fallback = PathBuf::from(fallback);
        self.provision_private_dir(&fallback)?;
        Ok(fallback)
    }

    fn provision_private_dir(&self, dir: &Path) -> Result<()> {
        if !self.fs.is_dir(dir) {
            debug!(path = %dir.display(), "creating runtime fallback directory");
            self.fs.mkdir(dir, PRIVATE_DIR_MODE, MkdirOptions::WithParents)?;
        }

        let metadata = self.fs.stat(dir)?;
        if let Some(reason) = Unfit::check(&metadata, &self.fs) {
            debug!(path = %dir.display(), %reason, "recreating runtime fallback directory");
            self.fs.rmdir(dir)?;
            self.fs.mkdir(dir, PRIVATE_DIR_MODE, MkdirOptions::WithParents)?;
        }
        Ok(())
    }
}
