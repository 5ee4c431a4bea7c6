//! XDG Base Directory Specification support.
//!
//! [`BaseDirs`] resolves the per-user config, data, cache, state and runtime directories from
//! the environment, with the standard fallbacks, and looks files up along the search paths.
//!
//! ```rust,no_run
//! # use xdg_basedir::xdg::{BaseDirs, Strictness};
//! # fn main() -> Result<(), xdg_basedir::xdg::Error> {
//! let dirs = BaseDirs::new();
//!
//! let config_home = dirs.config_home()?;
//! if let Some(path) = dirs.find_config_file("app/app.toml")? {
//!     println!("using {}", path.display());
//! }
//! let runtime = dirs.runtime_dir(Strictness::Fallback)?;
//! # Ok(())
//! # }
//! ```
//!
//! Nothing is cached, each call reads the environment again.

use std::{
    ffi::{OsStr, OsString},
    io,
    path::{Component, Path, PathBuf},
};

use thiserror::Error;

use crate::fs::{FileSystem, OsFileSystem};
use crate::os::env::{Environment, SystemEnv, non_empty};

mod runtime;
#[cfg(test)]
mod testing;

pub use crate::fs::PRIVATE_DIR_MODE;
pub use runtime::Strictness;

/// Used when `$XDG_CONFIG_DIRS` is unset or empty.
pub const DEFAULT_CONFIG_DIRS: &[&str] = &["/etc/xdg"];

/// Used when `$XDG_DATA_DIRS` is unset or empty, in this order.
pub const DEFAULT_DATA_DIRS: &[&str] = &["/usr/local/share", "/usr/share"];

/// `$USER` is appended to it to form the runtime fallback directory.
pub const RUNTIME_DIR_FALLBACK_PREFIX: &str = "/tmp/xdg-runtime-dir-fallback-";

/// Errors encountered when resolving base directories.
#[derive(Debug, Error)]
pub enum Error {
    /// `$XDG_RUNTIME_DIR` is unset and [`Strictness::Strict`] was requested.
    #[error("environmental variable `$XDG_RUNTIME_DIR` is not set")]
    RuntimeDirUnavailable,

    /// A default below `$HOME` was needed, but `$HOME` is unset or empty.
    #[error("environmental variable `$HOME` is not set")]
    HomeUnavailable,

    /// Underlying filesystem operation failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Resolver for the XDG base directories.
///
/// Every environment lookup goes through `E` and every filesystem access through `F`, see
/// [`BaseDirs::with`].
#[derive(Debug, Clone)]
pub struct BaseDirs<E = SystemEnv, F = OsFileSystem> {
    env: E,
    fs: F,
    runtime_fallback_prefix: OsString,
}

impl BaseDirs {
    /// Create [`BaseDirs`] reading the process environment and the real filesystem.
    pub fn new() -> Self {
        Self::with(SystemEnv, OsFileSystem)
    }
}

impl Default for BaseDirs {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Environment, F: FileSystem> BaseDirs<E, F> {
    /// Create [`BaseDirs`] on top of the given collaborators.
    pub fn with(env: E, fs: F) -> Self {
        Self {
            env,
            fs,
            runtime_fallback_prefix: RUNTIME_DIR_FALLBACK_PREFIX.into(),
        }
    }

    /// Replace [`RUNTIME_DIR_FALLBACK_PREFIX`].
    pub fn with_runtime_fallback_prefix(mut self, prefix: impl Into<OsString>) -> Self {
        self.runtime_fallback_prefix = prefix.into();
        self
    }

    /// Prefix to which `$USER` is appended for the runtime fallback directory.
    pub fn runtime_fallback_prefix(&self) -> &OsStr {
        &self.runtime_fallback_prefix
    }

    fn var(&self, key: &str) -> Option<OsString> {
        non_empty(self.env.var_os(key))
    }

    /// Get `$HOME`.
    ///
    /// # Errors
    /// [`Error::HomeUnavailable`] if `$HOME` is unset or empty.
    pub fn home_dir(&self) -> Result<PathBuf> {
        self.var("HOME")
            .map(PathBuf::from)
            .ok_or(Error::HomeUnavailable)
    }

    /// `$key` if set, otherwise `$HOME` followed by `fallback`.
    fn home_or(&self, key: &str, fallback: &[&str]) -> Result<PathBuf> {
        match self.var(key) {
            Some(dir) => Ok(dir.into()),
            None => {
                let mut home = self.home_dir()?;
                home.extend(fallback);
                Ok(home)
            }
        }
    }

    /// Get proper path for `$XDG_CONFIG_HOME`, defaulting to `$HOME/.config`.
    ///
    /// `$HOME` is read only when `$XDG_CONFIG_HOME` is unset or empty, so
    /// [`Error::HomeUnavailable`] can only happen then.
    pub fn config_home(&self) -> Result<PathBuf> {
        self.home_or("XDG_CONFIG_HOME", &[".config"])
    }

    /// Get proper path for `$XDG_DATA_HOME`, defaulting to `$HOME/.local/share`.
    pub fn data_home(&self) -> Result<PathBuf> {
        self.home_or("XDG_DATA_HOME", &[".local", "share"])
    }

    /// Get proper path for `$XDG_CACHE_HOME`, defaulting to `$HOME/.cache`.
    pub fn cache_home(&self) -> Result<PathBuf> {
        self.home_or("XDG_CACHE_HOME", &[".cache"])
    }

    /// Get proper path for `$XDG_STATE_HOME`, defaulting to `$HOME/.local/state`.
    pub fn state_home(&self) -> Result<PathBuf> {
        self.home_or("XDG_STATE_HOME", &[".local", "state"])
    }

    fn search_path(
        &self,
        dirs_key: &str,
        defaults: &[&str],
        home: fn(&Self) -> Result<PathBuf>,
    ) -> Result<Vec<PathBuf>> {
        // The list variable is read before the home one.
        let dirs: Vec<PathBuf> = match self.var(dirs_key) {
            Some(dirs) => split_dirs(&dirs),
            None => defaults.iter().map(PathBuf::from).collect(),
        };
        let mut paths = Vec::with_capacity(dirs.len() + 1);
        paths.push(home(self)?);
        paths.extend(dirs);
        Ok(paths)
    }

    /// Config search path: [`config_home`](Self::config_home) followed by `$XDG_CONFIG_DIRS`
    /// split on `:` (or [`DEFAULT_CONFIG_DIRS`]).
    pub fn config_dirs(&self) -> Result<Vec<PathBuf>> {
        self.search_path("XDG_CONFIG_DIRS", DEFAULT_CONFIG_DIRS, Self::config_home)
    }

    /// Data search path: [`data_home`](Self::data_home) followed by `$XDG_DATA_DIRS`
    /// split on `:` (or [`DEFAULT_DATA_DIRS`]).
    pub fn data_dirs(&self) -> Result<Vec<PathBuf>> {
        self.search_path("XDG_DATA_DIRS", DEFAULT_DATA_DIRS, Self::data_home)
    }

    fn find_in(
        &self,
        dirs: impl IntoIterator<Item = PathBuf>,
        relative: &Path,
    ) -> Option<PathBuf> {
        dirs.into_iter()
            .map(|dir| under(&dir, relative))
            .find(|path| self.fs.exists(path))
    }

    /// First existing `relative` along [`config_dirs`](Self::config_dirs).
    ///
    /// # Returns
    /// `Ok(None)` if no candidate exists.
    pub fn find_config_file(&self, relative: impl AsRef<Path>) -> Result<Option<PathBuf>> {
        Ok(self.find_in(self.config_dirs()?, relative.as_ref()))
    }

    /// First existing `relative` along [`data_dirs`](Self::data_dirs).
    pub fn find_data_file(&self, relative: impl AsRef<Path>) -> Result<Option<PathBuf>> {
        Ok(self.find_in(self.data_dirs()?, relative.as_ref()))
    }

    /// `relative` below [`cache_home`](Self::cache_home), if it exists.
    pub fn find_cache_file(&self, relative: impl AsRef<Path>) -> Result<Option<PathBuf>> {
        Ok(self.find_in([self.cache_home()?], relative.as_ref()))
    }

    /// `relative` below [`state_home`](Self::state_home), if it exists.
    pub fn find_state_file(&self, relative: impl AsRef<Path>) -> Result<Option<PathBuf>> {
        Ok(self.find_in([self.state_home()?], relative.as_ref()))
    }

    /// `relative` below the strict [`runtime_dir`](Self::runtime_dir), if it exists.
    ///
    /// # Errors
    /// [`Error::RuntimeDirUnavailable`] if `$XDG_RUNTIME_DIR` is unset; this never provisions
    /// the fallback directory.
    pub fn find_runtime_file(&self, relative: impl AsRef<Path>) -> Result<Option<PathBuf>> {
        Ok(self.find_in([self.runtime_dir(Strictness::Strict)?], relative.as_ref()))
    }
}

/// Split a list variable on `:` on every platform; empty segments are kept.
fn split_dirs(dirs: &OsStr) -> Vec<PathBuf> {
    dirs.as_encoded_bytes()
        .split(|byte| *byte == b':')
        // SAFETY: every segment is either empty or was produced by splitting valid
        // `OsStr` bytes on an ASCII character, which is a valid boundary.
        .map(|segment| PathBuf::from(unsafe { OsStr::from_encoded_bytes_unchecked(segment) }))
        .collect()
}

/// Join `relative` onto `dir`, keeping an absolute `relative` below `dir` instead of replacing it.
fn under(dir: &Path, relative: &Path) -> PathBuf {
    let mut path = dir.to_path_buf();
    path.extend(
        relative
            .components()
            .filter(|component| !matches!(component, Component::RootDir | Component::Prefix(_))),
    );
    path
}
