//! In-memory collaborators recording every call, for asserting lookup order.

use std::{
    cell::RefCell,
    collections::HashMap,
    ffi::OsString,
    io,
    path::{Path, PathBuf},
};

use crate::fs::{EntryMetadata, FileSystem, MkdirOptions};
use crate::os::env::{Env, Environment};

/// [`Env`] that remembers which keys were read, in order.
pub struct RecordingEnv {
    env: Env,
    reads: RefCell<Vec<String>>,
}

impl RecordingEnv {
    pub fn new<K: Into<OsString>, V: Into<OsString>>(
        vars: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        Self {
            env: vars.into_iter().collect(),
            reads: RefCell::default(),
        }
    }

    pub fn empty() -> Self {
        Self::new::<&str, &str>([])
    }

    pub fn reads(&self) -> Vec<String> {
        self.reads.borrow().clone()
    }
}

impl Environment for RecordingEnv {
    fn var_os(&self, key: &str) -> Option<OsString> {
        self.reads.borrow_mut().push(key.to_owned());
        self.env.var_os(key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsCall {
    Exists(PathBuf),
    IsDir(PathBuf),
    Stat(PathBuf),
    Mkdir(PathBuf, u32, MkdirOptions),
    Rmdir(PathBuf),
    CurrentUid,
}

/// Flat map of entries; parents are not modelled.
#[derive(Default)]
pub struct FakeFs {
    entries: RefCell<HashMap<PathBuf, EntryMetadata>>,
    calls: RefCell<Vec<FsCall>>,
    uid: u32,
    mkdir_error: Option<io::ErrorKind>,
}

impl FakeFs {
    pub fn with_uid(uid: u32) -> Self {
        Self {
            uid,
            ..Self::default()
        }
    }

    pub fn failing_mkdir(mut self, kind: io::ErrorKind) -> Self {
        self.mkdir_error = Some(kind);
        self
    }

    pub fn add_file(&self, path: impl Into<PathBuf>) {
        self.entries.borrow_mut().insert(
            path.into(),
            EntryMetadata {
                is_dir: false,
                uid: self.uid,
                mode: 0o644,
            },
        );
    }

    pub fn add_dir(&self, path: impl Into<PathBuf>, uid: u32, mode: u32) {
        self.entries.borrow_mut().insert(
            path.into(),
            EntryMetadata {
                is_dir: true,
                uid,
                mode,
            },
        );
    }

    pub fn entry(&self, path: &Path) -> Option<EntryMetadata> {
        self.entries.borrow().get(path).copied()
    }

    pub fn calls(&self) -> Vec<FsCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: FsCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl FileSystem for FakeFs {
    fn exists(&self, path: &Path) -> bool {
        self.record(FsCall::Exists(path.to_path_buf()));
        self.entries.borrow().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.record(FsCall::IsDir(path.to_path_buf()));
        self.entry(path).is_some_and(|entry| entry.is_dir)
    }

    fn stat(&self, path: &Path) -> io::Result<EntryMetadata> {
        self.record(FsCall::Stat(path.to_path_buf()));
        self.entry(path)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn mkdir(&self, path: &Path, mode: u32, opts: MkdirOptions) -> io::Result<()> {
        self.record(FsCall::Mkdir(path.to_path_buf(), mode, opts));
        if let Some(kind) = self.mkdir_error {
            return Err(io::Error::from(kind));
        }
        // Same as `PathExt::mkdir`: an existing entry is left alone.
        if self.entry(path).is_none() {
            self.add_dir(path, self.uid, mode);
        }
        Ok(())
    }

    fn rmdir(&self, path: &Path) -> io::Result<()> {
        self.record(FsCall::Rmdir(path.to_path_buf()));
        match self.entry(path) {
            None => Err(io::Error::from(io::ErrorKind::NotFound)),
            Some(entry) if !entry.is_dir => Err(io::Error::from(io::ErrorKind::NotADirectory)),
            Some(_) => {
                self.entries.borrow_mut().remove(path);
                Ok(())
            }
        }
    }

    fn current_uid(&self) -> u32 {
        self.record(FsCall::CurrentUid);
        self.uid
    }
}
