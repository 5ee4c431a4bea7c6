//! xdg-basedir - XDG Base Directory resolution.
//!
//! This crate resolves the per-user config, data, cache, state and runtime base directories,
//! looks files up along their search paths and provisions a private runtime directory when
//! `$XDG_RUNTIME_DIR` is missing. Environment and filesystem access go through the
//! [`Environment`](os::env::Environment) and [`FileSystem`](fs::FileSystem) traits.

pub mod fs;
pub mod os;
pub mod xdg;

pub use xdg::{BaseDirs, Error, Strictness};
