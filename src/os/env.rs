use std::collections::HashMap;
use std::ffi::{OsStr, OsString};

/// Source of environmental variables.
///
/// Every lookup done by [`BaseDirs`](crate::xdg::BaseDirs) goes through this trait, in a fixed
/// order, so it can be swapped for an in-memory map.
pub trait Environment {
    /// Get raw value of the variable `key`, or `None` if it is not set.
    fn var_os(&self, key: &str) -> Option<OsString>;
}

impl<T: Environment + ?Sized> Environment for &T {
    fn var_os(&self, key: &str) -> Option<OsString> {
        (**self).var_os(key)
    }
}

/// Live view of the process environment, backed by [`std::env::var_os`].
///
/// Nothing is cached: each lookup sees the environment as it is at that moment.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq)]
pub struct SystemEnv;

impl Environment for SystemEnv {
    fn var_os(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}

/// Owned snapshot of environmental variables.
///
/// Useful for tests and for callers who want resolution against a frozen view.
#[derive(Debug, Clone)]
pub struct Env {
    keys: HashMap<OsString, OsString>,
}

impl Env {
    /// Create new [`Env`] from [`std::env::vars_os`].
    pub fn new() -> Self {
        Self::new_from(std::env::vars_os().collect())
    }

    /// Create new [`Env`] using `keys` as existing environmental variables.
    pub fn new_from(keys: HashMap<OsString, OsString>) -> Self {
        Self { keys }
    }

    /// Reload environmental variables from `keys`.
    pub fn reload_from(&mut self, keys: HashMap<OsString, OsString>) {
        self.keys = keys;
    }

    /// Reload environmental variables from [`std::env::vars_os`].
    pub fn reload(&mut self) {
        self.reload_from(std::env::vars_os().collect())
    }

    /// Get environmental variable pointed by `key`.
    ///
    /// # Examples
    /// ```rust
    /// use std::ffi::OsStr;
    /// use xdg_basedir::os::env::Env;
    ///
    /// let env: Env = [("FOO", "bar")].into_iter().collect();
    /// assert_eq!(env.get_os("FOO"), Some(OsStr::new("bar")));
    /// assert_eq!(env.get_os("BAZ"), None);
    /// ```
    pub fn get_os(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.keys.get(key.as_ref()).map(OsString::as_os_str)
    }
}

impl Environment for Env {
    fn var_os(&self, key: &str) -> Option<OsString> {
        self.get_os(key).map(OsStr::to_os_string)
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<OsString>, V: Into<OsString>> FromIterator<(K, V)> for Env {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new_from(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Treat an empty value the same as a missing one.
pub fn non_empty(value: Option<OsString>) -> Option<OsString> {
    value.filter(|value| !value.is_empty())
}
