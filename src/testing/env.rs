//! Scoped changes to the process environment.
//!
//! [`EnvScope`] takes a snapshot of the whole environment when it is created and puts that
//! exact snapshot back when it is dropped: variables added inside the scope are removed,
//! changed or removed ones get their old value back. This also happens while a panicking test
//! unwinds.
//!
//! The environment is process-global, so scopes hold a process-wide lock for their whole
//! lifetime. Scopes on one thread may nest; scopes on different threads run one after another.

use std::collections::HashMap;
use std::env;
use std::ffi::{OsStr, OsString};

use parking_lot::{const_reentrant_mutex, ReentrantMutex, ReentrantMutexGuard};
use tracing::debug;

use crate::client::error::{Error, Result};

static ENV_LOCK: ReentrantMutex<()> = const_reentrant_mutex(());

/// Restores the process environment on drop.
#[derive(Debug)]
pub struct EnvScope {
    saved: HashMap<OsString, OsString>,
    _guard: ReentrantMutexGuard<'static, ()>,
}

impl EnvScope {
    /// Snapshots the environment without changing it.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let guard = ENV_LOCK.lock();

        Self {
            saved: env::vars_os().collect(),
            _guard: guard,
        }
    }

    /// Snapshots the environment, then sets every pair in `vars`.
    ///
    /// If a pair is rejected, the variables set so far are rolled back before returning.
    pub fn set<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<OsStr>,
        V: AsRef<OsStr>,
    {
        let scope = Self::new();
        for (key, value) in vars {
            scope.set_var(key, value)?;
        }

        Ok(scope)
    }

    /// Sets a variable for the rest of the scope.
    pub fn set_var(&self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Result<()> {
        let key = key.as_ref();
        let value = value.as_ref();
        validate(key, value)?;

        debug!(key = ?key, "Overriding environment variable");
        env::set_var(key, value);

        Ok(())
    }

    /// Removes a variable for the rest of the scope.
    pub fn remove_var(&self, key: impl AsRef<OsStr>) -> Result<()> {
        let key = key.as_ref();
        validate(key, OsStr::new(""))?;

        debug!(key = ?key, "Removing environment variable");
        env::remove_var(key);

        Ok(())
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        let current = env::vars_os().collect::<HashMap<_, _>>();

        for key in current.keys() {
            if !self.saved.contains_key(key) {
                env::remove_var(key);
            }
        }

        for (key, value) in &self.saved {
            if current.get(key) != Some(value) {
                env::set_var(key, value);
            }
        }

        debug!(vars = self.saved.len(), "Restored environment");
    }
}

/// `set_var` and `remove_var` panic on these instead of returning an error.
fn validate(key: &OsStr, value: &OsStr) -> Result<()> {
    let key_bytes = key.as_encoded_bytes();
    if key_bytes.is_empty() || key_bytes.contains(&b'=') || key_bytes.contains(&0) {
        return Err(Error::InvalidEnvVar(key.to_string_lossy().into_owned()));
    }
    if value.as_encoded_bytes().contains(&0) {
        return Err(Error::InvalidEnvVar(key.to_string_lossy().into_owned()));
    }

    Ok(())
}
