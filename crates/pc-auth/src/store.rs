//! Client-side session storage.
//!
//! The web client kept `access_token`, `refresh_token`, `user` and
//! `loginPending` in browser session storage. Here the same record lives
//! behind [`SessionStore`]: a JSON file for the CLI, memory for embedding and
//! tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use pc_core::StoredSession;

use crate::error::AuthError;

/// Storage backend for the session record.
pub trait SessionStore: Send + Sync {
    /// Load the stored record. A missing record is an empty [`StoredSession`].
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the record exists but cannot be read.
    fn load(&self) -> Result<StoredSession, AuthError>;

    /// Replace the stored record.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the record cannot be written.
    fn save(&self, session: &StoredSession) -> Result<(), AuthError>;

    /// Remove every stored key.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the record cannot be removed.
    fn clear(&self) -> Result<(), AuthError>;

    /// Load, apply `f`, and save.
    ///
    /// # Errors
    ///
    /// Propagates load and save failures.
    fn update(&self, f: &mut dyn FnMut(&mut StoredSession)) -> Result<(), AuthError> {
        let mut session = self.load()?;
        f(&mut session);
        self.save(&session)
    }
}

/// Session record persisted as JSON, readable only by the owner on Unix.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.promptcrafter/session.json`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if no home directory is available.
    pub fn default_location() -> Result<Self, AuthError> {
        dirs::home_dir()
            .map(|h| Self::new(h.join(".promptcrafter").join("session.json")))
            .ok_or_else(|| {
                AuthError::TokenStoreError("home directory not found; cannot store session".into())
            })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<StoredSession, AuthError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StoredSession::default());
            }
            Err(e) => {
                return Err(AuthError::TokenStoreError(format!(
                    "read {}: {e}",
                    self.path.display()
                )));
            }
        };
        if content.trim().is_empty() {
            return Ok(StoredSession::default());
        }
        serde_json::from_str(&content).map_err(|e| {
            AuthError::TokenStoreError(format!("parse {}: {e}", self.path.display()))
        })
    }

    fn save(&self, session: &StoredSession) -> Result<(), AuthError> {
        if session.is_empty() {
            return self.clear();
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }

        let json = serde_json::to_string_pretty(session)
            .map_err(|e| AuthError::TokenStoreError(format!("serialize session: {e}")))?;
        fs::write(&self.path, json).map_err(|e| {
            AuthError::TokenStoreError(format!("write {}: {e}", self.path.display()))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::TokenStoreError(format!("chmod {}: {e}", self.path.display()))
            })?;
        }

        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::TokenStoreError(format!(
                "failed to delete {}: {e}",
                self.path.display()
            ))),
        }
    }
}

/// In-process session record; lost when the process exits.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<StoredSession>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new(initial: StoredSession) -> Self {
        Self {
            inner: Mutex::new(initial),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> StoredSession {
        self.inner
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<StoredSession, AuthError> {
        self.inner
            .lock()
            .map(|guard| guard.clone())
            .map_err(|e| AuthError::TokenStoreError(format!("lock poisoned: {e}")))
    }

    fn save(&self, session: &StoredSession) -> Result<(), AuthError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| AuthError::TokenStoreError(format!("lock poisoned: {e}")))?;
        *guard = session.clone();
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        self.save(&StoredSession::default())
    }
}
