//! Persisted login session.
//!
//! The session is read once at startup, written at login and removed at
//! logout. The document is `{ "role": ..., "user": { ... } }`.

use crate::types::Session;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

/// Session persistence errors
#[derive(Error, Debug)]
pub enum SessionError {
    /// Reading, writing or deleting the document failed
    #[error("session storage I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The saved document is not a valid session
    #[error("saved session could not be read: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Storage for the signed-in session
pub trait SessionStore: Send + Sync {
    /// Saved session, or `None` when nobody is signed in
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Malformed`] for an unreadable document and
    /// [`SessionError::Io`] when storage cannot be read.
    fn load(&self) -> Result<Option<Session>, SessionError>;

    /// Persist `session`, replacing any previous one
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when the session cannot be written.
    fn save(&self, session: &Session) -> Result<(), SessionError>;

    /// Forget the saved session; clearing an empty store succeeds
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] when the session cannot be removed.
    fn clear(&self) -> Result<(), SessionError>;
}

/// Session stored as a JSON file
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store backed by the file at `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the session file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, SessionError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), "Saved session");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Session kept in memory (tests, demos)
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    session: Arc<Mutex<Option<Session>>>,
}

impl InMemorySessionStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store already holding `session`
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Arc::new(Mutex::new(Some(session))),
        }
    }

    /// Currently stored session
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self) -> Result<Option<Session>, SessionError> {
        Ok(self.current())
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Role, User};

    fn session() -> Session {
        Session {
            role: Role::User,
            user: User {
                name: "Askar".to_string(),
                email: "askar@example.com".to_string(),
                mobile: "9876543210".to_string(),
            },
        }
    }

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("turfbook-session-{}", uuid::Uuid::new_v4()))
            .join("session.json")
    }

    #[test]
    fn missing_file_means_no_session() {
        let store = FileSessionStore::new(temp_path());
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn save_load_clear() {
        let path = temp_path();
        let store = FileSessionStore::new(&path);

        store.save(&session()).unwrap();
        assert_eq!(store.load().unwrap(), Some(session()));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn malformed_document_is_reported() {
        let path = temp_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"role":"owner"}"#).unwrap();

        let result = FileSessionStore::new(&path).load();
        assert!(matches!(result, Err(SessionError::Malformed(_))));
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn in_memory_store() {
        let store = InMemorySessionStore::new();
        store.save(&session()).unwrap();
        assert_eq!(store.current(), Some(session()));
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
