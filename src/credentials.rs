use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

/// Durable storage for the bearer credential.
///
/// The host chooses the medium: a file next to the app's config, an OS
/// keychain wrapper, or plain memory for tests and ephemeral sessions.
/// Operations are infallible at this level — implementations degrade to
/// "absent" and log when the medium misbehaves, so a broken disk can never
/// take the session layer down.
///
/// Holding a credential here and having a user in the
/// [`SessionStore`](crate::session::SessionStore) go together: login saves
/// the token, logout clears it.
pub trait CredentialStore: Send + Sync {
    /// Persist the token, replacing any previous one.
    fn save(&self, token: &str);

    /// The persisted token, if any.
    fn load(&self) -> Option<String>;

    /// Remove the persisted token. A no-op when nothing is stored.
    fn clear(&self);
}

/// In-process credential store.
///
/// Nothing survives the process; suitable for tests and for hosts that
/// treat every launch as a fresh session.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: RwLock<Option<String>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn save(&self, token: &str) {
        *self
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
    }

    fn load(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn clear(&self) {
        *self
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Credential store backed by a single file.
///
/// The desktop analog of a browser's durable key/value storage: one token
/// under one well-known path, written on login and removed on logout.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Where the token is stored.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn save(&self, token: &str) {
        if let Err(e) = std::fs::write(&self.path, token) {
            tracing::warn!(error = %e, path = %self.path.display(), "failed to persist credential");
        }
    }

    fn load(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_owned())
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "failed to read credential");
                None
            }
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "failed to remove credential");
            }
        }
    }
}
