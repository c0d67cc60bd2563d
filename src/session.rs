use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use time::OffsetDateTime;

use crate::credentials::CredentialStore;
use crate::token;
use crate::types::{Identity, Role};

/// Process-wide source of truth for "who is logged in".
///
/// UI layers read snapshots and never mutate the identity directly; the
/// only writers are [`set_user`](Self::set_user) (after a successful login
/// or signup) and [`logout`](Self::logout). Every operation is infallible —
/// a query on an empty session answers `false`/`None`, never an error.
///
/// The store is injected into whatever needs it rather than living in a
/// global; share it with `Arc` when components outlive a scope.
#[derive(Debug, Default)]
pub struct SessionStore {
    user: RwLock<Option<Identity>>,
    restored: AtomicBool,
}

impl SessionStore {
    /// Creates an empty, logged-out session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stored identity. Overwriting an existing identity is
    /// allowed (re-login).
    pub fn set_user(&self, identity: Identity) {
        tracing::debug!(user = %identity.email, "session identity set");
        *self
            .user
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(identity);
    }

    /// Clears the stored identity. Idempotent: logging out an empty
    /// session is a no-op.
    pub fn logout(&self) {
        *self
            .user
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Snapshot of the current identity, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<Identity> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// True iff an identity is stored.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// True iff the current identity holds the given role. `false` when
    /// logged out.
    #[must_use]
    pub fn has_role(&self, role: &Role) -> bool {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|u| u.has_role(role))
    }

    /// True iff the current identity holds `ROLE_ADMIN`. `false` when
    /// logged out.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(&Role::Admin)
    }

    /// Reconstructs the identity from a persisted credential, without any
    /// network I/O.
    ///
    /// Runs at most once per store; later calls are no-ops. An absent,
    /// expired, or undecodable credential leaves the session logged out
    /// and evicts the useless token from `credentials`. Never panics: a
    /// corrupt credential is treated the same as a missing one.
    pub fn restore(&self, credentials: &dyn CredentialStore) {
        if self.restored.swap(true, Ordering::SeqCst) {
            return;
        }

        let Some(stored) = credentials.load() else {
            return;
        };

        let claims = match token::decode(&stored) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::warn!(error = %e, "persisted credential is not decodable, discarding");
                credentials.clear();
                return;
            }
        };

        if claims.is_expired(OffsetDateTime::now_utc()) {
            tracing::debug!("persisted credential has expired, discarding");
            credentials.clear();
            return;
        }

        match claims.identity() {
            Ok(identity) => {
                tracing::debug!(user = %identity.email, "session restored from persisted credential");
                self.set_user(identity);
            }
            Err(e) => {
                tracing::warn!(error = %e, "persisted credential has unusable claims, discarding");
                credentials.clear();
            }
        }
    }
}
