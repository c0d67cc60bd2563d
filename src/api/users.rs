use super::encode_email;
use crate::client::{ApiClient, ApiRequest};
use crate::error::Error;
use crate::models::{PasswordChange, User, UserUpdate};
use crate::types::Email;

impl ApiClient {
    /// All user accounts. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthenticated`] without network I/O when no
    /// credential is stored, otherwise [`Error::Network`],
    /// [`Error::Http`], or [`Error::Decode`].
    pub async fn fetch_all_users(&self) -> Result<Vec<User>, Error> {
        self.fetch(ApiRequest::get("/api/users").authenticated())
            .await
    }

    /// One account by email. Accessible to the account owner and admins.
    ///
    /// # Errors
    ///
    /// As [`fetch_all_users`](Self::fetch_all_users).
    pub async fn fetch_user(&self, email: &Email) -> Result<User, Error> {
        self.fetch(
            ApiRequest::get(format!("/api/users/{}", encode_email(email))).authenticated(),
        )
        .await
    }

    /// Update profile fields. Returns the refreshed bearer token the
    /// server issues for the changed account — the caller decides whether
    /// to adopt it (and update the session) or drop it.
    ///
    /// # Errors
    ///
    /// As [`fetch_all_users`](Self::fetch_all_users).
    pub async fn update_user(&self, email: &Email, update: &UserUpdate) -> Result<String, Error> {
        self.fetch_text(
            ApiRequest::put(format!("/api/users/{}", encode_email(email)))
                .json(update)?
                .authenticated(),
        )
        .await
    }

    /// Change the account password.
    ///
    /// # Errors
    ///
    /// As [`fetch_all_users`](Self::fetch_all_users); a wrong old
    /// password surfaces as [`Error::Http`].
    pub async fn update_password(
        &self,
        email: &Email,
        change: &PasswordChange,
    ) -> Result<(), Error> {
        self.execute(
            ApiRequest::put(format!("/api/users/{}/password", encode_email(email)))
                .json(change)?
                .authenticated(),
        )
        .await
    }

    /// Delete an account.
    ///
    /// # Errors
    ///
    /// As [`fetch_all_users`](Self::fetch_all_users).
    pub async fn delete_user(&self, email: &Email) -> Result<(), Error> {
        self.execute(
            ApiRequest::delete(format!("/api/users/{}", encode_email(email))).authenticated(),
        )
        .await
    }
}
