use std::sync::Arc;

use reqwest::header::USER_AGENT;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ApiConfig;
use crate::credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
use crate::error::Error;
use crate::models::NewUser;
use crate::token;
use crate::types::{Email, Identity};

/// One backend call: verb, server-relative path, optional JSON body, and
/// whether a credential must be present before any I/O happens.
///
/// ```rust,ignore
/// let req = ApiRequest::put("/api/cars/42").json(&car)?.authenticated();
/// client.execute(req).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    body: Option<Value>,
    requires_auth: bool,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            requires_auth: false,
        }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the value cannot be represented as
    /// JSON.
    pub fn json(mut self, body: &impl Serialize) -> Result<Self, Error> {
        self.body = Some(
            serde_json::to_value(body)
                .map_err(|e| Error::Decode(format!("request body: {e}")))?,
        );
        Ok(self)
    }

    /// Require a credential: the call fails with
    /// [`Error::Unauthenticated`] before any network I/O when none is
    /// present.
    #[must_use]
    pub fn authenticated(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn requires_auth(&self) -> bool {
        self.requires_auth
    }
}

/// Outcome of a successful login or registration.
///
/// The caller decides what to do with it — typically
/// [`SessionStore::set_user`](crate::session::SessionStore::set_user) with
/// the identity. The credential is already persisted by the client.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct AuthSuccess {
    pub identity: Identity,
    pub token: String,
}

#[derive(Serialize)]
struct AuthenticationRequest<'a> {
    email: &'a Email,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

/// The single chokepoint for talking to the DriveEasy backend.
///
/// Attaches the bearer credential, encodes bodies, normalizes every
/// outcome into one [`Error`] taxonomy. It never mutates the session
/// store: after a login the caller applies the returned identity itself,
/// which keeps UI state changes under UI control.
///
/// Calls are independent — no shared per-request state, no automatic
/// retries, no client-side timeout, no cancellation. A caller that has
/// moved on simply discards the result (see
/// [`RequestSeq`](crate::liveness::RequestSeq) for guarding against stale
/// ones).
pub struct ApiClient {
    config: ApiConfig,
    http: reqwest::Client,
    credentials: Arc<dyn CredentialStore>,
}

impl ApiClient {
    /// Create a client for the configured backend.
    ///
    /// Credentials persist to the configured token file, or stay
    /// in-memory when no file is configured.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        let credentials: Arc<dyn CredentialStore> = match config.token_file() {
            Some(path) => Arc::new(FileCredentialStore::new(path)),
            None => Arc::new(MemoryCredentialStore::new()),
        };
        Self {
            config,
            http: reqwest::Client::new(),
            credentials,
        }
    }

    /// Use a custom HTTP client (for connection pool reuse or testing).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    /// Use a custom credential store (keychain integration, shared store).
    #[must_use]
    pub fn with_credential_store(mut self, credentials: Arc<dyn CredentialStore>) -> Self {
        self.credentials = credentials;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Handle to the credential store, for sharing with
    /// [`SessionStore::restore`](crate::session::SessionStore::restore).
    #[must_use]
    pub fn credentials(&self) -> Arc<dyn CredentialStore> {
        Arc::clone(&self.credentials)
    }

    /// True iff a credential is currently stored.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.credentials.load().is_some()
    }

    /// Remove the stored credential. Call on logout, alongside
    /// [`SessionStore::logout`](crate::session::SessionStore::logout).
    pub fn evict_credentials(&self) {
        self.credentials.clear();
    }

    // ── Request core ───────────────────────────────────────────────────

    /// Builds the outgoing request: credential check, URL resolution,
    /// bearer header, body. No I/O happens here.
    fn prepare(&self, req: &ApiRequest) -> Result<reqwest::RequestBuilder, Error> {
        let token = self.credentials.load();
        if req.requires_auth && token.is_none() {
            return Err(Error::Unauthenticated);
        }

        let url = self.config.endpoint(&req.path)?;
        let mut builder = self
            .http
            .request(req.method.clone(), url)
            .header(USER_AGENT, self.config.user_agent());

        // Attached even when not required, so the server can personalize
        // public responses.
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &req.body {
            builder = builder.json(body);
        }
        Ok(builder)
    }

    /// Issue the call and return the raw 2xx response.
    ///
    /// # Errors
    ///
    /// [`Error::Unauthenticated`] before any I/O when a required
    /// credential is missing, [`Error::Network`] on transport failure, or
    /// [`Error::Http`] with the server's status and error text on a
    /// non-2xx response.
    pub async fn send(&self, req: ApiRequest) -> Result<reqwest::Response, Error> {
        let builder = self.prepare(&req)?;
        tracing::debug!(method = %req.method, path = %req.path, "sending API request");
        let response = builder.send().await.map_err(Error::Network)?;
        Self::ensure_success(response).await
    }

    /// Issue the call and decode the 2xx response body as JSON.
    ///
    /// # Errors
    ///
    /// As [`send`](Self::send), plus [`Error::Decode`] when the body does
    /// not match `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, req: ApiRequest) -> Result<T, Error> {
        let response = self.send(req).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| Error::Decode(e.to_string()))
    }

    /// Issue the call and return the 2xx response body as text.
    pub async fn fetch_text(&self, req: ApiRequest) -> Result<String, Error> {
        let response = self.send(req).await?;
        response.text().await.map_err(Error::Network)
    }

    /// Issue the call and discard the response body.
    pub async fn execute(&self, req: ApiRequest) -> Result<(), Error> {
        self.send(req).await.map(drop)
    }

    /// Checks HTTP response status; returns the response on success or an
    /// error carrying the server's error text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, Error> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        Err(Error::Http { status, message })
    }

    // ── Authentication ─────────────────────────────────────────────────

    /// Exchange email + password for an identity and bearer credential.
    ///
    /// On success the credential is persisted for later requests (and for
    /// [`SessionStore::restore`](crate::session::SessionStore::restore)
    /// at next startup). The session store is *not* touched — the caller
    /// applies `identity` when it is ready to.
    ///
    /// # Errors
    ///
    /// [`Error::Http`] when the server rejects the credentials,
    /// [`Error::Network`] on transport failure, or [`Error::Decode`] when
    /// the response or the issued token is malformed.
    pub async fn authenticate(&self, email: &Email, password: &str) -> Result<AuthSuccess, Error> {
        let body = AuthenticationRequest { email, password };
        let req = ApiRequest::post("/api/authenticate").json(&body)?;
        let TokenResponse { token } = self.fetch(req).await?;
        self.finish_login(token)
    }

    /// Create an account and log it in.
    ///
    /// The backend issues a credential on registration, so a successful
    /// signup behaves exactly like a successful login.
    ///
    /// # Errors
    ///
    /// As [`authenticate`](Self::authenticate).
    pub async fn register(&self, new_user: &NewUser) -> Result<AuthSuccess, Error> {
        let req = ApiRequest::post("/api/register").json(new_user)?;
        let TokenResponse { token } = self.fetch(req).await?;
        self.finish_login(token)
    }

    /// Continuation form of [`authenticate`](Self::authenticate): invokes
    /// exactly one of the two callbacks, so UI code controls when session
    /// state changes (close a modal only after the store is updated).
    pub async fn send_authentication_request<S, F>(
        &self,
        email: &Email,
        password: &str,
        on_success: S,
        on_failure: F,
    ) where
        S: FnOnce(AuthSuccess),
        F: FnOnce(Error),
    {
        match self.authenticate(email, password).await {
            Ok(auth) => on_success(auth),
            Err(e) => on_failure(e),
        }
    }

    /// Decode the issued token and persist it. The token must be usable
    /// for session restore, so an undecodable one is rejected rather than
    /// stored.
    fn finish_login(&self, token: String) -> Result<AuthSuccess, Error> {
        let identity = token::decode(&token)?.identity()?;
        self.credentials.save(&token);
        tracing::debug!(user = %identity.email, "credential stored after authentication");
        Ok(AuthSuccess { identity, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    fn test_client() -> ApiClient {
        // Port 9 (discard) — nothing listens there, so any test that
        // reached the network would fail loudly with Error::Network.
        ApiClient::new(ApiConfig::new("http://127.0.0.1:9".parse().unwrap()))
    }

    fn token_for(claims: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
        format!("{header}.{payload}.sig")
    }

    #[test]
    fn request_builder_defaults() {
        let req = ApiRequest::get("/api/cars");
        assert_eq!(req.method(), &Method::GET);
        assert_eq!(req.path(), "/api/cars");
        assert!(!req.requires_auth());

        let req = ApiRequest::delete("/api/cars/1").authenticated();
        assert_eq!(req.method(), &Method::DELETE);
        assert!(req.requires_auth());
    }

    #[tokio::test]
    async fn authenticated_request_without_credential_fails_before_io() {
        let client = test_client();
        let err = client
            .send(ApiRequest::get("/api/users").authenticated())
            .await
            .unwrap_err();
        // Unauthenticated, not Network: the call never reached the socket.
        assert!(matches!(err, Error::Unauthenticated));
    }

    #[tokio::test]
    async fn unauthenticated_request_does_reach_the_transport() {
        let client = test_client();
        let err = client.send(ApiRequest::get("/api/cars")).await.unwrap_err();
        assert!(matches!(err, Error::Network(_)));
    }

    #[test]
    fn bearer_header_attached_opportunistically() {
        let client = test_client();
        client.credentials().save("opaque-token");

        // Not marked authenticated — the credential is attached anyway.
        let request = client
            .prepare(&ApiRequest::get("/api/cars"))
            .unwrap()
            .build()
            .unwrap();
        let auth = request.headers().get("authorization").unwrap();
        assert_eq!(auth.to_str().unwrap(), "Bearer opaque-token");
    }

    #[test]
    fn no_bearer_header_without_credential() {
        let client = test_client();
        let request = client
            .prepare(&ApiRequest::get("/api/cars"))
            .unwrap()
            .build()
            .unwrap();
        assert!(request.headers().get("authorization").is_none());
    }

    #[test]
    fn json_body_sets_content_type() {
        let client = test_client();
        let req = ApiRequest::post("/api/cars")
            .json(&serde_json::json!({"make": "Tesla"}))
            .unwrap();
        let request = client.prepare(&req).unwrap().build().unwrap();
        assert_eq!(
            request.headers().get("content-type").unwrap().to_str().unwrap(),
            "application/json"
        );
    }

    #[test]
    fn user_agent_header_from_config() {
        let client = ApiClient::new(
            ApiConfig::new("http://127.0.0.1:9".parse().unwrap()).with_user_agent("kiosk/1.0"),
        );
        let request = client
            .prepare(&ApiRequest::get("/api/cars"))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get("user-agent").unwrap().to_str().unwrap(),
            "kiosk/1.0"
        );
    }

    #[tokio::test]
    async fn non_2xx_maps_to_http_error_with_body_text() {
        let response = reqwest::Response::from(
            http::Response::builder()
                .status(404)
                .body("not found")
                .unwrap(),
        );
        let err = ApiClient::ensure_success(response).await.unwrap_err();
        match err {
            Error::Http { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "not found");
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn success_status_passes_through() {
        let response = reqwest::Response::from(
            http::Response::builder().status(200).body("[]").unwrap(),
        );
        assert!(ApiClient::ensure_success(response).await.is_ok());
    }

    #[test]
    fn finish_login_persists_decodable_token() {
        let client = test_client();
        let token = token_for(serde_json::json!({
            "sub": "a@b.com",
            "roles": ["ROLE_USER"],
        }));

        let auth = client.finish_login(token.clone()).unwrap();
        assert_eq!(auth.identity.email.as_str(), "a@b.com");
        assert!(!auth.identity.is_admin());
        assert_eq!(auth.token, token);
        assert!(client.has_credentials());
    }

    #[test]
    fn finish_login_rejects_undecodable_token_without_persisting() {
        let client = test_client();
        assert!(client.finish_login("not-a-jwt".into()).is_err());
        assert!(!client.has_credentials());
    }

    #[test]
    fn evict_credentials_clears_store() {
        let client = test_client();
        client.credentials().save("tok");
        assert!(client.has_credentials());
        client.evict_credentials();
        assert!(!client.has_credentials());
    }
}
