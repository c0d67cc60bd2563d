use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::error::Error;
use crate::types::{Identity, Role};

/// Claims carried in a DriveEasy bearer token (JWT compact form).
///
/// The client only *decodes* claims — signature verification is the
/// server's job on every authenticated request. Local decoding exists so a
/// persisted credential can be turned back into an [`Identity`] at startup
/// without a network round trip.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    /// Subject: the account email.
    pub sub: String,
    /// Granted role names.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Expiry, seconds since the Unix epoch.
    #[serde(default)]
    pub exp: Option<i64>,
    /// Issued-at, seconds since the Unix epoch.
    #[serde(default)]
    pub iat: Option<i64>,
}

impl Claims {
    /// True when the token has an expiry and it is not after `now`.
    #[must_use]
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.exp.is_some_and(|exp| exp <= now.unix_timestamp())
    }

    /// Builds the [`Identity`] these claims describe.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the subject is not a well-formed email
    /// or the token carries no roles (an authenticated identity always has
    /// at least one).
    pub fn identity(&self) -> Result<Identity, Error> {
        let email = self
            .sub
            .parse()
            .map_err(|_| Error::Decode(format!("token subject is not an email: {}", self.sub)))?;
        if self.roles.is_empty() {
            return Err(Error::Decode("token carries no roles".into()));
        }
        let roles = self.roles.iter().cloned().map(Role::from).collect();
        Ok(Identity::new(email, roles))
    }
}

/// Decodes the payload claims of a bearer token.
///
/// Accepts the JWT compact form `header.payload.signature` and decodes only
/// the payload segment. No signature or algorithm checks happen here.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the token is not three dot-separated
/// segments, the payload is not base64url, or the claims are not the
/// expected JSON shape.
pub fn decode(token: &str) -> Result<Claims, Error> {
    let token = token.trim();
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(Error::Decode("token is not in compact JWT form".into()));
    };

    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| Error::Decode("token payload is not base64url".into()))?;

    serde_json::from_slice(&payload_bytes)
        .map_err(|e| Error::Decode(format!("token claims: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_token(claims: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
        format!("{header}.{payload}.sig")
    }

    #[test]
    fn decodes_subject_roles_and_expiry() {
        let token = encode_token(&serde_json::json!({
            "sub": "a@b.com",
            "roles": ["ROLE_USER", "ROLE_ADMIN"],
            "exp": 4102444800i64,
            "iat": 1700000000i64,
        }));

        let claims = decode(&token).unwrap();
        assert_eq!(claims.sub, "a@b.com");
        assert_eq!(claims.roles, vec!["ROLE_USER", "ROLE_ADMIN"]);
        assert_eq!(claims.exp, Some(4102444800));

        let identity = claims.identity().unwrap();
        assert!(identity.is_admin());
        assert_eq!(identity.email.as_str(), "a@b.com");
    }

    #[test]
    fn missing_optional_claims_default() {
        let token = encode_token(&serde_json::json!({ "sub": "a@b.com" }));
        let claims = decode(&token).unwrap();
        assert!(claims.roles.is_empty());
        assert_eq!(claims.exp, None);
        assert!(!claims.is_expired(OffsetDateTime::now_utc()));
    }

    #[test]
    fn expiry_check() {
        let token = encode_token(&serde_json::json!({
            "sub": "a@b.com",
            "roles": ["ROLE_USER"],
            "exp": 1000i64,
        }));
        let claims = decode(&token).unwrap();
        assert!(claims.is_expired(OffsetDateTime::from_unix_timestamp(2000).unwrap()));
        assert!(claims.is_expired(OffsetDateTime::from_unix_timestamp(1000).unwrap()));
        assert!(!claims.is_expired(OffsetDateTime::from_unix_timestamp(999).unwrap()));
    }

    #[test]
    fn rejects_wrong_segment_count() {
        assert!(decode("only-one-segment").is_err());
        assert!(decode("two.segments").is_err());
        assert!(decode("a.b.c.d").is_err());
    }

    #[test]
    fn rejects_non_base64_payload() {
        assert!(decode("header.@@not-base64@@.sig").is_err());
    }

    #[test]
    fn rejects_non_json_payload() {
        let payload = URL_SAFE_NO_PAD.encode(b"plain text");
        assert!(decode(&format!("h.{payload}.s")).is_err());
    }

    #[test]
    fn identity_requires_roles() {
        let token = encode_token(&serde_json::json!({ "sub": "a@b.com" }));
        let claims = decode(&token).unwrap();
        assert!(matches!(claims.identity(), Err(Error::Decode(_))));
    }

    #[test]
    fn identity_requires_email_subject() {
        let token = encode_token(&serde_json::json!({
            "sub": "not-an-email",
            "roles": ["ROLE_USER"],
        }));
        let claims = decode(&token).unwrap();
        assert!(claims.identity().is_err());
    }

    #[test]
    fn unknown_roles_pass_through() {
        let token = encode_token(&serde_json::json!({
            "sub": "a@b.com",
            "roles": ["ROLE_SUPPORT"],
        }));
        let identity = decode(&token).unwrap().identity().unwrap();
        assert_eq!(identity.roles, vec![Role::Other("ROLE_SUPPORT".into())]);
    }
}
