use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Validated email address, the unique key for a user account.
///
/// Guaranteed well-formed by construction: holding an `Email` proves the
/// format check passed. Use `"a@b.com".parse::<Email>()` or
/// `Email::try_from(string)` to create one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl TryFrom<String> for Email {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let well_formed = match s.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.is_empty()
                    && domain.contains('.')
                    && !domain.contains('@')
                    && !s.contains(char::is_whitespace)
            }
            None => false,
        };
        if well_formed {
            Ok(Self(s))
        } else {
            Err(Error::InvalidEmail(s))
        }
    }
}

impl From<Email> for String {
    fn from(e: Email) -> Self {
        e.0
    }
}

/// Car identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
)]
#[serde(transparent)]
pub struct CarId(pub i64);

/// Rental identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
)]
#[serde(transparent)]
pub struct RentalId(pub i64);

/// Receipt identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
)]
#[serde(transparent)]
pub struct ReceiptId(pub i64);

/// Rental provider identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
)]
#[serde(transparent)]
pub struct ProviderId(pub i64);

/// A capability tag gating UI and API access.
///
/// The two roles the backend grants are modeled as closed variants;
/// anything else round-trips through [`Role::Other`] unmodified so a newer
/// server cannot break an older client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Ordinary customer (`ROLE_USER`).
    User,
    /// Administrator (`ROLE_ADMIN`).
    Admin,
    /// Role string this client does not know about, passed through as-is.
    Other(String),
}

impl Role {
    /// Wire name as the backend sends it.
    #[must_use]
    pub fn wire_name(&self) -> &str {
        match self {
            Self::User => "ROLE_USER",
            Self::Admin => "ROLE_ADMIN",
            Self::Other(s) => s,
        }
    }

    /// Human-readable label for display.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::User => "Customer",
            Self::Admin => "Administrator",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "ROLE_USER" => Self::User,
            "ROLE_ADMIN" => Self::Admin,
            _ => Self::Other(s),
        }
    }
}

impl From<Role> for String {
    fn from(r: Role) -> Self {
        r.wire_name().to_owned()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// The authenticated user: email plus granted roles.
///
/// An `Identity` always carries at least one role; construction from a
/// bearer token enforces this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub email: Email,
    pub roles: Vec<Role>,
}

impl Identity {
    #[must_use]
    pub fn new(email: Email, roles: Vec<Role>) -> Self {
        Self { email, roles }
    }

    /// True iff the identity holds the given role.
    #[must_use]
    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }

    /// True iff the identity holds `ROLE_ADMIN`.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(&Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_email() {
        assert!("a@b.com".parse::<Email>().is_ok());
        assert!("first.last@sub.example.org".parse::<Email>().is_ok());
    }

    #[test]
    fn invalid_email_missing_parts() {
        assert!("".parse::<Email>().is_err());
        assert!("nodomain@".parse::<Email>().is_err());
        assert!("@nolocal.com".parse::<Email>().is_err());
        assert!("no-at-sign.com".parse::<Email>().is_err());
        assert!("bare@domain".parse::<Email>().is_err());
    }

    #[test]
    fn invalid_email_whitespace_or_double_at() {
        assert!("a b@c.com".parse::<Email>().is_err());
        assert!("a@b@c.com".parse::<Email>().is_err());
    }

    #[test]
    fn email_serde_roundtrip() {
        let email: Email = "a@b.com".parse().unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"a@b.com\"");
        let parsed: Email = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, email);
    }

    #[test]
    fn role_known_names_map_to_variants() {
        assert_eq!(Role::from("ROLE_USER".to_string()), Role::User);
        assert_eq!(Role::from("ROLE_ADMIN".to_string()), Role::Admin);
    }

    #[test]
    fn role_unknown_name_passes_through() {
        let role = Role::from("ROLE_SUPPORT".to_string());
        assert_eq!(role, Role::Other("ROLE_SUPPORT".into()));
        assert_eq!(role.wire_name(), "ROLE_SUPPORT");
        assert_eq!(role.label(), "ROLE_SUPPORT");
    }

    #[test]
    fn role_serde_roundtrip() {
        let json = serde_json::to_string(&Role::Admin).unwrap();
        assert_eq!(json, "\"ROLE_ADMIN\"");
        let parsed: Role = serde_json::from_str("\"ROLE_SUPPORT\"").unwrap();
        assert_eq!(parsed, Role::Other("ROLE_SUPPORT".into()));
    }

    #[test]
    fn role_labels() {
        assert_eq!(Role::User.label(), "Customer");
        assert_eq!(Role::Admin.label(), "Administrator");
    }

    #[test]
    fn identity_role_queries() {
        let identity = Identity::new("a@b.com".parse().unwrap(), vec![Role::User]);
        assert!(identity.has_role(&Role::User));
        assert!(!identity.is_admin());

        let admin = Identity::new(
            "root@b.com".parse().unwrap(),
            vec![Role::User, Role::Admin],
        );
        assert!(admin.is_admin());
    }

    #[test]
    fn car_id_display_and_serde() {
        let id = CarId(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let parsed: CarId = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, id);
    }
}
