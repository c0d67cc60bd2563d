//! Typed wrappers over the backend REST surface, one module per resource.
//!
//! All methods live on [`ApiClient`](crate::client::ApiClient); these
//! modules only group them. Auth requirements mirror the server's access
//! rules — public reads stay unauthenticated, admin and account-scoped
//! operations require a credential up front so a logged-out caller fails
//! fast instead of burning a round trip on a guaranteed 401.

mod cars;
mod receipts;
mod rentals;
mod users;

use crate::types::Email;

/// Percent-encode an email for use as a path segment.
pub(crate) fn encode_email(email: &Email) -> String {
    urlencoding::encode(email.as_str()).into_owned()
}
