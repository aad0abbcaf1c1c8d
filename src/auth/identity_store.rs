// src/auth/identity_store.rs
//! Credential verification for the token issuer.
//!
//! The issuer does not decide who is allowed in; it delegates to an
//! [`IdentityStore`], which maps a credential to an authenticated subject
//! plus that subject's permission grants, or rejects it. This keeps the
//! issuance logic independent of where identities actually live: the
//! in-memory [`StaticIdentityStore`] below serves a single configured user,
//! while a production deployment would back the same trait with a real
//! credential database.

use crate::models::claims::{Action, PermissionGrant};
use constant_time_eq::constant_time_eq;

/// A (username, password) pair supplied by a caller.
#[derive(Debug, Clone)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

/// A successfully authenticated subject and its permission grants.
///
/// Grants are threaded through from the store rather than attached during
/// issuance, so different subjects can carry different grant lists.
#[derive(Debug, Clone)]
pub struct AuthenticatedSubject {
    /// Subject identifier placed into the token's `sub` claim
    pub subject: String,

    /// Permission grants embedded into the token for this subject
    pub grants: Vec<PermissionGrant>,
}

/// Pluggable credential verification capability.
///
/// # Contract
/// Implementations must:
/// - Compare password material in constant time
/// - Never log plaintext passwords
/// - Reject credentials with an empty username or password
/// - Return `None` on rejection without revealing which field was wrong
pub trait IdentityStore: Send + Sync {
    /// Verifies a credential.
    ///
    /// # Returns
    /// - `Some(subject)` with the subject's grants on acceptance
    /// - `None` on rejection
    fn authenticate(&self, credential: &Credential) -> Option<AuthenticatedSubject>;
}

/// In-memory identity store holding exactly one accepted credential.
///
/// The accepted username and password are fixed at construction time. Every
/// other credential, including empty ones, is rejected.
pub struct StaticIdentityStore {
    /// Accepted username (doubles as the subject identifier)
    username: String,
    /// Accepted password
    password: String,
    /// Grants handed to the subject on successful authentication
    grants: Vec<PermissionGrant>,
}

impl StaticIdentityStore {
    /// Creates a store accepting a single credential with the given grants.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        grants: Vec<PermissionGrant>,
    ) -> Self {
        StaticIdentityStore {
            username: username.into(),
            password: password.into(),
            grants,
        }
    }

    /// Creates a store from the `AUTH_USERNAME` / `AUTH_PASSWORD` environment
    /// variables, defaulting to `demo` / `demo`.
    ///
    /// The configured user receives the default camera grants from
    /// [`default_grants`].
    pub fn from_env() -> Self {
        let username =
            std::env::var("AUTH_USERNAME").unwrap_or_else(|_| "demo".to_string());
        let password =
            std::env::var("AUTH_PASSWORD").unwrap_or_else(|_| "demo".to_string());
        Self::new(username, password, default_grants())
    }
}

impl IdentityStore for StaticIdentityStore {
    fn authenticate(&self, credential: &Credential) -> Option<AuthenticatedSubject> {
        if credential.username.is_empty() || credential.password.is_empty() {
            return None;
        }

        // Both comparisons always run; short-circuiting on the username
        // would leak which field was wrong through timing.
        let username_ok = constant_time_eq(
            credential.username.as_bytes(),
            self.username.as_bytes(),
        );
        let password_ok = constant_time_eq(
            credential.password.as_bytes(),
            self.password.as_bytes(),
        );

        if username_ok & password_ok {
            Some(AuthenticatedSubject {
                subject: self.username.clone(),
                grants: self.grants.clone(),
            })
        } else {
            None
        }
    }
}

/// Default grant list for the configured subject: read and publish on each
/// known camera path.
pub fn default_grants() -> Vec<PermissionGrant> {
    vec![
        PermissionGrant::new(Action::Read, "camera_one"),
        PermissionGrant::new(Action::Read, "camera_two"),
        PermissionGrant::new(Action::Publish, "camera_one"),
        PermissionGrant::new(Action::Publish, "camera_two"),
    ]
}
