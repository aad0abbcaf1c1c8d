// src/services/token_issuer.rs
//! Token issuance service.
//!
//! Authenticates a credential against the identity store and, on success,
//! mints a signed JWT embedding the subject's permission grants. Each call
//! is a single-shot, context-free transaction: verify the credential, then
//! sign or reject. No session state exists between calls.

use crate::auth::identity_store::{Credential, IdentityStore};
use crate::error::AuthError;
use crate::keys::key_manager::KeyManager;
use crate::models::claims::Claims;
use chrono::Utc;
use jsonwebtoken::{encode, Header};
use std::sync::Arc;

/// Issued-token lifetime in seconds (1 hour).
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Service for authenticating credentials and minting signed access tokens.
///
/// Holds read-only handles to the process-lifetime signing key pair and the
/// credential verification capability; safe to share across concurrent
/// requests without synchronization.
pub struct TokenIssuer {
    /// Signing key pair, written once at startup and never mutated
    key_manager: Arc<KeyManager>,

    /// Credential verification capability
    identity_store: Arc<dyn IdentityStore>,
}

impl TokenIssuer {
    /// Creates a new TokenIssuer instance.
    ///
    /// # Arguments
    /// * `key_manager` - Process-lifetime signing key pair
    /// * `identity_store` - Capability mapping credentials to subjects and grants
    pub fn new(key_manager: Arc<KeyManager>, identity_store: Arc<dyn IdentityStore>) -> Self {
        TokenIssuer {
            key_manager,
            identity_store,
        }
    }

    /// Authenticates a credential and mints a signed token.
    ///
    /// # Process Flow
    /// 1. Delegate credential verification to the identity store
    /// 2. Build claims: subject, absolute expiry (now + TTL), the subject's grants
    /// 3. Sign with the private key, tagging the header with the key identifier
    ///
    /// The expiry is an absolute Unix timestamp computed at signing time, so
    /// verifiers need no knowledge of when the token was issued.
    ///
    /// # Errors
    /// - `AuthError::InvalidCredentials` if the store rejects the credential.
    ///   No signature is computed in that case.
    /// - `AuthError::Signing` if the JWT library fails to sign the claims.
    pub fn issue_token(&self, credential: &Credential) -> Result<String, AuthError> {
        let authenticated = self
            .identity_store
            .authenticate(credential)
            .ok_or(AuthError::InvalidCredentials)?;

        let claims = Claims {
            sub: authenticated.subject,
            exp: Utc::now().timestamp() + TOKEN_TTL_SECS,
            mediamtx_permissions: authenticated.grants,
        };

        let mut header = Header::new(self.key_manager.algorithm());
        header.kid = Some(self.key_manager.kid().to_string());

        Ok(encode(&header, &claims, self.key_manager.encoding_key())?)
    }
}

impl Clone for TokenIssuer {
    /// Creates a clone sharing the same key pair and identity store.
    fn clone(&self) -> Self {
        TokenIssuer {
            key_manager: Arc::clone(&self.key_manager),
            identity_store: Arc::clone(&self.identity_store),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::identity_store::{default_grants, StaticIdentityStore};
    use crate::models::claims::{Action, PermissionGrant};
    use crate::testutil::{decode_claims, demo_credential, test_key_manager};
    use jsonwebtoken::errors::ErrorKind;

    fn test_issuer() -> TokenIssuer {
        let store = StaticIdentityStore::new("demo", "demo", default_grants());
        TokenIssuer::new(test_key_manager(), Arc::new(store))
    }

    #[test]
    fn test_issued_token_verifies_and_carries_grants() {
        let issuer = test_issuer();
        let token = issuer.issue_token(&demo_credential()).expect("issue");

        let decoded = decode_claims(&token, &test_key_manager()).expect("verify");
        assert_eq!(decoded.claims.sub, "demo");
        assert!(decoded
            .claims
            .mediamtx_permissions
            .contains(&PermissionGrant::new(Action::Publish, "camera_one")));
    }

    #[test]
    fn test_token_header_kid_matches_discovery_document() {
        let issuer = test_issuer();
        let token = issuer.issue_token(&demo_credential()).expect("issue");

        let header = jsonwebtoken::decode_header(&token).expect("header");
        let jwks = test_key_manager().public_jwks();
        assert_eq!(header.kid.as_deref(), Some(jwks.keys[0].kid.as_str()));
    }

    #[test]
    fn test_rejects_wrong_password() {
        let issuer = test_issuer();
        let credential = Credential {
            username: "demo".to_string(),
            password: "wrong".to_string(),
        };

        let result = issuer.issue_token(&credential);
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn test_rejects_empty_credential() {
        let issuer = test_issuer();
        let credential = Credential {
            username: String::new(),
            password: String::new(),
        };

        assert!(matches!(
            issuer.issue_token(&credential),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_expiry_is_ttl_from_issuance() {
        let issuer = test_issuer();
        let issued_at = Utc::now().timestamp();
        let token = issuer.issue_token(&demo_credential()).expect("issue");

        let decoded = decode_claims(&token, &test_key_manager()).expect("verify");
        let expected = issued_at + TOKEN_TTL_SECS;
        // Allow a few seconds of slack for slow test machines
        assert!(decoded.claims.exp >= expected);
        assert!(decoded.claims.exp <= expected + 5);
    }

    #[test]
    fn test_expired_token_is_rejected_despite_valid_signature() {
        // Sign claims that expired ten minutes ago with the real key pair.
        let keys = test_key_manager();
        let claims = Claims {
            sub: "demo".to_string(),
            exp: Utc::now().timestamp() - 600,
            mediamtx_permissions: default_grants(),
        };
        let mut header = Header::new(keys.algorithm());
        header.kid = Some(keys.kid().to_string());
        let token = encode(&header, &claims, keys.encoding_key()).expect("sign");

        let result = decode_claims(&token, &keys);
        match result {
            Err(e) => assert_eq!(*e.kind(), ErrorKind::ExpiredSignature),
            Ok(_) => panic!("expired token must be rejected"),
        }
    }

    #[tokio::test]
    async fn test_concurrent_issuance_all_verify() {
        let issuer = Arc::new(test_issuer());

        let mut handles = Vec::new();
        for _ in 0..100 {
            let issuer = Arc::clone(&issuer);
            handles.push(tokio::spawn(async move {
                issuer.issue_token(&demo_credential()).expect("issue")
            }));
        }

        let keys = test_key_manager();
        for handle in handles {
            let token = handle.await.expect("task");
            let decoded = decode_claims(&token, &keys).expect("verify");
            assert_eq!(decoded.claims.sub, "demo");
        }
    }
}
