// src/testutil.rs
//! Shared helpers for unit tests.
//!
//! Generating a 2048-bit RSA key pair takes long enough that every test
//! creating its own would dominate the suite's runtime, so a single pair is
//! generated lazily and shared.

use crate::auth::identity_store::Credential;
use crate::keys::key_manager::KeyManager;
use crate::models::claims::Claims;
use jsonwebtoken::{decode, Algorithm, DecodingKey, TokenData, Validation};
use once_cell::sync::Lazy;
use std::sync::Arc;

static TEST_KEYS: Lazy<Arc<KeyManager>> =
    Lazy::new(|| Arc::new(KeyManager::new().expect("test key generation")));

/// Returns the shared test key pair.
pub fn test_key_manager() -> Arc<KeyManager> {
    Arc::clone(&TEST_KEYS)
}

/// The credential accepted by test identity stores.
pub fn demo_credential() -> Credential {
    Credential {
        username: "demo".to_string(),
        password: "demo".to_string(),
    }
}

/// Decodes a token against a key manager's published key set, exactly as a
/// relying party would: rebuild the verification key from the discovery
/// document and validate with zero clock leeway.
pub fn decode_claims(
    token: &str,
    keys: &KeyManager,
) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
    let jwks = keys.public_jwks();
    let jwk = &jwks.keys[0];
    let decoding_key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.leeway = 0;

    decode::<Claims>(token, &decoding_key, &validation)
}
