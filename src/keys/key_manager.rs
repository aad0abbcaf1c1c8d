// src/keys/key_manager.rs
//! RSA signing key management for the token issuer.
//!
//! Provides generation and lifetime ownership of the asymmetric key pair
//! used for:
//! - Signing issued access tokens (private half)
//! - Publishing the verification key as a JWKS document (public half)
//!
//! One key pair is generated at process start and lives until the process
//! exits. Nothing here is persisted: a restart produces a fresh pair, and
//! relying parties pick up the new public key on their next discovery fetch.
//!
//! # Security Notes
//! - The private key exists only as a `jsonwebtoken` encoding key; no method
//!   returns or serializes private material
//! - Key generation uses the system's cryptographically secure RNG

use crate::error::KeyError;
use crate::models::jwk::{Jwk, Jwks};
use jsonwebtoken::{Algorithm, EncodingKey};
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};

/// Key identifier published in the discovery document and stamped into the
/// header of every issued token. The same identifier must appear in both
/// places so relying parties can select the correct key.
pub const KEY_ID: &str = "key-1";

/// RSA modulus size in bits for generated signing keys.
const RSA_KEY_BITS: usize = 2048;

/// Holder of the process-lifetime signing key pair.
///
/// Constructed once before the API server starts and shared read-only (via
/// `Arc`) across all concurrent issuance and discovery operations. The key
/// material is never mutated after construction, so no synchronization is
/// needed around it.
pub struct KeyManager {
    /// Private key in the form the JWT library signs with (never exposed)
    encoding_key: EncodingKey,
    /// Public half, used to derive the discovery document
    public_key: RsaPublicKey,
    /// Identifier tying issued tokens to the published key
    kid: String,
}

impl KeyManager {
    /// Generates a fresh RSA-2048 key pair.
    ///
    /// # Errors
    /// Returns `KeyError` if key generation or encoding fails. Callers at
    /// startup treat this as fatal; there is no degraded keyless mode.
    pub fn new() -> Result<Self, KeyError> {
        let private_key = RsaPrivateKey::new(&mut rand::thread_rng(), RSA_KEY_BITS)?;
        let public_key = private_key.to_public_key();

        // Hand the private key to the JWT library as PEM; the PEM string is
        // zeroized on drop.
        let private_pem = private_key.to_pkcs1_pem(Default::default())?;
        let encoding_key = EncodingKey::from_rsa_pem(private_pem.as_bytes())
            .map_err(KeyError::InvalidSigningKey)?;

        Ok(KeyManager {
            encoding_key,
            public_key,
            kid: KEY_ID.to_string(),
        })
    }

    /// Returns the key identifier for this pair.
    pub fn kid(&self) -> &str {
        &self.kid
    }

    /// Returns the signing algorithm issued tokens use.
    pub fn algorithm(&self) -> Algorithm {
        Algorithm::RS256
    }

    /// Returns the private key in the form `jsonwebtoken::encode` consumes.
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Renders the public half of the key pair as a JWKS document.
    ///
    /// # Returns
    /// A key set containing exactly one RSA verification key, tagged with
    /// this pair's key identifier, `use: "sig"` and `alg: "RS256"`.
    ///
    /// # Determinism
    /// Pure function of process state: repeated calls within one process
    /// lifetime produce identical documents.
    pub fn public_jwks(&self) -> Jwks {
        Jwks {
            keys: vec![Jwk {
                kty: "RSA".to_string(),
                kid: self.kid.clone(),
                use_: "sig".to_string(),
                alg: "RS256".to_string(),
                n: base64url(&self.public_key.n().to_bytes_be()),
                e: base64url(&self.public_key.e().to_bytes_be()),
            }],
        }
    }
}

/// Encodes bytes as base64url without padding, the JWK integer encoding.
fn base64url(data: &[u8]) -> String {
    base64::encode_config(data, base64::URL_SAFE_NO_PAD)
}
