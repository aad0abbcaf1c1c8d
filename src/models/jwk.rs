// src/models/jwk.rs
//! JSON Web Key (JWK) data model implementation.
//!
//! Defines the discovery document structure published by the key manager,
//! following [RFC 7517](https://datatracker.ietf.org/doc/html/rfc7517).
//! Only public key material ever appears here; the private half of the
//! signing key pair has no representation in this module.

use serde::{Serialize, Deserialize};

/// A single public verification key in JWK form.
///
/// # Fields
/// - `kty`: Key type, always "RSA" for this server
/// - `kid`: Key identifier, matches the `kid` stamped into token headers
/// - `use_`: Declared usage, always "sig" (signature verification)
/// - `alg`: Signing algorithm the key verifies, always "RS256"
/// - `n`: RSA modulus, base64url-encoded big-endian bytes without padding
/// - `e`: RSA public exponent, base64url-encoded big-endian bytes without padding
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Jwk {
    /// Key type
    /// Example: "RSA"
    pub kty: String,

    /// Key identifier used by relying parties to select this key
    /// Example: "key-1"
    pub kid: String,

    /// Declared key usage
    /// Example: "sig"
    #[serde(rename = "use")]
    pub use_: String,

    /// Algorithm this key verifies
    /// Example: "RS256"
    pub alg: String,

    /// Base64url-encoded RSA modulus
    pub n: String,

    /// Base64url-encoded RSA public exponent
    /// Example: "AQAB"
    pub e: String,
}

/// A JSON Web Key Set: the document served by the discovery endpoint.
///
/// Relying parties fetch this once (or cache it), select the key matching a
/// token's `kid` header, and verify signatures offline.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Jwks {
    /// Published public verification keys
    pub keys: Vec<Jwk>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_use_field_renamed_on_the_wire() {
        let jwk = Jwk {
            kty: "RSA".to_string(),
            kid: "key-1".to_string(),
            use_: "sig".to_string(),
            alg: "RS256".to_string(),
            n: "modulus".to_string(),
            e: "AQAB".to_string(),
        };

        let value = serde_json::to_value(&jwk).expect("serialize");
        assert_eq!(value["use"], "sig");
        assert!(value.get("use_").is_none());
    }
}
