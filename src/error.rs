// src/error.rs
//! Error types for the media auth server.
//!
//! Two families of failure exist in this system:
//! - Fatal startup errors (`KeyError`): the process cannot serve anything
//!   without a valid signing key pair, so these abort startup.
//! - Per-request errors (`AuthError`): reported to the caller and never
//!   crash the process.

use thiserror::Error;

/// Errors raised while generating or preparing the RSA signing key pair.
///
/// All variants are fatal: the server refuses to start rather than serve
/// discovery or issuance without a usable key pair, because a keyless
/// process would hand out tokens nobody can verify.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The RSA key pair could not be generated.
    #[error("RSA key generation failed: {0}")]
    Generation(#[from] rsa::Error),

    /// The freshly generated private key could not be PEM-encoded.
    #[error("private key PEM encoding failed: {0}")]
    PemEncoding(#[from] rsa::pkcs1::Error),

    /// The JWT library rejected the encoded private key.
    #[error("signing key rejected by JWT library: {0}")]
    InvalidSigningKey(jsonwebtoken::errors::Error),
}

/// Errors raised while issuing a token.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The supplied credential was rejected.
    ///
    /// The message is deliberately generic: it must not reveal whether the
    /// username or the password was at fault (account-enumeration leakage).
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Signing the claims failed.
    ///
    /// Not expected in practice once the key pair has been validated at
    /// startup; surfaces as an internal server error.
    #[error("token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}
