// src/models/claims.rs
//! JWT claims data model for issued access tokens.
//!
//! Defines the payload structure signed by the token issuer and consumed by
//! the media server, which enforces the embedded permission grants after
//! verifying the signature against the published key set.

use serde::{Serialize, Deserialize};

/// An operation a token holder may perform on a stream path.
///
/// Serialized in lowercase (`"read"`, `"publish"`) to match what the media
/// server expects inside its permissions claim.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Subscribe to / play a stream.
    Read,
    /// Publish (ingest) a stream.
    Publish,
}

/// A single permission grant: one action allowed on one stream path.
///
/// Grants are immutable once embedded in a token; the media server enforces
/// them without contacting the issuer again.
///
/// # Fields
/// - `action`: The permitted operation
/// - `path`: Canonical stream path the action applies to
///   Example: "camera_one"
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PermissionGrant {
    /// The permitted operation on the stream path
    pub action: Action,

    /// Canonical name of the stream the grant applies to
    /// Example: "camera_one"
    pub path: String,
}

impl PermissionGrant {
    /// Convenience constructor for a grant.
    pub fn new(action: Action, path: impl Into<String>) -> Self {
        PermissionGrant {
            action,
            path: path.into(),
        }
    }
}

/// Claims carried by issued access tokens.
///
/// The expiry is an absolute Unix timestamp computed at signing time, so a
/// verifier needs no knowledge of when the token was issued.
///
/// # Serialization
/// The permissions field is serialized as `mediamtx_permissions`, the claim
/// key the media server reads.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Claims {
    /// Subject identifier (the authenticated username)
    /// Example: "demo"
    pub sub: String,

    /// Expiry as seconds since the Unix epoch
    pub exp: i64,

    /// Ordered list of permission grants for this subject
    pub mediamtx_permissions: Vec<PermissionGrant>,
}
