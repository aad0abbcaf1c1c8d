// src/services/api_server.rs
//! API Server for the media auth service.
//!
//! This module provides the HTTP interface for token issuance and key
//! discovery, built using Axum:
//! - `GET /.well-known/jwks.json`: public verification key set
//! - `POST /api/token`: credential authentication and token issuance
//!
//! The media server fetches the discovery document and uses it to verify
//! tokens offline; client applications call the issuance endpoint (hence
//! the permissive CORS layer) and present the returned token to the media
//! server.

use crate::auth::identity_store::Credential;
use crate::error::AuthError;
use crate::keys::key_manager::KeyManager;
use crate::services::token_issuer::TokenIssuer;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

// API request and response structures

/// Request payload for token issuance
#[derive(Serialize, Deserialize)]
struct TokenRequest {
    username: String,
    password: String,
}

/// Response containing a signed access token
#[derive(Serialize, Deserialize)]
struct TokenResponse {
    token: String,
}

/// Error body for rejected or failed requests
#[derive(Serialize, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// API server state containing all service dependencies
pub struct ApiServer {
    /// Service for authenticating credentials and minting tokens
    token_issuer: Arc<TokenIssuer>,

    /// Process-lifetime signing key pair (public half served for discovery)
    key_manager: Arc<KeyManager>,
}

impl ApiServer {
    /// Creates a new instance of the API server
    ///
    /// # Arguments
    /// * `token_issuer` - Service for credential authentication and signing
    /// * `key_manager` - Shared signing key pair for the discovery endpoint
    pub fn new(token_issuer: TokenIssuer, key_manager: Arc<KeyManager>) -> Self {
        ApiServer {
            token_issuer: Arc::new(token_issuer),
            key_manager,
        }
    }

    /// Builds the application router with all routes and middleware.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/.well-known/jwks.json", get(Self::jwks_handler))
            .route("/api/token", post(Self::token_handler))
            .layer(CorsLayer::permissive())
            .with_state(Arc::new(self.clone()))
    }

    /// Starts the API server and begins listening for requests
    ///
    /// # Arguments
    /// * `addr` - Socket address to bind to (e.g., "127.0.0.1:3000")
    ///
    /// # Errors
    /// Returns an error if the listener cannot bind or the server fails.
    pub async fn run(&self, addr: SocketAddr) -> anyhow::Result<()> {
        let app = self.router();
        let listener = tokio::net::TcpListener::bind(addr).await?;
        log::info!("auth server listening on http://{}", addr);
        axum::serve(listener, app).await?;
        Ok(())
    }

    // =====================
    // Discovery Handler
    // =====================

    /// Serves the public key set used to verify issued tokens.
    ///
    /// # Endpoint
    /// GET /.well-known/jwks.json
    ///
    /// # Responses
    /// - 200 OK: JWKS document containing the current verification key
    ///
    /// The document is a pure function of process state and is identical
    /// across calls within one process lifetime.
    async fn jwks_handler(State(state): State<Arc<ApiServer>>) -> impl IntoResponse {
        Json(state.key_manager.public_jwks())
    }

    // =====================
    // Issuance Handler
    // =====================

    /// Authenticates a credential and returns a signed access token.
    ///
    /// # Endpoint
    /// POST /api/token
    ///
    /// # Request Body
    /// JSON payload containing username and password
    ///
    /// # Responses
    /// - 200 OK: Returns the signed token
    /// - 401 Unauthorized: Credential rejected (generic message, no hint
    ///   whether the username or the password was wrong)
    /// - 500 Internal Server Error: Signing failed
    async fn token_handler(
        State(state): State<Arc<ApiServer>>,
        Json(payload): Json<TokenRequest>,
    ) -> Response {
        let credential = Credential {
            username: payload.username,
            password: payload.password,
        };

        match state.token_issuer.issue_token(&credential) {
            Ok(token) => {
                log::info!("issued token for subject {}", credential.username);
                (StatusCode::OK, Json(TokenResponse { token })).into_response()
            }
            Err(AuthError::InvalidCredentials) => {
                log::warn!("token request rejected");
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse {
                        error: "Invalid credentials".to_string(),
                    }),
                )
                    .into_response()
            }
            Err(e) => {
                log::error!("token issuance failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Internal error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

impl Clone for ApiServer {
    /// Creates a clone of the ApiServer with shared services
    fn clone(&self) -> Self {
        ApiServer {
            token_issuer: Arc::clone(&self.token_issuer),
            key_manager: Arc::clone(&self.key_manager),
        }
    }
}
