// src/main.rs

//! # Media Auth Server - Main Entry Point
//!
//! This module serves as the main entry point for the media auth server.
//! It generates the process-lifetime signing key pair and starts the API
//! server.
//!
//! ## Architecture Overview
//! 1. **Keys Layer**: `KeyManager` owns the RSA signing key pair
//! 2. **Auth Layer**: `IdentityStore` verifies caller credentials
//! 3. **Services Layer**: Token issuance and the HTTP API
//!
//! ## Environment Variables
//! - `BIND_ADDR`: (Optional) listen address (default: 127.0.0.1:3000)
//! - `AUTH_USERNAME`: (Optional) accepted username (default: demo)
//! - `AUTH_PASSWORD`: (Optional) accepted password (default: demo)
//! - `RUST_LOG`: (Optional) log filter for env_logger

use crate::auth::identity_store::{IdentityStore, StaticIdentityStore};
use crate::keys::key_manager::KeyManager;
use crate::services::api_server::ApiServer;
use crate::services::token_issuer::TokenIssuer;
use std::net::SocketAddr;
use std::sync::Arc;
use dotenv::dotenv;

// Module declarations (organized by functional domain)
mod auth;      // credential verification
mod error;     // error types
mod keys;      // cryptographic key operations
mod models;    // data structures
mod services;  // business logic and API

#[cfg(test)]
mod testutil;  // shared test helpers

/// Main application entry point
///
/// # Initialization Sequence
/// 1. Load environment configuration
/// 2. Generate the signing key pair
/// 3. Initialize service components
/// 4. Start API server
///
/// # Panics
/// - If signing key generation fails (the server must not run keyless)
/// - If the bind address is invalid or cannot be bound
#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv().ok();
    env_logger::init();

    // Generate the signing key pair before any endpoint is exposed. Fatal
    // on failure: a keyless process would mint tokens nobody can verify.
    let key_manager = Arc::new(
        KeyManager::new().expect("Failed to generate RSA signing key pair"),
    );

    // Single-user identity store; a real deployment swaps in a credential
    // backend behind the same trait.
    let identity_store: Arc<dyn IdentityStore> =
        Arc::new(StaticIdentityStore::from_env());

    let token_issuer = TokenIssuer::new(key_manager.clone(), identity_store);
    let api_server = ApiServer::new(token_issuer, key_manager);

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()
        .expect("BIND_ADDR must be a valid socket address");

    println!("Auth server running at http://{}", addr);
    println!("Available endpoints:");
    println!("- GET  /.well-known/jwks.json");
    println!("- POST /api/token");

    api_server.run(addr).await.expect("server error");
}
