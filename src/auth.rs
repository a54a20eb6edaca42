// ABOUTME: JWT-based user authentication and session token management
// ABOUTME: Handles token generation, validation, and the read-only authenticated-user context
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 MealMajor Contributors

//! # Authentication and Session Management
//!
//! HS256 JWT tokens carry the user identity between requests. Validation
//! produces an [`AuthContext`], a read-only snapshot of the authenticated user
//! that downstream components (including the browser engine's "my recipes"
//! scope) consume without ever mutating.

use crate::errors::{AppError, AppResult};
use crate::models::User;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject)
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Read-only authenticated-user context.
///
/// Supplies the current user's identity to whatever component needs it; never
/// mutated after construction.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Authenticated user id
    pub user_id: Uuid,
    /// Authenticated user email
    pub email: String,
}

impl AuthContext {
    /// Build the context from validated token claims
    ///
    /// # Errors
    ///
    /// Returns an auth error when the subject is not a valid UUID.
    pub fn from_claims(claims: &Claims) -> AppResult<Self> {
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|e| AppError::auth_invalid(format!("Invalid token subject: {e}")))?;
        Ok(Self {
            user_id,
            email: claims.email.clone(),
        })
    }
}

/// Manages JWT token generation and validation
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_hours: i64,
}

impl AuthManager {
    /// Create a manager with the given HS256 secret and session lifetime
    #[must_use]
    pub fn new(jwt_secret: &str, session_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            session_hours,
        }
    }

    /// Generate a session token for a user
    ///
    /// # Errors
    ///
    /// Returns an error when JWT encoding fails.
    pub fn generate_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.session_hours)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))
    }

    /// Validate a token and return its claims
    ///
    /// # Errors
    ///
    /// Returns an auth error when the token is expired, malformed, or carries
    /// an invalid signature.
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::auth_expired(),
                _ => AppError::auth_invalid(format!("Invalid token: {e}")),
            })
    }

    /// Session lifetime in hours
    #[must_use]
    pub const fn session_hours(&self) -> i64 {
        self.session_hours
    }
}

/// Extract the bearer token from an `Authorization` header value
///
/// # Errors
///
/// Returns an auth error when the header does not carry a bearer token.
pub fn extract_bearer_token(auth_header: &str) -> AppResult<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::auth_invalid("Authorization header must use Bearer scheme"))
}
