// ABOUTME: User authentication route handlers for registration and login
// ABOUTME: Provides REST endpoints for account creation and JWT session issuance
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 MealMajor Contributors

//! Authentication routes for user management.
//!
//! Handlers are thin wrappers that delegate business logic to [`AuthService`].

use crate::{
    errors::AppError,
    models::User,
    routes::{authenticate, ServerResources},
};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Minimum accepted password length
const MIN_PASSWORD_LENGTH: usize = 8;

/// User registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

/// User registration response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: String,
    pub message: String,
}

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User info for login response
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// User login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub jwt_token: String,
    pub expires_at: String,
    pub user: UserInfo,
}

/// Password change request for the session-gated reset flow
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub new_password: String,
    pub confirm_password: String,
}

/// Password change response
#[derive(Debug, Serialize)]
pub struct ChangePasswordResponse {
    pub message: String,
}

/// Authentication service for business logic
pub struct AuthService;

impl AuthService {
    /// Handle user registration
    ///
    /// # Errors
    ///
    /// Returns an error when validation fails, the email is taken, or the
    /// database operation fails.
    pub async fn register(
        resources: &Arc<ServerResources>,
        request: RegisterRequest,
    ) -> Result<RegisterResponse, AppError> {
        tracing::info!("User registration attempt for email: {}", request.email);

        if !Self::is_valid_email(&request.email) {
            return Err(AppError::invalid_input("Invalid email format"));
        }
        if request.password.len() < MIN_PASSWORD_LENGTH {
            return Err(AppError::invalid_input(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        if let Ok(Some(_)) = resources.database.get_user_by_email(&request.email).await {
            return Err(AppError::already_exists("An account with this email"));
        }

        // Hash on a blocking task to keep the async executor responsive
        let password = request.password.clone();
        let password_hash =
            tokio::task::spawn_blocking(move || bcrypt::hash(&password, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
                .map_err(|e| AppError::internal(format!("Password hashing error: {e}")))?;

        let user = User::new(request.email.clone(), password_hash, request.display_name);
        let user_id = resources
            .database
            .create_user(&user)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        tracing::info!(
            "User registered successfully: {} ({})",
            request.email,
            user_id
        );

        Ok(RegisterResponse {
            user_id: user_id.to_string(),
            message: "User registered successfully".into(),
        })
    }

    /// Handle user login
    ///
    /// # Errors
    ///
    /// Returns an error when the credentials are invalid or token generation
    /// fails.
    pub async fn login(
        resources: &Arc<ServerResources>,
        request: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        tracing::info!("User login attempt for email: {}", request.email);

        let user = resources
            .database
            .get_user_by_email_required(&request.email)
            .await
            .map_err(|_| AppError::auth_invalid("Invalid email or password"))?;

        // Verify password using spawn_blocking to avoid blocking the executor
        let password = request.password;
        let password_hash = user.password_hash.clone();
        let is_valid =
            tokio::task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
                .await
                .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
                .map_err(|e| AppError::internal(format!("Password verification error: {e}")))?;

        if !is_valid {
            tracing::warn!("Invalid password for user: {}", request.email);
            return Err(AppError::auth_invalid("Invalid email or password"));
        }

        if !user.is_active {
            return Err(AppError::permission_denied("Account is deactivated"));
        }

        resources
            .database
            .update_last_active(user.id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let jwt_token = resources.auth_manager.generate_token(&user)?;
        let expires_at =
            chrono::Utc::now() + chrono::Duration::hours(resources.auth_manager.session_hours());

        tracing::info!("User logged in successfully: {} ({})", request.email, user.id);

        Ok(LoginResponse {
            jwt_token,
            expires_at: expires_at.to_rfc3339(),
            user: UserInfo {
                user_id: user.id.to_string(),
                email: user.email,
                display_name: user.display_name,
            },
        })
    }

    /// Handle a password change for the authenticated user
    ///
    /// # Errors
    ///
    /// Returns an error when the new password is too short, the confirmation
    /// does not match, or the update fails.
    pub async fn change_password(
        resources: &Arc<ServerResources>,
        user_id: uuid::Uuid,
        request: ChangePasswordRequest,
    ) -> Result<ChangePasswordResponse, AppError> {
        if request.new_password.len() < MIN_PASSWORD_LENGTH {
            return Err(AppError::invalid_input(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }
        if request.new_password != request.confirm_password {
            return Err(AppError::invalid_input("Passwords do not match"));
        }

        let password = request.new_password;
        let password_hash =
            tokio::task::spawn_blocking(move || bcrypt::hash(&password, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
                .map_err(|e| AppError::internal(format!("Password hashing error: {e}")))?;

        resources
            .database
            .update_password_hash(user_id, &password_hash)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        tracing::info!(user_id = %user_id, "password updated");

        Ok(ChangePasswordResponse {
            message: "Password updated successfully".into(),
        })
    }

    fn is_valid_email(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
    }
}

/// Authentication routes handler
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(Self::handle_register))
            .route("/api/auth/login", post(Self::handle_login))
            .route("/api/auth/password", put(Self::handle_change_password))
            .with_state(resources)
    }

    /// Handle POST /api/auth/register
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let response = AuthService::register(&resources, request).await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle POST /api/auth/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let response = AuthService::login(&resources, request).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle PUT /api/auth/password - session-gated password update
    async fn handle_change_password(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<ChangePasswordRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let response = AuthService::change_password(&resources, auth.user_id, request).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(AuthService::is_valid_email("cook@example.com"));
        assert!(!AuthService::is_valid_email("cook"));
        assert!(!AuthService::is_valid_email("@example.com"));
        assert!(!AuthService::is_valid_email("cook@nodot"));
    }
}
