// --- File: crates/courtbook_services/src/auth.rs ---
use courtbook_client::{endpoints, ApiClient, ApiError, Method, QueryParams};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::{fetch_one, send_json};
use crate::models::{
    LoginResponse, MessageResponse, ProfileUpdate, RegisterRequest, RegisterResponse, User,
};

/// Account management: sign-up, sign-in, profile and password.
#[derive(Debug, Clone)]
pub struct AuthService {
    client: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Creates an account. The new user is not signed in.
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(ApiError::validation("Email and password are required"));
        }
        if request.password != request.password_confirm {
            return Err(ApiError::validation("Passwords do not match"));
        }
        let response: RegisterResponse =
            send_json(&self.client, Method::POST, endpoints::REGISTER, request).await?;
        info!("Registered account {}", request.email);
        Ok(response)
    }

    /// Signs in and installs the session on the shared client.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let payload = self.client.login(email, password).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Revokes the refresh token on the backend, then drops the local session.
    ///
    /// The local session is cleared even when the backend call fails.
    pub async fn logout(&self) {
        if let Some(refresh) = self.client.session().refresh_token() {
            let body = json!({ "refresh": refresh });
            if let Err(err) = self.client.post(endpoints::LOGOUT, Some(&body)).await {
                warn!("Server-side logout failed: {}", err);
            }
        }
        self.client.logout();
    }

    /// Profile of the signed-in user.
    pub async fn me(&self) -> Result<User, ApiError> {
        fetch_one(&self.client, endpoints::ME, None).await
    }

    /// Profile lookup by email, for callers without a token.
    pub async fn me_by_email(&self, email: &str) -> Result<User, ApiError> {
        let query = QueryParams::new().with("user_email", email);
        fetch_one(&self.client, endpoints::ME, Some(&query)).await
    }

    /// Updates the signed-in profile and refreshes the stored user with the
    /// backend's answer, so later bookings use the new details.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        let updated: Value = send_json(&self.client, Method::PATCH, endpoints::ME, update).await?;
        let user: User = serde_json::from_value(updated.clone())?;
        self.client.session().replace_user(&updated);
        info!("Profile updated for {}", user.email);
        Ok(user)
    }

    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<MessageResponse, ApiError> {
        if new_password.is_empty() {
            return Err(ApiError::validation("The new password must not be empty"));
        }
        let body = json!({ "old_password": old_password, "new_password": new_password });
        let response = send_json(&self.client, Method::POST, endpoints::CHANGE_PASSWORD, &body).await?;
        info!("Password changed");
        Ok(response)
    }

    /// Deletes the signed-in account and, on success, the local session.
    pub async fn delete_account(&self, password: &str) -> Result<MessageResponse, ApiError> {
        let body = json!({ "password": password });
        let response = send_json(&self.client, Method::POST, endpoints::DELETE_ACCOUNT, &body).await?;
        self.client.logout();
        info!("Account deleted");
        Ok(response)
    }
}
