use common::model::auth::{AuthResponse, LoginRequest, RegisterRequest, User};

use super::{ApiClient, ApiError};

pub async fn login(api: &ApiClient, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
    api.post_json("auth/login", request).await
}

pub async fn register(
    api: &ApiClient,
    request: &RegisterRequest,
) -> Result<AuthResponse, ApiError> {
    api.post_json("auth/register", request).await
}

/// Validates the stored token and returns the account it belongs to.
pub async fn me(api: &ApiClient) -> Result<User, ApiError> {
    api.get_json("auth/me").await
}
