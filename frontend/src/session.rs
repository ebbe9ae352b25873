//! Signed-in state and the credentials persisted in local storage.
//!
//! The token is stored raw under `token`; the user record as JSON under
//! `user`. Both are written together on sign-in and removed together on
//! sign-out or on any `401`.

use common::model::auth::{AuthResponse, User};
use common::route::AuthPhase;
use gloo_storage::{LocalStorage, Storage};
use log::{debug, info, warn};

use crate::api::{auth, ApiClient, ApiError};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// The stored token has not been checked yet.
    Initializing,
    Anonymous,
    Authenticated(User),
}

impl SessionState {
    pub fn phase(&self) -> AuthPhase {
        match self {
            SessionState::Initializing => AuthPhase::Initializing,
            SessionState::Anonymous => AuthPhase::Anonymous,
            SessionState::Authenticated(_) => AuthPhase::Authenticated,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

pub fn stored_token() -> Option<String> {
    LocalStorage::raw()
        .get_item(TOKEN_KEY)
        .ok()
        .flatten()
        .filter(|token| !token.is_empty())
}

fn has_stored_user() -> bool {
    LocalStorage::raw().get_item(USER_KEY).ok().flatten().is_some()
}

pub fn store_credentials(auth: &AuthResponse) -> Result<(), ApiError> {
    LocalStorage::raw()
        .set_item(TOKEN_KEY, &auth.access_token)
        .map_err(|e| ApiError::Storage(format!("{e:?}")))?;
    LocalStorage::set(USER_KEY, &auth.user).map_err(|e| ApiError::Storage(e.to_string()))
}

pub fn clear_credentials() {
    LocalStorage::delete(TOKEN_KEY);
    LocalStorage::delete(USER_KEY);
}

/// Checks stored credentials once against `/auth/me`.
///
/// Anything but a successful answer clears them.
pub async fn initialize(api: &ApiClient) -> SessionState {
    if stored_token().is_none() || !has_stored_user() {
        debug!("no stored credentials");
        return SessionState::Anonymous;
    }
    match auth::me(api).await {
        Ok(user) => {
            info!("session restored for {}", user.email);
            SessionState::Authenticated(user)
        }
        Err(err) => {
            warn!("stored token rejected: {err}");
            clear_credentials();
            SessionState::Anonymous
        }
    }
}

/// Persists a successful login or registration and returns its user.
pub fn establish(auth: AuthResponse) -> Result<User, ApiError> {
    store_credentials(&auth)?;
    info!("signed in as {}", auth.user.email);
    Ok(auth.user)
}
