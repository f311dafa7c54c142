// SPDX-License-Identifier: AGPL-3.0
// Happy Tails Core - Session state
//
// Tracks whether the user is authenticated and owns the local-state
// wipe on logout. The session credential itself is a cookie inside the
// ApiClient; this type never sees a token value.

use crate::api::ApiClient;
use crate::favorites::FavoritesCoordinator;
use crate::storage::{KvStore, PROFILE_KEY};
use crate::types::{AppError, UserProfile};
use std::sync::{Arc, RwLock};

/// Authentication state, as far as the client can tell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    /// Startup state, before the probe has run
    #[default]
    Unknown,
    Authenticated,
    Unauthenticated,
}

/// Session/auth coordinator. Screens requiring authentication observe
/// `state()` and redirect to the login entry point when it becomes
/// `Unauthenticated`; that routing lives in the frontends.
pub struct Session {
    client: Arc<ApiClient>,
    favorites: Arc<FavoritesCoordinator>,
    store: KvStore,
    state: RwLock<AuthState>,
}

impl Session {
    pub fn new(
        client: Arc<ApiClient>,
        favorites: Arc<FavoritesCoordinator>,
        store: KvStore,
    ) -> Self {
        Self {
            client,
            favorites,
            store,
            state: RwLock::new(AuthState::Unknown),
        }
    }

    pub fn state(&self) -> AuthState {
        *self.state.read().unwrap()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == AuthState::Authenticated
    }

    /// Resolve the startup `Unknown` state by probing the server with
    /// a low-cost authenticated call. The service has no dedicated
    /// session-check endpoint, so this is a heuristic.
    pub async fn bootstrap(&self) -> bool {
        let logged_in = self.client.check_auth().await;
        let mut state = self.state.write().unwrap();
        *state = if logged_in {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        };
        logged_in
    }

    /// Log in. On success the session becomes `Authenticated` and the
    /// profile is cached locally; favorites are left as they were. On
    /// failure the session becomes `Unauthenticated` and the error
    /// propagates for the login screen to display.
    pub async fn login(&self, name: &str, email: &str) -> Result<(), AppError> {
        match self.client.login(name, email).await {
            Ok(()) => {
                *self.state.write().unwrap() = AuthState::Authenticated;

                let profile = UserProfile {
                    name: name.to_string(),
                    email: email.to_string(),
                    logged_in_at: chrono::Utc::now(),
                };
                let content = serde_json::to_string(&profile).map_err(|e| {
                    AppError::Serialization(format!("Failed to serialize profile: {}", e))
                })?;
                self.store.set(PROFILE_KEY, &content)?;

                Ok(())
            }
            Err(e) => {
                *self.state.write().unwrap() = AuthState::Unauthenticated;
                Err(e)
            }
        }
    }

    /// Log out: tell the server, then wipe local state. The wipe
    /// (session state, favorite set, cached profile) happens even when
    /// the network call fails.
    pub async fn logout(&self) -> Result<(), AppError> {
        if let Err(e) = self.client.logout().await {
            tracing::warn!("Server logout failed, clearing local state anyway: {}", e);
        }

        *self.state.write().unwrap() = AuthState::Unauthenticated;
        self.favorites.clear()?;
        self.store.remove(PROFILE_KEY)?;

        Ok(())
    }

    /// The locally cached profile, if a login happened on this device
    pub fn profile(&self) -> Option<UserProfile> {
        let content = self.store.get(PROFILE_KEY).ok().flatten()?;
        match serde_json::from_str(&content) {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::warn!("Failed to parse cached profile: {}", e);
                None
            }
        }
    }
}
