// SPDX-License-Identifier: AGPL-3.0
// Happy Tails Core - Remote catalog gateway
//
// Thin request/response wrapper over the adoption service HTTP API.
// The session credential is a cookie held by the client's cookie store
// and attached to every request automatically; no operation takes or
// returns a token. Every call is a single attempt with no retry.

use crate::types::{
    AppError, Dog, Location, LocationSearchFilters, LocationSearchResponse, MatchResponse,
    SearchFilters, SearchResponse,
};
use reqwest::Client;

/// Base URL of the production adoption service
pub const DEFAULT_BASE_URL: &str = "https://frontend-take-home-service.fetch.com";

/// Client for the remote dog catalog
pub struct ApiClient {
    http_client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a specific base URL (used by tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http_client = Client::builder()
            // The service authenticates via a session cookie set on login
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Log in with name and email.
    ///
    /// Success is inferred purely from the HTTP status; the server sets
    /// the session cookie out-of-band and returns no token payload.
    pub async fn login(&self, name: &str, email: &str) -> Result<(), AppError> {
        let url = format!("{}/auth/login", self.base_url);
        let body = serde_json::json!({ "name": name, "email": email });

        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("Login request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Auth(format!(
                "Login failed: {}",
                response.status()
            )));
        }

        tracing::info!("Login successful, session cookie set");
        Ok(())
    }

    /// Invalidate the server-side session.
    ///
    /// Local state cleanup (favorites, cached profile) is the caller's
    /// responsibility, not this operation's.
    pub async fn logout(&self) -> Result<(), AppError> {
        let url = format!("{}/auth/logout", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("Logout request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Auth(format!(
                "Logout failed: {}",
                response.status()
            )));
        }

        Ok(())
    }

    /// Fetch the list of available breeds, in server order
    pub async fn fetch_breeds(&self) -> Result<Vec<String>, AppError> {
        let url = format!("{}/dogs/breeds", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Fetch(format!("Failed to fetch breeds: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Fetch(format!(
                "Failed to fetch breeds: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Serialization(format!("Failed to parse breeds: {}", e)))
    }

    /// Search the catalog, returning a page of record ids plus the
    /// total matching count. The breed parameter is omitted entirely
    /// when no breed filter is set.
    pub async fn search_dogs(&self, filters: &SearchFilters) -> Result<SearchResponse, AppError> {
        let url = format!("{}/dogs/search", self.base_url);

        let mut query: Vec<(&str, String)> = vec![
            ("size", filters.size.to_string()),
            ("sort", filters.sort.query_value()),
            ("from", filters.from.to_string()),
        ];
        if let Some(breed) = &filters.breed {
            query.push(("breeds", breed.clone()));
        }

        let response = self
            .http_client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| AppError::Fetch(format!("Failed to search dogs: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Fetch(format!(
                "Failed to search dogs: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Serialization(format!("Failed to parse search result: {}", e)))
    }

    /// Fetch full records for a list of dog ids.
    ///
    /// Fails with a fetch error on any failure rather than silently
    /// returning an empty list, so callers can surface the problem.
    pub async fn fetch_dogs(&self, ids: &[String]) -> Result<Vec<Dog>, AppError> {
        let url = format!("{}/dogs", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .json(&ids)
            .send()
            .await
            .map_err(|e| AppError::Fetch(format!("Failed to fetch dog details: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Fetch(format!(
                "Failed to fetch dog details: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Serialization(format!("Failed to parse dog details: {}", e)))
    }

    /// Ask the server to pick a match from a set of favorite ids
    pub async fn match_dogs(&self, ids: &[String]) -> Result<MatchResponse, AppError> {
        let url = format!("{}/dogs/match", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .json(&ids)
            .send()
            .await
            .map_err(|e| AppError::Fetch(format!("Failed to find match: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Fetch(format!(
                "Failed to find match: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Serialization(format!("Failed to parse match: {}", e)))
    }

    /// Probe whether the stored session cookie is still valid.
    ///
    /// The service has no dedicated session-check endpoint, so this
    /// hits the low-cost breeds endpoint and reports the outcome as a
    /// boolean. Never errors.
    pub async fn check_auth(&self) -> bool {
        match self.fetch_breeds().await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("Auth probe failed: {}", e);
                false
            }
        }
    }

    /// Fetch location records for a list of ZIP codes
    pub async fn fetch_locations(&self, zip_codes: &[String]) -> Result<Vec<Location>, AppError> {
        let url = format!("{}/locations", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .json(&zip_codes)
            .send()
            .await
            .map_err(|e| AppError::Fetch(format!("Failed to fetch locations: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Fetch(format!(
                "Failed to fetch locations: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Serialization(format!("Failed to parse locations: {}", e)))
    }

    /// Search locations by city and/or state
    pub async fn search_locations(
        &self,
        filters: &LocationSearchFilters,
    ) -> Result<LocationSearchResponse, AppError> {
        let url = format!("{}/locations/search", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .json(filters)
            .send()
            .await
            .map_err(|e| AppError::Fetch(format!("Failed to search locations: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Fetch(format!(
                "Failed to search locations: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Serialization(format!("Failed to parse locations: {}", e)))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
