// SPDX-License-Identifier: AGPL-3.0
// Happy Tails Core - Shared logic for all frontends
//
// This crate provides:
// - Dog, SearchFilters, AgeRange and AppError types
// - ApiClient for the remote adoption service
// - KvStore for simple local persistence
// - FavoritesCoordinator for the persisted favorite set
// - SearchCoordinator for the browse/filter/paginate flow
// - Session for auth state and logout cleanup
//
// Frontend-specific code lives in separate crates.

pub mod api;
pub mod favorites;
pub mod search;
pub mod session;
pub mod storage;
pub mod types;

// Re-export commonly used items
pub use api::{ApiClient, DEFAULT_BASE_URL};
pub use favorites::FavoritesCoordinator;
pub use search::{
    page_display, page_for_offset, total_pages, PageEntry, SearchCoordinator, SearchPhase,
    SearchState, ALL_BREEDS,
};
pub use session::{AuthState, Session};
pub use storage::{KvStore, FAVORITES_KEY, PROFILE_KEY};
pub use types::{
    AgeRange, AppError, Dog, Location, LocationSearchFilters, LocationSearchResponse,
    MatchResponse, SearchFilters, SearchResponse, SortDirection, SortField, SortOption,
    UserProfile, PAGE_DISPLAY_LIMIT, PAGE_SIZE,
};
