// SPDX-License-Identifier: AGPL-3.0
// Happy Tails Core - Search coordinator
//
// Owns the current filter/sort/page state and drives the two-step
// fetch: search for a page of ids, then resolve them to full records.
// The age-range filter is applied client-side after the fetch, so the
// server-reported total (and therefore the page count) reflects the
// unfiltered result set.

use crate::api::ApiClient;
use crate::types::{AgeRange, AppError, Dog, SearchFilters, SortOption, PAGE_SIZE};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Sentinel breed value meaning "no breed filter"
pub const ALL_BREEDS: &str = "all";

/// Lifecycle of the search screen
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    /// A gateway call failed; the message is user-visible
    Error(String),
}

/// Snapshot of everything the search screen renders
#[derive(Debug, Clone)]
pub struct SearchState {
    pub phase: SearchPhase,
    /// Breed choices, prefixed with the "all" sentinel once loaded
    pub breeds: Vec<String>,
    pub selected_breed: String,
    pub sort: SortOption,
    pub age_range: AgeRange,
    /// The currently displayed page, already age-filtered
    pub dogs: Vec<Dog>,
    /// Raw server total for the unfiltered query
    pub total: usize,
    pub current_page: usize,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            phase: SearchPhase::Idle,
            breeds: Vec::new(),
            selected_breed: ALL_BREEDS.to_string(),
            sort: SortOption::default(),
            age_range: AgeRange::All,
            dogs: Vec::new(),
            total: 0,
            current_page: 0,
        }
    }
}

/// Drives breed loading and paginated searches for the catalog screen
pub struct SearchCoordinator {
    state: RwLock<SearchState>,
    client: Arc<ApiClient>,
    /// Monotonic sequence for in-flight searches; a response whose
    /// sequence is no longer the latest is discarded
    seq: AtomicU64,
}

impl SearchCoordinator {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            state: RwLock::new(SearchState::default()),
            client,
            seq: AtomicU64::new(0),
        }
    }

    /// Current state, cloned for rendering
    pub fn snapshot(&self) -> SearchState {
        self.state.read().unwrap().clone()
    }

    pub fn phase(&self) -> SearchPhase {
        self.state.read().unwrap().phase.clone()
    }

    pub fn dogs(&self) -> Vec<Dog> {
        self.state.read().unwrap().dogs.clone()
    }

    pub fn breeds(&self) -> Vec<String> {
        self.state.read().unwrap().breeds.clone()
    }

    pub fn current_page(&self) -> usize {
        self.state.read().unwrap().current_page
    }

    /// Page count derived from the raw server total
    pub fn total_pages(&self) -> usize {
        total_pages(self.state.read().unwrap().total)
    }

    /// Load the breed list once. No-op when breeds are already loaded.
    /// On failure the breed list stays empty and no search is
    /// attempted; the error message is also recorded in the phase.
    pub async fn load_breeds(&self) -> Result<(), AppError> {
        if !self.state.read().unwrap().breeds.is_empty() {
            return Ok(());
        }

        self.state.write().unwrap().phase = SearchPhase::Loading;

        match self.client.fetch_breeds().await {
            Ok(breed_list) => {
                let mut state = self.state.write().unwrap();
                let mut breeds = vec![ALL_BREEDS.to_string()];
                breeds.extend(breed_list);
                state.breeds = breeds;
                state.phase = SearchPhase::Ready;
                Ok(())
            }
            Err(e) => {
                self.state.write().unwrap().phase = SearchPhase::Error(e.to_string());
                Err(e)
            }
        }
    }

    /// Run a search at the given record offset with the current
    /// filters. On success the displayed page, raw total, and current
    /// page index are replaced atomically; on failure the prior page
    /// stays untouched and the phase carries the error message.
    pub async fn search(&self, from: usize) -> Result<(), AppError> {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        let (filters, age_range) = {
            let mut state = self.state.write().unwrap();
            state.phase = SearchPhase::Loading;

            let breed = if state.selected_breed == ALL_BREEDS {
                None
            } else {
                Some(state.selected_breed.clone())
            };
            let filters = SearchFilters {
                breed,
                size: PAGE_SIZE,
                sort: state.sort,
                from,
            };
            (filters, state.age_range)
        };

        let result = self.run_search(&filters).await;

        // Discard anything that is no longer the latest request,
        // success and failure alike
        if self.seq.load(Ordering::SeqCst) != seq {
            tracing::debug!("Discarding stale search result (seq {})", seq);
            return Ok(());
        }

        match result {
            Ok((total, dogs)) => {
                let mut state = self.state.write().unwrap();
                state.dogs = age_range.filter(dogs);
                state.total = total;
                state.current_page = page_for_offset(from);
                state.phase = SearchPhase::Ready;
                Ok(())
            }
            Err(e) => {
                self.state.write().unwrap().phase = SearchPhase::Error(e.to_string());
                Err(e)
            }
        }
    }

    /// The two-step fetch: ids first, then full records, strictly
    /// sequential. An empty id page skips the record fetch.
    async fn run_search(&self, filters: &SearchFilters) -> Result<(usize, Vec<Dog>), AppError> {
        let search_result = self.client.search_dogs(filters).await?;

        let dogs = if search_result.result_ids.is_empty() {
            Vec::new()
        } else {
            self.client.fetch_dogs(&search_result.result_ids).await?
        };

        Ok((search_result.total, dogs))
    }

    /// Change the breed filter, reset to the first page, and search
    pub async fn set_breed(&self, breed: &str) -> Result<(), AppError> {
        self.state.write().unwrap().selected_breed = breed.to_string();
        self.search(0).await
    }

    /// Change the sort key, reset to the first page, and search
    pub async fn set_sort(&self, sort: SortOption) -> Result<(), AppError> {
        self.state.write().unwrap().sort = sort;
        self.search(0).await
    }

    /// Change the age-range filter, reset to the first page, and search
    pub async fn set_age_range(&self, age_range: AgeRange) -> Result<(), AppError> {
        self.state.write().unwrap().age_range = age_range;
        self.search(0).await
    }

    /// Jump to a page. The caller validates the page index against
    /// `total_pages()` first; no clamping happens here.
    pub async fn go_to_page(&self, page: usize) -> Result<(), AppError> {
        self.search(page * PAGE_SIZE).await
    }
}

/// Page count for a raw server total: ceil(total / PAGE_SIZE)
pub fn total_pages(total: usize) -> usize {
    total.div_ceil(PAGE_SIZE)
}

/// Page index containing the given record offset
pub fn page_for_offset(from: usize) -> usize {
    from / PAGE_SIZE
}

/// One slot in a rendered pagination strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEntry {
    Page(usize),
    /// A run of hidden pages, rendered as an ellipsis
    Gap,
}

/// Compute the visible page strip: the first `limit` pages, the last
/// page, and the current page's neighbors, with hidden runs collapsed
/// into single gaps.
pub fn page_display(current: usize, total_pages: usize, limit: usize) -> Vec<PageEntry> {
    let mut entries = Vec::new();

    for page in 0..total_pages {
        let visible =
            page < limit || page == total_pages - 1 || page.abs_diff(current) <= 1;

        if visible {
            entries.push(PageEntry::Page(page));
        } else if !matches!(entries.last(), Some(PageEntry::Gap)) {
            entries.push(PageEntry::Gap);
        }
    }

    entries
}
