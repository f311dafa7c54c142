// SPDX-License-Identifier: AGPL-3.0
// Happy Tails Core - Type definitions

use serde::{Deserialize, Serialize};

/// Number of records per search page
pub const PAGE_SIZE: usize = 15;

/// Maximum number of leading page buttons a frontend should render
pub const PAGE_DISPLAY_LIMIT: usize = 5;

/// A single adoptable dog as returned by the remote catalog.
///
/// Records are immutable: they are always fetched fresh from the
/// gateway and never mutated locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dog {
    pub id: String,
    pub img: String,
    pub name: String,
    pub age: u32,
    pub zip_code: String,
    pub breed: String,
}

/// Field a search can be sorted on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Breed,
    ZipCode,
}

impl SortField {
    /// Wire name of the field in the sort query parameter
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Breed => "breed",
            Self::ZipCode => "zip",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// Sort key for a search: field plus direction.
///
/// Ordering (including numeric tie-breaks) is entirely server-side;
/// the client never re-sorts a page locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOption {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOption {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Encode as the `sort` query parameter value, e.g. "breed:asc"
    pub fn query_value(&self) -> String {
        format!("{}:{}", self.field.wire_name(), self.direction.wire_name())
    }
}

impl Default for SortOption {
    fn default() -> Self {
        Self {
            field: SortField::Breed,
            direction: SortDirection::Ascending,
        }
    }
}

/// Client-side age filter, applied after records are fetched.
///
/// It never affects the server-reported total, so pagination reflects
/// the unfiltered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgeRange {
    #[default]
    All,
    /// Half-open interval [min, max) in years
    Between(u32, u32),
    /// Lower bound only, e.g. "7+" seniors
    AtLeast(u32),
}

impl AgeRange {
    /// The filter choices offered to the user, in display order
    pub const OPTIONS: [AgeRange; 5] = [
        AgeRange::All,
        AgeRange::Between(0, 1),
        AgeRange::Between(1, 3),
        AgeRange::Between(3, 7),
        AgeRange::AtLeast(7),
    ];

    /// Parse a stored option value ("all", "0-1", "7+", ...)
    pub fn from_value(value: &str) -> Option<Self> {
        if value == "all" {
            return Some(Self::All);
        }
        if let Some(min) = value.strip_suffix('+') {
            return min.parse().ok().map(Self::AtLeast);
        }
        let (min, max) = value.split_once('-')?;
        Some(Self::Between(min.parse().ok()?, max.parse().ok()?))
    }

    /// Option value for persistence and pickers
    pub fn value(&self) -> String {
        match self {
            Self::All => "all".to_string(),
            Self::Between(min, max) => format!("{}-{}", min, max),
            Self::AtLeast(min) => format!("{}+", min),
        }
    }

    /// Human-readable label for this range
    pub fn label(&self) -> String {
        match self {
            Self::All => "All Ages".to_string(),
            Self::Between(0, 1) => "Puppies (0-1 year)".to_string(),
            Self::Between(min, max) => format!("{}-{} years", min, max),
            Self::AtLeast(min) => format!("{}+ years", min),
        }
    }

    /// Whether a dog of the given age falls inside this range
    pub fn matches(&self, age: u32) -> bool {
        match self {
            Self::All => true,
            Self::Between(min, max) => age >= *min && age < *max,
            Self::AtLeast(min) => age >= *min,
        }
    }

    /// Narrow a fetched page to the dogs inside this range
    pub fn filter(&self, dogs: Vec<Dog>) -> Vec<Dog> {
        if *self == Self::All {
            return dogs;
        }
        dogs.into_iter().filter(|d| self.matches(d.age)).collect()
    }
}

/// Parameters for one catalog search request
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilters {
    /// Breed to filter on; None means all breeds
    pub breed: Option<String>,
    /// Page size (number of record ids to return)
    pub size: usize,
    /// Server-side sort key
    pub sort: SortOption,
    /// Zero-based record offset, a multiple of `size` when paging
    pub from: usize,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            breed: None,
            size: PAGE_SIZE,
            sort: SortOption::default(),
            from: 0,
        }
    }
}

/// One page of search results: ids in server order plus the total
/// matching count. `next`/`prev` are opaque continuation tokens the
/// client only checks for presence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub result_ids: Vec<String>,
    pub total: usize,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
}

/// Server-chosen match among a set of favorite ids
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    #[serde(rename = "match")]
    pub match_id: String,
}

/// A location record keyed by ZIP code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub zip_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub state: String,
    pub county: String,
}

/// Filters for a location search
#[derive(Debug, Clone, Default, Serialize)]
pub struct LocationSearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub states: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<usize>,
}

/// Location search result page
#[derive(Debug, Clone, Deserialize)]
pub struct LocationSearchResponse {
    pub results: Vec<Location>,
    pub total: usize,
}

/// Cached profile of the logged-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub logged_in_at: chrono::DateTime<chrono::Utc>,
}

/// Error types for the application
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("File I/O error: {0}")]
    FileIo(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::FileIo(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dog(id: &str, age: u32) -> Dog {
        Dog {
            id: id.to_string(),
            img: format!("https://img.example/{}.jpg", id),
            name: id.to_uppercase(),
            age,
            zip_code: "10001".to_string(),
            breed: "Beagle".to_string(),
        }
    }

    #[test]
    fn test_default_sort_is_breed_ascending() {
        assert_eq!(SortOption::default().query_value(), "breed:asc");
    }

    #[test]
    fn test_sort_query_values() {
        let by_zip = SortOption::new(SortField::ZipCode, SortDirection::Descending);
        assert_eq!(by_zip.query_value(), "zip:desc");
        let by_name = SortOption::new(SortField::Name, SortDirection::Ascending);
        assert_eq!(by_name.query_value(), "name:asc");
    }

    #[test]
    fn test_age_range_round_trip() {
        for option in AgeRange::OPTIONS {
            assert_eq!(AgeRange::from_value(&option.value()), Some(option));
        }
        assert_eq!(AgeRange::from_value("bogus"), None);
    }

    #[test]
    fn test_age_range_is_half_open() {
        let adult = AgeRange::Between(3, 7);
        assert!(!adult.matches(2));
        assert!(adult.matches(3));
        assert!(adult.matches(6));
        assert!(!adult.matches(7));

        let senior = AgeRange::AtLeast(7);
        assert!(senior.matches(7));
        assert!(senior.matches(15));
        assert!(!senior.matches(6));
    }

    #[test]
    fn test_age_filter_is_idempotent() {
        let range = AgeRange::Between(1, 3);
        let dogs = vec![dog("a", 0), dog("b", 1), dog("c", 2), dog("d", 3)];
        let once = range.filter(dogs);
        let twice = range.filter(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn test_search_response_wire_names() {
        let json = r#"{"resultIds":["d1","d2"],"total":37,"next":"/dogs/search?from=15"}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.result_ids, vec!["d1", "d2"]);
        assert_eq!(response.total, 37);
        assert!(response.next.is_some());
        assert!(response.prev.is_none());
    }

    #[test]
    fn test_match_response_wire_name() {
        let response: MatchResponse = serde_json::from_str(r#"{"match":"d1"}"#).unwrap();
        assert_eq!(response.match_id, "d1");
    }
}
