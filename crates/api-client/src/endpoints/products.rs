//! Product endpoints
//!
//! Visual search against an uploaded image, product details, and the
//! authenticated user's search history.

use crate::client::SnaplookClient;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};

/// Default number of matches requested by a search
pub const DEFAULT_SEARCH_LIMIT: u32 = 5;

/// Default similarity threshold for a search
pub const DEFAULT_SEARCH_THRESHOLD: f64 = 0.5;

/// Default number of history entries returned
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// Products API interface
#[derive(Clone)]
pub struct ProductsApi {
    client: SnaplookClient,
}

impl ProductsApi {
    /// Create a new products API interface
    pub(crate) fn new(client: SnaplookClient) -> Self {
        Self { client }
    }

    /// Search for products similar to an uploaded image
    ///
    /// GET /products/search/{image_id}?limit=&threshold=
    pub async fn search_by_image(
        &self,
        image_id: &str,
        params: &SearchParams,
    ) -> ApiResult<SearchResponse> {
        self.client.get(&search_path(image_id, params)).await
    }

    /// Get details for a single product
    ///
    /// GET /products/{product_id}
    pub async fn get(&self, product_id: &str) -> ApiResult<ProductDetails> {
        let path = format!("products/{product_id}");
        self.client.get(&path).await
    }

    /// Get the authenticated user's search history
    ///
    /// GET /products/history?limit= — requires a bearer token.
    pub async fn history(&self, limit: Option<u32>) -> ApiResult<Vec<SearchHistoryItem>> {
        self.client.get(&history_path(limit)).await
    }
}

/// Path with query for a search request
fn search_path(image_id: &str, params: &SearchParams) -> String {
    format!("products/search/{image_id}?{}", params.to_query())
}

/// Path with query for a history request, applying the default limit
fn history_path(limit: Option<u32>) -> String {
    format!(
        "products/history?limit={}",
        limit.unwrap_or(DEFAULT_HISTORY_LIMIT)
    )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Parameters for an image search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    /// Maximum number of matches (the server accepts 1-20)
    pub limit: u32,
    /// Similarity threshold in `0.0..=1.0`; matches scoring below it are
    /// dropped server-side
    pub threshold: f64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SEARCH_LIMIT,
            threshold: DEFAULT_SEARCH_THRESHOLD,
        }
    }
}

impl SearchParams {
    /// Create params with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the match limit
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set the similarity threshold
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Serialize as a query string, always in `limit`, `threshold` order
    #[must_use]
    pub fn to_query(&self) -> String {
        format!("limit={}&threshold={}", self.limit, self.threshold)
    }
}

/// Search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Search history entry the results were recorded under, when
    /// authenticated
    pub search_id: Option<i64>,
    /// Matched products, best first
    pub matches: Vec<ProductMatch>,
    /// Human-readable status message
    pub message: String,
}

/// A matched product with its similarity score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductMatch {
    pub product_id: String,
    /// Cosine similarity in `0.0..=1.0`
    pub similarity_score: f64,
    pub brand: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub currency: String,
    pub image_url: String,
    pub product_url: String,
}

/// Product details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetails {
    pub id: String,
    pub brand: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub currency: String,
    pub image_url: String,
    pub product_url: String,
}

/// A search history entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHistoryItem {
    /// History entry ID
    pub id: i64,
    /// Stored image filename the search ran against
    pub image_path: String,
    /// ISO-8601 timestamp of the search
    pub search_date: String,
    /// Number of results recorded for the search
    pub result_count: u32,
}
