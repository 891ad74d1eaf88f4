//! # Recipe Service
//!
//! This module coordinates the read paths:
//! 1. Listing: one page of recipes by descending rating, plus the total count
//! 2. Search: store-native filters, then deferred filters over the result
//! 3. Detail: a single recipe by identity
//!
//! The service owns no state beyond the shared store handle, so it is cheap
//! to clone into every request.

use std::sync::Arc;
use std::time::Instant;

use data_loader::Recipe;
use pipeline::{FilterPipeline, SearchParams, SearchPlan};
use serde::{Deserialize, Serialize};
use store::RecordStore;
use tracing::{debug, info};

use crate::error::{GET_FAILED, LIST_FAILED, SEARCH_FAILED, ServiceError};

/// Raw pagination values from a query string. Kept as text so malformed
/// values fall back to defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// A validated 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Pagination {
    pub const DEFAULT_PAGE: u64 = 1;
    pub const DEFAULT_LIMIT: u64 = 10;
    pub const MAX_SKIP: u64 = i64::MAX as u64;

    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Coerce raw values; anything that is not a positive integer takes the default.
    pub fn from_params(params: &PageParams) -> Self {
        Self {
            page: parse_positive(params.page.as_deref()).unwrap_or(Self::DEFAULT_PAGE),
            limit: parse_positive(params.limit.as_deref()).unwrap_or(Self::DEFAULT_LIMIT),
        }
    }

    /// Records to skip before this page starts, capped at what a store
    /// can express as a signed 64-bit offset.
    pub fn skip(&self) -> u64 {
        (self.page - 1)
            .saturating_mul(self.limit)
            .min(Self::MAX_SKIP)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE, Self::DEFAULT_LIMIT)
    }
}

/// Leading integer of `raw` (`"2"`, `" 2"`, `"2abc"` all read as 2), if positive.
fn parse_positive(raw: Option<&str>) -> Option<u64> {
    let raw = raw?.trim_start();
    let raw = raw.strip_prefix('+').unwrap_or(raw);
    let digits_end = raw
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(raw.len(), |(i, _)| i);

    raw[..digits_end].parse::<u64>().ok().filter(|n| *n > 0)
}

/// One page of the listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipePage {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub data: Vec<Recipe>,
}

/// Search results; the search is not paginated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub data: Vec<Recipe>,
}

/// Read-side entry point shared by the HTTP handlers and the CLI.
#[derive(Clone)]
pub struct RecipeService {
    store: Arc<dyn RecordStore>,
}

impl RecipeService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Listing: recipes sorted by descending rating, one page at a time.
    pub async fn list(&self, pagination: Pagination) -> Result<RecipePage, ServiceError> {
        let start_time = Instant::now();

        let (total, data) = tokio::try_join!(
            self.store.count(),
            self.store.list_by_rating(pagination.skip(), pagination.limit),
        )
        .map_err(ServiceError::store(LIST_FAILED))?;

        info!(
            "Listed page {} (limit {}): {} of {} recipes in {:.2?}",
            pagination.page,
            pagination.limit,
            data.len(),
            total,
            start_time.elapsed()
        );

        Ok(RecipePage {
            page: pagination.page,
            limit: pagination.limit,
            total,
            data,
        })
    }

    /// Search: run the store-native query, then any deferred filters.
    pub async fn search(&self, params: &SearchParams) -> Result<Vec<Recipe>, ServiceError> {
        let start_time = Instant::now();
        let plan = SearchPlan::build(params);
        debug!("Search plan: {:?}", plan);

        let fetched = self
            .store
            .find(plan.query())
            .await
            .map_err(ServiceError::store(SEARCH_FAILED))?;
        let fetched_count = fetched.len();

        let recipes = match &plan {
            SearchPlan::Native(_) => fetched,
            SearchPlan::Deferred { calories, .. } => FilterPipeline::new()
                .add_filter(*calories)
                .apply(fetched)
                .map_err(|e| ServiceError::Filter(format!("{e:#}")))?,
        };

        info!(
            "Search matched {} recipes ({} from store) in {:.2?}",
            recipes.len(),
            fetched_count,
            start_time.elapsed()
        );
        Ok(recipes)
    }

    /// Detail: one recipe by identity.
    pub async fn get(&self, id: &str) -> Result<Recipe, ServiceError> {
        self.store
            .get(id)
            .await
            .map_err(ServiceError::store(GET_FAILED))?
            .ok_or_else(|| ServiceError::NotFound { id: id.to_string() })
    }
}
