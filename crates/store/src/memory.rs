//! In-process record store.
//!
//! Evaluates queries with the same semantics as the document store:
//! case-insensitive substring matches, numeric comparisons that never match
//! a missing field, and a listing ordered by descending rating with unrated
//! recipes last.

use std::cmp::Ordering;

use async_trait::async_trait;
use data_loader::{Recipe, RecipeRecord};
use mongodb::bson::oid::ObjectId;
use pipeline::StoreQuery;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::Result;
use crate::{IndexSpec, RecordStore};

/// Recipes held in memory, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    recipes: RwLock<Vec<Recipe>>,
    indexes: RwLock<Vec<IndexSpec>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from already-identified recipes (tests and fixtures).
    pub fn with_recipes(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes: RwLock::new(recipes),
            indexes: RwLock::new(Vec::new()),
        }
    }

    /// Indexes requested so far.
    pub async fn indexes(&self) -> Vec<IndexSpec> {
        self.indexes.read().await.clone()
    }
}

/// Descending rating, `None` after every rated recipe.
fn by_rating_desc(a: &Recipe, b: &Recipe) -> Ordering {
    b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal)
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.recipes.read().await.len() as u64)
    }

    async fn list_by_rating(&self, skip: u64, limit: u64) -> Result<Vec<Recipe>> {
        let mut sorted = self.recipes.read().await.clone();
        sorted.sort_by(by_rating_desc);

        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(sorted.into_iter().skip(skip).take(limit).collect())
    }

    async fn find(&self, query: &StoreQuery) -> Result<Vec<Recipe>> {
        let recipes = self.recipes.read().await;
        let matched: Vec<Recipe> = recipes
            .iter()
            .filter(|recipe| query.matches(recipe))
            .cloned()
            .collect();

        debug!("Memory query matched {} of {} recipes", matched.len(), recipes.len());
        Ok(matched)
    }

    async fn get(&self, id: &str) -> Result<Option<Recipe>> {
        if ObjectId::parse_str(id).is_err() {
            return Ok(None);
        }
        let recipes = self.recipes.read().await;
        Ok(recipes.iter().find(|recipe| recipe.id == id).cloned())
    }

    async fn insert_many(&self, records: &[RecipeRecord]) -> Result<usize> {
        let mut recipes = self.recipes.write().await;
        recipes.extend(
            records
                .iter()
                .map(|record| Recipe::new(ObjectId::new().to_hex(), record.clone())),
        );
        Ok(records.len())
    }

    async fn create_indexes(&self, indexes: &[IndexSpec]) -> Result<()> {
        let mut existing = self.indexes.write().await;
        for index in indexes {
            if !existing.contains(index) {
                existing.push(*index);
            }
        }
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.recipes.write().await.clear();
        self.indexes.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RECIPE_INDEXES;
    use data_loader::{RawRecipe, shape_record};
    use pipeline::{SearchParams, SearchPlan};
    use serde_json::json;

    fn record(title: &str, rating: Option<f64>) -> RecipeRecord {
        shape_record(&RawRecipe::from(json!({ "title": title, "rating": rating })))
    }

    /// 20 recipes rated 0.1, 0.2, ... 2.0, inserted in ascending order.
    async fn create_test_store() -> MemoryStore {
        let store = MemoryStore::new();
        let records: Vec<RecipeRecord> = (1..=20)
            .map(|i| record(&format!("Recipe {i}"), Some(i as f64 / 10.0)))
            .collect();
        store.insert_many(&records).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_second_page_of_fifteen() {
        let store = create_test_store().await;

        let page = store.list_by_rating(15, 15).await.unwrap();
        let titles: Vec<_> = page.iter().map(|r| r.title.clone().unwrap()).collect();

        assert_eq!(store.count().await.unwrap(), 20);
        assert_eq!(
            titles,
            vec!["Recipe 5", "Recipe 4", "Recipe 3", "Recipe 2", "Recipe 1"]
        );
    }

    #[tokio::test]
    async fn test_unrated_recipes_sort_last() {
        let store = MemoryStore::new();
        store
            .insert_many(&[record("Unrated", None), record("Good", Some(4.0)), record("Best", Some(5.0))])
            .await
            .unwrap();

        let page = store.list_by_rating(0, 10).await.unwrap();
        let titles: Vec<_> = page.iter().map(|r| r.title.as_deref().unwrap()).collect();
        assert_eq!(titles, vec!["Best", "Good", "Unrated"]);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let store = create_test_store().await;
        assert!(store.list_by_rating(40, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_uses_query_semantics() {
        let store = create_test_store().await;
        let plan = SearchPlan::build(&SearchParams {
            title: Some("recipe 1".into()),
            rating: Some(">=1.5".into()),
            ..Default::default()
        });

        let found = store.find(plan.query()).await.unwrap();
        let titles: Vec<_> = found.iter().map(|r| r.title.as_deref().unwrap()).collect();
        assert_eq!(titles, vec!["Recipe 15", "Recipe 16", "Recipe 17", "Recipe 18", "Recipe 19"]);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let store = create_test_store().await;
        let first = store.list_by_rating(0, 1).await.unwrap().remove(0);

        let found = store.get(&first.id).await.unwrap();
        assert_eq!(found, Some(first));

        assert_eq!(store.get("not-an-id").await.unwrap(), None);
        assert_eq!(store.get(&ObjectId::new().to_hex()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_inserted_ids_are_unique() {
        let store = create_test_store().await;
        let mut ids: Vec<_> = store
            .list_by_rating(0, 100)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[tokio::test]
    async fn test_indexes_and_clear() {
        let store = create_test_store().await;
        store.create_indexes(RECIPE_INDEXES).await.unwrap();
        store.create_indexes(RECIPE_INDEXES).await.unwrap();
        assert_eq!(store.indexes().await, RECIPE_INDEXES.to_vec());

        store.clear().await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
        assert!(store.indexes().await.is_empty());
    }
}
