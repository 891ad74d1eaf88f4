//! End-to-end tests of the HTTP surface against an in-memory store.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use data_loader::{RawRecipe, Recipe, RecipeRecord, prepare_records};
use pipeline::StoreQuery;
use serde_json::{Value, json};
use server::{AppState, build_router};
use store::{IndexSpec, MemoryStore, RecordStore, StoreError};
use tower::ServiceExt;

// ============================================================================
// Helpers
// ============================================================================

async fn seeded_store(rows: Vec<Value>) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    let raw: Vec<RawRecipe> = rows.into_iter().map(RawRecipe::from).collect();
    store.insert_many(&prepare_records(&raw)).await.unwrap();
    store
}

fn app(store: Arc<dyn RecordStore>) -> Router {
    build_router(AppState::new(store))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

fn titles(data: &Value) -> Vec<&str> {
    data.as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect()
}

/// A store whose every call fails, standing in for an unreachable database.
struct FailingStore;

#[async_trait]
impl RecordStore for FailingStore {
    fn name(&self) -> &str {
        "failing"
    }

    async fn count(&self) -> store::Result<u64> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn list_by_rating(&self, _skip: u64, _limit: u64) -> store::Result<Vec<Recipe>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn find(&self, _query: &StoreQuery) -> store::Result<Vec<Recipe>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn get(&self, _id: &str) -> store::Result<Option<Recipe>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn insert_many(&self, _records: &[RecipeRecord]) -> store::Result<usize> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn create_indexes(&self, _indexes: &[IndexSpec]) -> store::Result<()> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn clear(&self) -> store::Result<()> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_listing_second_page() {
    let rows = (1..=20)
        .map(|i| json!({ "title": format!("Recipe {i}"), "rating": i as f64 / 4.0 }))
        .collect();
    let store = seeded_store(rows).await;

    let (status, body) = get_json(app(store), "/recipes?page=2&limit=15").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 2);
    assert_eq!(body["limit"], 15);
    assert_eq!(body["total"], 20);
    assert_eq!(
        titles(&body["data"]),
        vec!["Recipe 5", "Recipe 4", "Recipe 3", "Recipe 2", "Recipe 1"]
    );
}

#[tokio::test]
async fn test_listing_defaults_and_bad_params() {
    let rows = (1..=12).map(|i| json!({ "title": format!("R{i}") })).collect();
    let store = seeded_store(rows).await;

    let (_, body) = get_json(app(store.clone()), "/recipes").await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 10);
    assert_eq!(body["data"].as_array().unwrap().len(), 10);

    let (status, body) = get_json(app(store), "/recipes?page=zero&limit=-3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 10);
}

#[tokio::test]
async fn test_listing_store_failure() {
    let (status, body) = get_json(app(Arc::new(FailingStore)), "/recipes").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch recipes");
    assert!(body["details"].as_str().unwrap().contains("connection refused"));
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn test_search_calories() {
    let store = seeded_store(vec![
        json!({ "title": "Light", "nutrients": { "calories": "245.5 kcal" } }),
        json!({ "title": "Heavy", "nutrients": { "calories": "389 kcal" } }),
        json!({ "title": "Unknown" }),
    ])
    .await;

    let (status, body) = get_json(app(store), "/recipes/search?calories=%3C%3D300").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body["data"]), vec!["Light"]);
}

#[tokio::test]
async fn test_search_combined_filters() {
    let store = seeded_store(vec![
        json!({ "title": "Sweet Potato Pie", "cuisine": "Southern Recipes", "rating": 4.8, "total_time": 115 }),
        json!({ "title": "Potato Salad", "cuisine": "Southern Recipes", "rating": 4.2, "total_time": 30 }),
        json!({ "title": "Peach Cobbler", "cuisine": "Southern Recipes", "rating": 4.9, "total_time": 60 }),
    ])
    .await;

    let (_, body) = get_json(app(store.clone()), "/recipes/search?title=potato&rating=%3E%3D4.5").await;
    assert_eq!(titles(&body["data"]), vec!["Sweet Potato Pie"]);

    let (_, body) = get_json(app(store.clone()), "/recipes/search?cuisine=southern&total_time=%3C%3D60").await;
    let mut found = titles(&body["data"]);
    found.sort_unstable();
    assert_eq!(found, vec!["Peach Cobbler", "Potato Salad"]);

    let (_, body) = get_json(app(store), "/recipes/search").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_search_store_failure() {
    let (status, body) = get_json(app(Arc::new(FailingStore)), "/recipes/search?title=pie").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to search recipes");
}

// ============================================================================
// Detail
// ============================================================================

#[tokio::test]
async fn test_detail_json() {
    let store = seeded_store(vec![json!({ "title": "Gumbo", "cuisine": "Cajun" })]).await;
    let id = store.list_by_rating(0, 1).await.unwrap().remove(0).id;

    let (status, body) = get_json(app(store), &format!("/recipes/{id}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["_id"], id.as_str());
    assert_eq!(body["title"], "Gumbo");
}

#[tokio::test]
async fn test_detail_not_found() {
    let store = seeded_store(vec![json!({ "title": "Gumbo" })]).await;

    let (status, body) = get_json(app(store.clone()), "/recipes/65f1c0ffee0000000000abcd").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Recipe not found");

    let (status, _) = get_json(app(store), "/recipes/not-an-id").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_detail_store_failure() {
    let (status, body) = get_json(app(Arc::new(FailingStore)), "/recipes/65f1c0ffee0000000000abcd").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch recipe");
}

#[tokio::test]
async fn test_html_page() {
    let store = seeded_store(vec![json!({
        "title": "Sweet Potato Pie",
        "total_time": 115,
        "nutrients": { "calories": "389 kcal" }
    })])
    .await;
    let id = store.list_by_rating(0, 1).await.unwrap().remove(0).id;

    let (status, html) = get(app(store.clone()), &format!("/recipe/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<h1>Sweet Potato Pie</h1>"));
    assert!(html.contains("389 kcal"));

    let (status, html) = get(app(store), "/recipe/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Recipe not found"));
}
