//! Document database backend.
//!
//! Recipes live in one collection. The store assigns each document an
//! `ObjectId`, which is exposed to callers as its hex string. `created_at`
//! is kept as a native date in the collection.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use data_loader::{Recipe, RecipeRecord};
use futures::TryStreamExt;
use mongodb::bson::{self, DateTime as BsonDateTime, Document, doc, oid::ObjectId};
use mongodb::{Client, Collection, IndexModel};
use pipeline::{FieldPredicate, StoreQuery};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::{IndexSpec, RecordStore};

/// The driver encodes `skip` as a signed 64-bit integer.
const MAX_SKIP: u64 = i64::MAX as u64;

/// A recipe document as read back from the collection.
#[derive(Debug, Deserialize)]
struct StoredRecipe {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(flatten)]
    record: RecipeRecord,
}

impl From<StoredRecipe> for Recipe {
    fn from(stored: StoredRecipe) -> Self {
        Recipe::new(stored.id.to_hex(), stored.record)
    }
}

/// Connection handle for the recipe collection.
///
/// Opened once at startup; the driver pools connections internally, so the
/// handle is shared by every request instead of reconnecting.
#[derive(Clone)]
pub struct MongoStore {
    collection: Collection<Document>,
}

impl MongoStore {
    /// Connect and verify the server answers a ping.
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        let db = client.database(database);
        db.run_command(doc! { "ping": 1 }).await?;
        info!("Connected to document store, using {}.{}", database, collection);

        Ok(Self {
            collection: db.collection(collection),
        })
    }
}

/// Encode a record for insertion, storing `created_at` as a native date.
pub fn to_document(record: &RecipeRecord) -> Result<Document> {
    let mut document = bson::to_document(record)?;
    document.insert(
        "created_at",
        BsonDateTime::from_millis(record.created_at.timestamp_millis()),
    );
    Ok(document)
}

/// Decode a stored document. Native dates and RFC 3339 strings are both
/// accepted for `created_at`.
pub fn from_document(mut document: Document) -> Result<Recipe> {
    if let Ok(date) = document.get_datetime("created_at") {
        let created_at =
            DateTime::<Utc>::from_timestamp_millis(date.timestamp_millis()).unwrap_or_default();
        document.insert("created_at", created_at.to_rfc3339());
    }
    let stored: StoredRecipe = bson::from_document(document)?;
    Ok(stored.into())
}

fn decode_all(documents: Vec<Document>) -> Result<Vec<Recipe>> {
    documents.into_iter().map(from_document).collect()
}

/// Translate a store query into a filter document.
///
/// Substring needles are escaped so user input is matched literally.
pub fn to_filter(query: &StoreQuery) -> Document {
    let mut filter = Document::new();
    for predicate in query.predicates() {
        let condition = match predicate {
            FieldPredicate::Contains { needle, .. } => doc! {
                "$regex": regex::escape(needle),
                "$options": "i",
            },
            FieldPredicate::Compare {
                comparison,
                threshold,
                ..
            } => {
                let mut condition = Document::new();
                condition.insert(comparison.operator(), *threshold);
                condition
            }
        };
        filter.insert(predicate.field().as_str(), condition);
    }
    filter
}

/// Key document for an index definition.
pub fn index_keys(index: &IndexSpec) -> Document {
    let mut keys = Document::new();
    match index {
        IndexSpec::Text(fields) => {
            for field in fields.iter() {
                keys.insert(*field, "text");
            }
        }
        IndexSpec::Ascending(field) => {
            keys.insert(*field, 1);
        }
        IndexSpec::Descending(field) => {
            keys.insert(*field, -1);
        }
    }
    keys
}

#[async_trait]
impl RecordStore for MongoStore {
    fn name(&self) -> &str {
        "mongodb"
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }

    async fn list_by_rating(&self, skip: u64, limit: u64) -> Result<Vec<Recipe>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "rating": -1 })
            .skip(skip.min(MAX_SKIP))
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .await?;

        decode_all(cursor.try_collect().await?)
    }

    async fn find(&self, query: &StoreQuery) -> Result<Vec<Recipe>> {
        let filter = to_filter(query);
        debug!("Querying recipes with filter {}", filter);

        let cursor = self.collection.find(filter).await?;
        decode_all(cursor.try_collect().await?)
    }

    async fn get(&self, id: &str) -> Result<Option<Recipe>> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        self.collection
            .find_one(doc! { "_id": oid })
            .await?
            .map(from_document)
            .transpose()
    }

    async fn insert_many(&self, records: &[RecipeRecord]) -> Result<usize> {
        // The server rejects an empty insert
        if records.is_empty() {
            return Ok(0);
        }
        let documents = records.iter().map(to_document).collect::<Result<Vec<_>>>()?;
        let result = self.collection.insert_many(documents).await?;
        Ok(result.inserted_ids.len())
    }

    async fn create_indexes(&self, indexes: &[IndexSpec]) -> Result<()> {
        for index in indexes {
            let keys = index_keys(index);
            debug!("Creating index {}", keys);
            self.collection
                .create_index(IndexModel::builder().keys(keys).build())
                .await?;
        }
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.collection.drop().await?;
        Ok(())
    }
}
