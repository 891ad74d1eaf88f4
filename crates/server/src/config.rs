use std::{env, fmt::Display, str::FromStr};

use anyhow::{Context, Result, anyhow};
use store::MongoStore;
use tracing::{info, warn};

/// Process configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub mongodb_uri: String,
    pub database: String,
    pub collection: String,
    pub import_batch_size: usize,
}

impl Config {
    /// Load from the environment, honouring a `.env` file if present.
    pub fn load() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            info!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Missing keys take their default;
    /// present but malformed keys are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let batch_size: usize = try_load(&lookup, "IMPORT_BATCH_SIZE", "100")?;
        if batch_size == 0 {
            return Err(anyhow!("IMPORT_BATCH_SIZE must be at least 1"));
        }

        Ok(Self {
            port: try_load(&lookup, "RUST_PORT", "3000")?,
            mongodb_uri: try_load(&lookup, "MONGODB_URI", "mongodb://localhost:27017")?,
            database: try_load(&lookup, "RECIPES_DB", "recipes_db")?,
            collection: try_load(&lookup, "RECIPES_COLLECTION", "recipes")?,
            import_batch_size: batch_size,
        })
    }

    /// Open the shared document store handle.
    pub async fn open_store(&self) -> Result<MongoStore> {
        MongoStore::connect(&self.mongodb_uri, &self.database, &self.collection)
            .await
            .context("Failed to connect to the document store")
    }
}

fn try_load<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        warn!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse()
        .map_err(|e| anyhow!("Invalid {key} value {raw:?}: {e}"))
}
