//! Bulk import of a raw recipe dump into the record store.
//!
//! ## Algorithm
//! 1. Optionally clear the collection (a full reload)
//! 2. Shape every row, dropping rows without a title
//! 3. Insert in fixed-size batches, logging a running total after each
//! 4. Rebuild the supporting indexes
//!
//! A failed batch aborts the import. Batches already written stay written.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use data_loader::{RawRecipe, load_raw_records, prepare_records};
use store::{RECIPE_INDEXES, RecordStore};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    pub batch_size: usize,
    pub drop_existing: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            batch_size: 100,
            drop_existing: false,
        }
    }
}

/// Outcome of one import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportReport {
    /// Rows in the source dump
    pub found: usize,
    /// Rows dropped for lacking a title
    pub skipped: usize,
    pub inserted: usize,
    pub batches: usize,
}

pub struct BulkImporter {
    store: Arc<dyn RecordStore>,
    options: ImportOptions,
}

impl BulkImporter {
    pub fn new(store: Arc<dyn RecordStore>, options: ImportOptions) -> Self {
        Self {
            store,
            options: ImportOptions {
                batch_size: options.batch_size.max(1),
                ..options
            },
        }
    }

    /// Load a dump from disk and import it.
    pub async fn import_file(&self, path: &Path) -> Result<ImportReport> {
        let owned = path.to_path_buf();
        let rows = tokio::task::spawn_blocking(move || load_raw_records(&owned))
            .await
            .context("Loader task panicked")?
            .with_context(|| format!("Failed to load {}", path.display()))?;

        info!("Found {} rows in {}", rows.len(), path.display());
        self.import(rows).await
    }

    pub async fn import(&self, rows: Vec<RawRecipe>) -> Result<ImportReport> {
        let start_time = Instant::now();
        let found = rows.len();

        if self.options.drop_existing {
            self.store
                .clear()
                .await
                .context("Failed to clear existing recipes")?;
            info!("Cleared existing recipes from {}", self.store.name());
        }

        let records = tokio::task::spawn_blocking(move || prepare_records(&rows))
            .await
            .context("Shaping task panicked")?;

        let skipped = found - records.len();
        if skipped > 0 {
            warn!("Skipping {} rows without a title", skipped);
        }

        let mut report = ImportReport {
            found,
            skipped,
            ..Default::default()
        };

        for batch in records.chunks(self.options.batch_size) {
            let written = self.store.insert_many(batch).await.with_context(|| {
                format!(
                    "Failed to insert batch {} after {} recipes",
                    report.batches + 1,
                    report.inserted
                )
            })?;
            report.batches += 1;
            report.inserted += written;
            info!("Inserted batch {}: {} recipes total", report.batches, report.inserted);
        }

        self.store
            .create_indexes(RECIPE_INDEXES)
            .await
            .context("Failed to create indexes")?;

        info!(
            "Imported {} recipes in {} batches ({:.2?})",
            report.inserted,
            report.batches,
            start_time.elapsed()
        );
        Ok(report)
    }
}
