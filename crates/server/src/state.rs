use std::sync::Arc;

use store::RecordStore;

use crate::service::RecipeService;

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: RecipeService,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            service: RecipeService::new(store),
        }
    }
}
