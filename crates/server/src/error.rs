//! Service-level errors and their HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use store::StoreError;
use thiserror::Error;
use tracing::error;

pub const LIST_FAILED: &str = "Failed to fetch recipes";
pub const SEARCH_FAILED: &str = "Failed to search recipes";
pub const GET_FAILED: &str = "Failed to fetch recipe";

#[derive(Error, Debug)]
pub enum ServiceError {
    /// The store could not answer; `context` says which operation failed
    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },

    /// No recipe with this identity, or the identity is malformed
    #[error("Recipe not found: {id}")]
    NotFound { id: String },

    /// A post-query filter failed
    #[error("Failed to search recipes: {0}")]
    Filter(String),
}

impl ServiceError {
    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| ServiceError::Store { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::Store { .. } | ServiceError::Filter(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, details) = match &self {
            ServiceError::Store { context, source } => (*context, source.to_string()),
            ServiceError::NotFound { id } => ("Recipe not found", format!("No recipe with id {id}")),
            ServiceError::Filter(reason) => (SEARCH_FAILED, reason.clone()),
        };

        if status.is_server_error() {
            error!("{self}");
        }

        (status, Json(json!({ "error": message, "details": details }))).into_response()
    }
}
