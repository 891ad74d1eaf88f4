use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use data_loader::Recipe;
use pipeline::SearchParams;

use crate::{
    error::ServiceError,
    render::{render_not_found, render_recipe_page},
    service::{PageParams, Pagination, RecipePage, SearchResults},
    state::AppState,
};

pub async fn list_recipes(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<RecipePage>, ServiceError> {
    let page = state.service.list(Pagination::from_params(&params)).await?;
    Ok(Json(page))
}

pub async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResults>, ServiceError> {
    let data = state.service.search(&params).await?;
    Ok(Json(SearchResults { data }))
}

pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>, ServiceError> {
    Ok(Json(state.service.get(&id).await?))
}

/// HTML detail page. A missing recipe renders a 404 page instead of JSON.
pub async fn recipe_page(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.service.get(&id).await {
        Ok(recipe) => Html(render_recipe_page(&recipe)).into_response(),
        Err(ServiceError::NotFound { id }) => {
            (StatusCode::NOT_FOUND, Html(render_not_found(&id))).into_response()
        }
        Err(err) => err.into_response(),
    }
}
