use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Serialize;

use snipbin_core::models::request::{CreateSnippetRequest, ListParams, UpdateSnippetRequest};
use snipbin_core::models::snippet::Snippet;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

pub async fn list_snippets(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Snippet>>, ApiError> {
    let Query(pairs) = pairs?;
    let params = ListParams::from_pairs(pairs);
    let snippets = state.snippets.list(&params).await?;
    Ok(Json(snippets))
}

pub async fn get_snippet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Snippet>, ApiError> {
    let snippet = state.snippets.get(&id).await?;
    Ok(Json(snippet))
}

pub async fn create_snippet(
    State(state): State<AppState>,
    body: Result<Json<CreateSnippetRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Snippet>), ApiError> {
    let Json(req) = body?;
    let snippet = state.snippets.create(req).await?;
    Ok((StatusCode::CREATED, Json(snippet)))
}

pub async fn update_snippet(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateSnippetRequest>, JsonRejection>,
) -> Result<Json<Snippet>, ApiError> {
    let Json(req) = body?;
    let snippet = state.snippets.update(&id, req).await?;
    Ok(Json(snippet))
}

pub async fn delete_snippet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.snippets.delete(&id).await?;
    Ok(Json(DeleteResponse {
        message: "Snippet deleted successfully".to_string(),
    }))
}
