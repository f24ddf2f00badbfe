//! Recipe routes.
//!
//! Reads are public; mutations run through the request context, so the
//! capability check happens before anything is written. The target id
//! for edit and delete always comes from the request path.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use pantry_core::error::RecipeError;
use pantry_core::{Category, ImageId, Recipe, RecipeId, RecipeStatus};
use pantry_runtime::RecipeDraft;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecipeBody {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub ingredients: String,
    pub instructions: String,
    pub category: Category,
    #[serde(default)]
    pub prep_time_minutes: Option<u32>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default = "default_status")]
    pub status: RecipeStatus,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_status() -> RecipeStatus {
    RecipeStatus::Draft
}

impl From<RecipeBody> for RecipeDraft {
    fn from(body: RecipeBody) -> Self {
        Self {
            title: body.title,
            description: body.description,
            ingredients: body.ingredients,
            instructions: body.instructions,
            category: body.category,
            prep_time_minutes: body.prep_time_minutes,
            date: body.date,
            status: body.status,
            tags: body.tags,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImageAttached {
    pub image_id: ImageId,
}

/// Parse a path id for a protected operation; garbage is a denial.
fn protected_id(raw: &str) -> Result<RecipeId, ApiError> {
    raw.parse::<RecipeId>()
        .map_err(|_| ApiError::from(pantry_core::error::Error::from(RecipeError::MalformedId(raw.to_string()))))
}

pub async fn list_published(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Recipe>>> {
    Ok(Json(state.recipes.list_published()?))
}

pub async fn list_mine(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Recipe>>> {
    let ctx = state.context(&headers);
    Ok(Json(state.recipes.list_mine(&ctx)?))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<RecipeBody>,
) -> ApiResult<impl IntoResponse> {
    let ctx = state.context(&headers);
    let recipe = state.recipes.create(&ctx, body.into())?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Recipe>> {
    // For a public read, an unparseable id is simply not a recipe.
    let id = id
        .parse::<RecipeId>()
        .map_err(|_| ApiError::from(pantry_core::error::Error::from(RecipeError::NotFound(RecipeId::nil()))))?;
    Ok(Json(state.recipes.get(&id)?))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<RecipeBody>,
) -> ApiResult<Json<Recipe>> {
    let id = protected_id(&id)?;
    let ctx = state.context(&headers);
    Ok(Json(state.recipes.update(&ctx, &id, body.into())?))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let id = protected_id(&id)?;
    let ctx = state.context(&headers);
    state.recipes.delete(&ctx, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn attach_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    bytes: Bytes,
) -> ApiResult<Json<ImageAttached>> {
    let id = protected_id(&id)?;
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();
    let ctx = state.context(&headers);
    let image_id = state
        .recipes
        .attach_image(&ctx, &id, bytes.to_vec(), &content_type)?;
    Ok(Json(ImageAttached { image_id }))
}
