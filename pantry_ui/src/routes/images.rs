//! Image serving.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;

use pantry_core::error::ImageError;
use pantry_core::ImageId;
use pantry_store::ImageStore;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub async fn serve(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = id
        .parse::<ImageId>()
        .map_err(|_| ApiError::from(pantry_core::error::Error::from(ImageError::NotFound(ImageId::nil()))))?;
    let image = state.images.get(&id)?;
    Ok((
        [(header::CONTENT_TYPE, image.content_type)],
        image.bytes,
    ))
}
