//! Profile and admin user-management routes.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pantry_core::{ImageId, ProfileUpdate, UserId, UserRecord};

use crate::error::ApiResult;
use crate::state::AppState;

/// A user record as exposed over HTTP; the password digest stays home.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub email: UserId,
    pub is_admin: bool,
    pub is_confirmed: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub theme: Option<String>,
    pub image_id: Option<ImageId>,
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for UserView {
    fn from(record: UserRecord) -> Self {
        Self {
            email: record.email,
            is_admin: record.is_admin,
            is_confirmed: record.is_confirmed,
            first_name: record.first_name,
            last_name: record.last_name,
            bio: record.bio,
            theme: record.theme,
            image_id: record.image_id,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProfileBody {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserEditBody {
    #[serde(flatten)]
    pub profile: ProfileBody,
    #[serde(default)]
    pub is_confirmed: Option<bool>,
}

impl From<ProfileBody> for ProfileUpdate {
    fn from(body: ProfileBody) -> Self {
        Self {
            first_name: body.first_name,
            last_name: body.last_name,
            bio: body.bio,
            theme: body.theme,
        }
    }
}

pub async fn profile(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<UserView>> {
    let ctx = state.context(&headers);
    Ok(Json(state.accounts.profile(&ctx)?.into()))
}

pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<ProfileBody>,
) -> ApiResult<Json<UserView>> {
    let ctx = state.context(&headers);
    state.accounts.update_profile(&ctx, body.into(), None)?;
    Ok(Json(state.accounts.profile(&ctx)?.into()))
}

pub async fn upload_avatar(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    bytes: Bytes,
) -> ApiResult<Json<UserView>> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();
    let ctx = state.context(&headers);

    // A profile update replaces every field, so carry the current ones.
    let record = state.accounts.profile(&ctx)?;
    let update = ProfileUpdate {
        first_name: record.first_name,
        last_name: record.last_name,
        bio: record.bio,
        theme: record.theme,
    };
    state
        .accounts
        .update_profile(&ctx, update, Some((bytes.to_vec(), content_type)))?;
    Ok(Json(state.accounts.profile(&ctx)?.into()))
}

/// List every user. Admin only.
pub async fn list(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<UserView>>> {
    let ctx = state.context(&headers);
    let users = state.accounts.list_users(&ctx)?;
    Ok(Json(users.into_iter().map(UserView::from).collect()))
}

/// Edit an arbitrary user's profile. Admin only.
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
    headers: HeaderMap,
    Json(body): Json<UserEditBody>,
) -> ApiResult<Json<MessageOk>> {
    let ctx = state.context(&headers);
    state.accounts.update_user(
        &ctx,
        &UserId::new(email),
        body.profile.into(),
        body.is_confirmed,
        None,
    )?;
    Ok(Json(MessageOk { ok: true }))
}

#[derive(Debug, Serialize)]
pub struct MessageOk {
    pub ok: bool,
}
