//! Registration, login, logout, and email confirmation.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use serde::{Deserialize, Serialize};

use pantry_core::UserId;
use pantry_runtime::ConfirmOutcome;

use crate::error::ApiResult;
use crate::session::{clear_session_cookie, session_token, set_session_cookie};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    state
        .accounts
        .register(UserId::new(req.email), &req.password)?;
    Ok((
        StatusCode::CREATED,
        Json(MessageBody {
            message: "registered, please confirm your email address".to_string(),
        }),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let email = UserId::new(req.email);
    let token = state
        .accounts
        .login(&email, &req.password, req.remember_me)?;
    Ok((
        AppendHeaders([(header::SET_COOKIE, set_session_cookie(&token))]),
        Json(MessageBody {
            message: format!("welcome back, {}", email),
        }),
    ))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Some(token) = session_token(&headers) {
        state.accounts.logout(&token);
    }
    (
        AppendHeaders([(header::SET_COOKIE, clear_session_cookie())]),
        Json(MessageBody {
            message: "signed out".to_string(),
        }),
    )
}

pub async fn confirm(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> ApiResult<Json<MessageBody>> {
    let message = match state.accounts.confirm(&token)? {
        ConfirmOutcome::Confirmed => "your account is confirmed, thank you",
        ConfirmOutcome::AlreadyConfirmed => "your account was already confirmed",
    };
    Ok(Json(MessageBody {
        message: message.to_string(),
    }))
}
