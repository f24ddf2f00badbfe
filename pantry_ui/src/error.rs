//! Error-to-response mapping.
//!
//! Authorization failures are always a 403 carrying the gate's fixed
//! reason; the remaining domain errors map to conventional statuses.
//! Nothing internal ever leaks through an authorization denial.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use pantry_capability::DENIAL_REASON;
use pantry_core::error::{
    AccountError, CapabilityError, CredentialError, Error, ImageError, RecipeError,
};

/// JSON body carried by every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Wrapper turning domain errors into HTTP responses.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

/// Result alias for handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::Capability(CapabilityError::PermissionDenied(reason)) => {
                (StatusCode::FORBIDDEN, reason.clone())
            }
            // A malformed target id is a denial, not a parse error.
            Error::Recipe(RecipeError::MalformedId(_)) => {
                (StatusCode::FORBIDDEN, DENIAL_REASON.to_string())
            }
            Error::Recipe(RecipeError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "recipe not found".to_string())
            }
            Error::Credential(CredentialError::UserNotFound(_)) => {
                (StatusCode::NOT_FOUND, "user not found".to_string())
            }
            Error::Credential(CredentialError::DuplicateUser(_)) => {
                (StatusCode::CONFLICT, "user already exists".to_string())
            }
            Error::Image(ImageError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "image not found".to_string())
            }
            Error::Image(ImageError::UnsupportedContentType(_)) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "only JPEG and PNG images are accepted".to_string(),
            ),
            Error::Account(AccountError::InvalidCredentials) => (
                StatusCode::UNAUTHORIZED,
                "invalid email or password".to_string(),
            ),
            Error::Account(AccountError::InvalidToken) => (
                StatusCode::BAD_REQUEST,
                "confirmation link is invalid".to_string(),
            ),
            Error::Account(AccountError::TokenExpired) => (
                StatusCode::BAD_REQUEST,
                "confirmation link has expired".to_string(),
            ),
            other => {
                error!(error = %other, "unhandled internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denial_maps_to_forbidden() {
        let err = ApiError::from(Error::from(CapabilityError::PermissionDenied(
            DENIAL_REASON.to_string(),
        )));
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_malformed_id_maps_to_forbidden() {
        let err = ApiError::from(Error::from(RecipeError::MalformedId("garbage".to_string())));
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_duplicate_user_maps_to_conflict() {
        let err = ApiError::from(Error::from(CredentialError::DuplicateUser("a@b.c".into())));
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }
}
