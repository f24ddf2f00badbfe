//! Error types for the Pantry service.
//!
//! This module defines the error hierarchy used throughout the system,
//! with one enum per concern aggregated under a root [`Error`].

use thiserror::Error;

use crate::id::{ImageId, RecipeId, UserId};

/// Root error type for the Pantry service.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("Recipe error: {0}")]
    Recipe(#[from] RecipeError),

    #[error("Capability error: {0}")]
    Capability(#[from] CapabilityError),

    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    #[error("Mail error: {0}")]
    Mail(#[from] MailError),
}

/// Errors related to the credential store.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("User already exists: {0}")]
    DuplicateUser(UserId),

    #[error("Credential store unavailable: {0}")]
    Unavailable(String),
}

/// Errors related to the recipe repository.
#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("Recipe not found: {0}")]
    NotFound(RecipeId),

    #[error("Malformed recipe id: {0}")]
    MalformedId(String),

    #[error("Recipe repository unavailable: {0}")]
    Unavailable(String),
}

/// Errors related to capability checks.
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

/// Errors related to image storage.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image not found: {0}")]
    NotFound(ImageId),

    #[error("Unsupported image content type: {0}")]
    UnsupportedContentType(String),
}

/// Errors related to account flows.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Confirmation token is invalid")]
    InvalidToken,

    #[error("Confirmation token has expired")]
    TokenExpired,
}

/// Errors related to mail delivery.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Failed to send mail: {0}")]
    Send(String),
}

/// Result type used throughout the Pantry service.
pub type Result<T> = std::result::Result<T, Error>;
