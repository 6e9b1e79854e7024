//! Error types and result aliases for the viewer.
//!
//! This module defines the core error type [`ViewerError`] and the [`Result`] type alias
//! used throughout the crate. Errors raised by the model gateway never reach the screen
//! as `Err` values: the request state holder folds them into
//! [`RequestState::Error`](crate::state::RequestState::Error) using their display text.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    /// Failure reported by a model client; the message is surfaced verbatim.
    #[error("{0}")]
    ModelRequestFailure(String),

    #[error("Model gateway error: {0}")]
    GatewayError(String),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
