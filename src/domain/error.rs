use std::time::Duration;

use thiserror::Error;

/// Reasons a draft cannot be submitted, in the order they are checked.
///
/// The `Display` text is what the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select your image")]
    MissingImage,

    #[error("Please enter your name")]
    MissingName,

    #[error("Please enter your email")]
    MissingEmail,

    #[error("Please enter a valid email")]
    InvalidEmail,

    #[error("Please enter your password")]
    MissingPassword,

    #[error("Please confirm your password")]
    MissingConfirmPassword,

    #[error("Password & Confirm Password must be the same")]
    PasswordMismatch,
}

#[derive(Debug, Error)]
pub enum ImageSourceError {
    #[error("Image not found: {0}")]
    NotFound(String),

    #[error("Image unreadable: {0}")]
    Unreadable(String),

    #[error("Image could not be encoded: {0}")]
    Encode(#[from] EncodeError),
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Image has no pixels")]
    EmptyImage,

    #[error("Scaled image is {height} pixels tall, JPEG allows at most {max}")]
    TooTall { height: u32, max: u32 },

    #[error("Codec error: {0}")]
    Codec(#[from] image::ImageError),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Invalid image data: {0}")]
    Image(#[from] image::ImageError),
}

/// Failure reported by the document store. The message is the store's own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Store(#[from] RepositoryError),

    #[error("Request timed out")]
    Timeout(Duration),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Session store lock poisoned")]
    Poisoned,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load .env: {0}")]
    DotEnv(#[from] dotenvy::Error),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}
