use std::io;

use {
    axum::{
        body::Body,
        http::{Response as HttpResponse, StatusCode},
        response::{IntoResponse, Response},
    },
    oauth2::{basic::BasicRequestTokenError, reqwest::AsyncHttpClientError},
    sqlx::migrate::MigrateError,
    thiserror::Error,
    url::ParseError,
};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Path error: {0}")]
    PathError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("Client configuration not found: {0}")]
    ClientConfigNotFound(String),

    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("SQLx migrate error: {0}")]
    SqlxMigrate(#[from] MigrateError),

    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("OAuth2 error: {0}")]
    OAuth2(#[from] BasicRequestTokenError<AsyncHttpClientError>),

    #[error("OAuth2 generic error: {0}")]
    OAuth2Generic(String),

    #[error("Cannot parse URL")]
    ParseError(#[from] ParseError),

    #[error("Invalid HTTP header value: {0}")]
    InvalidHttpHeaderValue(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Session state error: {0}")]
    SessionStateError(String),

    #[error("Missing CSRF state in the session")]
    MissingCSRFState,

    #[error("Invalid CSRF state")]
    InvalidCSRFState,

    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    #[error("Provider not found: {0}")]
    ProviderNotFoundError(String),

    #[error("Login error: {0}")]
    LoginError(String),

    #[error("Failed to serialize session data: {0}")]
    SerializationError(String),

    #[error("Failed to generate authorization URL: {0}")]
    AuthorizationUrlError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] toml::de::Error),

    #[error("Invalid 'next' URL parameter: {0}")]
    InvalidNextUrl(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::SerializationError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to serialize session data: {msg}"),
            ),
            Self::AuthorizationUrlError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to generate authorization URL: {msg}"),
            ),
            Self::ProviderNotFoundError(msg) => (
                StatusCode::NOT_FOUND,
                format!("OAuth provider not found: {msg}"),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred".to_string(),
            ),
        };

        let full_message = format!("{status}: {error_message}");
        let body = Body::from(full_message);

        HttpResponse::builder().status(status).body(body).unwrap() // Safe unwrap since we're constructing a valid response
    }
}
