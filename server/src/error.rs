use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cipherdir::{error::ValidationError, rfc::ExtractError};
use serde::Serialize;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0} not found")]
    NotFound(String),
    #[error("ValidationError: {0}")]
    ValidationError(#[from] ValidationError),
    #[error("RFC could not be retrieved from {url} (HTTP {status})")]
    UpstreamFetchError { url: String, status: u16 },
    #[error("RFC could not be retrieved: {0}")]
    HttpClientError(#[from] reqwest::Error),
    #[error("RFC page could not be parsed: {0}")]
    UpstreamParseError(#[from] ExtractError),
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
    #[error("The database contains unexpected data: {0}")]
    CorruptedData(String),
}

impl Error {
    pub fn not_found(what: impl std::fmt::Display) -> Self {
        Self::NotFound(what.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::ValidationError(_) => StatusCode::BAD_REQUEST,
            Error::UpstreamFetchError { .. }
            | Error::HttpClientError(_)
            | Error::UpstreamParseError(_) => StatusCode::BAD_GATEWAY,
            Error::SqliteError(_) | Error::CorruptedData(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status.is_server_error() && status != StatusCode::BAD_GATEWAY {
            tracing::error!("Internal server error while processing request: {self}");
            "Internal server error".to_string()
        } else {
            tracing::warn!("Request failed: {self}");
            self.to_string()
        };

        let body = ErrorResponse {
            status: status.as_u16(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
