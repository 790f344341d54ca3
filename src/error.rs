use std::io;
use std::path::PathBuf;

use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, warn};
use thiserror::Error;

use crate::responses::ErrorResponse;

/// Everything a catalog request can fail with.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{0}` must be an integer")]
    InvalidField(&'static str),
    #[error("malformed form body: {0}")]
    MalformedForm(String),
    #[error("not found")]
    NotFound,
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl From<FormRejection> for CatalogError {
    fn from(rejection: FormRejection) -> Self {
        CatalogError::MalformedForm(rejection.body_text())
    }
}

impl CatalogError {
    pub fn status(&self) -> StatusCode {
        match self {
            CatalogError::MissingField(_)
            | CatalogError::InvalidField(_)
            | CatalogError::MalformedForm(_) => StatusCode::BAD_REQUEST,
            CatalogError::NotFound => StatusCode::NOT_FOUND,
            CatalogError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            CatalogError::NotFound => status.into_response(),
            CatalogError::Storage(err) => {
                error!("Error talking to the database: {}", err);
                status.into_response()
            }
            rejected => {
                warn!("Rejected request: {}", rejected);
                let body = ErrorResponse {
                    error: rejected.to_string(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

/// Failures that stop the service from coming up.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("error opening configuration file {}: {source}", path.display())]
    ReadConfig { path: PathBuf, source: io::Error },
    #[error("malformed configuration: {0}")]
    ParseConfig(#[from] serde_json::Error),
    #[error("error connecting to database: {0}")]
    Database(#[from] sqlx::Error),
    #[error("error applying schema: {0}")]
    Migration(#[from] migration::DbErr),
    #[error("server error: {0}")]
    Io(#[from] io::Error),
}
