use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use podtrack_db::DatabaseError;
use serde_json::json;
use thiserror::Error;

pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{resource} not found")]
    NotFound { resource: &'static str },
    #[error("{0}")]
    BadRequest(String),
    #[error("Internal server error")]
    Unknown(String),
}

impl ServerError {
    fn as_status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { resource: _ } => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        // The underlying cause is logged but never surfaced to the caller
        if let Self::Unknown(cause) = &self {
            error!("Request failed: {cause}");
        }

        let body = json!({ "message": self.to_string() });

        (self.as_status_code(), Json(body)).into_response()
    }
}

impl From<DatabaseError> for ServerError {
    fn from(value: DatabaseError) -> Self {
        match value {
            DatabaseError::NotFound {
                resource,
                identifier: _,
            } => Self::NotFound { resource },
            e => Self::Unknown(e.to_string()),
        }
    }
}
