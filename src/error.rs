use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ErrorResponse;
use crate::service::PlayerError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Player(#[from] PlayerError),
    #[error("Invalid request: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Player(PlayerError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Player(PlayerError::AlreadyExists { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Player(PlayerError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}
