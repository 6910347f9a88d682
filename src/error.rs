use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::services::ReservationError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Reservation(#[from] ReservationError),
    #[error("invalid request: {0}")]
    Validation(#[from] validator::ValidationErrors),
    #[error("{}", .0.body_text())]
    Query(#[from] QueryRejection),
    #[error("{}", .0.body_text())]
    Path(#[from] PathRejection),
    #[error("{}", .0.body_text())]
    Json(#[from] JsonRejection),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Reservation(ReservationError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Reservation(ReservationError::AlreadyReserved { .. }) => StatusCode::CONFLICT,
            ApiError::Reservation(ReservationError::Integrity(_) | ReservationError::Store(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Query(rejection) => rejection.status(),
            ApiError::Path(rejection) => rejection.status(),
            ApiError::Json(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!("Internal Server Error: {}", self);
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody { success: false, message })).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
