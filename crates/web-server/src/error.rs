use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_types::CoreError;
use database::DbError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
    #[error("Validation error: {0}")]
    Validation(#[from] CoreError),
    #[error("Invalid request body: {0}")]
    Body(#[from] JsonRejection),
    #[error("Invalid query parameters: {0}")]
    Query(#[from] QueryRejection),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(DbError::Conflict(uid)) => {
                tracing::info!(%uid, "Rejected duplicate facility.");
                (
                    StatusCode::CONFLICT,
                    "A resource with this uid already exists".to_string(),
                )
            }
            AppError::Database(DbError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "Facility not found".to_string())
            }
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                )
            }
            AppError::Validation(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            // Schema violations surface here as `JsonDataError` (422); a missing
            // content type or broken JSON syntax keeps axum's own status.
            AppError::Body(rejection) => (rejection.status(), rejection.body_text()),
            AppError::Query(rejection) => {
                (StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
