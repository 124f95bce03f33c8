use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use datastore::StoreError;
use ingest::IngestError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Ingestion error: {0}")]
    Ingest(#[from] IngestError),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Ingest(ingest_err) => {
                // Structural source defects go back to the client verbatim.
                tracing::warn!(error = %ingest_err, "rejected source file");
                (StatusCode::UNPROCESSABLE_ENTITY, ingest_err.to_string())
            }
            AppError::Store(StoreError::NoDataLoaded) => {
                (StatusCode::BAD_REQUEST, StoreError::NoDataLoaded.to_string())
            }
            AppError::Store(store_err @ StoreError::FundNotFound(_)) => {
                (StatusCode::NOT_FOUND, store_err.to_string())
            }
            AppError::Store(store_err @ StoreError::EmptyRange { .. }) => {
                (StatusCode::NOT_FOUND, store_err.to_string())
            }
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn error_taxonomy_maps_to_distinct_statuses() {
        let cases = [
            (
                AppError::Store(StoreError::NoDataLoaded),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Store(StoreError::FundNotFound(7)),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Store(StoreError::EmptyRange { fund_id: 7 }),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Ingest(IngestError::MissingNameColumn("Group/Investment".into())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::BadRequest("nope".into()),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
