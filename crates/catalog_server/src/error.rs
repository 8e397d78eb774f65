//! HTTP error mapping.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use catalog_core::error::{CatalogError, FieldErrors, NON_FIELD_ERRORS};

/// Handler error: wraps `CatalogError` and renders the `{"error": ...}` envelope.
#[derive(Debug)]
pub struct AppError(pub CatalogError);

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self(CatalogError::Validation(FieldErrors::single(
            NON_FIELD_ERRORS,
            rejection.body_text(),
        )))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self(CatalogError::Invalid(rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.http_status()).unwrap_or(StatusCode::BAD_REQUEST);
        let body = match &self.0 {
            CatalogError::Validation(errors) => json!({ "error": errors }),
            // Store errors are logged in full but never echoed to the client.
            CatalogError::Internal(e) => {
                tracing::error!("internal error: {:#}", e);
                json!({ "error": "internal error" })
            }
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::types::EntityKind;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn render(err: CatalogError) -> (StatusCode, Value) {
        let response = AppError(err).into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn internal_errors_hide_store_details() {
        let err = anyhow::anyhow!("error returned from database: numeric field overflow");
        let (status, json) = render(CatalogError::Internal(err)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({ "error": "internal error" }));
    }

    #[tokio::test]
    async fn validation_errors_render_as_field_map() {
        let err = CatalogError::Validation(FieldErrors::single("name", "This field is required."));
        let (status, json) = render(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({ "error": { "name": ["This field is required."] } }));
    }

    #[tokio::test]
    async fn other_errors_render_as_message() {
        let (_, json) = render(CatalogError::NotFound(EntityKind::Unit)).await;
        assert_eq!(json, json!({ "error": "Unit not found" }));
    }
}
