//! Success envelope and the request extractors that reject into `AppError`.

use axum::extract::{FromRequest, FromRequestParts};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use catalog_core::error::CatalogError;

use crate::error::AppError;

/// `{ <key>: <payload>, "message"?: <text> }`, always 200.
#[derive(Debug, Default)]
pub struct Envelope(Map<String, Value>);

impl Envelope {
    pub fn data<T: Serialize>(key: &str, value: &T) -> Result<Self, AppError> {
        let value =
            serde_json::to_value(value).map_err(|e| CatalogError::Internal(e.into()))?;
        let mut map = Map::new();
        map.insert(key.to_string(), value);
        Ok(Self(map))
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self::default().with_message(message)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.0
            .insert("message".to_string(), Value::String(message.into()));
        self
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(Value::Object(self.0))).into_response()
    }
}

/// Raw JSON request body. Malformed JSON surfaces as a validation error.
#[derive(Debug, Deserialize, FromRequest)]
#[serde(transparent)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody(pub Value);

/// Query string decoded into `T`; a bad query string gets the error envelope.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);
