//! HTTP error mapping.

use alon_core::ValidationError;
use alon_core::db::DatabaseError;
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

/// Message returned when a public ID does not match any recipe.
pub const RECIPE_NOT_FOUND: &str = "Recipe not found";

/// Errors a handler can return.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Client-fixable payload problem (400 with the offending field).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Body could not be read as JSON (400).
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Storage failures and anything else unexpected (500).
    #[error(transparent)]
    Internal(#[from] DatabaseError),
}

impl ApiError {
    pub fn recipe_not_found() -> Self {
        Self::NotFound(RECIPE_NOT_FOUND.to_string())
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<alon_core::Error> for ApiError {
    fn from(e: alon_core::Error) -> Self {
        match e {
            alon_core::Error::Validation(v) => Self::Validation(v),
            alon_core::Error::Json(_) => Self::BadRequest(e.to_string()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// JSON error body: `{"message": ..., "field": ...}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Internal(cause) = &self {
            error!(error = %cause, "Request failed");
        }
        let body = match self {
            Self::Validation(v) => ErrorBody {
                message: v.message,
                field: v.field,
            },
            other => ErrorBody {
                message: other.to_string(),
                field: None,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let validation = ApiError::Validation(ValidationError {
            field: Some("fill".into()),
            message: "Required".into(),
        });
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::recipe_not_found().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal(DatabaseError::Connection("down".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::BadRequest("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }

    #[test]
    fn json_errors_become_bad_request() {
        let err = alon_core::parse_create_body(b"{oops").unwrap_err();
        let api: ApiError = err.into();
        assert!(matches!(api, ApiError::BadRequest(ref m) if m.starts_with("Invalid JSON body")));
    }

    #[test]
    fn internal_message_names_the_cause() {
        let err = ApiError::Internal(DatabaseError::Connection("pool timed out".into()));
        assert_eq!(err.to_string(), "Storage unavailable: pool timed out");
    }
}
