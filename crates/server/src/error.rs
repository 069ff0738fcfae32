use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::fmt;

use saleslens_api::ServiceError;

/// Unified API error type.
///
/// Produces `{"error": "<message>"}` JSON responses for every failure path.
pub struct ApiErr {
    status: StatusCode,
    message: String,
}

impl ApiErr {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }

    /// Build a closure that logs a DB error and returns `500 Internal Server Error`.
    ///
    /// Store failures surface to the caller as a server error with the
    /// detail kept in the log; "no data" is never routed through here.
    pub fn from_db<E: fmt::Display>(context: &str) -> impl FnOnce(E) -> Self + '_ {
        move |e| {
            tracing::error!("{context}: {e}");
            Self::internal("internal server error")
        }
    }
}

impl From<ServiceError> for ApiErr {
    fn from(e: ServiceError) -> Self {
        let status =
            StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self {
            status,
            message: e.message().to_string(),
        }
    }
}

impl IntoResponse for ApiErr {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({"error": self.message})),
        )
            .into_response()
    }
}
