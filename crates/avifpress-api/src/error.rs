//! HTTP error response conversion
//!
//! Every failure in the compression pipeline collapses to the same generic
//! plain-text 500; the client never learns which kind occurred. The full
//! detail goes to the server-side log with a structured error kind and a
//! correlation id for operational tracing.

use avifpress_core::{AppError, LogLevel};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

const GENERIC_FAILURE_BODY: &str = "Compression failed";

/// Wrapper type for AppError to implement IntoResponse. Necessary because of
/// Rust's orphan rules: IntoResponse is external, AppError lives in the core
/// crate.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

fn log_error(error: &AppError, correlation_id: &str) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type, correlation_id, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type, correlation_id, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type, correlation_id, "Request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let correlation_id = uuid::Uuid::new_v4().to_string();
        log_error(&self.0, &correlation_id);

        (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE_BODY).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_kinds_collapse_to_generic_500() {
        let errors = [
            AppError::Validation("quality".into()),
            AppError::NotFound("source".into()),
            AppError::Codec("encode".into()),
            AppError::Filesystem("disk".into()),
            AppError::Timeout("deadline".into()),
        ];
        for err in errors {
            let response = HttpAppError(err).into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
