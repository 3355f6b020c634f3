use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;
use crate::http_client::HttpError;
use crate::progress::ProgressError;
use crate::session::SessionError;

/// Application-level error type.
/// Implements `IntoResponse` so page handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Progress(#[from] ProgressError),

    #[error("Upstream error: {0}")]
    Upstream(#[from] HttpError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Faça login para continuar.".to_string(),
            ),
            AppError::Auth(e) => {
                let (status, code) = match e {
                    AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
                    AuthError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                    AuthError::DuplicateEmail => (StatusCode::CONFLICT, "DUPLICATE_EMAIL"),
                    AuthError::Network | AuthError::Server(_) => {
                        (StatusCode::BAD_GATEWAY, "CONNECTION_ERROR")
                    }
                    AuthError::InvalidResponse => (StatusCode::BAD_GATEWAY, "INVALID_RESPONSE"),
                    AuthError::Session(err) => {
                        tracing::error!("Session error during auth: {err}");
                        (StatusCode::INTERNAL_SERVER_ERROR, "SESSION_ERROR")
                    }
                };
                (status, code, e.to_string())
            }
            AppError::Progress(e) => {
                let status = match e {
                    ProgressError::CourseNotFound(_) => StatusCode::NOT_FOUND,
                    ProgressError::NotInProgress(_) => StatusCode::CONFLICT,
                    ProgressError::InvalidProgress(_) => StatusCode::BAD_REQUEST,
                };
                (status, "PROGRESS_ERROR", e.to_string())
            }
            AppError::Upstream(e) => {
                tracing::error!("Upstream error: {e}");
                match e.status() {
                    Some(404) => (
                        StatusCode::NOT_FOUND,
                        "NOT_FOUND",
                        "Recurso não encontrado.".to_string(),
                    ),
                    _ => (
                        StatusCode::BAD_GATEWAY,
                        "UPSTREAM_ERROR",
                        "Erro de conexão com o servidor.".to_string(),
                    ),
                }
            }
            AppError::Session(e) => {
                tracing::error!("Session error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SESSION_ERROR",
                    "A session storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut body = json!({
            "error": {
                "code": code,
                "message": message
            }
        });
        if status == StatusCode::UNAUTHORIZED {
            body["redirect"] = json!("/login");
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors_map_to_status() {
        let cases = [
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::DuplicateEmail, StatusCode::CONFLICT),
            (AuthError::Network, StatusCode::BAD_GATEWAY),
            (AuthError::Validation("x".to_string()), StatusCode::BAD_REQUEST),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::Auth(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_upstream_not_found_maps_to_404() {
        let err = AppError::Upstream(HttpError::Status {
            status: 404,
            message: String::new(),
        });
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_progress_errors_map_to_status() {
        let resp = AppError::Progress(ProgressError::NotInProgress(1)).into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }
}
