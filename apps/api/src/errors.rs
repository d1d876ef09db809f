use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::models::loan::FieldError;
use crate::render::RenderError;

pub const VALIDATION_MESSAGE: &str =
    "Please fill in all the required fields, including the API key.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant becomes a JSON message; none of them carries a backtrace to the client.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {}", describe_fields(.0))]
    Validation(Vec<FieldError>),

    #[error("Generation request failed: {0}")]
    Request(#[from] LlmError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

fn describe_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// A body that is not valid JSON for the route, or has a field of the wrong
/// type, is reported like any other invalid input.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(vec![FieldError::new("body", rejection.body_text())])
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            AppError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                VALIDATION_MESSAGE.to_string(),
                Some(json!(fields)),
            ),
            AppError::Request(e) => {
                tracing::error!("Generation request failed: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "REQUEST_ERROR",
                    format!("An error occurred: {e}"),
                    None,
                )
            }
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    "The contract could not be rendered".to_string(),
                    None,
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(details) = details {
            error["details"] = details;
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::Value;

    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_lists_fields() {
        let err = AppError::Validation(vec![
            FieldError::new("borrower_name", "Borrower name or company is required"),
            FieldError::new("api_key", "An API key is required"),
        ]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], VALIDATION_MESSAGE);
        assert_eq!(body["error"]["details"][1]["field"], "api_key");
    }

    #[tokio::test]
    async fn test_request_error_message_is_surfaced() {
        let err = AppError::from(LlmError::Authentication("Incorrect API key provided".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = body_json(response).await;
        assert_eq!(
            body["error"]["message"],
            "An error occurred: the API key was rejected: Incorrect API key provided"
        );
        assert!(body["error"].get("details").is_none());
    }

    #[tokio::test]
    async fn test_render_error_is_generic() {
        let err = AppError::from(RenderError::Layout("frame too small".into()));
        let body = body_json(err.into_response()).await;
        assert_eq!(body["error"]["code"], "RENDER_ERROR");
        assert_eq!(body["error"]["message"], "The contract could not be rendered");
    }

    #[test]
    fn test_validation_display_joins_fields() {
        let err = AppError::Validation(vec![
            FieldError::new("principal", "too small"),
            FieldError::new("term_months", "too long"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation error: principal: too small; term_months: too long"
        );
    }
}
