//! Translation of board errors into HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use campustalk_types::BoardError;

/// Transport-level wrapper: carries the board error through a handler's
/// `?` and renders it as a JSON error body on the way out.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub BoardError);

/// Status code for one board error.
pub fn status_of(err: &BoardError) -> StatusCode {
    match err {
        BoardError::NotFound(_) => StatusCode::NOT_FOUND,
        BoardError::Forbidden(_) => StatusCode::FORBIDDEN,
        BoardError::Unauthorized => StatusCode::UNAUTHORIZED,
        BoardError::AlreadyVoted => StatusCode::CONFLICT,
        BoardError::Expired => StatusCode::GONE,
        BoardError::InvalidOption(_) => StatusCode::BAD_REQUEST,
        BoardError::Invalid(_) => StatusCode::BAD_REQUEST,
        BoardError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_of(&self.0);
        // Internal detail stays in the logs, not the response body.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "request failed");
            "internal error".to_string()
        } else {
            self.0.to_string()
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_errors_map_to_expected_statuses() {
        let cases = [
            (BoardError::NotFound("post".into()), StatusCode::NOT_FOUND),
            (BoardError::Forbidden("post".into()), StatusCode::FORBIDDEN),
            (BoardError::Unauthorized, StatusCode::UNAUTHORIZED),
            (BoardError::AlreadyVoted, StatusCode::CONFLICT),
            (BoardError::Expired, StatusCode::GONE),
            (BoardError::InvalidOption(7), StatusCode::BAD_REQUEST),
            (BoardError::Invalid("bad".into()), StatusCode::BAD_REQUEST),
            (
                BoardError::Store("backend".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(status_of(&err), expected, "{err}");
        }
    }
}
