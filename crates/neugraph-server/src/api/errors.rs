//! Error handling for the Neugraph Server API
//!
//! Maps store results onto HTTP status codes with a standard error body.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use neugraph_store::GraphError;
use serde_json::json;
use tracing::{debug, error};

/// API Error type for returning standard error responses
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or unreadable request body (400)
    BadRequest(String),
    /// Wrapped store error
    Graph(GraphError),
}

impl From<GraphError> for ApiError {
    fn from(err: GraphError) -> Self {
        ApiError::Graph(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid JSON: {}", rejection.body_text()))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::Graph(err) => write!(f, "{}", err),
        }
    }
}

impl ApiError {
    /// Status code and stable error code for this error
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "ERR_BAD_REQUEST"),
            ApiError::Graph(err) => match err {
                GraphError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "ERR_INVALID_INPUT"),
                GraphError::InvalidGraph(_) => (StatusCode::BAD_REQUEST, "ERR_INVALID_GRAPH"),
                GraphError::NotFound(_) => (StatusCode::NOT_FOUND, "ERR_NOT_FOUND"),
                GraphError::Conflict(_) => (StatusCode::CONFLICT, "ERR_CONFLICT"),
                GraphError::Io { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "ERR_IO"),
                GraphError::Decode(_) => (StatusCode::INTERNAL_SERVER_ERROR, "ERR_DECODE"),
                GraphError::Encode(_) => (StatusCode::INTERNAL_SERVER_ERROR, "ERR_ENCODE"),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();
        let message = match &self {
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Graph(err) => err.to_string(),
        };

        match &self {
            ApiError::Graph(err) if err.is_persistence_error() => {
                error!(error_code, "Request failed: {}", message)
            }
            ApiError::Graph(err) if err.is_client_error() => {
                debug!(error_code, "Request rejected: {}", message)
            }
            _ => debug!(error_code, "Bad request: {}", message),
        }

        let body = Json(json!({
            "error": message,
            "errorDetails": {
                "errorCode": error_code,
                "errorMessage": message,
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neugraph_store::Violation;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (GraphError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (
                GraphError::InvalidGraph(Violation::DuplicateNodeId { id: "A".into() }),
                StatusCode::BAD_REQUEST,
            ),
            (GraphError::NotFound("Node 'A'".into()), StatusCode::NOT_FOUND),
            (GraphError::Conflict("dup".into()), StatusCode::CONFLICT),
            (
                GraphError::Io {
                    path: "g.json".into(),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "disk"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status_and_code().0, expected);
        }
    }
}
