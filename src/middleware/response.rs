use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

/// Successful response. The payload's fields are merged into an envelope
/// carrying `"success": true`.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub body: T,
    pub status_code: Option<StatusCode>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful API response with default 200 status
    pub fn success(body: T) -> Self {
        Self {
            body,
            status_code: None,
        }
    }

    /// Create an API response with custom status code
    pub fn with_status(body: T, status_code: StatusCode) -> Self {
        Self {
            body,
            status_code: Some(status_code),
        }
    }

    /// Create a 201 Created response
    pub fn created(body: T) -> Self {
        Self::with_status(body, StatusCode::CREATED)
    }
}

/// `{ "data": ... }`
#[derive(Debug, Serialize)]
pub struct DataBody<T: Serialize> {
    pub data: T,
}

/// `{ "token": ... }`
#[derive(Debug, Serialize)]
pub struct TokenBody {
    pub token: String,
}

/// `{ "message": ... }`
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl<T: Serialize> ApiResponse<DataBody<T>> {
    pub fn data(data: T) -> Self {
        Self::success(DataBody { data })
    }
}

impl ApiResponse<MessageBody> {
    pub fn message(message: impl Into<String>) -> Self {
        Self::success(MessageBody {
            message: message.into(),
        })
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);

        let mut envelope = match serde_json::to_value(&self.body) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                let mut map = serde_json::Map::new();
                map.insert("data".to_string(), other);
                map
            }
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "error": crate::error::GENERIC_SERVER_ERROR
                    })),
                )
                    .into_response();
            }
        };
        envelope.insert("success".to_string(), Value::Bool(true));

        (status, Json(Value::Object(envelope))).into_response()
    }
}

// Convenience type alias
pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
