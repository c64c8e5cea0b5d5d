use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::middleware::validate::field_text;

/// Raw JSON request body, read without enforcing a content type.
///
/// An empty body reads as `{}` so the validation stage can report the missing
/// fields instead of the request failing on the transport.
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::validation(format!("Unable to read request body: {}", e)))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(Value::Object(Map::new())));
        }

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| ApiError::validation(format!("Malformed JSON body: {}", e)))
    }
}

/// Deserialize an already-validated body into its typed form.
///
/// Top-level numbers and booleans are stored as the text the validation
/// stage checked, so `"phoneNumber": 5551234` becomes `"5551234"`.
pub fn from_body<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(scalars_as_text(body))
        .map_err(|e| ApiError::validation(format!("Invalid request body: {}", e)))
}

fn scalars_as_text(body: Value) -> Value {
    let Value::Object(fields) = body else {
        return body;
    };

    let fields = fields
        .into_iter()
        .map(|(name, value)| match value {
            Value::Number(_) | Value::Bool(_) => {
                let text = field_text(Some(&value));
                (name, Value::String(text))
            }
            other => (name, other),
        })
        .collect();
    Value::Object(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;
    use serde_json::json;

    async fn extract(body: &'static str) -> Result<Value, ApiError> {
        let request = axum::http::Request::builder().uri("/").body(Body::from(body)).unwrap();
        JsonBody::from_request(request, &()).await.map(|JsonBody(v)| v)
    }

    #[tokio::test]
    async fn empty_body_reads_as_empty_object() {
        assert_eq!(extract("").await.unwrap(), json!({}));
        assert_eq!(extract("  \n").await.unwrap(), json!({}));
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        let err = extract("{\"email\":").await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.message().starts_with("Malformed JSON body"));
    }

    #[tokio::test]
    async fn parses_json_without_content_type() {
        assert_eq!(extract("{\"a\":1}").await.unwrap(), json!({ "a": 1 }));
    }

    #[test]
    fn typed_conversion_failure_is_400() {
        #[derive(Debug, Deserialize)]
        struct Named {
            #[allow(dead_code)]
            name: String,
        }
        let err = from_body::<Named>(json!({ "name": ["John"] })).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn scalars_convert_to_the_text_validation_saw() {
        #[derive(Debug, Deserialize)]
        struct Fields {
            phone: String,
            flag: String,
            missing: Option<String>,
        }
        let fields: Fields = from_body(json!({ "phone": 1234567890, "flag": true, "missing": null })).unwrap();
        assert_eq!(fields.phone, "1234567890");
        assert_eq!(fields.flag, "true");
        assert_eq!(fields.missing, None);
    }
}
