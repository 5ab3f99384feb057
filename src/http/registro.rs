use std::time::Instant;

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    Json,
};
use serde_json::{json, Value};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::registry::{RegistrationRequest, RegistrationResponse};

pub const CREATED_MESSAGE: &str = "Registro exitoso";

/// `POST /registro`
pub async fn registro_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<RegistrationResponse>), ApiError> {
    let start = Instant::now();

    let request = decode_body(&headers, &body).inspect_err(|_| {
        metrics::record_registration("malformed", start);
    })?;

    match state.service.submit_registration(request).await {
        Ok(usuario) => {
            tracing::info!(id = %usuario.id, seccion = %usuario.seccion, "Registration created");
            metrics::record_registration("created", start);
            Ok((
                StatusCode::CREATED,
                Json(RegistrationResponse {
                    mensaje: CREATED_MESSAGE.to_string(),
                    usuario,
                }),
            ))
        }
        Err(e) => {
            metrics::record_registration(e.outcome(), start);
            Err(e.into())
        }
    }
}

/// A request without a JSON content type, or with an empty body, carries no
/// fields and is answered as missing fields. A JSON body must be an object.
fn decode_body(headers: &HeaderMap, body: &[u8]) -> Result<RegistrationRequest, ApiError> {
    if !is_json(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RegistrationRequest::default());
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|e| ApiError::Malformed(e.to_string()))?;
    if !value.is_object() {
        return Err(ApiError::Malformed(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    }
    serde_json::from_value(value).map_err(|e| ApiError::Malformed(e.to_string()))
}

/// `application/json` or any `+json` media type.
fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// `GET /health`
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "store": state.service.store().backend(),
    }))
}
