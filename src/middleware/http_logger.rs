use axum::{
    body::Body,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use std::time::Instant;

use crate::config::APP_CONFIG;

const REDACTED: &str = "[REDACTED]";

const SENSITIVE_FIELDS: [&str; 6] = [
    "password",
    "token",
    "access_token",
    "jwt_secret",
    "secret",
    "authorization",
];

fn should_ignore_path(path: &str) -> bool {
    matches!(path, "/health" | "/health/")
        || path.starts_with("/swagger-ui")
        || path.starts_with("/api-docs")
}

fn is_content_type(headers: &HeaderMap, prefix: &str) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .map(|ct| ct.starts_with(prefix))
        .unwrap_or(false)
}

fn redact_json(mut value: Value) -> Value {
    match value {
        Value::Object(ref mut map) => {
            for (key, field) in map.iter_mut() {
                if SENSITIVE_FIELDS.contains(&key.to_ascii_lowercase().as_str()) {
                    *field = Value::String(REDACTED.to_string());
                } else if field.is_object() || field.is_array() {
                    *field = redact_json(field.take());
                }
            }
        }
        Value::Array(ref mut items) => {
            for item in items.iter_mut() {
                *item = redact_json(item.take());
            }
        }
        _ => {}
    }
    value
}

fn redact_headers(headers: &HeaderMap) -> HeaderMap {
    let mut filtered = headers.clone();
    for name in [header::AUTHORIZATION, header::COOKIE, header::SET_COOKIE] {
        if filtered.contains_key(&name) {
            filtered.insert(name, http::HeaderValue::from_static(REDACTED));
        }
    }
    filtered
}

fn json_or_empty(bytes: &Bytes) -> Value {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(json) => redact_json(json),
        Err(_) => Value::Object(serde_json::Map::new()),
    }
}

pub async fn http_logger(
    req: Request,
    next: Next,
) -> std::result::Result<impl IntoResponse, (StatusCode, String)> {
    let start_time = Instant::now();

    let method = req.method().clone();
    let uri = req.uri().clone();
    let path = uri.path().to_string();

    if should_ignore_path(&path) || method == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let req_headers = req.headers().clone();
    let x_request_id = req_headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    // Multipart uploads carry files, never buffer them into the log
    let is_upload = is_content_type(&req_headers, "multipart/form-data");

    let (req, req_body) = if is_upload {
        (req, Value::Object(serde_json::Map::new()))
    } else {
        let (parts, body) = req.into_parts();
        let bytes = buffer_body("request", body).await?;
        let json = json_or_empty(&bytes);
        (Request::from_parts(parts, Body::from(bytes)), json)
    };

    let mut response = next.run(req).await;
    let latency = start_time.elapsed();
    let status = response.status();

    let log_response_body = matches!(method, Method::POST | Method::PUT | Method::PATCH)
        && is_content_type(response.headers(), "application/json");
    let res_body = if log_response_body {
        let (parts, body) = response.into_parts();
        let bytes = buffer_body("response", body).await?;
        let json = json_or_empty(&bytes);
        response = Response::from_parts(parts, Body::from(bytes));
        json
    } else {
        Value::Object(serde_json::Map::new())
    };

    let filtered_req_headers = redact_headers(&req_headers);

    tracing::info!(
        method = ?method,
        path = %path,
        query = uri.query().unwrap_or(""),
        x_request_id = %x_request_id,
        req_headers = ?filtered_req_headers,
        req_body = %req_body,
        status = status.as_u16(),
        latency_ms = latency.as_millis(),
        res_body = %res_body,
        app_env = %APP_CONFIG.app_env,
        "HTTP request completed"
    );

    Ok(response)
}

pub async fn buffer_body<B>(
    direction: &str,
    body: B,
) -> std::result::Result<Bytes, (StatusCode, String)>
where
    B: BodyExt,
    B::Error: std::fmt::Display,
{
    match body.collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(err) => Err((
            StatusCode::BAD_REQUEST,
            format!("failed to read {direction} body: {err}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn redacts_nested_credentials() {
        let body = json!({
            "username": "mwalimu",
            "password": "hunter2",
            "nested": { "access_token": "abc", "keep": 1 },
            "list": [{ "token": "x" }]
        });

        let redacted = redact_json(body);

        assert_eq!(redacted["username"], "mwalimu");
        assert_eq!(redacted["password"], REDACTED);
        assert_eq!(redacted["nested"]["access_token"], REDACTED);
        assert_eq!(redacted["nested"]["keep"], 1);
        assert_eq!(redacted["list"][0]["token"], REDACTED);
    }

    #[test]
    fn health_and_docs_are_not_logged() {
        assert!(should_ignore_path("/health"));
        assert!(should_ignore_path("/swagger-ui/index.html"));
        assert!(should_ignore_path("/api-docs/openapi.json"));
        assert!(!should_ignore_path("/lesson/add/"));
    }
}
